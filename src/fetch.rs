//! Authenticated HTTP helper for pulling entity collections.
//!
//! A thin, synchronous wrapper: one GET/POST helper pair plus the
//! `apps/{app_id}/entities/{Entity}` convenience path. The response body is
//! decoded as JSON and handed to the normalizer unmodified. Pagination and
//! retry policy are deliberately out of scope.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::error::FetchError;

/// Default API root, overridable per client.
pub const DEFAULT_BASE_URL: &str = "https://app.base44.com/api";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "BASE44_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the remote API. Always passed explicitly; there
/// is no process-wide state.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Read the API key from the environment (a `.env` file is honored when
    /// present). Fails before any request is attempted if the key is unset.
    pub fn from_env(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let _ = dotenvy::dotenv();

        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| FetchError::MissingApiKey(API_KEY_ENV))?;

        Ok(ApiConfig::new(base_url, api_key))
    }
}

/// Blocking API client. One instance per export run; requests are issued
/// sequentially.
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(ApiClient { config, http })
    }

    /// GET `{base_url}/{path}`, optionally with query parameters, and decode
    /// the body as JSON.
    pub fn get(&self, path: &str, query: Option<&[(&str, &str)]>) -> Result<Value, FetchError> {
        let url = self.url_for(path);
        let mut request = self.http.get(&url);
        if let Some(pairs) = query {
            request = request.query(pairs);
        }
        self.execute(request, url)
    }

    /// POST `{base_url}/{path}` with a JSON body and decode the response.
    pub fn post(&self, path: &str, body: &Value) -> Result<Value, FetchError> {
        let url = self.url_for(path);
        let request = self.http.post(&url).json(body);
        self.execute(request, url)
    }

    /// Fetch one entity collection: GET `apps/{app_id}/entities/{entity}`.
    pub fn fetch_entities(&self, app_id: &str, entity: &str) -> Result<Value, FetchError> {
        self.get(&format!("apps/{app_id}/entities/{entity}"), None)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn execute(
        &self,
        request: reqwest::blocking::RequestBuilder,
        url: String,
    ) -> Result<Value, FetchError> {
        let response = request
            .header("api_key", &self.config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url });
        }

        response
            .json()
            .map_err(|source| FetchError::Decode { url, source })
    }
}
