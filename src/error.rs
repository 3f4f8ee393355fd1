//! Error types for the export pipeline.
//!
//! Two failure domains are kept distinct so callers can tell a fetch that
//! never reached the normalizer from a spreadsheet that failed to hit disk:
//!
//! - [`FetchError`] - HTTP/credential failures before normalization
//! - [`WriteError`] - filesystem/workbook failures after normalization
//! - [`ExportError`] - top-level union for full fetch-to-file runs
//!
//! Normalization itself has no error type: it is total over decoded JSON.
//! Error conversion is automatic via `From` implementations, allowing `?`
//! to work across component boundaries.

use thiserror::Error;

/// Errors raised while fetching an entity collection from the API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API key environment variable is not set.
    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(&'static str),

    /// The request could not be sent or the connection failed.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The response body was not valid JSON.
    #[error("failed to decode JSON response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },
}

/// Errors raised while writing a spreadsheet file.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Creating the output directory failed.
    #[error("failed to prepare output path: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be assembled or saved.
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Top-level error for a full fetch-normalize-write run on one entity.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
