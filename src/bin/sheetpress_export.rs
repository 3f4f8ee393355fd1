//! sheetpress-export: Fetch entity collections and export each as a spreadsheet
//!
//! Usage:
//!   # Export three entity collections into ./outputs
//!   sheetpress-export --app-id 68f5182879c5fe5a86e409ee Category Transaction BankAccount
//!
//!   # Different API root and output directory
//!   sheetpress-export --app-id ID --base-url https://api.example.com --output-dir ./exports Category
//!
//!   # Normalize a local JSON file instead of fetching
//!   sheetpress-export --input response.json --output-dir ./outputs
//!
//! The API key is read from the BASE44_API_KEY environment variable (a .env
//! file is honored). A failure on one entity is reported and the remaining
//! entities are still attempted; the exit code is non-zero if any failed.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use sheetpress::fetch::DEFAULT_BASE_URL;
use sheetpress::{export_to_xlsx, ApiClient, ApiConfig, ExportError};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sheetpress-export")]
#[command(about = "Export JSON entity collections into .xlsx files", long_about = None)]
struct Args {
    /// Entity names to export, one spreadsheet per entity
    #[arg(value_name = "ENTITY", required_unless_present = "input")]
    entities: Vec<String>,

    /// Application id used in the apps/{id}/entities/{Entity} path
    #[arg(long, required_unless_present = "input")]
    app_id: Option<String>,

    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory for the generated spreadsheets
    #[arg(long, short = 'o', default_value = "outputs")]
    output_dir: PathBuf,

    /// Normalize a local JSON file instead of fetching; the output file is
    /// named after the input's stem
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(input) = &args.input {
        let path = export_local_file(input, &args.output_dir)?;
        println!("{}", path.display());
        return Ok(());
    }

    let app_id = args
        .app_id
        .context("--app-id is required when fetching from the API")?;
    let config = ApiConfig::from_env(&args.base_url)?;
    let client = ApiClient::new(config)?;

    let mut failed = 0usize;
    for entity in &args.entities {
        match export_entity(&client, &app_id, entity, &args.output_dir) {
            Ok(path) => println!("{}", path.display()),
            Err(err) => {
                failed += 1;
                eprintln!("Failed to export {entity}: {err}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} entities failed", args.entities.len());
    }

    Ok(())
}

/// Fetch one entity collection and write it as `{output_dir}/{entity}.xlsx`.
fn export_entity(
    client: &ApiClient,
    app_id: &str,
    entity: &str,
    output_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let payload = client.fetch_entities(app_id, entity)?;
    let path = export_to_xlsx(payload, output_dir.join(entity))?;
    Ok(path)
}

/// Normalize a JSON file from disk, named after the input's stem.
fn export_local_file(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let payload: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON from {}", input.display()))?;

    let name = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("export");

    let path = export_to_xlsx(payload, output_dir.join(name))?;
    Ok(path)
}
