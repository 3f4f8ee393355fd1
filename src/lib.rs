//! # Sheetpress - JSON collections to spreadsheets
//!
//! A small library for fetching arbitrarily-shaped JSON collections from an
//! HTTP API and pressing each into a one-worksheet `.xlsx` file of flattened
//! rows and columns.
//!
//! ## Modules
//!
//! - **normalize**: the core - derive a stable column set and row matrix
//!   from heterogeneous, nested, possibly irregular JSON
//! - **fetch**: authenticated blocking GET/POST helper returning decoded JSON
//! - **sheet**: render a table as a workbook (header row, freeze, autofilter,
//!   column widths)
//! - **error**: `FetchError` / `WriteError` hierarchy
//!
//! ## Quick Start
//!
//! ### Normalizing a payload
//!
//! ```rust
//! use sheetpress::Table;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "data": [
//!         {"id": 1, "name": "Alice", "addr": {"city": "X"}},
//!         {"id": 2, "name": "Bob"}
//!     ]
//! });
//!
//! let table = Table::from_value(payload);
//!
//! assert_eq!(table.columns, vec!["id", "name", "addr.city"]);
//! assert_eq!(table.rows.len(), 2);
//! ```
//!
//! ### Exporting to disk
//!
//! ```rust,no_run
//! use sheetpress::export_to_xlsx;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), sheetpress::WriteError> {
//! let payload = json!([{"id": 1, "name": "Alice"}]);
//! let path = export_to_xlsx(payload, "outputs/users")?;
//! // path is "outputs/users.xlsx"
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde_json::Value;

pub mod error;
pub mod fetch;
pub mod normalize;
pub mod sheet;

// Re-export commonly used types for convenience
pub use error::{ExportError, FetchError, WriteError};
pub use fetch::{ApiClient, ApiConfig};
pub use normalize::{classify, flatten, Dataset, FlatRecord, Table};
pub use sheet::write_xlsx;

/// Main entry point: normalize a decoded JSON payload and write it out as a
/// spreadsheet. Returns the path actually written (`.xlsx` appended when
/// missing).
pub fn export_to_xlsx(payload: Value, path: impl AsRef<Path>) -> Result<PathBuf, WriteError> {
    let table = Table::from_value(payload);
    sheet::write_xlsx(&table, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_end_to_end_export() {
        let dir = tempfile::tempdir().unwrap();
        let payload = json!({
            "data": [
                {"id": 1, "name": "A", "tags": ["x"]},
                {"id": 2, "name": "B", "addr": {"city": "Y"}}
            ]
        });

        let path = export_to_xlsx(payload, dir.path().join("Entities")).unwrap();

        assert!(path.is_file());
        assert!(path.to_string_lossy().ends_with("Entities.xlsx"));
    }
}
