//! Spreadsheet serialization: render a [`Table`] as a one-worksheet `.xlsx`
//! workbook.
//!
//! Mechanics only - header row, frozen panes, autofilter, column widths.
//! Cell values go through the same scalar conversion the flattener applies,
//! because pre-tabulated payloads bypass the flattener entirely and can
//! carry anything.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use serde_json::Value;

use crate::error::WriteError;
use crate::normalize::{to_cell_scalar, Table};

/// Name of the single worksheet in every generated workbook.
pub const SHEET_NAME: &str = "Dados";

// Column display width: max string length of header and cells plus a small
// margin, clamped to [MIN_COL_WIDTH, MAX_COL_WIDTH].
const MIN_COL_WIDTH: usize = 10;
const MAX_COL_WIDTH: usize = 60;
const COL_MARGIN: usize = 2;

/// Write `table` to `path`, appending `.xlsx` when missing and creating
/// parent directories as needed. Returns the path actually written.
pub fn write_xlsx(table: &Table, path: impl AsRef<Path>) -> Result<PathBuf, WriteError> {
    let path = resolve_output_path(path.as_ref())?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let mut widths: Vec<usize> = table
        .columns
        .iter()
        .map(|name| name.chars().count())
        .collect();

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (row_idx, row) in table.rows.iter().enumerate() {
        // ragged pre-tabulated rows: short rows are padded with blanks,
        // cells beyond the header width are dropped
        for col in 0..table.columns.len() {
            let raw = row.get(col).unwrap_or(&Value::Null);
            let cell = to_cell_scalar(raw);

            let width = display_width(&cell);
            if width > widths[col] {
                widths[col] = width;
            }

            write_cell(worksheet, (row_idx + 1) as u32, col as u16, &cell)?;
        }
    }

    if !table.columns.is_empty() {
        worksheet.autofilter(
            0,
            0,
            table.rows.len() as u32,
            (table.columns.len() - 1) as u16,
        )?;

        for (col, width) in widths.iter().enumerate() {
            let clamped = MIN_COL_WIDTH.max((width + COL_MARGIN).min(MAX_COL_WIDTH));
            worksheet.set_column_width(col as u16, clamped as f64)?;
        }
    }

    workbook.save(&path)?;
    Ok(path)
}

/// Append `.xlsx` (case-insensitive check) and create missing parent
/// directories.
fn resolve_output_path(path: &Path) -> Result<PathBuf, WriteError> {
    let has_xlsx_ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);

    let path = if has_xlsx_ext {
        path.to_path_buf()
    } else {
        let mut with_ext = path.as_os_str().to_os_string();
        with_ext.push(".xlsx");
        PathBuf::from(with_ext)
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    Ok(path)
}

/// Write one already-normalized cell with the matching typed write call.
/// Null leaves the cell blank, as the autofilter treats blanks as empty.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Value,
) -> Result<(), XlsxError> {
    match cell {
        Value::Null => {}
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) => match n.as_f64() {
            Some(number) => {
                worksheet.write_number(row, col, number)?;
            }
            None => {
                worksheet.write_string(row, col, n.to_string())?;
            }
        },
        Value::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

/// Displayed length of a cell, mirroring the width measurement applied to
/// headers. Blank cells contribute nothing.
fn display_width(cell: &Value) -> usize {
    match cell {
        Value::Null => 0,
        Value::Bool(b) => {
            if *b {
                4
            } else {
                5
            }
        }
        Value::Number(n) => n.to_string().chars().count(),
        Value::String(s) => s.chars().count(),
        other => other.to_string().chars().count(),
    }
}
