//! Tabular normalization - convert arbitrary JSON payloads into a stable
//! column set plus row matrix.
//!
//! This is the core of the crate and the only part with real decisions:
//! given heterogeneous, nested, possibly irregular JSON, deterministically
//! derive a table ready for spreadsheet rendering. The pipeline is
//! classify ([`classify`]) → flatten ([`flatten`]) → unify
//! ([`Table::from_dataset`]), and it is total: every decoded JSON value
//! normalizes without error.

pub mod classify;
pub mod flatten;
pub mod table;
pub mod types;

pub use classify::classify;
pub use flatten::{flatten, FlatRecord};
pub use types::{to_cell_scalar, Dataset, Table, LIST_KEY, VALUE_KEY};
