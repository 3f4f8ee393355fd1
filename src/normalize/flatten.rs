//! Flattening of one dataset item into a single-level record.
//!
//! Nested objects collapse into dotted-path keys (`addr.city`); embedded
//! arrays are kept intact as JSON text under their own key rather than
//! exploded into columns. The resulting key order drives the first-appearance
//! column order downstream, so it must stay deterministic: keys appear in
//! depth-first declaration order.

use serde_json::{Map, Value};

use crate::normalize::types::{to_cell_scalar, LIST_KEY, VALUE_KEY};

/// One item's fields reduced to an ordered dotted-path → scalar mapping.
pub type FlatRecord = Map<String, Value>;

/// Flatten one dataset item into a [`FlatRecord`].
///
/// Traversal uses an explicit work list seeded with the whole item. Children
/// of an object are pushed in reverse so that pop order equals the object's
/// own key order. An item that is itself an array records under [`LIST_KEY`];
/// a bare scalar records under [`VALUE_KEY`]. This never fails: every JSON
/// value reduces to at least one spreadsheet-safe cell.
pub fn flatten(item: &Value) -> FlatRecord {
    let mut flat = FlatRecord::new();
    let mut work: Vec<(Option<String>, &Value)> = vec![(None, item)];

    while let Some((prefix, value)) = work.pop() {
        match value {
            Value::Object(fields) => {
                for (key, child) in fields.iter().rev() {
                    let joined = match &prefix {
                        Some(parent) => format!("{parent}.{key}"),
                        None => key.clone(),
                    };
                    work.push((Some(joined), child));
                }
            }
            Value::Array(_) => {
                let key = prefix.unwrap_or_else(|| LIST_KEY.to_string());
                flat.insert(key, Value::String(value.to_string()));
            }
            scalar => {
                let key = prefix.unwrap_or_else(|| VALUE_KEY.to_string());
                flat.insert(key, to_cell_scalar(scalar));
            }
        }
    }

    flat
}
