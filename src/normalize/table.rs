//! Column unification and row building: merge per-item flat records into the
//! final column set and row matrix.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::normalize::classify::classify;
use crate::normalize::flatten::{flatten, FlatRecord};
use crate::normalize::types::{to_cell_scalar, Dataset, Table, VALUE_KEY};

impl Table {
    /// Normalize a raw API payload into a table in one step.
    ///
    /// This is the whole core pipeline: classify, flatten, unify. It is a
    /// pure function of the payload and cannot fail.
    pub fn from_value(payload: Value) -> Table {
        Table::from_dataset(classify(payload))
    }

    /// Build the table for an already-classified dataset.
    pub fn from_dataset(dataset: Dataset) -> Table {
        match dataset {
            Dataset::PreTabulated { headers, rows } => Table {
                columns: headers.iter().map(header_label).collect(),
                rows,
            },
            Dataset::Objects(items) => from_objects(items),
            Dataset::Arrays(items) => from_arrays(items),
            Dataset::Scalars(items) => from_scalars(items),
        }
    }
}

/// Flatten every object and take the union of record keys in first-appearance
/// order. Rows are built by per-column lookup, null when a record lacks a key.
fn from_objects(items: Vec<Map<String, Value>>) -> Table {
    let records: Vec<FlatRecord> = items
        .into_iter()
        .map(|fields| flatten(&Value::Object(fields)))
        .collect();

    let mut columns: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for record in &records {
        for key in record.keys() {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Table { columns, rows }
}

/// Synthesize `col_1..col_N` for the widest item and pad every row with null
/// up to that width.
fn from_arrays(items: Vec<Vec<Value>>) -> Table {
    let width = items.iter().map(Vec::len).max().unwrap_or(0);
    let columns = (1..=width).map(|i| format!("col_{i}")).collect();

    let rows = items
        .into_iter()
        .map(|item| {
            let mut row: Vec<Value> = item.iter().map(to_cell_scalar).collect();
            row.resize(width, Value::Null);
            row
        })
        .collect();

    Table { columns, rows }
}

/// Single-column fallback for mixed or scalar datasets.
fn from_scalars(items: Vec<Value>) -> Table {
    let rows = items
        .iter()
        .map(|item| vec![to_cell_scalar(item)])
        .collect();

    Table {
        columns: vec![VALUE_KEY.to_string()],
        rows,
    }
}

/// Display label for a pre-tabulated header cell. String headers pass
/// through verbatim; anything else is labeled with its compact JSON text.
fn header_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uniform_flat_objects() {
        let table = Table::from_value(json!([
            {"id": 1, "name": "A"},
            {"id": 2, "name": "B"}
        ]));

        assert_eq!(table.columns, vec!["id", "name"]);
        assert_eq!(
            table.rows,
            vec![vec![json!(1), json!("A")], vec![json!(2), json!("B")]]
        );
    }

    #[test]
    fn test_divergent_keys_union_with_nulls() {
        let table = Table::from_value(json!([
            {"id": 1, "addr": {"city": "X"}},
            {"id": 2}
        ]));

        assert_eq!(table.columns, vec!["id", "addr.city"]);
        assert_eq!(table.rows[0], vec![json!(1), json!("X")]);
        assert_eq!(table.rows[1], vec![json!(2), Value::Null]);
    }

    #[test]
    fn test_new_keys_append_after_first_appearance() {
        let table = Table::from_value(json!([
            {"a": 1},
            {"b": 2, "a": 3}
        ]));

        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec![json!(1), Value::Null]);
        assert_eq!(table.rows[1], vec![json!(3), json!(2)]);
    }

    #[test]
    fn test_array_items_get_synthesized_columns() {
        let table = Table::from_value(json!([[1, 2, 3], [4, 5]]));

        assert_eq!(table.columns, vec!["col_1", "col_2", "col_3"]);
        assert_eq!(
            table.rows,
            vec![
                vec![json!(1), json!(2), json!(3)],
                vec![json!(4), json!(5), Value::Null]
            ]
        );
    }

    #[test]
    fn test_mixed_scalars_collapse_to_valor() {
        let table = Table::from_value(json!([1, "two", 3.5]));

        assert_eq!(table.columns, vec!["valor"]);
        assert_eq!(
            table.rows,
            vec![vec![json!(1)], vec![json!("two")], vec![json!(3.5)]]
        );
    }

    #[test]
    fn test_envelope_resolution_via_data_key() {
        let table = Table::from_value(json!({"data": [{"x": 1}]}));

        assert_eq!(table.columns, vec!["x"]);
        assert_eq!(table.rows, vec![vec![json!(1)]]);
    }

    #[test]
    fn test_pre_tabulated_round_trip() {
        let table = Table::from_value(json!({
            "headers": ["a", "b"],
            "rows": [[1, "x"], [2, "y"]]
        }));

        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(
            table.rows,
            vec![vec![json!(1), json!("x")], vec![json!(2), json!("y")]]
        );
    }

    #[test]
    fn test_idempotence() {
        let payload = json!([{"id": 1, "tags": ["a"]}, {"id": 2}]);

        let first = Table::from_value(payload.clone());
        let second = Table::from_value(payload);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_dataset_is_trivial_table() {
        let table = Table::from_value(json!([]));

        assert!(table.is_empty());
    }

    #[test]
    fn test_single_object_wraps_as_one_row() {
        let table = Table::from_value(json!({"id": 9, "name": "solo"}));

        assert_eq!(table.columns, vec!["id", "name"]);
        assert_eq!(table.rows, vec![vec![json!(9), json!("solo")]]);
    }

    #[test]
    fn test_mixed_dataset_serializes_container_items() {
        let table = Table::from_value(json!([{"id": 1}, 2]));

        assert_eq!(table.columns, vec!["valor"]);
        assert_eq!(table.rows[0], vec![json!("{\"id\":1}")]);
        assert_eq!(table.rows[1], vec![json!(2)]);
    }

    #[test]
    fn test_nested_containers_inside_array_items_are_serialized() {
        let table = Table::from_value(json!([[1, {"a": 2}], [[3]]]));

        assert_eq!(table.columns, vec!["col_1", "col_2"]);
        assert_eq!(table.rows[0], vec![json!(1), json!("{\"a\":2}")]);
        assert_eq!(table.rows[1], vec![json!("[3]"), Value::Null]);
    }

    #[test]
    fn test_every_row_matches_column_count() {
        let table = Table::from_value(json!([
            {"a": 1},
            {"b": {"c": 2}},
            {"a": 3, "d": [4]}
        ]));

        for row in &table.rows {
            assert_eq!(row.len(), table.columns.len());
        }
    }
}
