//! Input classification: decide which normalization strategy applies to a
//! raw API payload.
//!
//! Every decoded JSON value has a defined classification; degenerate inputs
//! (empty array, bare scalar) still produce a valid, possibly trivial,
//! [`Dataset`]. Nothing in this module can fail.

use serde_json::Value;

use crate::normalize::types::Dataset;

/// Envelope keys probed, in order, for the item list when the payload is an
/// object rather than a bare array.
const LIST_KEYS: [&str; 4] = ["data", "results", "items", "value"];

/// Classify a payload into the [`Dataset`] shape that drives normalization.
///
/// An object carrying `headers` (array) and `rows` (array of arrays) is
/// treated as already tabulated and short-circuits the whole pipeline.
/// Otherwise the item list is located and dispatched on the types of its
/// items: all objects, all arrays, or the mixed/scalar fallback.
pub fn classify(value: Value) -> Dataset {
    if let Some(dataset) = as_pre_tabulated(&value) {
        return dataset;
    }
    shape_of(locate_items(value))
}

/// Detect the pre-tabulated escape hatch.
///
/// `rows` must be an array whose every element is itself an array; a payload
/// that merely has the right key names but the wrong shapes falls through to
/// ordinary classification instead of failing.
fn as_pre_tabulated(value: &Value) -> Option<Dataset> {
    let obj = value.as_object()?;
    let headers = obj.get("headers")?.as_array()?;
    let raw_rows = obj.get("rows")?.as_array()?;

    let rows: Vec<Vec<Value>> = raw_rows
        .iter()
        .map(|row| row.as_array().cloned())
        .collect::<Option<_>>()?;

    Some(Dataset::PreTabulated {
        headers: headers.clone(),
        rows,
    })
}

/// Resolve the list of top-level items to normalize.
fn locate_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(obj) => {
            for key in LIST_KEYS {
                if let Some(Value::Array(items)) = obj.get(key) {
                    return items.clone();
                }
            }
            // no recognized envelope key: the object itself is the only item
            vec![Value::Object(obj)]
        }
        scalar => vec![scalar],
    }
}

/// Dispatch on item types. An empty list counts as all-objects, producing a
/// zero-column, zero-row table.
fn shape_of(items: Vec<Value>) -> Dataset {
    if items.iter().all(Value::is_object) {
        let objects = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(fields) => Some(fields),
                _ => None,
            })
            .collect();
        return Dataset::Objects(objects);
    }

    if items.iter().all(Value::is_array) {
        let arrays = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Array(values) => Some(values),
                _ => None,
            })
            .collect();
        return Dataset::Arrays(arrays);
    }

    Dataset::Scalars(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pre_tabulated_detection() {
        let dataset = classify(json!({
            "headers": ["a", "b"],
            "rows": [[1, 2], [3, 4]]
        }));

        assert_eq!(
            dataset,
            Dataset::PreTabulated {
                headers: vec![json!("a"), json!("b")],
                rows: vec![vec![json!(1), json!(2)], vec![json!(3), json!(4)]],
            }
        );
    }

    #[test]
    fn test_pre_tabulated_with_ragged_rows_still_matches() {
        let dataset = classify(json!({"headers": ["a", "b"], "rows": [[1]]}));

        assert!(matches!(dataset, Dataset::PreTabulated { .. }));
    }

    #[test]
    fn test_non_array_row_disables_pre_tabulated_path() {
        // "rows" holding a scalar is not an array-of-arrays; the object is
        // classified as a single-item dataset instead
        let dataset = classify(json!({"headers": ["a"], "rows": [1, 2]}));

        assert!(matches!(dataset, Dataset::Objects(items) if items.len() == 1));
    }

    #[test]
    fn test_envelope_keys_are_probed_in_order() {
        let dataset = classify(json!({
            "meta": 1,
            "results": [{"x": 1}],
            "items": [{"y": 2}]
        }));

        match dataset {
            Dataset::Objects(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].get("x"), Some(&json!(1)));
            }
            other => panic!("expected Objects, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_key_with_non_array_value_is_skipped() {
        let dataset = classify(json!({"data": "not a list", "items": [{"y": 2}]}));

        match dataset {
            Dataset::Objects(items) => assert_eq!(items[0].get("y"), Some(&json!(2))),
            other => panic!("expected Objects, got {other:?}"),
        }
    }

    #[test]
    fn test_object_without_envelope_wraps_itself() {
        let dataset = classify(json!({"id": 1, "name": "A"}));

        assert!(matches!(dataset, Dataset::Objects(items) if items.len() == 1));
    }

    #[test]
    fn test_bare_array_is_used_directly() {
        let dataset = classify(json!([{"id": 1}, {"id": 2}]));

        assert!(matches!(dataset, Dataset::Objects(items) if items.len() == 2));
    }

    #[test]
    fn test_bare_scalar_wraps_as_single_item() {
        let dataset = classify(json!(42));

        assert_eq!(dataset, Dataset::Scalars(vec![json!(42)]));
    }

    #[test]
    fn test_all_arrays_dataset() {
        let dataset = classify(json!([[1, 2], [3]]));

        assert_eq!(
            dataset,
            Dataset::Arrays(vec![vec![json!(1), json!(2)], vec![json!(3)]])
        );
    }

    #[test]
    fn test_mixed_items_fall_back_to_scalars() {
        let dataset = classify(json!([{"id": 1}, 2, "three"]));

        assert!(matches!(dataset, Dataset::Scalars(items) if items.len() == 3));
    }

    #[test]
    fn test_empty_array_counts_as_objects() {
        let dataset = classify(json!([]));

        assert_eq!(dataset, Dataset::Objects(vec![]));
    }
}
