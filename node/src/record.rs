//! Output records and response normalisation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which input item a record derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One unit of node output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub json: Map<String, Value>,
    pub paired_item: PairedItem,
}

impl OutputRecord {
    pub fn new(json: Map<String, Value>, item_index: usize) -> Self {
        Self {
            json,
            paired_item: PairedItem { item: item_index },
        }
    }

    /// `{ error: message }` paired with `item_index`.
    pub fn error(message: impl Into<String>, item_index: usize) -> Self {
        let mut json = Map::new();
        json.insert("error".to_string(), Value::String(message.into()));
        Self::new(json, item_index)
    }
}

fn success() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("success".to_string(), Value::Bool(true));
    map
}

fn wrap(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

/// Flatten an API result into record objects.
///
/// Arrays yield one object per element, objects yield themselves and scalars
/// are wrapped as `{value}`. No body, `null` and `[]` yield a single
/// `{success: true}`, so the result is never empty.
pub fn normalise_to_objects(value: Option<Value>) -> Vec<Map<String, Value>> {
    match value {
        None | Some(Value::Null) => vec![success()],
        Some(Value::Array(items)) if items.is_empty() => vec![success()],
        Some(Value::Array(items)) => items.into_iter().map(wrap).collect(),
        Some(other) => vec![wrap(other)],
    }
}

/// Records for one item's result.
pub fn to_records(value: Option<Value>, item_index: usize) -> Vec<OutputRecord> {
    normalise_to_objects(value)
        .into_iter()
        .map(|json| OutputRecord::new(json, item_index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn objects(value: Value) -> Vec<Value> {
        normalise_to_objects(Some(value)).into_iter().map(Value::Object).collect()
    }

    #[test]
    fn array_flattens_to_elements() {
        assert_eq!(
            objects(json!([{ "id": 1 }, { "id": 2 }, 3])),
            vec![json!({ "id": 1 }), json!({ "id": 2 }), json!({ "value": 3 })]
        );
    }

    #[test]
    fn object_stays_single() {
        assert_eq!(objects(json!({ "id": "x" })), vec![json!({ "id": "x" })]);
    }

    #[test]
    fn scalar_is_wrapped() {
        assert_eq!(objects(json!(10002)), vec![json!({ "value": 10002 })]);
        assert_eq!(objects(json!("ok")), vec![json!({ "value": "ok" })]);
    }

    #[test]
    fn nothing_becomes_success() {
        let expected = vec![success()];
        assert_eq!(normalise_to_objects(None), expected);
        assert_eq!(normalise_to_objects(Some(Value::Null)), expected);
        assert_eq!(normalise_to_objects(Some(json!([]))), expected);
    }

    #[test]
    fn normalising_is_idempotent() {
        let input = Some(json!([{ "id": 1 }, "x", null]));
        let once = normalise_to_objects(input.clone());
        let twice = normalise_to_objects(input);
        assert_eq!(once, twice);

        // Feeding the output back in changes nothing either.
        let again = normalise_to_objects(Some(Value::Array(
            once.iter().cloned().map(Value::Object).collect(),
        )));
        assert_eq!(again, once);
    }

    #[test]
    fn record_serializes_with_paired_item() {
        let record = OutputRecord::error("API Error", 4);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "json": { "error": "API Error" }, "pairedItem": { "item": 4 } })
        );
    }
}
