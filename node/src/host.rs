//! The workflow host, seen from the node.
//!
//! The host owns credential storage, the parameter UI and the input items; a
//! node only asks it questions through [`NodeHost`]. [`StaticHost`] answers
//! them from memory and backs both the CLI and the tests.

use datevconnect_core::Credentials;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::NodeError;

pub trait NodeHost {
    /// Credentials configured for this node instance.
    fn credentials(&self) -> Result<Credentials, NodeError>;

    /// Number of input items to process.
    fn item_count(&self) -> usize;

    /// Parameter `name` for `item_index`, falling back to the node-level
    /// default. `None` when neither is set.
    fn parameter(&self, name: &str, item_index: usize) -> Option<Value>;

    fn continue_on_fail(&self) -> bool;
}

/// Execution input as read from a file:
/// `{ "continueOnFail": bool, "parameters": {..}, "items": [{..}, ..] }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionInput {
    #[serde(default)]
    pub continue_on_fail: bool,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Per-item overrides. Missing means a single item without overrides.
    #[serde(default)]
    pub items: Option<Vec<Map<String, Value>>>,
}

#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    credentials: Option<Credentials>,
    input: ExecutionInput,
}

impl StaticHost {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            input: ExecutionInput::default(),
        }
    }

    pub fn from_input(credentials: Option<Credentials>, input: ExecutionInput) -> Self {
        Self { credentials, input }
    }

    /// Set a node-level parameter shared by every item.
    pub fn with_parameter(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.input.parameters.insert(name.to_string(), value.into());
        self
    }

    /// Append an input item. Keys of an object override node-level
    /// parameters for that item; any other value adds an item without
    /// overrides.
    pub fn with_item(mut self, item: Value) -> Self {
        let overrides = match item {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.input.items.get_or_insert_with(Vec::new).push(overrides);
        self
    }

    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.input.continue_on_fail = enabled;
        self
    }
}

impl NodeHost for StaticHost {
    fn credentials(&self) -> Result<Credentials, NodeError> {
        self.credentials
            .clone()
            .ok_or_else(|| NodeError::Configuration("No DATEVconnect credentials configured".into()))
    }

    fn item_count(&self) -> usize {
        self.input.items.as_ref().map_or(1, Vec::len)
    }

    fn parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        let item_value = self
            .input
            .items
            .as_ref()
            .and_then(|items| items.get(item_index))
            .and_then(|item| item.get(name))
            .filter(|value| !value.is_null());
        item_value
            .or_else(|| self.input.parameters.get(name))
            .cloned()
    }

    fn continue_on_fail(&self) -> bool {
        self.input.continue_on_fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials {
            host: "https://gateway.example.com".into(),
            email: "user@example.com".into(),
            password: "secret".into(),
            client_instance_id: "instance-1".into(),
        }
    }

    #[test]
    fn item_overrides_node_parameter() {
        let host = StaticHost::new(credentials())
            .with_parameter("top", 10)
            .with_item(json!({ "top": 5 }))
            .with_item(json!({}));
        assert_eq!(host.item_count(), 2);
        assert_eq!(host.parameter("top", 0), Some(json!(5)));
        assert_eq!(host.parameter("top", 1), Some(json!(10)));
        assert_eq!(host.parameter("skip", 1), None);
    }

    #[test]
    fn null_item_value_falls_back() {
        let host = StaticHost::new(credentials())
            .with_parameter("resource", "client")
            .with_item(json!({ "resource": null }));
        assert_eq!(host.parameter("resource", 0), Some(json!("client")));
    }

    #[test]
    fn no_items_means_one_run() {
        let host = StaticHost::new(credentials());
        assert_eq!(host.item_count(), 1);
    }

    #[test]
    fn input_file_shape_deserializes() {
        let input: ExecutionInput = serde_json::from_value(json!({
            "continueOnFail": true,
            "parameters": { "resource": "employee", "operation": "getAll" },
            "items": [{ "top": 1 }]
        }))
        .unwrap();
        let host = StaticHost::from_input(None, input);
        assert!(host.continue_on_fail());
        assert_eq!(host.parameter("operation", 0), Some(json!("getAll")));
        assert!(matches!(host.credentials(), Err(NodeError::Configuration(_))));
    }
}
