//! Serializable node descriptions for the host's parameter UI.

use serde::Serialize;
use serde_json::{json, Value};

use crate::operation::ResourceKind;

/// Credential type every node asks the host for.
pub const CREDENTIALS_NAME: &str = "datevConnectApi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterKind {
    Options,
    String,
    Number,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: &'static str,
}

impl ParameterDescriptor {
    pub const fn new(
        name: &'static str,
        display_name: &'static str,
        kind: ParameterKind,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            display_name,
            kind,
            default: None,
            description,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    pub value: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceDescriptor {
    pub value: &'static str,
    pub name: &'static str,
    pub operations: Vec<OperationDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub credentials: &'static str,
    pub resources: Vec<ResourceDescriptor>,
    pub parameters: Vec<ParameterDescriptor>,
}

impl NodeDescriptor {
    pub fn new<R: ResourceKind>(
        name: &'static str,
        display_name: &'static str,
        parameters: Vec<ParameterDescriptor>,
    ) -> Self {
        let resources = R::ALL
            .iter()
            .map(|resource| ResourceDescriptor {
                value: resource.name(),
                name: resource.display_name(),
                operations: resource
                    .operations()
                    .iter()
                    .map(|op| OperationDescriptor {
                        value: op.name(),
                        name: op.display_name(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            name,
            display_name,
            credentials: CREDENTIALS_NAME,
            resources,
            parameters,
        }
    }

    pub fn resource(&self, value: &str) -> Option<&ResourceDescriptor> {
        self.resources.iter().find(|r| r.value == value)
    }
}

/// Parameters shared by both nodes: selection, list options and the body.
pub fn common_parameters() -> Vec<ParameterDescriptor> {
    vec![
        ParameterDescriptor::new("resource", "Resource", ParameterKind::Options, "Resource to operate on"),
        ParameterDescriptor::new("operation", "Operation", ParameterKind::Options, "Operation to perform"),
        ParameterDescriptor::new("top", "Limit", ParameterKind::Number, "Maximum number of results")
            .with_default(json!(crate::params::DEFAULT_TOP)),
        ParameterDescriptor::new("skip", "Offset", ParameterKind::Number, "Number of results to skip")
            .with_default(json!(0)),
        ParameterDescriptor::new("select", "Select", ParameterKind::String, "Comma-separated fields to return"),
        ParameterDescriptor::new("filter", "Filter", ParameterKind::String, "OData filter expression"),
        ParameterDescriptor::new("expand", "Expand", ParameterKind::String, "Related entities to include"),
        ParameterDescriptor::new("data", "Data", ParameterKind::Json, "Request body for create and update"),
    ]
}
