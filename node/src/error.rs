//! Node-level errors.
//!
//! # Design
//! Only `Api` is recoverable: under continue-on-fail it becomes an error
//! record. Everything else means the node is misconfigured (or cannot log
//! in) and always aborts the execution.

use datevconnect_core::DatevError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NodeError {
    #[error("{0}")]
    Configuration(String),

    #[error("Missing required parameter \"{name}\" (item {item_index})")]
    MissingParameter { name: String, item_index: usize },

    #[error("Invalid parameter \"{name}\" (item {item_index}): {reason}")]
    InvalidParameter {
        name: String,
        item_index: usize,
        reason: String,
    },

    #[error("Both client ID and fiscal year ID are required for resource \"{resource}\" (item {item_index})")]
    MissingFiscalScope { resource: String, item_index: usize },

    #[error(transparent)]
    Authentication(DatevError),

    #[error("{source} (item {item_index})")]
    Api {
        item_index: usize,
        #[source]
        source: DatevError,
    },

    #[error("The resource \"{resource}\" is not supported (item {item_index})")]
    UnsupportedResource { resource: String, item_index: usize },

    #[error("The operation \"{operation}\" is not supported for resource \"{resource}\" (item {item_index})")]
    UnsupportedOperation {
        operation: String,
        resource: String,
        item_index: usize,
    },
}

impl NodeError {
    /// Index of the input item the error belongs to, if item-scoped.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            NodeError::MissingParameter { item_index, .. }
            | NodeError::InvalidParameter { item_index, .. }
            | NodeError::MissingFiscalScope { item_index, .. }
            | NodeError::Api { item_index, .. }
            | NodeError::UnsupportedResource { item_index, .. }
            | NodeError::UnsupportedOperation { item_index, .. } => Some(*item_index),
            NodeError::Configuration(_) | NodeError::Authentication(_) => None,
        }
    }

    /// Whether continue-on-fail may turn this error into an output record.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NodeError::Api { .. })
    }
}
