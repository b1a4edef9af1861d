//! Resource handlers: one function per resource mapping an operation name to
//! one endpoint wrapper.
//!
//! # Design
//! A handler first resolves the operation and reads its parameters (any
//! failure there propagates), then makes exactly one API call and hands the
//! outcome to [`ItemContext::emit`], which applies continue-on-fail.

pub mod accounting;
pub mod master_data;

use datevconnect_core::{
    DatevConnect, DatevError, ItemQuery, ListQuery, RequestContext, Transport,
};
use serde_json::Value;
use tracing::warn;

use crate::error::NodeError;
use crate::host::NodeHost;
use crate::operation::{Operation, ResourceKind};
use crate::params;
use crate::record::{to_records, OutputRecord};

/// Body parameter of create and update operations.
pub const DATA_PARAM: &str = "data";

/// Everything a handler needs for one input item.
pub struct ItemContext<'a, T> {
    pub api: &'a DatevConnect<T>,
    pub host: &'a dyn NodeHost,
    pub request: RequestContext,
    pub item_index: usize,
}

impl<T: Transport> ItemContext<'_, T> {
    /// Resolve `operation` for `resource`, rejecting names the resource does
    /// not support.
    pub fn operation<R: ResourceKind>(&self, operation: &str, resource: R) -> Result<Operation, NodeError> {
        Operation::from_name(operation)
            .filter(|op| resource.supports(*op))
            .ok_or_else(|| self.unsupported(operation, resource))
    }

    pub fn unsupported<R: ResourceKind>(&self, operation: &str, resource: R) -> NodeError {
        NodeError::UnsupportedOperation {
            operation: operation.to_string(),
            resource: resource.name().to_string(),
            item_index: self.item_index,
        }
    }

    pub fn required(&self, name: &str) -> Result<String, NodeError> {
        params::required_string(self.host, name, self.item_index)
    }

    pub fn optional(&self, name: &str) -> Option<String> {
        params::optional_string(self.host, name, self.item_index)
    }

    pub fn number(&self, name: &str) -> Result<Option<u32>, NodeError> {
        params::optional_number(self.host, name, self.item_index)
    }

    pub fn list_query(&self) -> Result<ListQuery, NodeError> {
        params::list_query(self.host, self.item_index)
    }

    pub fn item_query(&self) -> ItemQuery {
        params::item_query(self.host, self.item_index)
    }

    /// The `data` parameter as JSON.
    pub fn body(&self) -> Result<Value, NodeError> {
        params::json_parameter(self.host, DATA_PARAM, self.item_index)
    }

    /// Client id from the item's request scope.
    pub fn client_id(&self) -> Result<&str, NodeError> {
        self.request
            .client_id
            .as_deref()
            .ok_or_else(|| NodeError::MissingParameter {
                name: "clientId".to_string(),
                item_index: self.item_index,
            })
    }

    /// Client and fiscal-year ids; both must be present.
    pub fn fiscal_scope<R: ResourceKind>(&self, resource: R) -> Result<(&str, &str), NodeError> {
        match (self.request.client_id.as_deref(), self.request.fiscal_year_id.as_deref()) {
            (Some(client_id), Some(fiscal_year_id)) => Ok((client_id, fiscal_year_id)),
            _ => Err(NodeError::MissingFiscalScope {
                resource: resource.name().to_string(),
                item_index: self.item_index,
            }),
        }
    }

    /// Push the outcome of one API call.
    ///
    /// Success becomes normalised records. Failure becomes an error record
    /// under continue-on-fail and an item-tagged `NodeError::Api` otherwise.
    pub fn emit<V: Into<Option<Value>>>(
        &self,
        result: Result<V, DatevError>,
        sink: &mut Vec<OutputRecord>,
    ) -> Result<(), NodeError> {
        match result {
            Ok(value) => {
                sink.extend(to_records(value.into(), self.item_index));
                Ok(())
            }
            Err(source) if self.host.continue_on_fail() => {
                warn!(item = self.item_index, error = %source, "DATEVconnect call failed, continuing");
                sink.push(OutputRecord::error(source.to_string(), self.item_index));
                Ok(())
            }
            Err(source) => Err(NodeError::Api {
                item_index: self.item_index,
                source,
            }),
        }
    }
}
