//! DATEVconnect workflow nodes.
//!
//! Two nodes share one execution loop ([`nodes::execute`]): the master-data
//! node and the accounting node. Each input item selects a resource and an
//! operation, which a handler maps onto exactly one gateway call.

pub mod descriptor;
pub mod error;
pub mod handlers;
pub mod host;
pub mod nodes;
pub mod operation;
pub mod params;
pub mod record;

pub use descriptor::NodeDescriptor;
pub use error::NodeError;
pub use host::{ExecutionInput, NodeHost, StaticHost};
pub use nodes::{execute, AccountingNode, AccountingResource, ConnectNode, MasterDataNode, MasterDataResource};
pub use operation::{Operation, ResourceKind};
pub use record::OutputRecord;
