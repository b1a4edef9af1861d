//! Node entry points.
//!
//! Both nodes share one execution loop: validate credentials, log in once,
//! then dispatch every input item in order to its resource handler.

pub mod accounting;
pub mod master_data;

use datevconnect_core::{DatevConnect, RequestContext, Transport};
use tracing::{debug, info};

use crate::descriptor::{NodeDescriptor, ParameterDescriptor};
use crate::error::NodeError;
use crate::handlers::ItemContext;
use crate::host::NodeHost;
use crate::operation::ResourceKind;
use crate::params;
use crate::record::OutputRecord;

pub use accounting::{AccountingNode, AccountingResource};
pub use master_data::{MasterDataNode, MasterDataResource};

/// Item-level parameters that scope a request to a client and fiscal year.
pub const CLIENT_ID_PARAM: &str = "clientId";
pub const FISCAL_YEAR_ID_PARAM: &str = "fiscalYearId";

pub trait ConnectNode {
    type Resource: ResourceKind;

    const NAME: &'static str;
    const DISPLAY_NAME: &'static str;

    /// Node-specific parameters, appended to the common ones.
    fn parameters() -> Vec<ParameterDescriptor>;

    fn dispatch<T: Transport>(
        resource: Self::Resource,
        operation: &str,
        ctx: &ItemContext<'_, T>,
        sink: &mut Vec<OutputRecord>,
    ) -> Result<(), NodeError>;

    fn descriptor() -> NodeDescriptor {
        let mut parameters = crate::descriptor::common_parameters();
        parameters.extend(Self::parameters());
        NodeDescriptor::new::<Self::Resource>(Self::NAME, Self::DISPLAY_NAME, parameters)
    }
}

/// Run node `N` over every input item of `host`.
///
/// Returns one output branch holding all records in item order.
pub fn execute<N: ConnectNode, T: Transport>(
    host: &dyn NodeHost,
    transport: T,
) -> Result<Vec<Vec<OutputRecord>>, NodeError> {
    let credentials = host.credentials()?;
    let missing = credentials.missing_fields();
    if !missing.is_empty() {
        return Err(NodeError::Configuration(format!(
            "DATEVconnect credentials are incomplete: missing {}",
            missing.join(", ")
        )));
    }

    let api = DatevConnect::new(transport);
    let token = api
        .authenticate(&credentials)
        .map_err(NodeError::Authentication)?;
    info!(node = N::NAME, items = host.item_count(), "authenticated against DATEVconnect");

    let base = RequestContext::new(&credentials, token);
    let mut records = Vec::new();
    for item_index in 0..host.item_count() {
        let resource_name = params::required_string(host, "resource", item_index)?;
        let operation = params::required_string(host, "operation", item_index)?;
        let resource = N::Resource::from_name(&resource_name).ok_or_else(|| {
            NodeError::UnsupportedResource {
                resource: resource_name.clone(),
                item_index,
            }
        })?;

        let ctx = ItemContext {
            api: &api,
            host,
            request: base.scoped(
                params::optional_string(host, CLIENT_ID_PARAM, item_index),
                params::optional_string(host, FISCAL_YEAR_ID_PARAM, item_index),
            ),
            item_index,
        };
        debug!(item = item_index, resource = resource.name(), %operation, "dispatching item");
        N::dispatch(resource, &operation, &ctx, &mut records)?;
    }

    info!(node = N::NAME, records = records.len(), "execution finished");
    Ok(vec![records])
}
