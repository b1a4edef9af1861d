//! Handlers for the master-data node.

use datevconnect_core::Transport;

use super::ItemContext;
use crate::error::NodeError;
use crate::nodes::MasterDataResource as Resource;
use crate::operation::Operation;
use crate::params;
use crate::record::OutputRecord;

pub fn client<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::Client)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_clients(rq, &ctx.list_query()?).map(Some),
        Operation::Get => api.fetch_client(rq, ctx.client_id()?, &ctx.item_query()).map(Some),
        Operation::Create => api.create_client(rq, &ctx.body()?),
        Operation::Update => api.update_client(rq, ctx.client_id()?, &ctx.body()?),
        Operation::GetCategories => api
            .fetch_client_categories(rq, ctx.client_id()?, &ctx.list_query()?)
            .map(Some),
        Operation::UpdateCategories => api.update_client_categories(rq, ctx.client_id()?, &ctx.body()?),
        Operation::GetGroups => api
            .fetch_client_groups(rq, ctx.client_id()?, &ctx.list_query()?)
            .map(Some),
        Operation::UpdateGroups => api.update_client_groups(rq, ctx.client_id()?, &ctx.body()?),
        Operation::GetDeletionLog => api
            .fetch_client_deletion_log(rq, ctx.number("maxNumber")?)
            .map(Some),
        Operation::GetNextFreeNumber => {
            let start = ctx.number("start")?.unwrap_or(params::DEFAULT_START);
            api.fetch_next_free_client_number(rq, start, ctx.number("range")?).map(Some)
        }
        _ => return Err(ctx.unsupported(operation, Resource::Client)),
    };
    ctx.emit(result, sink)
}

pub fn client_category_type<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::ClientCategoryType)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_client_category_types(rq, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_client_category_type(rq, &ctx.required("clientCategoryTypeId")?, &ctx.item_query())
            .map(Some),
        Operation::Create => api.create_client_category_type(rq, &ctx.body()?),
        Operation::Update => {
            api.update_client_category_type(rq, &ctx.required("clientCategoryTypeId")?, &ctx.body()?)
        }
        _ => return Err(ctx.unsupported(operation, Resource::ClientCategoryType)),
    };
    ctx.emit(result, sink)
}

pub fn client_group_type<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::ClientGroupType)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_client_group_types(rq, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_client_group_type(rq, &ctx.required("clientGroupTypeId")?, &ctx.item_query())
            .map(Some),
        Operation::Create => api.create_client_group_type(rq, &ctx.body()?),
        Operation::Update => api.update_client_group_type(rq, &ctx.required("clientGroupTypeId")?, &ctx.body()?),
        _ => return Err(ctx.unsupported(operation, Resource::ClientGroupType)),
    };
    ctx.emit(result, sink)
}

pub fn employee<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::Employee)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_employees(rq, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_employee(rq, &ctx.required("employeeId")?, &ctx.item_query())
            .map(Some),
        Operation::Create => api.create_employee(rq, &ctx.body()?),
        Operation::Update => api.update_employee(rq, &ctx.required("employeeId")?, &ctx.body()?),
        _ => return Err(ctx.unsupported(operation, Resource::Employee)),
    };
    ctx.emit(result, sink)
}

pub fn addressee<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::Addressee)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_addressees(rq, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_addressee(rq, &ctx.required("addresseeId")?, &ctx.item_query())
            .map(Some),
        Operation::Create => api.create_addressee(rq, &ctx.body()?),
        Operation::Update => api.update_addressee(rq, &ctx.required("addresseeId")?, &ctx.body()?),
        Operation::GetDeletionLog => api
            .fetch_addressee_deletion_log(rq, ctx.number("maxNumber")?)
            .map(Some),
        _ => return Err(ctx.unsupported(operation, Resource::Addressee)),
    };
    ctx.emit(result, sink)
}

pub fn relationship<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::Relationship)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_relationships(rq, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_relationship(rq, &ctx.required("relationshipId")?, &ctx.item_query())
            .map(Some),
        Operation::Create => api.create_relationship(rq, &ctx.body()?),
        Operation::Update => api.update_relationship(rq, &ctx.required("relationshipId")?, &ctx.body()?),
        _ => return Err(ctx.unsupported(operation, Resource::Relationship)),
    };
    ctx.emit(result, sink)
}

pub fn legal_form<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    ctx.operation(operation, Resource::LegalForm)?;
    let national_right = ctx.optional("nationalRight");
    let result = ctx
        .api
        .fetch_legal_forms(&ctx.request, &ctx.list_query()?, national_right.as_deref());
    ctx.emit(result, sink)
}

pub fn corporate_structure<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::CorporateStructure)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_corporate_structures(rq, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_corporate_structure(rq, &ctx.required("organizationId")?, &ctx.item_query())
            .map(Some),
        Operation::GetEstablishment => api
            .fetch_establishment(
                rq,
                &ctx.required("organizationId")?,
                &ctx.required("establishmentId")?,
                &ctx.item_query(),
            )
            .map(Some),
        Operation::UpdateEstablishment => api.update_establishment(
            rq,
            &ctx.required("organizationId")?,
            &ctx.required("establishmentId")?,
            &ctx.body()?,
        ),
        _ => return Err(ctx.unsupported(operation, Resource::CorporateStructure)),
    };
    ctx.emit(result, sink)
}

// Lookup tables only support getAll; `ctx.operation` rejects anything else.

pub fn relationship_type<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    ctx.operation(operation, Resource::RelationshipType)?;
    let result = ctx.api.fetch_relationship_types(&ctx.request, &ctx.list_query()?);
    ctx.emit(result, sink)
}

pub fn country_code<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    ctx.operation(operation, Resource::CountryCode)?;
    let result = ctx.api.fetch_country_codes(&ctx.request, &ctx.list_query()?);
    ctx.emit(result, sink)
}

pub fn bank<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    ctx.operation(operation, Resource::Bank)?;
    let result = ctx.api.fetch_banks(&ctx.request, &ctx.list_query()?);
    ctx.emit(result, sink)
}

pub fn tax_authority<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    ctx.operation(operation, Resource::TaxAuthority)?;
    let result = ctx.api.fetch_tax_authorities(&ctx.request, &ctx.list_query()?);
    ctx.emit(result, sink)
}

pub fn area_of_responsibility<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    ctx.operation(operation, Resource::AreaOfResponsibility)?;
    let result = ctx.api.fetch_areas_of_responsibility(&ctx.request, &ctx.list_query()?);
    ctx.emit(result, sink)
}
