//! Handlers for the accounting node.
//!
//! Apart from `client` and `fiscalYear`, every resource lives below a client
//! and fiscal year, so those handlers check the scope once the operation is
//! known.

use datevconnect_core::{PartnerKind, Transport};

use super::ItemContext;
use crate::error::NodeError;
use crate::nodes::AccountingResource as Resource;
use crate::operation::Operation;
use crate::record::OutputRecord;

pub fn client<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::Client)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_accounting_clients(rq, &ctx.list_query()?),
        Operation::Get => api.fetch_accounting_client(rq, ctx.client_id()?, &ctx.item_query()),
        _ => return Err(ctx.unsupported(operation, Resource::Client)),
    };
    ctx.emit(result, sink)
}

pub fn fiscal_year<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::FiscalYear)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_fiscal_years(rq, ctx.client_id()?, &ctx.list_query()?),
        Operation::Get => {
            let (client_id, fiscal_year_id) = ctx.fiscal_scope(Resource::FiscalYear)?;
            api.fetch_fiscal_year(rq, client_id, fiscal_year_id, &ctx.item_query())
        }
        _ => return Err(ctx.unsupported(operation, Resource::FiscalYear)),
    };
    ctx.emit(result, sink)
}

pub fn account_posting<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::AccountPosting)?;
    let (c, fy) = ctx.fiscal_scope(Resource::AccountPosting)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_account_postings(rq, c, fy, &ctx.list_query()?),
        Operation::Get => api.fetch_account_posting(rq, c, fy, &ctx.required("accountPostingId")?, &ctx.item_query()),
        _ => return Err(ctx.unsupported(operation, Resource::AccountPosting)),
    };
    ctx.emit(result, sink)
}

pub fn accounts_receivable<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::AccountsReceivable)?;
    let (c, fy) = ctx.fiscal_scope(Resource::AccountsReceivable)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_accounts_receivable(rq, c, fy, &ctx.list_query()?),
        Operation::Get => {
            api.fetch_account_receivable(rq, c, fy, &ctx.required("accountsReceivableId")?, &ctx.item_query())
        }
        Operation::GetCondensed => api.fetch_accounts_receivable_condensed(rq, c, fy, &ctx.list_query()?),
        _ => return Err(ctx.unsupported(operation, Resource::AccountsReceivable)),
    };
    ctx.emit(result, sink)
}

pub fn accounts_payable<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::AccountsPayable)?;
    let (c, fy) = ctx.fiscal_scope(Resource::AccountsPayable)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_accounts_payable(rq, c, fy, &ctx.list_query()?),
        Operation::Get => api.fetch_account_payable(rq, c, fy, &ctx.required("accountsPayableId")?, &ctx.item_query()),
        Operation::GetCondensed => api.fetch_accounts_payable_condensed(rq, c, fy, &ctx.list_query()?),
        _ => return Err(ctx.unsupported(operation, Resource::AccountsPayable)),
    };
    ctx.emit(result, sink)
}

pub fn general_ledger_account<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::GeneralLedgerAccount)?;
    let (c, fy) = ctx.fiscal_scope(Resource::GeneralLedgerAccount)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_general_ledger_accounts(rq, c, fy, &ctx.list_query()?),
        Operation::Get => {
            api.fetch_general_ledger_account(rq, c, fy, &ctx.required("generalLedgerAccountId")?, &ctx.item_query())
        }
        Operation::GetUtilized => api.fetch_utilized_general_ledger_accounts(rq, c, fy, &ctx.list_query()?),
        _ => return Err(ctx.unsupported(operation, Resource::GeneralLedgerAccount)),
    };
    ctx.emit(result, sink)
}

pub fn debitor<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    business_partner(operation, ctx, sink, Resource::Debitor, PartnerKind::Debitor, "debitorId")
}

pub fn creditor<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    business_partner(operation, ctx, sink, Resource::Creditor, PartnerKind::Creditor, "creditorId")
}

/// Debitors and creditors share one API shape and differ only in the
/// collection name and id parameter.
fn business_partner<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
    resource: Resource,
    kind: PartnerKind,
    id_param: &str,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, resource)?;
    let (c, fy) = ctx.fiscal_scope(resource)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_business_partners(rq, kind, c, fy, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_business_partner(rq, kind, c, fy, &ctx.required(id_param)?, &ctx.item_query())
            .map(Some),
        Operation::Create => api.create_business_partner(rq, kind, c, fy, &ctx.body()?),
        Operation::Update => api.update_business_partner(rq, kind, c, fy, &ctx.required(id_param)?, &ctx.body()?),
        Operation::GetNextAvailable => api
            .fetch_next_available_business_partner(rq, kind, c, fy, ctx.number("startAt")?)
            .map(Some),
        _ => return Err(ctx.unsupported(operation, resource)),
    };
    ctx.emit(result, sink)
}

pub fn cost_system<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::CostSystem)?;
    let (c, fy) = ctx.fiscal_scope(Resource::CostSystem)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_cost_systems(rq, c, fy, &ctx.list_query()?),
        Operation::Get => api.fetch_cost_system(rq, c, fy, &ctx.required("costSystemId")?, &ctx.item_query()),
        _ => return Err(ctx.unsupported(operation, Resource::CostSystem)),
    };
    ctx.emit(result, sink)
}

pub fn cost_center<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::CostCenter)?;
    let (c, fy) = ctx.fiscal_scope(Resource::CostCenter)?;
    let cost_system_id = ctx.required("costSystemId")?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_cost_centers(rq, c, fy, &cost_system_id, &ctx.list_query()?),
        Operation::Get => api.fetch_cost_center(
            rq,
            c,
            fy,
            &cost_system_id,
            &ctx.required("costCenterId")?,
            &ctx.item_query(),
        ),
        _ => return Err(ctx.unsupported(operation, Resource::CostCenter)),
    };
    ctx.emit(result, sink)
}

pub fn cost_sequence<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::CostSequence)?;
    let (c, fy) = ctx.fiscal_scope(Resource::CostSequence)?;
    let cost_system_id = ctx.required("costSystemId")?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api
            .fetch_cost_sequences(rq, c, fy, &cost_system_id, &ctx.list_query()?)
            .map(Some),
        Operation::Get => api
            .fetch_cost_sequence(
                rq,
                c,
                fy,
                &cost_system_id,
                &ctx.required("costSequenceId")?,
                &ctx.item_query(),
            )
            .map(Some),
        Operation::Create => api.create_cost_sequence(rq, c, fy, &cost_system_id, &ctx.body()?),
        _ => return Err(ctx.unsupported(operation, Resource::CostSequence)),
    };
    ctx.emit(result, sink)
}

pub fn internal_cost_service<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    ctx.operation(operation, Resource::InternalCostService)?;
    let (c, fy) = ctx.fiscal_scope(Resource::InternalCostService)?;
    let cost_system_id = ctx.required("costSystemId")?;
    let result = ctx
        .api
        .create_internal_cost_service(&ctx.request, c, fy, &cost_system_id, &ctx.body()?);
    ctx.emit(result, sink)
}

pub fn accounting_sequence<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::AccountingSequence)?;
    let (c, fy) = ctx.fiscal_scope(Resource::AccountingSequence)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_accounting_sequences(rq, c, fy, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_accounting_sequence(rq, c, fy, &ctx.required("accountingSequenceId")?, &ctx.item_query())
            .map(Some),
        Operation::Create => api.create_accounting_sequence(rq, c, fy, &ctx.body()?),
        _ => return Err(ctx.unsupported(operation, Resource::AccountingSequence)),
    };
    ctx.emit(result, sink)
}

pub fn accounting_record<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::AccountingRecord)?;
    let (c, fy) = ctx.fiscal_scope(Resource::AccountingRecord)?;
    let sequence_id = ctx.required("accountingSequenceId")?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_accounting_records(rq, c, fy, &sequence_id, &ctx.list_query()?),
        Operation::Get => api.fetch_accounting_record(
            rq,
            c,
            fy,
            &sequence_id,
            &ctx.required("accountingRecordId")?,
            &ctx.item_query(),
        ),
        _ => return Err(ctx.unsupported(operation, Resource::AccountingRecord)),
    };
    ctx.emit(result, sink)
}

pub fn term_of_payment<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::TermOfPayment)?;
    let (c, fy) = ctx.fiscal_scope(Resource::TermOfPayment)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_terms_of_payment(rq, c, fy, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_term_of_payment(rq, c, fy, &ctx.required("termOfPaymentId")?, &ctx.item_query())
            .map(Some),
        Operation::Create => api.create_term_of_payment(rq, c, fy, &ctx.body()?),
        Operation::Update => api.update_term_of_payment(rq, c, fy, &ctx.required("termOfPaymentId")?, &ctx.body()?),
        _ => return Err(ctx.unsupported(operation, Resource::TermOfPayment)),
    };
    ctx.emit(result, sink)
}

pub fn stocktaking_data<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::StocktakingData)?;
    let (c, fy) = ctx.fiscal_scope(Resource::StocktakingData)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_stocktaking_data(rq, c, fy, &ctx.list_query()?).map(Some),
        Operation::Get => api
            .fetch_stocktaking_record(rq, c, fy, &ctx.required("generalLedgerAccountId")?, &ctx.item_query())
            .map(Some),
        Operation::Update => {
            api.update_stocktaking_record(rq, c, fy, &ctx.required("generalLedgerAccountId")?, &ctx.body()?)
        }
        _ => return Err(ctx.unsupported(operation, Resource::StocktakingData)),
    };
    ctx.emit(result, sink)
}

pub fn variance_analysis<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    ctx.operation(operation, Resource::VarianceAnalysis)?;
    let (c, fy) = ctx.fiscal_scope(Resource::VarianceAnalysis)?;
    let result = ctx.api.fetch_variance_analysis(&ctx.request, c, fy, &ctx.item_query());
    ctx.emit(result, sink)
}

pub fn sums_and_balances<T: Transport>(
    operation: &str,
    ctx: &ItemContext<'_, T>,
    sink: &mut Vec<OutputRecord>,
) -> Result<(), NodeError> {
    let op = ctx.operation(operation, Resource::SumsAndBalances)?;
    let (c, fy) = ctx.fiscal_scope(Resource::SumsAndBalances)?;
    let (api, rq) = (ctx.api, &ctx.request);
    let result = match op {
        Operation::GetAll => api.fetch_sums_and_balances(rq, c, fy, &ctx.list_query()?),
        Operation::Get => {
            api.fetch_sum_and_balance(rq, c, fy, &ctx.required("generalLedgerAccountId")?, &ctx.item_query())
        }
        _ => return Err(ctx.unsupported(operation, Resource::SumsAndBalances)),
    };
    ctx.emit(result, sink)
}
