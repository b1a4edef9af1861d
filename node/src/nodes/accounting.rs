//! The accounting node: postings, open items, business partners, cost
//! accounting and balances per client and fiscal year.

use datevconnect_core::Transport;

use super::ConnectNode;
use crate::descriptor::{ParameterDescriptor, ParameterKind};
use crate::error::NodeError;
use crate::handlers::{accounting as handlers, ItemContext};
use crate::operation::{Operation, ResourceKind};
use crate::record::OutputRecord;

use Operation::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountingResource {
    Client,
    FiscalYear,
    AccountPosting,
    AccountsReceivable,
    AccountsPayable,
    GeneralLedgerAccount,
    Debitor,
    Creditor,
    CostSystem,
    CostCenter,
    CostSequence,
    InternalCostService,
    AccountingSequence,
    AccountingRecord,
    TermOfPayment,
    StocktakingData,
    VarianceAnalysis,
    SumsAndBalances,
}

impl ResourceKind for AccountingResource {
    const ALL: &'static [Self] = &[
        AccountingResource::Client,
        AccountingResource::FiscalYear,
        AccountingResource::AccountPosting,
        AccountingResource::AccountsReceivable,
        AccountingResource::AccountsPayable,
        AccountingResource::GeneralLedgerAccount,
        AccountingResource::Debitor,
        AccountingResource::Creditor,
        AccountingResource::CostSystem,
        AccountingResource::CostCenter,
        AccountingResource::CostSequence,
        AccountingResource::InternalCostService,
        AccountingResource::AccountingSequence,
        AccountingResource::AccountingRecord,
        AccountingResource::TermOfPayment,
        AccountingResource::StocktakingData,
        AccountingResource::VarianceAnalysis,
        AccountingResource::SumsAndBalances,
    ];

    fn name(self) -> &'static str {
        match self {
            AccountingResource::Client => "client",
            AccountingResource::FiscalYear => "fiscalYear",
            AccountingResource::AccountPosting => "accountPosting",
            AccountingResource::AccountsReceivable => "accountsReceivable",
            AccountingResource::AccountsPayable => "accountsPayable",
            AccountingResource::GeneralLedgerAccount => "generalLedgerAccount",
            AccountingResource::Debitor => "debitor",
            AccountingResource::Creditor => "creditor",
            AccountingResource::CostSystem => "costSystem",
            AccountingResource::CostCenter => "costCenter",
            AccountingResource::CostSequence => "costSequence",
            AccountingResource::InternalCostService => "internalCostService",
            AccountingResource::AccountingSequence => "accountingSequence",
            AccountingResource::AccountingRecord => "accountingRecord",
            AccountingResource::TermOfPayment => "termOfPayment",
            AccountingResource::StocktakingData => "stocktakingData",
            AccountingResource::VarianceAnalysis => "varianceAnalysis",
            AccountingResource::SumsAndBalances => "sumsAndBalances",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            AccountingResource::Client => "Client",
            AccountingResource::FiscalYear => "Fiscal Year",
            AccountingResource::AccountPosting => "Account Posting",
            AccountingResource::AccountsReceivable => "Accounts Receivable",
            AccountingResource::AccountsPayable => "Accounts Payable",
            AccountingResource::GeneralLedgerAccount => "General Ledger Account",
            AccountingResource::Debitor => "Debitor",
            AccountingResource::Creditor => "Creditor",
            AccountingResource::CostSystem => "Cost System",
            AccountingResource::CostCenter => "Cost Center",
            AccountingResource::CostSequence => "Cost Sequence",
            AccountingResource::InternalCostService => "Internal Cost Service",
            AccountingResource::AccountingSequence => "Accounting Sequence",
            AccountingResource::AccountingRecord => "Accounting Record",
            AccountingResource::TermOfPayment => "Term of Payment",
            AccountingResource::StocktakingData => "Stocktaking Data",
            AccountingResource::VarianceAnalysis => "Variance Analysis",
            AccountingResource::SumsAndBalances => "Sums and Balances",
        }
    }

    fn operations(self) -> &'static [Operation] {
        match self {
            AccountingResource::Client
            | AccountingResource::FiscalYear
            | AccountingResource::AccountPosting
            | AccountingResource::CostSystem
            | AccountingResource::CostCenter
            | AccountingResource::AccountingRecord
            | AccountingResource::SumsAndBalances => &[GetAll, Get],
            AccountingResource::AccountsReceivable | AccountingResource::AccountsPayable => {
                &[GetAll, Get, GetCondensed]
            }
            AccountingResource::GeneralLedgerAccount => &[GetAll, Get, GetUtilized],
            AccountingResource::Debitor | AccountingResource::Creditor => {
                &[GetAll, Get, Create, Update, GetNextAvailable]
            }
            AccountingResource::CostSequence | AccountingResource::AccountingSequence => {
                &[GetAll, Get, Create]
            }
            AccountingResource::InternalCostService => &[Create],
            AccountingResource::TermOfPayment => &[GetAll, Get, Create, Update],
            AccountingResource::StocktakingData => &[GetAll, Get, Update],
            AccountingResource::VarianceAnalysis => &[Get],
        }
    }
}

pub struct AccountingNode;

impl ConnectNode for AccountingNode {
    type Resource = AccountingResource;

    const NAME: &'static str = "datevConnectAccounting";
    const DISPLAY_NAME: &'static str = "DATEVconnect Accounting";

    fn parameters() -> Vec<ParameterDescriptor> {
        let id = |name, display_name, description| {
            ParameterDescriptor::new(name, display_name, ParameterKind::String, description)
        };
        vec![
            id("clientId", "Client ID", "Accounting client, e.g. 455148-10000"),
            id("fiscalYearId", "Fiscal Year ID", "Fiscal year, e.g. 20240101"),
            id("accountPostingId", "Account Posting ID", "Posting to fetch"),
            id("accountsReceivableId", "Accounts Receivable ID", "Open receivable to fetch"),
            id("accountsPayableId", "Accounts Payable ID", "Open payable to fetch"),
            id("generalLedgerAccountId", "General Ledger Account ID", "Account number"),
            id("debitorId", "Debitor ID", "Debitor account number"),
            id("creditorId", "Creditor ID", "Creditor account number"),
            id("costSystemId", "Cost System ID", "Cost system the request applies to"),
            id("costCenterId", "Cost Center ID", "Cost center to fetch"),
            id("costSequenceId", "Cost Sequence ID", "Cost sequence to fetch"),
            id("accountingSequenceId", "Accounting Sequence ID", "Accounting sequence"),
            id("accountingRecordId", "Accounting Record ID", "Record within the sequence"),
            id("termOfPaymentId", "Term of Payment ID", "Term of payment to fetch or update"),
            ParameterDescriptor::new(
                "startAt",
                "Start At",
                ParameterKind::Number,
                "Lowest account number to consider",
            ),
        ]
    }

    fn dispatch<T: Transport>(
        resource: AccountingResource,
        operation: &str,
        ctx: &ItemContext<'_, T>,
        sink: &mut Vec<OutputRecord>,
    ) -> Result<(), NodeError> {
        match resource {
            AccountingResource::Client => handlers::client(operation, ctx, sink),
            AccountingResource::FiscalYear => handlers::fiscal_year(operation, ctx, sink),
            AccountingResource::AccountPosting => handlers::account_posting(operation, ctx, sink),
            AccountingResource::AccountsReceivable => handlers::accounts_receivable(operation, ctx, sink),
            AccountingResource::AccountsPayable => handlers::accounts_payable(operation, ctx, sink),
            AccountingResource::GeneralLedgerAccount => handlers::general_ledger_account(operation, ctx, sink),
            AccountingResource::Debitor => handlers::debitor(operation, ctx, sink),
            AccountingResource::Creditor => handlers::creditor(operation, ctx, sink),
            AccountingResource::CostSystem => handlers::cost_system(operation, ctx, sink),
            AccountingResource::CostCenter => handlers::cost_center(operation, ctx, sink),
            AccountingResource::CostSequence => handlers::cost_sequence(operation, ctx, sink),
            AccountingResource::InternalCostService => handlers::internal_cost_service(operation, ctx, sink),
            AccountingResource::AccountingSequence => handlers::accounting_sequence(operation, ctx, sink),
            AccountingResource::AccountingRecord => handlers::accounting_record(operation, ctx, sink),
            AccountingResource::TermOfPayment => handlers::term_of_payment(operation, ctx, sink),
            AccountingResource::StocktakingData => handlers::stocktaking_data(operation, ctx, sink),
            AccountingResource::VarianceAnalysis => handlers::variance_analysis(operation, ctx, sink),
            AccountingResource::SumsAndBalances => handlers::sums_and_balances(operation, ctx, sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_round_trip() {
        for resource in AccountingResource::ALL {
            assert_eq!(AccountingResource::from_name(resource.name()), Some(*resource));
        }
        assert_eq!(AccountingResource::from_name("employee"), None);
    }

    #[test]
    fn descriptor_lists_every_resource_once() {
        let descriptor = AccountingNode::descriptor();
        assert_eq!(descriptor.name, "datevConnectAccounting");
        assert_eq!(descriptor.resources.len(), AccountingResource::ALL.len());
        let debitor = descriptor.resource("debitor").unwrap();
        let ops: Vec<_> = debitor.operations.iter().map(|o| o.value).collect();
        assert_eq!(ops, ["getAll", "get", "create", "update", "getNextAvailable"]);
    }
}
