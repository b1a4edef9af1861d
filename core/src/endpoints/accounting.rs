//! `accounting/v1` wrappers. Almost everything lives below a client's fiscal
//! year: `clients/{client-id}/fiscal-years/{fiscal-year-id}/...`.

use serde_json::Value;

use super::{segment, ACCOUNTING};
use crate::client::DatevConnect;
use crate::context::RequestContext;
use crate::error::DatevError;
use crate::query::{ItemQuery, ListQuery, QueryParams};
use crate::transport::Transport;

fn fiscal_year_path(client_id: &str, fiscal_year_id: &str, rest: &str) -> String {
    format!(
        "{ACCOUNTING}/clients/{}/fiscal-years/{}/{rest}",
        segment(client_id),
        segment(fiscal_year_id)
    )
}

fn cost_system_path(client_id: &str, fiscal_year_id: &str, cost_system_id: &str, rest: &str) -> String {
    fiscal_year_path(
        client_id,
        fiscal_year_id,
        &format!("cost-systems/{}/{rest}", segment(cost_system_id)),
    )
}

impl<T: Transport> DatevConnect<T> {
    // -----------------------------------------------------------------------
    // Clients and fiscal years
    // -----------------------------------------------------------------------

    pub fn fetch_accounting_clients(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{ACCOUNTING}/clients"), query.to_params())
    }

    pub fn fetch_accounting_client(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{ACCOUNTING}/clients/{}", segment(client_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_fiscal_years(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{ACCOUNTING}/clients/{}/fiscal-years", segment(client_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_fiscal_year(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!(
            "{ACCOUNTING}/clients/{}/fiscal-years/{}",
            segment(client_id),
            segment(fiscal_year_id)
        );
        self.get(ctx, &path, query.to_params())
    }

    // -----------------------------------------------------------------------
    // Postings and open items
    // -----------------------------------------------------------------------

    pub fn fetch_account_postings(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "account-postings");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_account_posting(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        posting_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("account-postings/{}", segment(posting_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    pub fn fetch_accounts_receivable(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "accounts-receivable");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_account_receivable(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        receivable_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("accounts-receivable/{}", segment(receivable_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    pub fn fetch_accounts_receivable_condensed(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "accounts-receivable/condensed");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_accounts_payable(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "accounts-payable");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_account_payable(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        payable_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("accounts-payable/{}", segment(payable_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    pub fn fetch_accounts_payable_condensed(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "accounts-payable/condensed");
        self.get(ctx, &path, query.to_params())
    }

    // -----------------------------------------------------------------------
    // General ledger accounts
    // -----------------------------------------------------------------------

    pub fn fetch_general_ledger_accounts(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "general-ledger-accounts");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_general_ledger_account(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        account_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("general-ledger-accounts/{}", segment(account_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    /// Accounts that carry at least one posting in the fiscal year.
    pub fn fetch_utilized_general_ledger_accounts(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "general-ledger-accounts/utilized");
        self.get(ctx, &path, query.to_params())
    }

    // -----------------------------------------------------------------------
    // Business partners: debitors and creditors share one shape, keyed by
    // their collection name.
    // -----------------------------------------------------------------------

    pub fn fetch_business_partners(
        &self,
        ctx: &RequestContext,
        kind: PartnerKind,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, kind.collection());
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_business_partner(
        &self,
        ctx: &RequestContext,
        kind: PartnerKind,
        client_id: &str,
        fiscal_year_id: &str,
        partner_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("{}/{}", kind.collection(), segment(partner_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    pub fn create_business_partner(
        &self,
        ctx: &RequestContext,
        kind: PartnerKind,
        client_id: &str,
        fiscal_year_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, kind.collection());
        self.post(ctx, &path, body)
    }

    pub fn update_business_partner(
        &self,
        ctx: &RequestContext,
        kind: PartnerKind,
        client_id: &str,
        fiscal_year_id: &str,
        partner_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let rest = format!("{}/{}", kind.collection(), segment(partner_id));
        self.put(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), body)
    }

    /// Next unused account number, optionally searching from `start_at`.
    pub fn fetch_next_available_business_partner(
        &self,
        ctx: &RequestContext,
        kind: PartnerKind,
        client_id: &str,
        fiscal_year_id: &str,
        start_at: Option<u32>,
    ) -> Result<Value, DatevError> {
        let rest = format!("{}/next-available", kind.collection());
        let query = QueryParams::new().with("start-at", start_at);
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query)
    }

    // -----------------------------------------------------------------------
    // Cost accounting
    // -----------------------------------------------------------------------

    pub fn fetch_cost_systems(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "cost-systems");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_cost_system(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        cost_system_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("cost-systems/{}", segment(cost_system_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    pub fn fetch_cost_centers(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        cost_system_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = cost_system_path(client_id, fiscal_year_id, cost_system_id, "cost-centers");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_cost_center(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        cost_system_id: &str,
        cost_center_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("cost-centers/{}", segment(cost_center_id));
        let path = cost_system_path(client_id, fiscal_year_id, cost_system_id, &rest);
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_cost_sequences(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        cost_system_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = cost_system_path(client_id, fiscal_year_id, cost_system_id, "cost-sequences");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_cost_sequence(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        cost_system_id: &str,
        cost_sequence_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("cost-sequences/{}", segment(cost_sequence_id));
        let path = cost_system_path(client_id, fiscal_year_id, cost_system_id, &rest);
        self.get(ctx, &path, query.to_params())
    }

    pub fn create_cost_sequence(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        cost_system_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = cost_system_path(client_id, fiscal_year_id, cost_system_id, "cost-sequences");
        self.post(ctx, &path, body)
    }

    pub fn create_internal_cost_service(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        cost_system_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = cost_system_path(client_id, fiscal_year_id, cost_system_id, "internal-cost-services");
        self.post(ctx, &path, body)
    }

    // -----------------------------------------------------------------------
    // Accounting sequences and their records
    // -----------------------------------------------------------------------

    pub fn fetch_accounting_sequences(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "accounting-sequences");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_accounting_sequence(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        sequence_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("accounting-sequences/{}", segment(sequence_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    pub fn create_accounting_sequence(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "accounting-sequences");
        self.post(ctx, &path, body)
    }

    pub fn fetch_accounting_records(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        sequence_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("accounting-sequences/{}/accounting-records", segment(sequence_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    pub fn fetch_accounting_record(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        sequence_id: &str,
        record_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!(
            "accounting-sequences/{}/accounting-records/{}",
            segment(sequence_id),
            segment(record_id)
        );
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    // -----------------------------------------------------------------------
    // Terms of payment
    // -----------------------------------------------------------------------

    pub fn fetch_terms_of_payment(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "terms-of-payment");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_term_of_payment(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        term_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("terms-of-payment/{}", segment(term_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    pub fn create_term_of_payment(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "terms-of-payment");
        self.post(ctx, &path, body)
    }

    pub fn update_term_of_payment(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        term_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let rest = format!("terms-of-payment/{}", segment(term_id));
        self.put(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), body)
    }

    // -----------------------------------------------------------------------
    // Stocktaking, variance analysis, sums and balances
    // -----------------------------------------------------------------------

    pub fn fetch_stocktaking_data(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "stocktaking-data");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_stocktaking_record(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        account_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("stocktaking-data/{}", segment(account_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }

    pub fn update_stocktaking_record(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        account_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let rest = format!("stocktaking-data/{}", segment(account_id));
        self.put(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), body)
    }

    pub fn fetch_variance_analysis(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "variance-analysis");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_sums_and_balances(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = fiscal_year_path(client_id, fiscal_year_id, "sums-and-balances");
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_sum_and_balance(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        fiscal_year_id: &str,
        account_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let rest = format!("sums-and-balances/{}", segment(account_id));
        self.get(ctx, &fiscal_year_path(client_id, fiscal_year_id, &rest), query.to_params())
    }
}

/// Which business-partner collection a call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerKind {
    Debitor,
    Creditor,
}

impl PartnerKind {
    pub fn collection(self) -> &'static str {
        match self {
            PartnerKind::Debitor => "debitors",
            PartnerKind::Creditor => "creditors",
        }
    }
}
