//! `master-data/v1` wrappers: clients, employees, addressees and the lookup
//! tables around them.

use serde_json::Value;

use super::{segment, MASTER_DATA};
use crate::client::DatevConnect;
use crate::context::RequestContext;
use crate::error::DatevError;
use crate::query::{ItemQuery, ListQuery, QueryParams};
use crate::transport::Transport;

impl<T: Transport> DatevConnect<T> {
    // -----------------------------------------------------------------------
    // Clients
    // -----------------------------------------------------------------------

    pub fn fetch_clients(&self, ctx: &RequestContext, query: &ListQuery) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/clients"), query.to_params())
    }

    pub fn fetch_client(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{MASTER_DATA}/clients/{}", segment(client_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn create_client(&self, ctx: &RequestContext, body: &Value) -> Result<Option<Value>, DatevError> {
        self.post(ctx, &format!("{MASTER_DATA}/clients"), body)
    }

    pub fn update_client(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = format!("{MASTER_DATA}/clients/{}", segment(client_id));
        self.put(ctx, &path, body)
    }

    pub fn fetch_client_categories(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{MASTER_DATA}/clients/{}/client-categories", segment(client_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn update_client_categories(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = format!("{MASTER_DATA}/clients/{}/client-categories", segment(client_id));
        self.put(ctx, &path, body)
    }

    pub fn fetch_client_groups(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{MASTER_DATA}/clients/{}/client-groups", segment(client_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn update_client_groups(
        &self,
        ctx: &RequestContext,
        client_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = format!("{MASTER_DATA}/clients/{}/client-groups", segment(client_id));
        self.put(ctx, &path, body)
    }

    pub fn fetch_client_deletion_log(
        &self,
        ctx: &RequestContext,
        max_number: Option<u32>,
    ) -> Result<Value, DatevError> {
        let query = QueryParams::new().with("max-number", max_number);
        self.get(ctx, &format!("{MASTER_DATA}/clients/deletion-log"), query)
    }

    /// First unused client number at or after `start`, searching `range`
    /// numbers.
    pub fn fetch_next_free_client_number(
        &self,
        ctx: &RequestContext,
        start: u32,
        range: Option<u32>,
    ) -> Result<Value, DatevError> {
        let query = QueryParams::new()
            .with("start", Some(start))
            .with("range", range);
        self.get(ctx, &format!("{MASTER_DATA}/clients/next-free-number"), query)
    }

    // -----------------------------------------------------------------------
    // Client category types / client group types
    // -----------------------------------------------------------------------

    pub fn fetch_client_category_types(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/client-category-types"), query.to_params())
    }

    pub fn fetch_client_category_type(
        &self,
        ctx: &RequestContext,
        category_type_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{MASTER_DATA}/client-category-types/{}", segment(category_type_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn create_client_category_type(
        &self,
        ctx: &RequestContext,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        self.post(ctx, &format!("{MASTER_DATA}/client-category-types"), body)
    }

    pub fn update_client_category_type(
        &self,
        ctx: &RequestContext,
        category_type_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = format!("{MASTER_DATA}/client-category-types/{}", segment(category_type_id));
        self.put(ctx, &path, body)
    }

    pub fn fetch_client_group_types(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/client-group-types"), query.to_params())
    }

    pub fn fetch_client_group_type(
        &self,
        ctx: &RequestContext,
        group_type_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{MASTER_DATA}/client-group-types/{}", segment(group_type_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn create_client_group_type(
        &self,
        ctx: &RequestContext,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        self.post(ctx, &format!("{MASTER_DATA}/client-group-types"), body)
    }

    pub fn update_client_group_type(
        &self,
        ctx: &RequestContext,
        group_type_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = format!("{MASTER_DATA}/client-group-types/{}", segment(group_type_id));
        self.put(ctx, &path, body)
    }

    // -----------------------------------------------------------------------
    // Employees
    // -----------------------------------------------------------------------

    pub fn fetch_employees(&self, ctx: &RequestContext, query: &ListQuery) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/employees"), query.to_params())
    }

    pub fn fetch_employee(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{MASTER_DATA}/employees/{}", segment(employee_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn create_employee(&self, ctx: &RequestContext, body: &Value) -> Result<Option<Value>, DatevError> {
        self.post(ctx, &format!("{MASTER_DATA}/employees"), body)
    }

    pub fn update_employee(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = format!("{MASTER_DATA}/employees/{}", segment(employee_id));
        self.put(ctx, &path, body)
    }

    // -----------------------------------------------------------------------
    // Addressees
    // -----------------------------------------------------------------------

    pub fn fetch_addressees(&self, ctx: &RequestContext, query: &ListQuery) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/addressees"), query.to_params())
    }

    pub fn fetch_addressee(
        &self,
        ctx: &RequestContext,
        addressee_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{MASTER_DATA}/addressees/{}", segment(addressee_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn create_addressee(&self, ctx: &RequestContext, body: &Value) -> Result<Option<Value>, DatevError> {
        self.post(ctx, &format!("{MASTER_DATA}/addressees"), body)
    }

    pub fn update_addressee(
        &self,
        ctx: &RequestContext,
        addressee_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = format!("{MASTER_DATA}/addressees/{}", segment(addressee_id));
        self.put(ctx, &path, body)
    }

    pub fn fetch_addressee_deletion_log(
        &self,
        ctx: &RequestContext,
        max_number: Option<u32>,
    ) -> Result<Value, DatevError> {
        let query = QueryParams::new().with("max-number", max_number);
        self.get(ctx, &format!("{MASTER_DATA}/addressees/deletion-log"), query)
    }

    // -----------------------------------------------------------------------
    // Relationships
    // -----------------------------------------------------------------------

    pub fn fetch_relationships(&self, ctx: &RequestContext, query: &ListQuery) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/relationships"), query.to_params())
    }

    pub fn fetch_relationship(
        &self,
        ctx: &RequestContext,
        relationship_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{MASTER_DATA}/relationships/{}", segment(relationship_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn create_relationship(
        &self,
        ctx: &RequestContext,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        self.post(ctx, &format!("{MASTER_DATA}/relationships"), body)
    }

    pub fn update_relationship(
        &self,
        ctx: &RequestContext,
        relationship_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = format!("{MASTER_DATA}/relationships/{}", segment(relationship_id));
        self.put(ctx, &path, body)
    }

    pub fn fetch_relationship_types(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/relationship-types"), query.to_params())
    }

    // -----------------------------------------------------------------------
    // Corporate structures
    // -----------------------------------------------------------------------

    pub fn fetch_corporate_structures(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/corporate-structures"), query.to_params())
    }

    pub fn fetch_corporate_structure(
        &self,
        ctx: &RequestContext,
        organization_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!("{MASTER_DATA}/corporate-structures/{}", segment(organization_id));
        self.get(ctx, &path, query.to_params())
    }

    pub fn fetch_establishment(
        &self,
        ctx: &RequestContext,
        organization_id: &str,
        establishment_id: &str,
        query: &ItemQuery,
    ) -> Result<Value, DatevError> {
        let path = format!(
            "{MASTER_DATA}/corporate-structures/{}/establishments/{}",
            segment(organization_id),
            segment(establishment_id)
        );
        self.get(ctx, &path, query.to_params())
    }

    pub fn update_establishment(
        &self,
        ctx: &RequestContext,
        organization_id: &str,
        establishment_id: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        let path = format!(
            "{MASTER_DATA}/corporate-structures/{}/establishments/{}",
            segment(organization_id),
            segment(establishment_id)
        );
        self.put(ctx, &path, body)
    }

    // -----------------------------------------------------------------------
    // Lookup tables
    // -----------------------------------------------------------------------

    pub fn fetch_legal_forms(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
        national_right: Option<&str>,
    ) -> Result<Value, DatevError> {
        let mut params = query.to_params();
        params.push("national-right", national_right);
        self.get(ctx, &format!("{MASTER_DATA}/legal-forms"), params)
    }

    pub fn fetch_country_codes(&self, ctx: &RequestContext, query: &ListQuery) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/country-codes"), query.to_params())
    }

    pub fn fetch_banks(&self, ctx: &RequestContext, query: &ListQuery) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/banks"), query.to_params())
    }

    pub fn fetch_tax_authorities(&self, ctx: &RequestContext, query: &ListQuery) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/tax-authorities"), query.to_params())
    }

    pub fn fetch_areas_of_responsibility(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Value, DatevError> {
        self.get(ctx, &format!("{MASTER_DATA}/areas-of-responsibility"), query.to_params())
    }
}
