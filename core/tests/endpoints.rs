//! Wrapper paths and query strings, checked through a recording transport.

use datevconnect_core::{
    Credentials, DatevConnect, HttpMethod, HttpResponse, ItemQuery, ListQuery, PartnerKind,
    RecordingTransport, RequestContext,
};
use serde_json::json;

const HOST: &str = "https://gateway.example.com";

fn ctx() -> RequestContext {
    let credentials = Credentials {
        host: HOST.to_string(),
        email: "user@example.com".into(),
        password: "secret".into(),
        client_instance_id: "instance-1".into(),
    };
    RequestContext::new(&credentials, "token-1")
}

fn api() -> DatevConnect<RecordingTransport> {
    DatevConnect::new(RecordingTransport::new())
}

fn last_url(api: &DatevConnect<RecordingTransport>) -> String {
    api.transport().last_request().unwrap().url
}

#[test]
fn list_wrapper_passes_query_through() {
    let api = api();
    let query = ListQuery {
        top: Some(100),
        skip: None,
        select: Some("id,name".into()),
        filter: Some("number gt 10000".into()),
        expand: None,
    };
    api.fetch_clients(&ctx(), &query).unwrap();
    assert_eq!(
        last_url(&api),
        format!("{HOST}/datev/api/master-data/v1/clients?top=100&select=id%2Cname&filter=number+gt+10000")
    );
}

#[test]
fn id_segments_are_encoded() {
    let api = api();
    api.fetch_employee(&ctx(), "a/b c", &ItemQuery::default()).unwrap();
    assert_eq!(last_url(&api), format!("{HOST}/datev/api/master-data/v1/employees/a%2Fb%20c"));
}

#[test]
fn legal_forms_send_national_right() {
    let api = api();
    api.fetch_legal_forms(&ctx(), &ListQuery::default(), Some("DE")).unwrap();
    assert_eq!(
        last_url(&api),
        format!("{HOST}/datev/api/master-data/v1/legal-forms?national-right=DE")
    );
}

#[test]
fn next_free_number_keeps_zero_range() {
    let api = api();
    api.fetch_next_free_client_number(&ctx(), 1, Some(0)).unwrap();
    assert_eq!(
        last_url(&api),
        format!("{HOST}/datev/api/master-data/v1/clients/next-free-number?start=1&range=0")
    );
}

#[test]
fn deletion_log_omits_absent_max_number() {
    let api = api();
    api.fetch_addressee_deletion_log(&ctx(), None).unwrap();
    assert_eq!(last_url(&api), format!("{HOST}/datev/api/master-data/v1/addressees/deletion-log"));
}

#[test]
fn update_uses_put_with_body() {
    let api = api();
    let body = json!({ "surname": "Schmidt" });
    api.update_employee(&ctx(), "e-1", &body).unwrap();
    let request = api.transport().last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.body.as_deref(), Some(r#"{"surname":"Schmidt"}"#));
}

#[test]
fn creditor_paths_use_creditor_collection() {
    let api = api();
    api.update_business_partner(&ctx(), PartnerKind::Creditor, "455148-1", "20240101", "70000", &json!({}))
        .unwrap();
    assert_eq!(
        last_url(&api),
        format!("{HOST}/datev/api/accounting/v1/clients/455148-1/fiscal-years/20240101/creditors/70000")
    );
}

#[test]
fn accounting_records_nest_below_sequence() {
    let api = api();
    api.fetch_accounting_records(&ctx(), "c", "f", "seq-1", &ListQuery::default())
        .unwrap();
    assert_eq!(
        last_url(&api),
        format!("{HOST}/datev/api/accounting/v1/clients/c/fiscal-years/f/accounting-sequences/seq-1/accounting-records")
    );
}

#[test]
fn internal_cost_services_post_below_cost_system() {
    let api = api();
    api.create_internal_cost_service(&ctx(), "c", "f", "1", &json!([{ "amount": 10 }]))
        .unwrap();
    let request = api.transport().last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(
        request.url,
        format!("{HOST}/datev/api/accounting/v1/clients/c/fiscal-years/f/cost-systems/1/internal-cost-services")
    );
}

#[test]
fn empty_fetch_body_reads_as_null() {
    let api = DatevConnect::new(RecordingTransport::new().respond(HttpResponse::json(200, "OK", "")));
    let value = api.fetch_variance_analysis(&ctx(), "c", "f", &ItemQuery::default()).unwrap();
    assert!(value.is_null());
}

#[test]
fn create_without_body_is_none() {
    let api = DatevConnect::new(RecordingTransport::new().respond(HttpResponse::json(201, "Created", "")));
    let created = api.create_employee(&ctx(), &json!({ "surname": "Weber" })).unwrap();
    assert!(created.is_none());
}
