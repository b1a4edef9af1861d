//! End-to-end calls against the live mock gateway.
//!
//! # Design
//! Starts the mock server on a random port, then drives `DatevConnect` over
//! real HTTP with `UreqTransport`, covering login, list/get/create/update
//! and error classification.

use std::net::SocketAddr;

use datevconnect_core::{
    Credentials, DatevConnect, DatevError, ItemQuery, ListQuery, PartnerKind, RequestContext,
    UreqTransport,
};
use serde_json::json;

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

fn credentials(addr: SocketAddr, password: &str) -> Credentials {
    Credentials {
        host: format!("http://{addr}"),
        email: mock_server::DEMO_EMAIL.to_string(),
        password: password.to_string(),
        client_instance_id: "instance-1".to_string(),
    }
}

#[test]
fn login_and_master_data_lifecycle() {
    let addr = start_server();
    let api = DatevConnect::new(UreqTransport::new());
    let credentials = credentials(addr, mock_server::DEMO_PASSWORD);

    // Step 1: authenticate.
    let token = api.authenticate(&credentials).unwrap();
    assert!(!token.is_empty());
    let ctx = RequestContext::new(&credentials, token);

    // Step 2: list with paging options.
    let query = ListQuery {
        top: Some(2),
        ..ListQuery::default()
    };
    let clients = api.fetch_clients(&ctx, &query).unwrap();
    assert_eq!(clients.as_array().unwrap().len(), 2);

    // Step 3: create.
    let created = api
        .create_client(&ctx, &json!({ "name": "Integration GmbH", "number": 10002 }))
        .unwrap()
        .expect("created client is returned");
    let id = created["id"].as_str().unwrap().to_string();

    // Step 4: update answers 204, i.e. no body.
    let updated = api
        .update_client(&ctx, &id, &json!({ "name": "Integration AG" }))
        .unwrap();
    assert!(updated.is_none());

    // Step 5: get reflects the update.
    let fetched = api.fetch_client(&ctx, &id, &ItemQuery::default()).unwrap();
    assert_eq!(fetched["name"], "Integration AG");

    // Step 6: numeric query parameters.
    let next = api.fetch_next_free_client_number(&ctx, 10000, Some(10)).unwrap();
    assert_eq!(next, json!({ "number": 10004 }));

    // Step 7: a 404 carries the server's message.
    let err = api
        .fetch_client(&ctx, "does-not-exist", &ItemQuery::default())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "DATEVconnect request failed (404 Not Found): Client not found"
    );
}

#[test]
fn accounting_business_partners() {
    let addr = start_server();
    let api = DatevConnect::new(UreqTransport::new());
    let credentials = credentials(addr, mock_server::DEMO_PASSWORD);
    let ctx = RequestContext::new(&credentials, api.authenticate(&credentials).unwrap());
    let (client, fy) = (mock_server::ACCOUNTING_CLIENT_ID, mock_server::FISCAL_YEAR_ID);

    let years = api.fetch_fiscal_years(&ctx, client, &ListQuery::default()).unwrap();
    assert_eq!(years.as_array().unwrap().len(), 2);

    let postings = api
        .fetch_account_postings(&ctx, client, fy, &ListQuery { skip: Some(1), ..ListQuery::default() })
        .unwrap();
    assert_eq!(postings.as_array().unwrap().len(), 2);

    let next = api
        .fetch_next_available_business_partner(&ctx, PartnerKind::Debitor, client, fy, Some(10000))
        .unwrap();
    assert_eq!(next["account_number"], 10001);

    let created = api
        .create_business_partner(&ctx, PartnerKind::Debitor, client, fy, &json!({ "caption": "Kunde B" }))
        .unwrap()
        .unwrap();
    assert_eq!(created["id"], "10001");

    let fetched = api
        .fetch_business_partner(&ctx, PartnerKind::Debitor, client, fy, "10001", &ItemQuery::default())
        .unwrap();
    assert_eq!(fetched["caption"], "Kunde B");
}

#[test]
fn wrong_password_fails_authentication() {
    let addr = start_server();
    let api = DatevConnect::new(UreqTransport::new());
    let err = api.authenticate(&credentials(addr, "wrong")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "DATEVconnect authentication failed (401 Unauthorized): Invalid credentials"
    );
}

#[test]
fn stale_token_is_rejected() {
    let addr = start_server();
    let api = DatevConnect::new(UreqTransport::new());
    let ctx = RequestContext::new(&credentials(addr, mock_server::DEMO_PASSWORD), "not-issued");
    let err = api.fetch_employees(&ctx, &ListQuery::default()).unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[test]
fn unreachable_host_is_a_transport_error() {
    // Bind and drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let api = DatevConnect::new(UreqTransport::new());
    let err = api.authenticate(&credentials(addr, "x")).unwrap_err();
    assert!(matches!(err, DatevError::Transport(_)));
}
