//! Both nodes against the live mock gateway over real HTTP.

use std::net::SocketAddr;

use datevconnect_core::{Credentials, UreqTransport};
use datevconnect_node::{execute, AccountingNode, MasterDataNode, NodeError, StaticHost};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

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

fn credentials(addr: SocketAddr) -> Credentials {
    Credentials {
        host: format!("http://{addr}"),
        email: mock_server::DEMO_EMAIL.to_string(),
        password: mock_server::DEMO_PASSWORD.to_string(),
        client_instance_id: "instance-1".to_string(),
    }
}

fn field(records: &[datevconnect_node::OutputRecord], key: &str) -> Vec<Value> {
    records.iter().map(|r| r.json[key].clone()).collect()
}

#[test]
fn master_data_items_against_mock() {
    let addr = start_server();
    let host = StaticHost::new(credentials(addr))
        .with_item(json!({ "resource": "client", "operation": "getAll", "top": 2 }))
        .with_item(json!({ "resource": "legalForm", "operation": "getAll", "nationalRight": "AT" }))
        .with_item(json!({ "resource": "client", "operation": "getNextFreeNumber", "start": 10000 }))
        .with_item(json!({
            "resource": "client",
            "operation": "update",
            "clientId": "2b7c4f6e-0000-4000-8000-000000000001",
            "data": { "name": "Renamed GmbH" }
        }));

    let outputs = execute::<MasterDataNode, _>(&host, UreqTransport::new()).unwrap();
    let records = &outputs[0];

    let items: Vec<_> = records.iter().map(|r| r.paired_item.item).collect();
    assert_eq!(items, vec![0, 0, 1, 2, 3]);
    assert_eq!(field(&records[..2], "number"), vec![json!(10000), json!(10001)]);
    assert_eq!(records[2].json["id"], json!("GesmbH"));
    assert_eq!(records[4].json, json!({ "success": true }).as_object().unwrap().clone());
}

#[test]
fn accounting_items_against_mock() {
    let addr = start_server();
    let host = StaticHost::new(credentials(addr))
        .with_parameter("clientId", mock_server::ACCOUNTING_CLIENT_ID)
        .with_parameter("fiscalYearId", mock_server::FISCAL_YEAR_ID)
        .with_item(json!({ "resource": "accountPosting", "operation": "getAll" }))
        .with_item(json!({ "resource": "debitor", "operation": "get", "debitorId": "10000" }))
        .with_item(json!({ "resource": "debitor", "operation": "getNextAvailable" }));

    let outputs = execute::<AccountingNode, _>(&host, UreqTransport::new()).unwrap();
    let records = &outputs[0];

    assert_eq!(records.iter().filter(|r| r.paired_item.item == 0).count(), 3);
    let debitor = records.iter().find(|r| r.paired_item.item == 1).unwrap();
    assert_eq!(debitor.json["id"], json!("10000"));
    assert!(records.iter().any(|r| r.paired_item.item == 2));
}

#[test]
fn not_found_becomes_error_record_under_continue_on_fail() {
    let addr = start_server();
    let host = StaticHost::new(credentials(addr))
        .with_parameter("resource", "employee")
        .with_parameter("operation", "get")
        .with_item(json!({ "employeeId": "missing" }))
        .with_item(json!({ "employeeId": "e-1" }))
        .with_continue_on_fail(true);

    let outputs = execute::<MasterDataNode, _>(&host, UreqTransport::new()).unwrap();
    let records = &outputs[0];

    assert_eq!(
        records[0].json["error"],
        json!("DATEVconnect request failed (404 Not Found): Employee not found")
    );
    assert_eq!(records[1].json["id"], json!("e-1"));
}

#[test]
fn wrong_password_aborts() {
    let addr = start_server();
    let host = StaticHost::new(Credentials {
        password: "wrong".into(),
        ..credentials(addr)
    })
    .with_parameter("resource", "employee")
    .with_parameter("operation", "getAll");

    let err = execute::<MasterDataNode, _>(&host, UreqTransport::new()).unwrap_err();
    assert!(matches!(err, NodeError::Authentication(_)));
}
