//! In-memory stand-in for a DATEVconnect gateway.
//!
//! Serves the login endpoint plus a representative slice of the master-data
//! and accounting APIs, with the same auth rules as the real gateway: a bearer
//! token issued by `/api/auth/login` and an `x-client-instance-id` header.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo";
pub const CLIENT_INSTANCE_HEADER: &str = "x-client-instance-id";
pub const ACCOUNTING_CLIENT_ID: &str = "455148-10000";
pub const FISCAL_YEAR_ID: &str = "20240101";

const MASTER_DATA: &str = "/datev/api/master-data/v1";
const ACCOUNTING: &str = "/datev/api/accounting/v1";

#[derive(Debug, Default)]
pub struct MockState {
    tokens: HashSet<String>,
    clients: Vec<Value>,
    employees: Vec<Value>,
    legal_forms: Vec<Value>,
    fiscal_years: HashMap<String, Vec<Value>>,
    postings: HashMap<(String, String), Vec<Value>>,
    debitors: HashMap<(String, String), Vec<Value>>,
}

impl MockState {
    /// State pre-filled with a few clients, employees and one accounting
    /// client with a 2024 fiscal year.
    pub fn seeded() -> Self {
        let scope = (ACCOUNTING_CLIENT_ID.to_string(), FISCAL_YEAR_ID.to_string());
        Self {
            tokens: HashSet::new(),
            clients: vec![
                json!({"id": "2b7c4f6e-0000-4000-8000-000000000001", "number": 10000, "name": "Muster GmbH"}),
                json!({"id": "2b7c4f6e-0000-4000-8000-000000000002", "number": 10001, "name": "Beispiel KG"}),
                json!({"id": "2b7c4f6e-0000-4000-8000-000000000003", "number": 10003, "name": "Testbau AG"}),
            ],
            employees: vec![
                json!({"id": "e-1", "surname": "Schmidt", "first_name": "Anna"}),
                json!({"id": "e-2", "surname": "Weber", "first_name": "Jonas"}),
            ],
            legal_forms: vec![
                json!({"id": "GmbH", "short_name": "GmbH", "national_right": "DE"}),
                json!({"id": "AG", "short_name": "AG", "national_right": "DE"}),
                json!({"id": "GesmbH", "short_name": "GesmbH", "national_right": "AT"}),
            ],
            fiscal_years: HashMap::from([(
                ACCOUNTING_CLIENT_ID.to_string(),
                vec![
                    json!({"id": "20230101", "begin": "2023-01-01", "end": "2023-12-31"}),
                    json!({"id": FISCAL_YEAR_ID, "begin": "2024-01-01", "end": "2024-12-31"}),
                ],
            )]),
            postings: HashMap::from([(
                scope.clone(),
                vec![
                    json!({"id": "1", "account_number": 1200, "amount": 119.0, "posting_description": "Invoice 1"}),
                    json!({"id": "2", "account_number": 8400, "amount": -100.0, "posting_description": "Invoice 1"}),
                    json!({"id": "3", "account_number": 1776, "amount": -19.0, "posting_description": "Invoice 1"}),
                ],
            )]),
            debitors: HashMap::from([(
                scope,
                vec![json!({"id": "10000", "account_number": 10000, "caption": "Kunde A"})],
            )]),
        }
    }
}

pub type Db = Arc<RwLock<MockState>>;

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<T, ApiError>;

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "message": message })))
}

pub fn app() -> Router {
    app_with_state(MockState::seeded())
}

pub fn app_with_state(state: MockState) -> Router {
    let db: Db = Arc::new(RwLock::new(state));

    let master_data = Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/next-free-number", get(next_free_client_number))
        .route("/clients/{id}", get(get_client).put(update_client))
        .route("/employees", get(list_employees))
        .route("/employees/{id}", get(get_employee))
        .route("/legal-forms", get(list_legal_forms));

    let accounting = Router::new()
        .route("/clients/{client}/fiscal-years", get(list_fiscal_years))
        .route(
            "/clients/{client}/fiscal-years/{fy}/account-postings",
            get(list_account_postings),
        )
        .route(
            "/clients/{client}/fiscal-years/{fy}/debitors",
            get(list_debitors).post(create_debitor),
        )
        .route(
            "/clients/{client}/fiscal-years/{fy}/debitors/next-available",
            get(next_available_debitor),
        )
        .route(
            "/clients/{client}/fiscal-years/{fy}/debitors/{id}",
            get(get_debitor).put(update_debitor),
        );

    let api = Router::new()
        .nest(MASTER_DATA, master_data)
        .nest(ACCOUNTING, accounting)
        .layer(middleware::from_fn_with_state(db.clone(), require_session));

    Router::new()
        .route("/api/auth/login", post(login))
        .merge(api)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(State(db): State<Db>, Json(input): Json<LoginRequest>) -> ApiResult<Json<Value>> {
    if input.email != DEMO_EMAIL || input.password != DEMO_PASSWORD {
        return Err(api_error(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }
    let token = Uuid::new_v4().to_string();
    db.write().await.tokens.insert(token.clone());
    Ok(Json(json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": 3600,
    })))
}

async fn require_session(State(db): State<Db>, request: Request, next: Next) -> Response {
    let token = bearer_token(request.headers()).map(str::to_string);
    let known = match token {
        Some(token) => db.read().await.tokens.contains(&token),
        None => false,
    };
    if !known {
        return api_error(StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }
    let has_instance = request
        .headers()
        .get(CLIENT_INSTANCE_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.trim().is_empty());
    if !has_instance {
        return api_error(StatusCode::BAD_REQUEST, "Missing client instance id").into_response();
    }
    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub top: Option<usize>,
    pub skip: Option<usize>,
}

/// Apply `skip` then `top` to a collection.
pub fn page(items: &[Value], params: &ListParams) -> Vec<Value> {
    items
        .iter()
        .skip(params.skip.unwrap_or(0))
        .take(params.top.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

fn find_by_id<'a>(items: &'a [Value], id: &str) -> Option<&'a Value> {
    items.iter().find(|item| item["id"] == id)
}

fn merge(target: &mut Value, patch: Value) {
    if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
        for (key, value) in patch {
            if key != "id" {
                target.insert(key, value);
            }
        }
    }
}

fn require_object(body: Value) -> ApiResult<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(api_error(StatusCode::BAD_REQUEST, "Request body must be a JSON object")),
    }
}

/// Smallest number `>= start` not in `taken`, looking at most `range`
/// numbers ahead.
pub fn first_free(taken: &HashSet<u64>, start: u64, range: Option<u64>) -> Option<u64> {
    let end = range.map_or(u64::MAX, |r| start.saturating_add(r));
    (start..end).find(|n| !taken.contains(n))
}

// ---------------------------------------------------------------------------
// Master data
// ---------------------------------------------------------------------------

async fn list_clients(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Value>> {
    Json(page(&db.read().await.clients, &params))
}

async fn get_client(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let state = db.read().await;
    find_by_id(&state.clients, &id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Client not found"))
}

async fn create_client(
    State(db): State<Db>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut client = require_object(body)?;
    if !client.get("name").is_some_and(Value::is_string) {
        return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, "name is required"));
    }
    client.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
    let client = Value::Object(client);
    db.write().await.clients.push(client.clone());
    Ok((StatusCode::CREATED, Json(client)))
}

async fn update_client(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<StatusCode> {
    let patch = require_object(body)?;
    let mut state = db.write().await;
    let client = state
        .clients
        .iter_mut()
        .find(|c| c["id"] == id.as_str())
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Client not found"))?;
    merge(client, Value::Object(patch));
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct NextFreeParams {
    start: Option<u64>,
    range: Option<u64>,
}

async fn next_free_client_number(
    State(db): State<Db>,
    Query(params): Query<NextFreeParams>,
) -> ApiResult<Json<Value>> {
    let state = db.read().await;
    let taken: HashSet<u64> = state.clients.iter().filter_map(|c| c["number"].as_u64()).collect();
    first_free(&taken, params.start.unwrap_or(1), params.range)
        .map(|n| Json(json!({ "number": n })))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No free client number in range"))
}

async fn list_employees(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Value>> {
    Json(page(&db.read().await.employees, &params))
}

async fn get_employee(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let state = db.read().await;
    find_by_id(&state.employees, &id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Employee not found"))
}

#[derive(Deserialize)]
struct LegalFormParams {
    #[serde(rename = "national-right")]
    national_right: Option<String>,
}

async fn list_legal_forms(
    State(db): State<Db>,
    Query(params): Query<LegalFormParams>,
) -> Json<Vec<Value>> {
    let state = db.read().await;
    let forms = state
        .legal_forms
        .iter()
        .filter(|form| match &params.national_right {
            Some(right) => form["national_right"] == right.as_str(),
            None => true,
        })
        .cloned()
        .collect();
    Json(forms)
}

// ---------------------------------------------------------------------------
// Accounting
// ---------------------------------------------------------------------------

async fn list_fiscal_years(
    State(db): State<Db>,
    Path(client): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Value>>> {
    let state = db.read().await;
    state
        .fiscal_years
        .get(&client)
        .map(|years| Json(page(years, &params)))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Client unknown"))
}

async fn list_account_postings(
    State(db): State<Db>,
    Path((client, fy)): Path<(String, String)>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Value>>> {
    let state = db.read().await;
    state
        .postings
        .get(&(client, fy))
        .map(|postings| Json(page(postings, &params)))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Fiscal year unknown"))
}

async fn list_debitors(
    State(db): State<Db>,
    Path((client, fy)): Path<(String, String)>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Value>>> {
    let state = db.read().await;
    state
        .debitors
        .get(&(client, fy))
        .map(|debitors| Json(page(debitors, &params)))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Fiscal year unknown"))
}

async fn get_debitor(
    State(db): State<Db>,
    Path((client, fy, id)): Path<(String, String, String)>,
) -> ApiResult<Json<Value>> {
    let state = db.read().await;
    state
        .debitors
        .get(&(client, fy))
        .and_then(|debitors| find_by_id(debitors, &id))
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Debitor not found"))
}

fn account_numbers(debitors: &[Value]) -> HashSet<u64> {
    debitors.iter().filter_map(|d| d["account_number"].as_u64()).collect()
}

async fn create_debitor(
    State(db): State<Db>,
    Path((client, fy)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut debitor = require_object(body)?;
    let mut state = db.write().await;
    let debitors = state
        .debitors
        .get_mut(&(client, fy))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Fiscal year unknown"))?;
    let number = match debitor.get("account_number").and_then(Value::as_u64) {
        Some(number) => number,
        None => first_free(&account_numbers(&debitors[..]), 10000, None)
            .ok_or_else(|| api_error(StatusCode::CONFLICT, "No free account number"))?,
    };
    debitor.insert("id".into(), Value::String(number.to_string()));
    debitor.insert("account_number".into(), json!(number));
    let debitor = Value::Object(debitor);
    debitors.push(debitor.clone());
    Ok((StatusCode::CREATED, Json(debitor)))
}

async fn update_debitor(
    State(db): State<Db>,
    Path((client, fy, id)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> ApiResult<StatusCode> {
    let patch = require_object(body)?;
    let mut state = db.write().await;
    let debitor = state
        .debitors
        .get_mut(&(client, fy))
        .and_then(|debitors| debitors.iter_mut().find(|d| d["id"] == id.as_str()))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Debitor not found"))?;
    merge(debitor, Value::Object(patch));
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct NextAvailableParams {
    #[serde(rename = "start-at")]
    start_at: Option<u64>,
}

async fn next_available_debitor(
    State(db): State<Db>,
    Path((client, fy)): Path<(String, String)>,
    Query(params): Query<NextAvailableParams>,
) -> ApiResult<Json<Value>> {
    let state = db.read().await;
    let debitors = state
        .debitors
        .get(&(client, fy))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Fiscal year unknown"))?;
    first_free(&account_numbers(debitors), params.start_at.unwrap_or(10000), None)
        .map(|n| Json(json!({ "account_number": n })))
        .ok_or_else(|| api_error(StatusCode::CONFLICT, "No free account number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_applies_skip_then_top() {
        let items: Vec<Value> = (0..5).map(|i| json!({ "id": i })).collect();
        let params = ListParams { top: Some(2), skip: Some(1) };
        let ids: Vec<_> = page(&items, &params).iter().map(|v| v["id"].clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(2)]);
    }

    #[test]
    fn page_without_params_returns_everything() {
        let items = vec![json!({}), json!({})];
        assert_eq!(page(&items, &ListParams::default()).len(), 2);
    }

    #[test]
    fn first_free_skips_taken_numbers() {
        let taken = HashSet::from([10000, 10001, 10003]);
        assert_eq!(first_free(&taken, 10000, None), Some(10002));
        assert_eq!(first_free(&taken, 10000, Some(2)), None);
        assert_eq!(first_free(&taken, 10000, Some(0)), None);
    }

    #[test]
    fn merge_never_overwrites_id() {
        let mut target = json!({"id": "1", "name": "old"});
        merge(&mut target, json!({"id": "2", "name": "new"}));
        assert_eq!(target, json!({"id": "1", "name": "new"}));
    }

    #[test]
    fn seeded_state_has_accounting_scope() {
        let state = MockState::seeded();
        let key = (ACCOUNTING_CLIENT_ID.to_string(), FISCAL_YEAR_ID.to_string());
        assert_eq!(state.postings[&key].len(), 3);
        assert_eq!(state.debitors[&key].len(), 1);
    }
}
