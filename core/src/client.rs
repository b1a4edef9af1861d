//! Request builder, response classifier and the `DatevConnect` facade.
//!
//! # Design
//! `build_request` and `classify_response` are pure: the first turns a
//! [`RequestContext`] plus a relative path into an [`HttpRequest`], the second
//! turns an [`HttpResponse`] into JSON or a [`DatevError`]. `DatevConnect`
//! glues them to a [`Transport`]; the endpoint wrappers in
//! [`crate::endpoints`] are thin methods on it.

use serde_json::Value;
use url::Url;

use crate::context::RequestContext;
use crate::error::{DatevError, REQUEST_FAILED};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::QueryParams;
use crate::transport::Transport;

/// Custom header identifying the client instance to the gateway.
pub const CLIENT_INSTANCE_HEADER: &str = "x-client-instance-id";

const JSON: &str = "application/json";

/// Normalize `host` into a base URL ending in `/`.
///
/// A host without a scheme is treated as `https://`. The trailing slash makes
/// relative resolution keep any path prefix the host carries.
pub fn base_url(host: &str) -> Result<Url, DatevError> {
    let trimmed = host.trim();
    let mut normalized = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| DatevError::InvalidHost {
        host: host.to_string(),
        reason: e.to_string(),
    })
}

/// Resolve `path` against `host` and append `query`.
pub fn resolve_url(host: &str, path: &str, query: &QueryParams) -> Result<Url, DatevError> {
    let base = base_url(host)?;
    let mut url = base
        .join(path.trim_start_matches('/'))
        .map_err(|e| DatevError::InvalidHost {
            host: host.to_string(),
            reason: e.to_string(),
        })?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.iter());
    }
    Ok(url)
}

/// Build an authenticated request against the DATEVconnect gateway.
pub fn build_request(
    ctx: &RequestContext,
    method: HttpMethod,
    path: &str,
    query: &QueryParams,
    body: Option<&Value>,
) -> Result<HttpRequest, DatevError> {
    let url = resolve_url(&ctx.host, path, query)?;
    let body = body
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| DatevError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url: url.into(),
        headers: vec![
            ("accept".to_string(), JSON.to_string()),
            ("authorization".to_string(), format!("Bearer {}", ctx.token)),
            ("content-type".to_string(), JSON.to_string()),
            (CLIENT_INSTANCE_HEADER.to_string(), ctx.client_instance_id.clone()),
        ],
        body,
    })
}

/// Classify a response.
///
/// Non-2xx becomes `DatevError::Http` labelled with `prefix`; an empty 2xx
/// body is `None`; anything else must be JSON.
pub fn classify_response(
    prefix: &'static str,
    response: &HttpResponse,
) -> Result<Option<Value>, DatevError> {
    let declared_json = response
        .header("content-type")
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
    let body = response.body.trim();

    if !response.is_success() {
        return Err(DatevError::Http {
            prefix,
            status: response.status,
            status_text: response.status_text.clone(),
            message: extract_message(body),
        });
    }

    if body.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value) => Ok(Some(value)),
        Err(e) if declared_json => Err(DatevError::InvalidJson(e.to_string())),
        Err(_) => Err(DatevError::UnexpectedBody),
    }
}

/// Pull a human-readable message out of an error body.
fn extract_message(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            let nested = map
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str);
            map.get("message")
                .and_then(Value::as_str)
                .or_else(|| map.get("error").and_then(Value::as_str))
                .or(nested)
                .or_else(|| map.get("error_description").and_then(Value::as_str))
                .filter(|m| !m.trim().is_empty())
                .map(str::to_string)
        }
        Ok(Value::String(message)) if !message.trim().is_empty() => Some(message),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

/// Authenticated DATEVconnect API over a [`Transport`].
#[derive(Debug, Clone)]
pub struct DatevConnect<T> {
    transport: T,
}

impl<T: Transport> DatevConnect<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build, execute and classify one call.
    pub fn send(
        &self,
        ctx: &RequestContext,
        method: HttpMethod,
        path: &str,
        query: &QueryParams,
        body: Option<&Value>,
    ) -> Result<Option<Value>, DatevError> {
        let request = build_request(ctx, method, path, query, body)?;
        let response = self.transport.execute(request)?;
        classify_response(REQUEST_FAILED, &response)
    }

    /// `GET` that always yields a value; an empty body reads as `null`.
    pub(crate) fn get(
        &self,
        ctx: &RequestContext,
        path: &str,
        query: QueryParams,
    ) -> Result<Value, DatevError> {
        Ok(self
            .send(ctx, HttpMethod::Get, path, &query, None)?
            .unwrap_or(Value::Null))
    }

    pub(crate) fn post(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        self.send(ctx, HttpMethod::Post, path, &QueryParams::new(), Some(body))
    }

    pub(crate) fn put(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: &Value,
    ) -> Result<Option<Value>, DatevError> {
        self.send(ctx, HttpMethod::Put, path, &QueryParams::new(), Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;

    fn ctx(host: &str) -> RequestContext {
        let credentials = Credentials {
            host: host.to_string(),
            email: "user@example.com".into(),
            password: "secret".into(),
            client_instance_id: "instance-1".into(),
        };
        RequestContext::new(&credentials, "token-1")
    }

    fn text(status: u16, status_text: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            headers: vec![("content-type".into(), "text/plain".into())],
            body: body.to_string(),
        }
    }

    #[test]
    fn base_url_forces_trailing_slash() {
        assert_eq!(
            base_url("https://gateway.example.com/tenant").unwrap().as_str(),
            "https://gateway.example.com/tenant/"
        );
    }

    #[test]
    fn base_url_defaults_to_https() {
        assert_eq!(
            base_url(" gateway.example.com ").unwrap().as_str(),
            "https://gateway.example.com/"
        );
    }

    #[test]
    fn base_url_rejects_garbage() {
        let err = base_url("http://").unwrap_err();
        assert!(matches!(err, DatevError::InvalidHost { .. }));
    }

    #[test]
    fn path_prefix_of_host_is_preserved() {
        let req = build_request(
            &ctx("https://gateway.example.com/tenant"),
            HttpMethod::Get,
            "/datev/api/master-data/v1/clients",
            &QueryParams::new(),
            None,
        )
        .unwrap();
        assert_eq!(
            req.url,
            "https://gateway.example.com/tenant/datev/api/master-data/v1/clients"
        );
    }

    #[test]
    fn build_request_sets_standard_headers() {
        let req = build_request(
            &ctx("https://gateway.example.com"),
            HttpMethod::Get,
            "datev/api/master-data/v1/clients",
            &QueryParams::new(),
            None,
        )
        .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("authorization"), Some("Bearer token-1"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header(CLIENT_INSTANCE_HEADER), Some("instance-1"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_request_appends_query_and_body() {
        let query = QueryParams::new().with("top", Some(100)).with::<u32>("skip", None);
        let body = serde_json::json!({"name": "Muster GmbH"});
        let req = build_request(
            &ctx("https://gateway.example.com"),
            HttpMethod::Post,
            "datev/api/master-data/v1/clients",
            &query,
            Some(&body),
        )
        .unwrap();
        assert_eq!(
            req.url,
            "https://gateway.example.com/datev/api/master-data/v1/clients?top=100"
        );
        let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn classify_401_with_json_message() {
        let response = HttpResponse::json(401, "Unauthorized", r#"{"message":"Something went wrong"}"#);
        let err = classify_response(REQUEST_FAILED, &response).unwrap_err();
        assert_eq!(
            err.to_string(),
            "DATEVconnect request failed (401 Unauthorized): Something went wrong"
        );
    }

    #[test]
    fn classify_error_field_and_nested_error() {
        let flat = HttpResponse::json(400, "Bad Request", r#"{"error":"invalid_filter"}"#);
        assert_eq!(
            classify_response(REQUEST_FAILED, &flat).unwrap_err().to_string(),
            "DATEVconnect request failed (400 Bad Request): invalid_filter"
        );
        let nested = HttpResponse::json(404, "Not Found", r#"{"error":{"code":"DCO01","message":"Client unknown"}}"#);
        assert_eq!(
            classify_response(REQUEST_FAILED, &nested).unwrap_err().to_string(),
            "DATEVconnect request failed (404 Not Found): Client unknown"
        );
    }

    #[test]
    fn classify_error_with_text_body() {
        let response = text(502, "Bad Gateway", "upstream unavailable\n");
        assert_eq!(
            classify_response(REQUEST_FAILED, &response).unwrap_err().to_string(),
            "DATEVconnect request failed (502 Bad Gateway): upstream unavailable"
        );
    }

    #[test]
    fn classify_error_without_message() {
        let response = HttpResponse::json(500, "Internal Server Error", r#"{"code":17}"#);
        assert_eq!(
            classify_response(REQUEST_FAILED, &response).unwrap_err().to_string(),
            "DATEVconnect request failed (500 Internal Server Error)"
        );
    }

    #[test]
    fn classify_empty_success_is_none() {
        let response = HttpResponse::json(204, "No Content", "");
        assert_eq!(classify_response(REQUEST_FAILED, &response).unwrap(), None);
    }

    #[test]
    fn classify_json_success() {
        let response = HttpResponse::json(200, "OK", r#"[{"id":"1"}]"#);
        let value = classify_response(REQUEST_FAILED, &response).unwrap().unwrap();
        assert_eq!(value, serde_json::json!([{"id": "1"}]));
    }

    #[test]
    fn classify_json_without_content_type() {
        let response = text(200, "OK", r#"{"id":"1"}"#);
        assert!(classify_response(REQUEST_FAILED, &response).unwrap().is_some());
    }

    #[test]
    fn classify_text_success_is_rejected() {
        let response = text(200, "OK", "<html>login</html>");
        let err = classify_response(REQUEST_FAILED, &response).unwrap_err();
        assert!(matches!(err, DatevError::UnexpectedBody));
        assert_eq!(err.to_string(), "Expected JSON response body");
    }

    #[test]
    fn classify_malformed_declared_json() {
        let response = HttpResponse::json(200, "OK", "{not json");
        let err = classify_response(REQUEST_FAILED, &response).unwrap_err();
        assert!(matches!(err, DatevError::InvalidJson(_)));
    }
}
