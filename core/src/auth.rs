//! Login against the gateway.
//!
//! One `POST api/auth/login` per execution yields the bearer token every
//! later call reuses. Tokens are neither refreshed nor persisted.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::{classify_response, resolve_url, DatevConnect};
use crate::error::{DatevError, AUTHENTICATION_FAILED};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::QueryParams;
use crate::transport::Transport;

pub const LOGIN_PATH: &str = "api/auth/login";

/// Connection credentials for one node instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub host: String,
    pub email: String,
    pub password: String,
    pub client_instance_id: String,
}

impl Credentials {
    /// Names of the fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("host", &self.host),
            ("email", &self.email),
            ("password", &self.password),
            ("clientInstanceId", &self.client_instance_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("client_instance_id", &self.client_instance_id)
            .finish()
    }
}

pub fn build_login_request(host: &str, email: &str, password: &str) -> Result<HttpRequest, DatevError> {
    let url = resolve_url(host, LOGIN_PATH, &QueryParams::new())?;
    let body = json!({ "email": email, "password": password });
    Ok(HttpRequest {
        method: HttpMethod::Post,
        url: url.into(),
        headers: vec![
            ("accept".to_string(), "application/json".to_string()),
            ("content-type".to_string(), "application/json".to_string()),
        ],
        body: Some(body.to_string()),
    })
}

/// Extract `access_token` from a login response.
pub fn parse_login_response(response: &HttpResponse) -> Result<String, DatevError> {
    let body = classify_response(AUTHENTICATION_FAILED, response)?;
    body.as_ref()
        .and_then(|b| b.get("access_token"))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(DatevError::MissingAccessToken)
}

impl<T: Transport> DatevConnect<T> {
    /// Log in and return the bearer token.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<String, DatevError> {
        let request = build_login_request(&credentials.host, &credentials.email, &credentials.password)?;
        let response = self.transport().execute(request)?;
        parse_login_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_shape() {
        let req = build_login_request("https://gateway.example.com/", "a@b.de", "pw").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://gateway.example.com/api/auth/login");
        assert!(req.header("authorization").is_none());
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"email": "a@b.de", "password": "pw"}));
    }

    #[test]
    fn token_is_extracted() {
        let response = HttpResponse::json(200, "OK", r#"{"access_token":"abc","expires_in":3600}"#);
        assert_eq!(parse_login_response(&response).unwrap(), "abc");
    }

    #[test]
    fn missing_token_is_an_error() {
        let response = HttpResponse::json(200, "OK", r#"{"token":"abc"}"#);
        assert!(matches!(
            parse_login_response(&response).unwrap_err(),
            DatevError::MissingAccessToken
        ));
        let numeric = HttpResponse::json(200, "OK", r#"{"access_token":42}"#);
        assert!(parse_login_response(&numeric).is_err());
    }

    #[test]
    fn rejected_login_uses_authentication_prefix() {
        let response = HttpResponse::json(401, "Unauthorized", r#"{"message":"Invalid credentials"}"#);
        assert_eq!(
            parse_login_response(&response).unwrap_err().to_string(),
            "DATEVconnect authentication failed (401 Unauthorized): Invalid credentials"
        );
    }

    #[test]
    fn missing_fields_are_reported_by_wire_name() {
        let credentials = Credentials {
            host: "https://gateway.example.com".into(),
            email: " ".into(),
            password: "pw".into(),
            client_instance_id: String::new(),
        };
        assert_eq!(credentials.missing_fields(), vec!["email", "clientInstanceId"]);
    }
}
