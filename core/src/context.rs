//! Per-item request context.

use std::fmt;

use crate::auth::Credentials;

/// Everything a wrapper needs to address and authorize one call.
///
/// Built once per input item from the credentials, the execution's bearer
/// token and the item's optional client / fiscal-year scope.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub host: String,
    pub token: String,
    pub client_instance_id: String,
    pub client_id: Option<String>,
    pub fiscal_year_id: Option<String>,
}

impl RequestContext {
    pub fn new(credentials: &Credentials, token: impl Into<String>) -> Self {
        Self {
            host: credentials.host.clone(),
            token: token.into(),
            client_instance_id: credentials.client_instance_id.clone(),
            client_id: None,
            fiscal_year_id: None,
        }
    }

    /// Copy of this context scoped to a client and fiscal year.
    pub fn scoped(&self, client_id: Option<String>, fiscal_year_id: Option<String>) -> Self {
        Self {
            client_id,
            fiscal_year_id,
            ..self.clone()
        }
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("client_instance_id", &self.client_instance_id)
            .field("client_id", &self.client_id)
            .field("fiscal_year_id", &self.fiscal_year_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            host: "https://gateway.example.com".into(),
            email: "user@example.com".into(),
            password: "secret".into(),
            client_instance_id: "instance-1".into(),
        }
    }

    #[test]
    fn scoped_keeps_auth_fields() {
        let base = RequestContext::new(&credentials(), "token-1");
        let scoped = base.scoped(Some("455148-1".into()), Some("20240101".into()));
        assert_eq!(scoped.token, "token-1");
        assert_eq!(scoped.client_instance_id, "instance-1");
        assert_eq!(scoped.client_id.as_deref(), Some("455148-1"));
        assert!(base.client_id.is_none());
    }

    #[test]
    fn debug_hides_token() {
        let ctx = RequestContext::new(&credentials(), "very-secret-token");
        assert!(!format!("{ctx:?}").contains("very-secret-token"));
    }
}
