//! Error types for the DATEVconnect client.
//!
//! # Design
//! Every non-2xx response lands in `Http` with the status, the reason phrase
//! and whatever message the body carried, so the `Display` output is the one
//! line users see in an error record. `Transport` carries its message as-is.

use thiserror::Error;

/// Prefix for failed API calls.
pub const REQUEST_FAILED: &str = "DATEVconnect request failed";
/// Prefix for a failed login.
pub const AUTHENTICATION_FAILED: &str = "DATEVconnect authentication failed";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatevError {
    /// The server answered with a non-2xx status.
    #[error("{}", http_message(prefix, *status, status_text, message.as_deref()))]
    Http {
        prefix: &'static str,
        status: u16,
        status_text: String,
        message: Option<String>,
    },

    /// The request never produced a response (connection refused, TLS, ...).
    #[error("{0}")]
    Transport(String),

    /// A 2xx response whose body is neither empty nor JSON.
    #[error("Expected JSON response body")]
    UnexpectedBody,

    /// The body was declared JSON but did not parse.
    #[error("DATEVconnect returned malformed JSON: {0}")]
    InvalidJson(String),

    #[error("DATEVconnect login response did not contain an access_token")]
    MissingAccessToken,

    #[error("Invalid DATEVconnect host \"{host}\": {reason}")]
    InvalidHost { host: String, reason: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl DatevError {
    /// HTTP status of an `Http` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            DatevError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn http_message(prefix: &str, status: u16, status_text: &str, message: Option<&str>) -> String {
    let status_line = if status_text.is_empty() {
        status.to_string()
    } else {
        format!("{status} {status_text}")
    };
    match message {
        Some(message) => format!("{prefix} ({status_line}): {message}"),
        None => format!("{prefix} ({status_line})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_with_message() {
        let err = DatevError::Http {
            prefix: REQUEST_FAILED,
            status: 401,
            status_text: "Unauthorized".to_string(),
            message: Some("Something went wrong".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "DATEVconnect request failed (401 Unauthorized): Something went wrong"
        );
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn http_error_without_message() {
        let err = DatevError::Http {
            prefix: AUTHENTICATION_FAILED,
            status: 500,
            status_text: String::new(),
            message: None,
        };
        assert_eq!(err.to_string(), "DATEVconnect authentication failed (500)");
    }

    #[test]
    fn transport_error_keeps_message() {
        assert_eq!(DatevError::Transport("API Error".into()).to_string(), "API Error");
    }
}
