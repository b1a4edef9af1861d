//! Reading and validating node parameters.
//!
//! Everything here fails with a configuration-class [`NodeError`], which
//! continue-on-fail never swallows.

use datevconnect_core::{ItemQuery, ListQuery};
use serde_json::Value;

use crate::error::NodeError;
use crate::host::NodeHost;

/// `top` used when a list operation does not set one.
pub const DEFAULT_TOP: u32 = 100;

/// First client number searched by `getNextFreeNumber` when `start` is unset.
pub const DEFAULT_START: u32 = 1;

/// Accept a JSON parameter either as text or as an already-parsed value.
pub fn parse_json_parameter(value: &Value, name: &str, item_index: usize) -> Result<Value, NodeError> {
    match value {
        Value::String(text) => serde_json::from_str(text).map_err(|e| NodeError::InvalidParameter {
            name: name.to_string(),
            item_index,
            reason: format!("invalid JSON: {e}"),
        }),
        other => Ok(other.clone()),
    }
}

/// Non-blank string parameter. Numbers are accepted and stringified, since
/// ids such as fiscal years are often typed as numbers.
pub fn optional_string(host: &dyn NodeHost, name: &str, item_index: usize) -> Option<String> {
    match host.parameter(name, item_index)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn required_string(host: &dyn NodeHost, name: &str, item_index: usize) -> Result<String, NodeError> {
    optional_string(host, name, item_index).ok_or_else(|| NodeError::MissingParameter {
        name: name.to_string(),
        item_index,
    })
}

/// Non-negative integer parameter given as a number or numeric string.
/// An explicit `0` is kept.
pub fn optional_number(host: &dyn NodeHost, name: &str, item_index: usize) -> Result<Option<u32>, NodeError> {
    let invalid = |reason: String| NodeError::InvalidParameter {
        name: name.to_string(),
        item_index,
        reason,
    };
    match host.parameter(name, item_index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| invalid(format!("expected a non-negative integer: {e}"))),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(format!("expected a non-negative integer, got {n}"))),
        Some(other) => Err(invalid(format!("expected a number, got {other}"))),
    }
}

/// Required JSON body parameter.
pub fn json_parameter(host: &dyn NodeHost, name: &str, item_index: usize) -> Result<Value, NodeError> {
    let raw = host
        .parameter(name, item_index)
        .ok_or_else(|| NodeError::MissingParameter {
            name: name.to_string(),
            item_index,
        })?;
    parse_json_parameter(&raw, name, item_index)
}

/// List options: `top` defaults to [`DEFAULT_TOP`], a zero `skip` is dropped.
pub fn list_query(host: &dyn NodeHost, item_index: usize) -> Result<ListQuery, NodeError> {
    Ok(ListQuery {
        top: Some(optional_number(host, "top", item_index)?.unwrap_or(DEFAULT_TOP)),
        skip: optional_number(host, "skip", item_index)?.filter(|skip| *skip > 0),
        select: optional_string(host, "select", item_index),
        filter: optional_string(host, "filter", item_index),
        expand: optional_string(host, "expand", item_index),
    })
}

pub fn item_query(host: &dyn NodeHost, item_index: usize) -> ItemQuery {
    ItemQuery {
        select: optional_string(host, "select", item_index),
        expand: optional_string(host, "expand", item_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticHost;
    use datevconnect_core::Credentials;
    use serde_json::json;

    fn host() -> StaticHost {
        StaticHost::new(Credentials {
            host: "https://gateway.example.com".into(),
            email: "user@example.com".into(),
            password: "secret".into(),
            client_instance_id: "instance-1".into(),
        })
    }

    #[test]
    fn json_text_is_parsed() {
        assert_eq!(parse_json_parameter(&json!(r#"{"a":1}"#), "data", 0).unwrap(), json!({ "a": 1 }));
    }

    #[test]
    fn parsed_json_is_returned_unchanged() {
        let value = json!({ "a": 1 });
        assert_eq!(parse_json_parameter(&value, "data", 0).unwrap(), value);
    }

    #[test]
    fn invalid_json_names_the_parameter() {
        let err = parse_json_parameter(&json!("{oops"), "data", 2).unwrap_err();
        assert!(matches!(err, NodeError::InvalidParameter { ref name, item_index: 2, .. } if name == "data"));
    }

    #[test]
    fn list_query_defaults() {
        let query = list_query(&host(), 0).unwrap();
        assert_eq!(
            query,
            ListQuery {
                top: Some(100),
                ..ListQuery::default()
            }
        );
        assert!(query.to_params().get("skip").is_none());
    }

    #[test]
    fn zero_skip_is_dropped_but_other_values_pass() {
        let zero = host().with_parameter("skip", 0);
        assert_eq!(list_query(&zero, 0).unwrap().skip, None);
        let some = host().with_parameter("skip", "20").with_parameter("top", 5);
        let query = list_query(&some, 0).unwrap();
        assert_eq!((query.top, query.skip), (Some(5), Some(20)));
    }

    #[test]
    fn explicit_zero_number_is_kept() {
        let host = host().with_parameter("range", 0);
        assert_eq!(optional_number(&host, "range", 0).unwrap(), Some(0));
    }

    #[test]
    fn negative_number_is_rejected() {
        let host = host().with_parameter("top", -1);
        assert!(matches!(
            optional_number(&host, "top", 0),
            Err(NodeError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let host = host().with_parameter("clientId", "  ");
        assert!(matches!(
            required_string(&host, "clientId", 0),
            Err(NodeError::MissingParameter { .. })
        ));
        let numeric = self::host().with_parameter("fiscalYearId", 20240101);
        assert_eq!(optional_string(&numeric, "fiscalYearId", 0).as_deref(), Some("20240101"));
    }
}
