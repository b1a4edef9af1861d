//! Query-string parameters.
//!
//! Values are stringified on insertion and `None` is dropped, so wrappers can
//! pass optional fields straight through.

use std::fmt::Display;

/// Ordered query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value` unless `value` is `None`.
    pub fn push<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn with<V: Display>(mut self, key: &str, value: Option<V>) -> Self {
        self.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// OData-style options accepted by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub top: Option<u32>,
    pub skip: Option<u32>,
    pub select: Option<String>,
    pub filter: Option<String>,
    pub expand: Option<String>,
}

impl ListQuery {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with("top", self.top)
            .with("skip", self.skip)
            .with("select", self.select.as_deref())
            .with("filter", self.filter.as_deref())
            .with("expand", self.expand.as_deref())
    }
}

/// Options accepted when fetching a single entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub select: Option<String>,
    pub expand: Option<String>,
}

impl ItemQuery {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with("select", self.select.as_deref())
            .with("expand", self.expand.as_deref())
    }
}
