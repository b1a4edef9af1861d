//! Blocking client core for the DATEVconnect gateway.
//!
//! # Overview
//! Builds authenticated `HttpRequest` values against the master-data and
//! accounting APIs, executes them through a [`Transport`], and classifies the
//! responses into JSON or a uniform [`DatevError`].
//!
//! # Design
//! - `client::build_request` / `client::classify_response` are pure; only a
//!   `Transport` does I/O (`UreqTransport` in production,
//!   `RecordingTransport` in tests).
//! - `DatevConnect` holds no session. The caller logs in once with
//!   `authenticate` and passes the token to every call through a
//!   [`RequestContext`]; each endpoint is one thin method (see [`endpoints`]).
//! - Payloads stay `serde_json::Value`; the API's own validation applies.

pub mod auth;
pub mod client;
pub mod context;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;

pub use auth::Credentials;
pub use client::DatevConnect;
pub use context::RequestContext;
pub use endpoints::accounting::PartnerKind;
pub use error::DatevError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{ItemQuery, ListQuery, QueryParams};
pub use transport::{RecordingTransport, Transport, UreqTransport};
