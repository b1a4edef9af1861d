//! Executes `HttpRequest` values.
//!
//! # Design
//! The request builder and classifier never touch the network; a `Transport`
//! does. `UreqTransport` is the production implementation. Tests substitute a
//! recording transport that replays canned responses.

use std::cell::RefCell;
use std::collections::VecDeque;

use tracing::debug;

use crate::error::DatevError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Implementations must return non-2xx responses as data; only failures that
/// produce no response at all are errors.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DatevError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DatevError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DatevError> {
        debug!(method = %request.method, url = %request.url, "sending DATEVconnect request");

        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url.as_str()), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(url.as_str()), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(url.as_str()), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(url.as_str()), &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(url.as_str()), &headers).send_empty(),
        };
        let mut response = result.map_err(|e| {
            DatevError::Transport(format!("DATEVconnect request could not be sent: {e}"))
        })?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(|e| {
            DatevError::Transport(format!("DATEVconnect response could not be read: {e}"))
        })?;

        debug!(status = status.as_u16(), "DATEVconnect response received");
        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

/// In-memory transport that records requests and replays scripted outcomes.
///
/// Outcomes are consumed in order; once the script is exhausted every request
/// gets the fallback response (`200 {}` unless changed).
#[derive(Debug)]
pub struct RecordingTransport {
    requests: RefCell<Vec<HttpRequest>>,
    script: RefCell<VecDeque<Result<HttpResponse, String>>>,
    fallback: HttpResponse,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            script: RefCell::new(VecDeque::new()),
            fallback: HttpResponse::json(200, "OK", "{}"),
        }
    }

    /// Answer every unscripted request with `response`.
    pub fn with_fallback(mut self, response: HttpResponse) -> Self {
        self.fallback = response;
        self
    }

    pub fn respond(self, response: HttpResponse) -> Self {
        self.script.borrow_mut().push_back(Ok(response));
        self
    }

    /// Fail the next request as if the connection broke, with `message`.
    pub fn fail(self, message: &str) -> Self {
        self.script.borrow_mut().push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DatevError> {
        self.requests.borrow_mut().push(request);
        match self.script.borrow_mut().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(DatevError::Transport(message)),
            None => Ok(self.fallback.clone()),
        }
    }
}
