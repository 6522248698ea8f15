//! HTTP Transport Seam
//!
//! The dashboard only ever needs "send this request, give me status and body
//! text". [`Transport`] captures that so the controller and helpers run the same
//! way against `fetch` in the browser, `reqwest` on the host, or a scripted
//! mock in tests.
//!
//! Transports attach the CSRF header to every mutating request; callers never
//! handle the token themselves.

#[cfg(feature = "native")]
pub mod http;

#[cfg(feature = "native")]
pub use http::{HttpTransport, HttpTransportConfig};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::TransportError;

/// HTTP method subset used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Encoded request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    /// Serialized JSON document
    Json(String),
    /// `application/x-www-form-urlencoded` pairs, encoded on send
    Form(Vec<(String, String)>),
}

impl Body {
    /// Content-Type header for this body, if any
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Body::Empty => None,
            Body::Json(_) => Some("application/json"),
            Body::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }

    /// Wire representation
    pub fn encode(&self) -> Option<String> {
        match self {
            Body::Empty => None,
            Body::Json(json) => Some(json.clone()),
            Body::Form(pairs) => Some(
                pairs
                    .iter()
                    .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&"),
            ),
        }
    }
}

/// A request against the dashboard backend. `path` is origin-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Body,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: Body::Empty,
        }
    }

    /// POST with no body (only the CSRF header)
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Body::Empty,
        }
    }

    /// POST with a JSON body
    pub fn post_json<T: Serialize>(path: impl Into<String>, value: &T) -> Result<Self, TransportError> {
        let json = serde_json::to_string(value).map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            body: Body::Json(json),
        })
    }

    /// POST with form-encoded fields
    pub fn post_form(path: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Body::Form(
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    /// Whether the backend's CSRF check applies
    pub fn is_mutating(&self) -> bool {
        self.method != Method::Get
    }
}

/// Status and body text of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Anything that can carry a [`Request`] to the backend.
///
/// Futures are not `Send`: the browser build runs on a single-threaded event
/// loop and the host build drives everything from one task.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}
