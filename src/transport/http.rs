//! Native HTTP Transport
//!
//! `reqwest`-backed [`Transport`] for the terminal client. The browser's
//! cookie jar is replaced by an explicit `Cookie` header copied from a logged-in
//! session; the CSRF token is read from that same header.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{Method, Request, Response, Transport};
use crate::csrf::CsrfConfig;
use crate::error::TransportError;

/// Settings for [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Origin of the dashboard backend (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Raw `Cookie` header sent with every request
    pub cookie: Option<String>,
    pub csrf: CsrfConfig,
    /// Unset means no timeout, matching the browser's `fetch`
    pub request_timeout: Option<Duration>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            cookie: None,
            csrf: CsrfConfig::default(),
            request_timeout: None,
        }
    }
}

/// `reqwest` transport
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    pub fn new(mut config: HttpTransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn csrf_token(&self) -> Option<String> {
        self.config
            .cookie
            .as_deref()
            .and_then(|cookie| self.config.csrf.token(cookie))
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.url(&request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        if let Some(cookie) = &self.config.cookie {
            builder = builder.header(reqwest::header::COOKIE, cookie);
        }

        if request.is_mutating() {
            // Sent even when empty; the backend answers 403 then
            let token = self.csrf_token().unwrap_or_default();
            builder = builder.header(self.config.csrf.header_name.as_str(), token);
        }

        if let Some(content_type) = request.body.content_type() {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body.encode() {
            builder = builder.body(body);
        }

        tracing::debug!(method = request.method.as_str(), url = %url, "Sending request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else if e.is_builder() {
                TransportError::Build(e.to_string())
            } else {
                TransportError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Response { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let transport = HttpTransport::new(HttpTransportConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            transport.url("/dashboard/workout"),
            "http://localhost:8000/dashboard/workout"
        );
    }

    #[test]
    fn test_csrf_from_cookie() {
        let transport = HttpTransport::new(HttpTransportConfig {
            cookie: Some("sessionid=s1; csrftoken=abc".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(transport.csrf_token(), Some("abc".to_string()));

        let transport = HttpTransport::new(HttpTransportConfig::default()).unwrap();
        assert_eq!(transport.csrf_token(), None);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) on localhost is almost never listening
        let transport = HttpTransport::new(HttpTransportConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        })
        .unwrap();

        let result = transport.send(Request::get("/dashboard/overview")).await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }
}
