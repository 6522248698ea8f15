//! Browser Fetch Transport
//!
//! Same-origin requests through `gloo-net`. The session cookie rides along
//! automatically; the CSRF token is read from `document.cookie` at send time so
//! a rotated token is always picked up.

use async_trait::async_trait;
use gloo_net::http::{Request as FetchRequest, RequestBuilder};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use gymdash::csrf::CsrfConfig;
use gymdash::transport::{Method, Request, Response, Transport};
use gymdash::TransportError;

#[derive(Default)]
pub struct FetchTransport {
    csrf: CsrfConfig,
}

impl FetchTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn csrf_token(&self) -> Option<String> {
        let document = web_sys::window()?.document()?;
        let cookies = document.dyn_into::<HtmlDocument>().ok()?.cookie().ok()?;
        self.csrf.token(&cookies)
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let mut builder: RequestBuilder = match request.method {
            Method::Get => FetchRequest::get(&request.path),
            Method::Post => FetchRequest::post(&request.path),
        };

        if request.is_mutating() {
            let token = self.csrf_token().unwrap_or_default();
            builder = builder.header(&self.csrf.header_name, &token);
        }
        if let Some(content_type) = request.body.content_type() {
            builder = builder.header("Content-Type", content_type);
        }

        let prepared = match request.body.encode() {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Response::new(status, body))
    }
}
