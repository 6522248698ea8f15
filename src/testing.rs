//! Test doubles shared by the unit tests

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use tokio::sync::oneshot;

use crate::error::TransportError;
use crate::transport::{Method, Request, Response, Transport};

type Outcome = Result<Response, TransportError>;

enum Reply {
    Ready(Outcome),
    /// Resolves when the test sends on the paired channel
    Gated(oneshot::Receiver<Outcome>),
}

/// Scripted transport. Replies are queued per (method, path) and consumed in
/// order; unscripted requests get a 404.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: RefCell<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(method, path, Reply::Ready(Ok(Response::new(status, body))));
    }

    pub fn fail(&self, method: Method, path: &str) {
        self.push(
            method,
            path,
            Reply::Ready(Err(TransportError::Network("connection refused".to_string()))),
        );
    }

    /// Queue a reply the test releases later
    pub fn gate(&self, method: Method, path: &str) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Reply::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.path.clone()).collect()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let key = (request.method, request.path.clone());
        self.requests.borrow_mut().push(request);

        let reply = self
            .replies
            .borrow_mut()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());

        match reply {
            Some(Reply::Ready(outcome)) => outcome,
            Some(Reply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".to_string()))),
            None => Ok(Response::new(404, "Not Found")),
        }
    }
}
