//! Scripted [`HttpTransport`] for tests.
//!
//! Responses are registered per method + API path and replayed in order; the
//! last registered response for a route keeps answering once the queue is
//! down to one. Unscripted routes answer 404. Every request is recorded.
//!
//! By default a reply is ready on the first poll. [`MockTransport::yielding`]
//! makes every reply wait one scheduler turn, so requests joined together are
//! all in flight before the first answer lands.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use store::ClientConfig;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

type Reply = Result<ApiResponse, ApiError>;

#[derive(Clone, Default)]
pub struct MockTransport {
    config: ClientConfig,
    routes: Rc<RefCell<HashMap<(Method, String), VecDeque<Reply>>>>,
    requests: Rc<RefCell<Vec<ApiRequest>>>,
    yielding: Rc<Cell<bool>>,
}

/// Pending on the first poll, ready on the second.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

impl MockTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            config: ClientConfig::new(base_url),
            ..Self::default()
        }
    }

    /// Hold each reply back for one poll after the request is recorded.
    pub fn yielding(self) -> Self {
        self.yielding.set(true);
        self
    }

    fn key(&self, method: Method, path: &str) -> (Method, String) {
        (method, self.config.api_url(path))
    }

    /// Script a response for an API path such as `/categories/3`.
    pub fn on(&self, method: Method, path: &str, response: ApiResponse) {
        self.push(method, path, Ok(response));
    }

    /// Script a transport-level failure.
    pub fn fail(&self, method: Method, path: &str, error: ApiError) {
        self.push(method, path, Err(error));
    }

    /// Script a response for an absolute URL (e.g. a `/storage/**` file).
    pub fn on_url(&self, method: Method, url: &str, response: ApiResponse) {
        self.routes
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(Ok(response));
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        let key = self.key(method, path);
        self.routes.borrow_mut().entry(key).or_default().push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        let url = self.config.api_url(path);
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .cloned()
            .collect()
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = (request.method.clone(), request.url.clone());
        self.requests.borrow_mut().push(request);
        if self.yielding.get() {
            YieldOnce(false).await;
        }

        let mut routes = self.routes.borrow_mut();
        let Some(queue) = routes.get_mut(&key) else {
            return Ok(ApiResponse::empty(404));
        };
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        reply.unwrap_or_else(|| Ok(ApiResponse::empty(404)))
    }
}
