//! Scripted collaborators for controller tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::dialogs::Dialogs;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};

enum Reply {
    Respond(u16, String),
    Fail,
}

#[derive(Default)]
struct Inner {
    routes: RefCell<HashMap<(Method, String), Reply>>,
    requests: RefCell<Vec<ApiRequest>>,
}

/// Answers every call to a route with the same scripted reply and records
/// what was sent. Unscripted routes get a 404.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Rc<Inner>,
}

impl FakeTransport {
    pub fn reply(&self, method: Method, path: &str, status: u16, body: &str) {
        self.inner.routes.borrow_mut().insert(
            (method, path.to_string()),
            Reply::Respond(status, body.to_string()),
        );
    }

    pub fn fail(&self, method: Method, path: &str) {
        self.inner
            .routes
            .borrow_mut()
            .insert((method, path.to_string()), Reply::Fail);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.requests.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.inner
            .requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method, request.path.clone());
        self.inner.requests.borrow_mut().push(request);
        match self.inner.routes.borrow().get(&key) {
            Some(Reply::Respond(status, body)) => Ok(ApiResponse::new(*status, body.clone())),
            Some(Reply::Fail) => Err(TransportError::Url(url::ParseError::EmptyHost)),
            None => Ok(ApiResponse::new(404, r#"{"error":"no route"}"#)),
        }
    }
}

/// Gives a fixed answer and counts how often it was asked.
pub struct CountingDialogs {
    answer: bool,
    asked: Cell<usize>,
}

impl CountingDialogs {
    pub fn new(answer: bool) -> Rc<Self> {
        Rc::new(Self {
            answer,
            asked: Cell::new(0),
        })
    }

    pub fn asked(&self) -> usize {
        self.asked.get()
    }
}

impl Dialogs for CountingDialogs {
    fn confirm(&self, _message: &str) -> bool {
        self.asked.set(self.asked.get() + 1);
        self.answer
    }
}
