use std::rc::Rc;

use crate::storage::ClientStorage;
use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::view::{HostPage, Tone, ViewHandle};

pub const SESSION_EXPIRED_NOTICE: &str = "Session expired or unauthorized. Please log in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Owns the persisted token and wraps every backend call. The only way out of
/// `Authenticated` besides logout is a 401 seen here.
pub struct SessionGate<T> {
    transport: T,
    storage: Rc<dyn ClientStorage>,
    token_key: String,
    view: ViewHandle,
}

impl<T: Transport> SessionGate<T> {
    pub fn new(
        transport: T,
        storage: Rc<dyn ClientStorage>,
        token_key: impl Into<String>,
        view: ViewHandle,
    ) -> Self {
        Self {
            transport,
            storage,
            token_key: token_key.into(),
            view,
        }
    }

    pub fn current_token(&self) -> Option<String> {
        self.storage
            .get_item(&self.token_key)
            .filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) {
        self.storage.set_item(&self.token_key, token);
    }

    pub fn clear_token(&self) {
        self.storage.remove_item(&self.token_key);
    }

    pub fn state(&self) -> AuthState {
        if self.current_token().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// A call that never carries credentials (login, register).
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.transport.send(request).await
    }

    /// Attaches the bearer token when one is held. A 401 resets the session
    /// before the response is handed back unchanged.
    pub async fn authenticated_request(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse, TransportError> {
        let request = match self.current_token() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        };
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        if response.is_unauthorized() {
            log::warn!("{} returned 401, resetting session", path);
            self.expire();
        }
        Ok(response)
    }

    fn expire(&self) {
        self.clear_token();
        let mut view = self.view.borrow_mut();
        let page = view.page;
        match page {
            HostPage::Index => view.show_auth(),
            HostPage::Dashboard => view.location = Some(page.login_location().to_string()),
        }
        view.notify(Tone::Error, SESSION_EXPIRED_NOTICE);
    }
}
