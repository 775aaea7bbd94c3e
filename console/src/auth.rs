use std::rc::Rc;

use common::models::{Credentials, LoginResponse};

use crate::session::SessionGate;
use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::view::{AuthForm, HostPage, Message, Tone, ViewHandle};

const TRY_AGAIN: &str = "An error occurred. Please try again.";

/// Login, registration and logout. Messages land in the auth panel, not in
/// notices.
pub struct AuthController<T> {
    gate: Rc<SessionGate<T>>,
    view: ViewHandle,
}

impl<T: Transport> AuthController<T> {
    pub fn new(gate: Rc<SessionGate<T>>, view: ViewHandle) -> Self {
        Self { gate, view }
    }

    fn switch_to(&self, form: AuthForm) {
        let mut view = self.view.borrow_mut();
        view.auth.form = form;
        view.auth.login_message = None;
        view.auth.register_message = None;
    }

    pub fn show_register_form(&self) {
        self.switch_to(AuthForm::Register);
    }

    pub fn show_login_form(&self) {
        self.switch_to(AuthForm::Login);
    }

    async fn post_credentials(
        &self,
        path: &str,
        username: &str,
        password: &str,
    ) -> Result<ApiResponse, TransportError> {
        let request = ApiRequest::post_json(path, &Credentials { username, password })?;
        self.gate.request(request).await
    }

    /// Stores the token on success. The caller then switches to the main view.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let outcome = self.post_credentials("/api/login", username, password).await;
        let message = match outcome {
            Ok(resp) if resp.is_ok() => {
                let token = resp
                    .json::<LoginResponse>()
                    .ok()
                    .and_then(|b| b.access_token)
                    .filter(|t| !t.is_empty());
                match token {
                    Some(token) => {
                        self.gate.set_token(&token);
                        self.view.borrow_mut().auth.login_message = None;
                        log::info!("user {} logged in", username);
                        return true;
                    }
                    None => {
                        log::warn!("login for {} returned no token", username);
                        "Login failed".to_string()
                    }
                }
            }
            Ok(resp) => {
                log::warn!("login failed for {}: status {}", username, resp.status);
                resp.error_message()
                    .unwrap_or_else(|| "Login failed".to_string())
            }
            Err(err) => {
                log::error!("error during login: {}", err);
                TRY_AGAIN.to_string()
            }
        };
        self.view.borrow_mut().auth.login_message = Some(Message::new(Tone::Error, message));
        false
    }

    /// Registration never logs the user in; success flips to the login form.
    pub async fn register(&self, username: &str, password: &str) -> bool {
        let outcome = self
            .post_credentials("/api/register", username, password)
            .await;
        let mut view = self.view.borrow_mut();
        match outcome {
            Ok(resp) if resp.is_ok() => {
                log::info!("registered user {}", username);
                view.auth.form = AuthForm::Login;
                view.auth.register_message = Some(Message::new(
                    Tone::Success,
                    "Registration successful! You can now log in.",
                ));
                true
            }
            Ok(resp) => {
                let text = resp
                    .error_message()
                    .unwrap_or_else(|| "Registration failed".to_string());
                view.auth.register_message = Some(Message::new(Tone::Error, text));
                false
            }
            Err(err) => {
                log::error!("error during registration: {}", err);
                view.auth.register_message = Some(Message::new(Tone::Error, TRY_AGAIN));
                false
            }
        }
    }

    pub fn logout(&self) {
        self.gate.clear_token();
        let mut view = self.view.borrow_mut();
        let page = view.page;
        match page {
            HostPage::Index => view.show_auth(),
            HostPage::Dashboard => view.location = Some(page.login_location().to_string()),
        }
    }
}
