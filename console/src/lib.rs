//! Host-agnostic admin console for the proxy backend.
//!
//! A [`Console`] owns the view state of one page and the controllers that
//! mutate it. Hosts feed it user actions and render the resulting
//! [`view::Document`].

pub mod auth;
pub mod dialogs;
pub mod entity;
pub mod format;
pub mod forms;
pub mod lists;
pub mod modal;
pub mod nav;
pub mod session;
pub mod storage;
pub mod theme;
pub mod transport;
pub mod view;

#[cfg(test)]
mod testing;

use std::rc::Rc;

use common::config::AppConfig;
use common::models::Theme;

use crate::auth::AuthController;
use crate::dialogs::Dialogs;
use crate::entity::EntityKind;
use crate::forms::{CreateForm, FormController, FormFields};
use crate::lists::{DeleteOutcome, EntityListController};
use crate::modal::{ModalClick, ModalController};
use crate::nav::NavigationController;
use crate::session::{AuthState, SessionGate};
use crate::storage::{ClientStorage, StorageKeys};
use crate::theme::ThemeController;
use crate::transport::Transport;
use crate::view::{
    ContainerContent, Document, HostPage, ModalBody, PayloadField, SelectControl, Tone, TopView,
    ViewHandle,
};

#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    pub keys: StorageKeys,
    pub preview_len: usize,
    pub default_section: EntityKind,
}

impl ConsoleOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        let default_section = EntityKind::from_slug(&config.default_section).unwrap_or_else(|| {
            log::warn!(
                "unknown default section {:?}, using api-keys",
                config.default_section
            );
            EntityKind::ApiKeys
        });
        Self {
            keys: StorageKeys::from_config(config),
            preview_len: config.preview_len,
            default_section,
        }
    }
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

pub struct Console<T> {
    view: ViewHandle,
    gate: Rc<SessionGate<T>>,
    lists: Vec<EntityListController<T>>,
    nav: NavigationController,
    modal: ModalController,
    forms: FormController<T>,
    auth: AuthController<T>,
    theme: ThemeController,
    default_section: EntityKind,
}

impl<T: Transport> Console<T> {
    pub fn new(
        page: HostPage,
        transport: T,
        storage: Rc<dyn ClientStorage>,
        dialogs: Rc<dyn Dialogs>,
        options: ConsoleOptions,
    ) -> Self {
        let view = Document::new(page).into_handle();
        {
            let mut doc = view.borrow_mut();
            for kind in EntityKind::ALL {
                if let Some(container) = doc.container_mut(kind) {
                    container.bind_delete(kind);
                }
            }
        }

        let gate = Rc::new(SessionGate::new(
            transport,
            storage.clone(),
            options.keys.token.clone(),
            view.clone(),
        ));
        let lists = EntityKind::ALL
            .into_iter()
            .map(|kind| {
                EntityListController::new(
                    kind,
                    gate.clone(),
                    view.clone(),
                    dialogs.clone(),
                    options.preview_len,
                )
            })
            .collect();

        Self {
            nav: NavigationController::new(view.clone()),
            modal: ModalController::new(view.clone()),
            forms: FormController::new(gate.clone(), view.clone()),
            auth: AuthController::new(gate.clone(), view.clone()),
            theme: ThemeController::new(storage, options.keys.theme, view.clone()),
            default_section: options.default_section,
            lists,
            gate,
            view,
        }
    }

    pub fn view(&self) -> ViewHandle {
        self.view.clone()
    }

    pub fn snapshot(&self) -> Document {
        self.view.borrow().clone()
    }

    pub fn list(&self, kind: EntityKind) -> Option<&EntityListController<T>> {
        self.lists.iter().find(|l| l.kind() == kind)
    }

    fn page(&self) -> HostPage {
        self.view.borrow().page
    }

    /// Page load: applies the theme, then checks the token exactly once and
    /// loads the landing section when the main view is shown.
    pub async fn start(&self, prefers_dark: bool, section: Option<EntityKind>) {
        self.resume(prefers_dark, section);
        self.settle().await;
    }

    /// Restores theme, top view and section without loading anything. Hosts
    /// use this before replaying a single action, then call [`Console::settle`].
    pub fn resume(&self, prefers_dark: bool, section: Option<EntityKind>) {
        self.theme.init(prefers_dark);
        let authenticated = self.gate.state() == AuthState::Authenticated;
        if authenticated || self.page() == HostPage::Dashboard {
            self.view.borrow_mut().show_main();
        } else {
            self.view.borrow_mut().show_auth();
        }
        self.nav.select(section.unwrap_or(self.default_section));
    }

    /// Loads the visible section if nothing has rendered into it yet.
    pub async fn settle(&self) {
        let pending = {
            let doc = self.view.borrow();
            if doc.top != TopView::Main || doc.location.is_some() {
                None
            } else {
                doc.visible_sections().into_iter().find(|kind| {
                    doc.container(*kind)
                        .is_some_and(|c| c.content == ContainerContent::Idle)
                })
            }
        };
        if let Some(kind) = pending {
            if let Some(list) = self.list(kind) {
                list.load().await;
            }
        }
    }

    pub async fn show_main_content(&self, section: Option<EntityKind>) {
        self.view.borrow_mut().show_main();
        self.navigate(section.unwrap_or(self.default_section)).await;
    }

    /// Nav button click: reveal the section and always reload it.
    pub async fn navigate(&self, kind: EntityKind) {
        self.nav.select(kind);
        if let Some(list) = self.list(kind) {
            list.load().await;
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> bool {
        if !self.auth.login(username, password).await {
            return false;
        }
        self.show_main_content(None).await;
        true
    }

    pub async fn register(&self, username: &str, password: &str) -> bool {
        self.auth.register(username, password).await
    }

    pub fn logout(&self) {
        self.auth.logout();
    }

    pub fn show_register_form(&self) {
        self.auth.show_register_form();
    }

    pub fn show_login_form(&self) {
        self.auth.show_login_form();
    }

    pub fn toggle_theme(&self) -> Theme {
        self.theme.toggle()
    }

    /// Shows the form's modal as it looked before its options arrived,
    /// without fetching them. Hosts use this to replay a dismissal.
    pub fn resume_modal(&self, form: CreateForm) {
        let select = form.loading_placeholder().map(|placeholder| SelectControl {
            placeholder,
            options: Vec::new(),
        });
        self.modal.open(form.title(), ModalBody::new(form, select));
    }

    /// Opens the form's modal and, for forms with a select control, fills
    /// it from the related collection.
    pub async fn open_create_form(&self, form: CreateForm) {
        self.resume_modal(form);
        if let Some(source) = form.options_source() {
            let options = self.forms.fetch_options(source).await;
            self.modal.populate_select(form, options);
        }
    }

    /// Submits the form. Success closes the modal and reloads the form's
    /// list; failure leaves the modal open with the submitted input.
    pub async fn submit_form(&self, form: CreateForm, fields: &FormFields) -> bool {
        if self.modal.current_form() != Some(form) {
            let had_session = self.gate.state() == AuthState::Authenticated;
            self.open_create_form(form).await;
            if had_session && self.gate.state() == AuthState::Unauthenticated {
                return false;
            }
        }
        let created = self
            .modal
            .submit(
                || self.forms.submit(form, fields),
                || async {
                    if let Some(list) = self.list(form.refreshes()) {
                        list.load().await;
                    }
                },
            )
            .await;
        if !created {
            self.modal.retain_input(form, fields);
        }
        created
    }

    pub fn close_modal(&self) {
        self.modal.close();
    }

    pub fn click_modal(&self, target: ModalClick) {
        self.modal.click(target);
    }

    /// A click on a delete control, resolved through the container's
    /// delegated binding by the control's `data-type` and `data-id`.
    pub async fn click_delete(&self, type_name: &str, data_id: &str) -> Option<DeleteOutcome> {
        let kind = EntityKind::from_type_name(type_name)?;
        let bound = self
            .view
            .borrow()
            .container(kind)
            .and_then(|c| c.delete_binding());
        if bound != Some(kind) {
            log::warn!("no delete binding for {}", type_name);
            return None;
        }
        Some(self.list(kind)?.delete(data_id).await)
    }

    pub fn toggle_payload(
        &self,
        kind: EntityKind,
        key: &str,
        field: PayloadField,
    ) -> Option<&'static str> {
        self.view
            .borrow_mut()
            .container_mut(kind)?
            .toggle_payload(key, field)
    }

    pub fn notify(&self, tone: Tone, text: impl Into<String>) {
        self.view.borrow_mut().notify(tone, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SESSION_EXPIRED_NOTICE;
    use crate::storage::MemoryStorage;
    use crate::testing::{CountingDialogs, FakeTransport};
    use crate::transport::Method;
    use crate::view::{AuthForm, SelectOption};

    struct Harness {
        console: Console<FakeTransport>,
        transport: FakeTransport,
        storage: Rc<MemoryStorage>,
    }

    fn harness(page: HostPage, token: Option<&str>, confirm: bool) -> Harness {
        let transport = FakeTransport::default();
        let storage = Rc::new(match token {
            Some(token) => MemoryStorage::with_items([("jwt_token", token)]),
            None => MemoryStorage::default(),
        });
        let console = Console::new(
            page,
            transport.clone(),
            storage.clone(),
            CountingDialogs::new(confirm),
            ConsoleOptions::default(),
        );
        Harness {
            console,
            transport,
            storage,
        }
    }

    #[tokio::test]
    async fn start_with_token_loads_default_section() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.transport
            .reply(Method::Get, "/api/api-keys", 200, r#"{"api_keys":[]}"#);

        h.console.start(false, None).await;

        let doc = h.console.snapshot();
        assert_eq!(doc.top, TopView::Main);
        assert_eq!(doc.visible_sections(), vec![EntityKind::ApiKeys]);
        assert_eq!(
            doc.container(EntityKind::ApiKeys).unwrap().content,
            ContainerContent::Empty("No API keys found.".into())
        );
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn start_without_token_shows_auth_and_stays_offline() {
        let h = harness(HostPage::Index, None, true);
        h.console.start(true, None).await;
        let doc = h.console.snapshot();
        assert_eq!(doc.top, TopView::Auth);
        assert_eq!(doc.theme, Theme::Dark);
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn dashboard_without_token_shows_login_guard() {
        let h = harness(HostPage::Dashboard, None, true);
        h.console.start(false, Some(EntityKind::Models)).await;
        let doc = h.console.snapshot();
        assert_eq!(
            doc.container(EntityKind::Models).unwrap().content,
            ContainerContent::LoginRequired("Please log in to view models.".into())
        );
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_load_resets_to_auth_with_one_notice() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.transport.reply(
            Method::Get,
            "/api/api-keys",
            401,
            r#"{"error":"Invalid or expired token"}"#,
        );

        h.console.start(false, None).await;

        assert_eq!(h.storage.get_item("jwt_token"), None);
        let doc = h.console.snapshot();
        assert_eq!(doc.top, TopView::Auth);
        assert_eq!(doc.notices.len(), 1);
        assert_eq!(doc.notices[0].text, SESSION_EXPIRED_NOTICE);
    }

    #[tokio::test]
    async fn unauthorized_load_on_dashboard_redirects() {
        let h = harness(HostPage::Dashboard, Some("abc"), true);
        h.transport.reply(Method::Get, "/api/api-keys", 401, "{}");
        h.console.start(false, None).await;
        let doc = h.console.snapshot();
        assert_eq!(doc.location.as_deref(), Some("/"));
        assert_eq!(doc.notices.len(), 1);
    }

    #[tokio::test]
    async fn navigate_always_reloads() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.transport.reply(Method::Get, "/api/providers", 200, "[]");
        h.console.navigate(EntityKind::Providers).await;
        h.console.navigate(EntityKind::Providers).await;
        assert_eq!(h.transport.count(Method::Get, "/api/providers"), 2);
        assert_eq!(h.console.snapshot().active_nav(), vec![EntityKind::Providers]);
    }

    #[tokio::test]
    async fn connection_form_lists_providers_as_options() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.transport.reply(
            Method::Get,
            "/api/providers",
            200,
            r#"[{"id":1,"name":"P1","type":"ollama"}]"#,
        );

        h.console.open_create_form(CreateForm::Connection).await;

        let doc = h.console.snapshot();
        assert_eq!(doc.modal.title, "Create New Connection");
        let select = doc.modal.body.unwrap().select.unwrap();
        assert_eq!(select.placeholder, "Select a Provider");
        assert_eq!(
            select.options,
            vec![SelectOption {
                value: "1".into(),
                label: "P1 (ID: 1)".into(),
            }]
        );
    }

    #[tokio::test]
    async fn reopening_replaces_modal_content() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.transport.reply(Method::Get, "/api/connections", 500, "{}");
        h.console.open_create_form(CreateForm::Model).await;
        h.console.open_create_form(CreateForm::ApiKey).await;
        let doc = h.console.snapshot();
        assert_eq!(doc.modal.title, "Create New API Key");
        assert_eq!(
            doc.modal.body,
            Some(ModalBody::new(CreateForm::ApiKey, None))
        );
    }

    #[tokio::test]
    async fn successful_submit_closes_modal_and_reloads_list() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.transport.reply(Method::Post, "/api/providers", 201, "{}");
        h.transport.reply(
            Method::Get,
            "/api/providers",
            200,
            r#"[{"id":"p1","name":"Local","type":"ollama","base_url":"http://localhost:11435"}]"#,
        );
        h.console.open_create_form(CreateForm::Provider).await;

        let fields = FormFields::default()
            .with("name", "Local")
            .with("type", "ollama")
            .with("base_url", "http://localhost:11435");
        assert!(h.console.submit_form(CreateForm::Provider, &fields).await);

        let doc = h.console.snapshot();
        assert!(!doc.modal.visible);
        assert_eq!(doc.notices[0].text, "Provider created successfully!");
        assert_eq!(doc.container(EntityKind::Providers).unwrap().rows().len(), 1);
        assert_eq!(h.transport.count(Method::Get, "/api/providers"), 1);
    }

    #[tokio::test]
    async fn failed_submit_keeps_modal_open() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.transport.reply(
            Method::Post,
            "/api/api-keys",
            400,
            r#"{"error":"name is required"}"#,
        );
        let fields = FormFields::default().with("name", "ci bot");
        assert!(!h.console.submit_form(CreateForm::ApiKey, &fields).await);
        let doc = h.console.snapshot();
        assert!(doc.modal.visible);
        assert_eq!(doc.modal.body.unwrap().values.get("name"), Some("ci bot"));
        assert_eq!(doc.notices[0].text, "Error creating API Key: name is required");
        assert_eq!(h.transport.count(Method::Get, "/api/api-keys"), 0);
    }

    #[tokio::test]
    async fn expired_session_while_opening_form_skips_submit() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.transport.reply(Method::Get, "/api/providers", 401, "{}");
        let fields = FormFields::default().with("name", "c");
        assert!(!h.console.submit_form(CreateForm::Connection, &fields).await);
        assert_eq!(h.transport.count(Method::Post, "/api/connections"), 0);
        assert_eq!(h.console.snapshot().notices.len(), 1);
    }

    #[tokio::test]
    async fn delete_click_resolves_through_container_binding() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.transport
            .reply(Method::Delete, "/api/connections/c1", 200, "{}");
        h.transport
            .reply(Method::Get, "/api/connections", 200, r#"{"connections":null}"#);

        let outcome = h.console.click_delete("connection", "c1").await;

        assert_eq!(outcome, Some(DeleteOutcome::Deleted));
        assert_eq!(h.transport.count(Method::Get, "/api/connections"), 1);
        assert_eq!(h.console.click_delete("conversation-log", "l1").await, None);
    }

    #[tokio::test]
    async fn declined_delete_click_sends_nothing() {
        let h = harness(HostPage::Index, Some("abc"), false);
        let outcome = h.console.click_delete("api-key", "k1").await;
        assert_eq!(outcome, Some(DeleteOutcome::Cancelled));
        assert!(h.transport.requests().is_empty());
    }

    #[test]
    fn resumed_modal_dismisses_without_fetching() {
        let h = harness(HostPage::Index, Some("abc"), true);
        h.console.resume_modal(CreateForm::Connection);
        h.console.click_modal(ModalClick::Content);
        let doc = h.console.snapshot();
        assert!(doc.modal.visible);
        assert_eq!(
            doc.modal.body.unwrap().select.unwrap().placeholder,
            "Loading providers..."
        );

        h.console.click_modal(ModalClick::Backdrop);
        assert!(!h.console.snapshot().modal.visible);

        h.console.resume_modal(CreateForm::ApiKey);
        h.console.close_modal();
        assert!(h.console.snapshot().modal.title.is_empty());
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn login_then_logout() {
        let h = harness(HostPage::Index, None, true);
        h.transport
            .reply(Method::Post, "/api/login", 200, r#"{"access_token":"abc"}"#);
        h.transport
            .reply(Method::Get, "/api/api-keys", 200, r#"{"api_keys":[]}"#);
        h.console.start(false, None).await;

        assert!(h.console.login("alice", "pw").await);
        assert_eq!(h.console.snapshot().top, TopView::Main);
        assert_eq!(h.transport.count(Method::Get, "/api/api-keys"), 1);

        h.console.logout();
        assert_eq!(h.console.snapshot().top, TopView::Auth);
        assert_eq!(h.storage.get_item("jwt_token"), None);
    }

    #[test]
    fn register_link_switches_forms() {
        let h = harness(HostPage::Index, None, true);
        h.console.show_register_form();
        assert_eq!(h.console.snapshot().auth.form, AuthForm::Register);
        h.console.show_login_form();
        assert_eq!(h.console.snapshot().auth.form, AuthForm::Login);
    }

    #[test]
    fn options_fall_back_for_unknown_default_section() {
        let config = AppConfig {
            default_section: "nope".into(),
            ..AppConfig::default()
        };
        assert_eq!(
            ConsoleOptions::from_config(&config).default_section,
            EntityKind::ApiKeys
        );
    }
}
