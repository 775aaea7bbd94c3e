use std::future::Future;

use crate::forms::{CreateForm, FormFields};
use crate::view::{ModalBody, SelectControl, SelectOption, ViewHandle};

/// Where a click on the open overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    Backdrop,
    Content,
}

/// The single modal overlay. Nothing else writes to `Document::modal`.
pub struct ModalController {
    view: ViewHandle,
}

impl ModalController {
    pub fn new(view: ViewHandle) -> Self {
        Self { view }
    }

    pub fn open(&self, title: impl Into<String>, body: ModalBody) {
        let mut view = self.view.borrow_mut();
        view.modal.title = title.into();
        view.modal.body = Some(body);
        view.modal.visible = true;
    }

    pub fn close(&self) {
        let mut view = self.view.borrow_mut();
        view.modal.visible = false;
        view.modal.title.clear();
        view.modal.body = None;
    }

    pub fn click(&self, target: ModalClick) {
        if target == ModalClick::Backdrop {
            self.close();
        }
    }

    pub fn current_form(&self) -> Option<CreateForm> {
        let view = self.view.borrow();
        view.modal
            .body
            .as_ref()
            .filter(|_| view.modal.visible)
            .map(|b| b.form)
    }

    /// Fills the select control once its options arrive. Ignored when the
    /// modal was closed or re-opened with another form in the meantime.
    pub fn populate_select(&self, form: CreateForm, options: Result<Vec<SelectOption>, String>) {
        if self.current_form() != Some(form) {
            log::debug!("dropping {} options for a closed form", form.slug());
            return;
        }
        let select = match options {
            Ok(options) => SelectControl {
                placeholder: form.select_placeholder().unwrap_or_default(),
                options,
            },
            Err(err) => {
                log::warn!("could not load options for {} form: {}", form.slug(), err);
                SelectControl {
                    placeholder: form.failed_placeholder().unwrap_or_default(),
                    options: Vec::new(),
                }
            }
        };
        if let Some(body) = self.view.borrow_mut().modal.body.as_mut() {
            body.select = Some(select);
        }
    }

    /// Puts rejected input back into the still-open form.
    pub fn retain_input(&self, form: CreateForm, values: &FormFields) {
        if self.current_form() != Some(form) {
            return;
        }
        if let Some(body) = self.view.borrow_mut().modal.body.as_mut() {
            body.values = values.clone();
        }
    }

    /// Runs `handler`; on success closes the modal and then runs `refresh`.
    /// A failed handler leaves the modal open.
    pub async fn submit<H, HF, R, RF>(&self, handler: H, refresh: R) -> bool
    where
        H: FnOnce() -> HF,
        HF: Future<Output = bool>,
        R: FnOnce() -> RF,
        RF: Future<Output = ()>,
    {
        if !handler().await {
            return false;
        }
        self.close();
        refresh().await;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::view::{Document, HostPage};

    fn modal() -> (ModalController, ViewHandle) {
        let view = Document::new(HostPage::Index).into_handle();
        (ModalController::new(view.clone()), view)
    }

    fn body(form: CreateForm) -> ModalBody {
        ModalBody::new(
            form,
            form.loading_placeholder().map(|placeholder| SelectControl {
                placeholder,
                options: Vec::new(),
            }),
        )
    }

    #[test]
    fn second_open_replaces_first() {
        let (modal, view) = modal();
        modal.open("Create New Connection", body(CreateForm::Connection));
        modal.open("Create New API Key", body(CreateForm::ApiKey));

        let doc = view.borrow();
        assert!(doc.modal.visible);
        assert_eq!(doc.modal.title, "Create New API Key");
        assert_eq!(doc.modal.body, Some(body(CreateForm::ApiKey)));
    }

    #[test]
    fn close_clears_title_and_body() {
        let (modal, view) = modal();
        modal.open("Create New Model", body(CreateForm::Model));
        modal.close();
        let doc = view.borrow();
        assert!(!doc.modal.visible);
        assert!(doc.modal.title.is_empty());
        assert!(doc.modal.body.is_none());
    }

    #[test]
    fn only_backdrop_clicks_dismiss() {
        let (modal, _) = modal();
        modal.open("Create New Provider", body(CreateForm::Provider));
        modal.click(ModalClick::Content);
        assert_eq!(modal.current_form(), Some(CreateForm::Provider));
        modal.click(ModalClick::Backdrop);
        assert_eq!(modal.current_form(), None);
    }

    #[test]
    fn failed_options_show_failure_placeholder() {
        let (modal, view) = modal();
        modal.open("Create New Model", body(CreateForm::Model));
        modal.populate_select(CreateForm::Model, Err("boom".into()));
        let doc = view.borrow();
        let select = doc.modal.body.as_ref().unwrap().select.as_ref().unwrap();
        assert_eq!(select.placeholder, "Failed to load connections");
        assert!(select.options.is_empty());
    }

    #[test]
    fn late_options_for_replaced_form_are_dropped() {
        let (modal, view) = modal();
        modal.open("Create New Connection", body(CreateForm::Connection));
        modal.open("Create New API Key", body(CreateForm::ApiKey));
        modal.populate_select(CreateForm::Connection, Ok(Vec::new()));
        assert_eq!(view.borrow().modal.body, Some(body(CreateForm::ApiKey)));
    }

    #[tokio::test]
    async fn submit_closes_then_refreshes_on_success() {
        let (modal, view) = modal();
        modal.open("Create New API Key", body(CreateForm::ApiKey));
        let refreshed = Cell::new(false);

        let ok = modal
            .submit(
                || async { true },
                || async {
                    assert!(!view.borrow().modal.visible);
                    refreshed.set(true);
                },
            )
            .await;

        assert!(ok);
        assert!(refreshed.get());
    }

    #[tokio::test]
    async fn failed_submit_stays_open_without_refresh() {
        let (modal, _) = modal();
        modal.open("Create New API Key", body(CreateForm::ApiKey));
        let refreshed = Cell::new(false);
        let ok = modal
            .submit(|| async { false }, || async { refreshed.set(true) })
            .await;
        assert!(!ok);
        assert_eq!(modal.current_form(), Some(CreateForm::ApiKey));
        assert!(!refreshed.get());
    }

    #[test]
    fn rejected_input_only_sticks_to_the_open_form() {
        let (modal, view) = modal();
        let fields = FormFields::default().with("name", "MyLocalOllama");
        modal.retain_input(CreateForm::Provider, &fields);
        assert!(view.borrow().modal.body.is_none());

        modal.open("Create New Provider", body(CreateForm::Provider));
        modal.retain_input(CreateForm::ApiKey, &fields);
        assert_eq!(view.borrow().modal.body.as_ref().unwrap().values, FormFields::default());
        modal.retain_input(CreateForm::Provider, &fields);
        let doc = view.borrow();
        assert_eq!(doc.modal.body.as_ref().unwrap().values.get("name"), Some("MyLocalOllama"));
    }
}
