use std::rc::Rc;

use crate::dialogs::Dialogs;
use crate::entity::EntityKind;
use crate::format::parse_listing;
use crate::session::SessionGate;
use crate::transport::{ApiRequest, Transport};
use crate::view::{ContainerContent, Tone, ViewHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    Failed(String),
}

/// Loads one collection into its section's container and deletes records
/// from it.
pub struct EntityListController<T> {
    kind: EntityKind,
    gate: Rc<SessionGate<T>>,
    view: ViewHandle,
    dialogs: Rc<dyn Dialogs>,
    preview_len: usize,
}

impl<T: Transport> EntityListController<T> {
    pub fn new(
        kind: EntityKind,
        gate: Rc<SessionGate<T>>,
        view: ViewHandle,
        dialogs: Rc<dyn Dialogs>,
        preview_len: usize,
    ) -> Self {
        Self {
            kind,
            gate,
            view,
            dialogs,
            preview_len,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    fn render(&self, content: ContainerContent, total: Option<i64>) {
        let mut view = self.view.borrow_mut();
        if let Some(container) = view.container_mut(self.kind) {
            container.replace(content);
            container.total = total;
        }
    }

    pub async fn load(&self) {
        let plural = self.kind.plural();
        if self.gate.current_token().is_none() {
            self.render(
                ContainerContent::LoginRequired(format!("Please log in to view {}.", plural)),
                None,
            );
            return;
        }

        self.render(ContainerContent::Loading, None);
        let request = ApiRequest::get(self.kind.collection_path());
        let resp = match self.gate.authenticated_request(request).await {
            Ok(resp) => resp,
            Err(err) => {
                log::error!("failed to fetch {}: {}", plural, err);
                self.render(
                    ContainerContent::Failed(format!(
                        "An error occurred while fetching {}.",
                        plural
                    )),
                    None,
                );
                return;
            }
        };

        if !resp.is_ok() {
            let message = resp
                .error_message()
                .unwrap_or_else(|| format!("Failed to fetch {}", plural));
            self.render(ContainerContent::Failed(format!("Error: {}", message)), None);
            return;
        }

        match parse_listing(self.kind, &resp.body, self.preview_len) {
            Ok(listing) if listing.rows.is_empty() => self.render(
                ContainerContent::Empty(format!("No {} found.", plural)),
                listing.total,
            ),
            Ok(listing) => self.render(ContainerContent::Rows(listing.rows), listing.total),
            Err(err) => {
                log::error!("unexpected {} listing: {}", plural, err);
                self.render(
                    ContainerContent::Failed(format!(
                        "An error occurred while fetching {}.",
                        plural
                    )),
                    None,
                );
            }
        }
    }

    /// Asks first; a declined prompt makes no call. A successful delete
    /// reloads the list exactly once.
    pub async fn delete(&self, id: &str) -> DeleteOutcome {
        let (Some(type_name), Some(path)) = (self.kind.type_name(), self.kind.record_path(id))
        else {
            return DeleteOutcome::Failed(format!("{} cannot be deleted", self.kind.plural()));
        };

        if !self
            .dialogs
            .confirm(&format!("Are you sure you want to delete this {}?", type_name))
        {
            return DeleteOutcome::Cancelled;
        }

        let resp = match self.gate.authenticated_request(ApiRequest::delete(path)).await {
            Ok(resp) => resp,
            Err(err) => {
                log::error!("error deleting {} {}: {}", type_name, id, err);
                self.notify(
                    Tone::Error,
                    format!("An error occurred while deleting the {}.", type_name),
                );
                return DeleteOutcome::Failed(err.to_string());
            }
        };

        if resp.is_ok() {
            log::info!("deleted {} {}", type_name, id);
            self.notify(Tone::Success, format!("{} deleted successfully!", type_name));
            self.load().await;
            return DeleteOutcome::Deleted;
        }

        let reason = resp
            .error_message()
            .unwrap_or_else(|| resp.status_text.clone());
        // The gate already told the user about a 401.
        if !resp.is_unauthorized() {
            self.notify(
                Tone::Error,
                format!("Failed to delete {}: {}", type_name, reason),
            );
        }
        DeleteOutcome::Failed(reason)
    }

    fn notify(&self, tone: Tone, text: String) {
        self.view.borrow_mut().notify(tone, text);
    }
}
