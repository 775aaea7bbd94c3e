use actix_web::{web, HttpRequest, HttpResponse};
use console::entity::EntityKind;
use console::forms::CreateForm;
use console::modal::ModalClick;
use console::session::SESSION_EXPIRED_NOTICE;
use console::view::{HostPage, PayloadField, Tone, TopView};
use serde::Deserialize;

use crate::host::{AppState, Host, EXPIRED_NOTICE};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub section: Option<String>,
    pub modal: Option<String>,
    pub expand: Option<String>,
    pub auth: Option<String>,
    pub notice: Option<String>,
    /// `close` or `backdrop`: the open `modal` was dismissed.
    pub dismiss: Option<String>,
}

/// `<log id>:<request|response>`
fn parse_expand(value: &str) -> Option<(&str, PayloadField)> {
    let (key, field) = value.rsplit_once(':')?;
    Some((key, PayloadField::from_slug(field)?))
}

async fn render_page(
    page: HostPage,
    state: &AppState,
    req: &HttpRequest,
    query: PageQuery,
) -> HttpResponse {
    log::info!("GET {} {:?}", page.path(), query);
    let host = Host::new(state, req, page, false);
    host.resume(query.section.as_deref().and_then(EntityKind::from_slug));

    if query.notice.as_deref() == Some(EXPIRED_NOTICE) {
        host.console.notify(Tone::Error, SESSION_EXPIRED_NOTICE);
    }
    if query.auth.as_deref() == Some("register") {
        host.console.show_register_form();
    }

    let main = host.console.view().borrow().top == TopView::Main;
    if main {
        if let Some(form) = query.modal.as_deref().and_then(CreateForm::from_slug) {
            match query.dismiss.as_deref() {
                Some("backdrop") => {
                    host.console.resume_modal(form);
                    host.console.click_modal(ModalClick::Backdrop);
                }
                Some(_) => {
                    host.console.resume_modal(form);
                    host.console.close_modal();
                }
                None => host.console.open_create_form(form).await,
            }
        }
    }

    // Rows must be loaded before a payload can be expanded.
    host.console.settle().await;
    if let Some((key, field)) = query.expand.as_deref().and_then(parse_expand) {
        host.console
            .toggle_payload(EntityKind::ConversationLogs, key, field);
    }
    host.finish().await
}

pub async fn index_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    render_page(HostPage::Index, &state, &req, query.into_inner()).await
}

pub async fn dashboard_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    render_page(HostPage::Dashboard, &state, &req, query.into_inner()).await
}
