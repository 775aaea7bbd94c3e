//! Hrefs and hidden form context shared by every rendered control.

use console::entity::{path_segment, EntityKind};
use console::forms::CreateForm;
use console::view::{HostPage, PayloadField};
use leptos::prelude::*;
use templates::hidden_input;
use url::form_urlencoded;

fn with_query(page: HostPage, pairs: &[(&str, &str)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        query.append_pair(k, v);
    }
    format!("{}?{}", page.path(), query.finish())
}

pub fn section_href(page: HostPage, section: EntityKind) -> String {
    with_query(page, &[("section", section.slug())])
}

pub fn modal_href(page: HostPage, section: EntityKind, form: CreateForm) -> String {
    with_query(page, &[("section", section.slug()), ("modal", form.slug())])
}

/// Replays a modal dismissal; `how` is `close` or `backdrop`.
pub fn dismiss_href(page: HostPage, section: EntityKind, form: CreateForm, how: &str) -> String {
    with_query(
        page,
        &[
            ("section", section.slug()),
            ("modal", form.slug()),
            ("dismiss", how),
        ],
    )
}

pub fn expand_href(page: HostPage, key: &str, field: PayloadField) -> String {
    let target = format!("{}:{}", key, field.slug());
    with_query(
        page,
        &[
            ("section", EntityKind::ConversationLogs.slug()),
            ("expand", &target),
        ],
    )
}

pub fn register_href() -> String {
    with_query(HostPage::Index, &[("auth", "register")])
}

pub fn delete_action(kind: EntityKind, id: &str) -> String {
    format!(
        "/delete/{}/{}",
        kind.type_name().unwrap_or_default(),
        path_segment(id)
    )
}

/// Hidden `page`/`section` fields so a POST can redraw the same view.
pub fn context_inputs(page: HostPage, section: EntityKind) -> AnyView {
    view! {
        {hidden_input("page", page.slug())}
        {hidden_input("section", section.slug())}
    }
    .into_any()
}
