pub mod auth;
pub mod links;
pub mod lists;
pub mod modal;

use common::models::Theme;
use console::entity::EntityKind;
use console::forms::CreateForm;
use console::view::{Document, HostPage, Message, Section, TopView};
use leptos::{either::Either, prelude::*};
use templates::{NavLink, Page};

use crate::auth::auth_panel;
use crate::links::{context_inputs, modal_href, section_href};
use crate::lists::{container_list, container_table};
use crate::modal::modal_view;

fn notices(notices: &[Message]) -> AnyView {
    if notices.is_empty() {
        return ().into_any();
    }
    let items = notices
        .iter()
        .map(|n| {
            let class = format!("notice {}", n.tone.as_str());
            let text = n.text.clone();
            view! { <div class={class} role="alert">{text}</div> }
        })
        .collect::<Vec<_>>();
    view! { <div id="notices">{items}</div> }.into_any()
}

fn header_actions(doc: &Document, section: EntityKind) -> Vec<AnyView> {
    let mut actions = vec![view! {
        <form class="inline" method="POST" action="/theme">
            {context_inputs(doc.page, section)}
            <button id="themeToggle" type="submit">"Toggle Theme"</button>
        </form>
    }
    .into_any()];
    if doc.top == TopView::Main {
        actions.push(
            view! {
                <form class="inline" method="POST" action="/logout">
                    {context_inputs(doc.page, section)}
                    <button id="logoutButton" type="submit">"Logout"</button>
                </form>
            }
            .into_any(),
        );
    }
    actions
}

fn section_view(page: HostPage, section: &Section) -> AnyView {
    let kind = section.id;
    let id = format!("{}-section", kind.slug());
    let class = if section.visible {
        "content-section"
    } else {
        "content-section hidden"
    };
    let title = kind.title();
    let add = CreateForm::for_section(kind).map(|form| {
        let href = modal_href(page, kind, form);
        let target = format!("create-{}-modal", form.slug());
        let label = format!("Add {}", form.entity_label());
        view! { <a class="add-button" href={href} data-modal-target={target}>{label}</a> }
    });
    let total = section
        .container
        .total
        .map(|t| view! { <p class="total">{format!("Total: {}", t)}</p> });
    let body = match page {
        HostPage::Index => container_table(page, kind, &section.container),
        HostPage::Dashboard => container_list(page, kind, &section.container),
    };
    view! {
        <section id={id} class={class}>
            <h2>{title}</h2>
            {add}
            {total}
            {body}
        </section>
    }
    .into_any()
}

/// Draws the whole page for the console's current view state.
pub fn render_console(doc: &Document) -> String {
    let section = doc
        .visible_sections()
        .first()
        .copied()
        .unwrap_or(EntityKind::ALL[0]);
    let main = doc.top == TopView::Main;

    let nav_links = if main {
        doc.nav
            .iter()
            .map(|b| NavLink::new(b.section.title(), section_href(doc.page, b.section), b.active))
            .collect()
    } else {
        Vec::new()
    };

    let content = view! {
        {notices(&doc.notices)}
        {if main {
            Either::Left(view! {
                <main id="main-content">
                    {doc.sections.iter().map(|s| section_view(doc.page, s)).collect::<Vec<_>>()}
                </main>
                {modal_view(doc.page, section, &doc.modal)}
            })
        } else {
            Either::Right(auth_panel(&doc.auth, section))
        }}
    };

    let title = match doc.page {
        HostPage::Index => "Proxy Admin",
        HostPage::Dashboard => "Proxy Dashboard",
    };
    Page {
        title: title.to_string(),
        dark: doc.theme == Theme::Dark,
        header_actions: header_actions(doc, section),
        nav_links,
        content,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::view::{ContainerContent, ModalBody, Tone};

    fn main_doc(page: HostPage) -> Document {
        let mut doc = Document::new(page);
        doc.show_main();
        doc
    }

    #[test]
    fn auth_view_has_no_nav_or_logout() {
        let doc = Document::new(HostPage::Index);
        let html = render_console(&doc);
        assert!(html.contains("auth-section"));
        assert!(!html.contains("<nav>"));
        assert!(!html.contains("logoutButton"));
        assert!(html.contains("themeToggle"));
    }

    #[test]
    fn main_view_shows_one_visible_section() {
        let html = render_console(&main_doc(HostPage::Index));
        assert!(html.contains(r#"<section id="api-keys-section" class="content-section">"#));
        assert!(html.contains(r#"<section id="models-section" class="content-section hidden">"#));
        assert_eq!(html.matches(r#"class="content-section""#).count(), 1);
        assert!(html.contains("logoutButton"));
        assert!(!html.contains("auth-section"));
    }

    #[test]
    fn dark_theme_marks_document() {
        let mut doc = main_doc(HostPage::Dashboard);
        doc.theme = Theme::Dark;
        let html = render_console(&doc);
        assert!(html.contains(r#"<html class="dark">"#));
        assert!(html.contains("<title>Proxy Dashboard</title>"));
        assert!(html.contains(r#"href="/dashboard?section=models""#));
    }

    #[test]
    fn notices_render_with_tone() {
        let mut doc = Document::new(HostPage::Index);
        doc.notify(Tone::Error, "Session expired or unauthorized. Please log in again.");
        let html = render_console(&doc);
        assert!(html.contains(r#"<div class="notice error" role="alert">"#));
        assert!(html.contains("Session expired or unauthorized. Please log in again."));
    }

    #[test]
    fn logs_section_shows_total_and_no_add_button() {
        let mut doc = main_doc(HostPage::Index);
        let logs = doc.container_mut(EntityKind::ConversationLogs).unwrap();
        logs.replace(ContainerContent::Empty("No conversation logs found.".into()));
        logs.total = Some(42);
        let html = render_console(&doc);
        assert!(html.contains("Total: 42"));
        assert!(!html.contains("create-conversation"));
        assert!(html.contains(r#"data-modal-target="create-api-key-modal""#));
    }

    #[test]
    fn modal_only_drawn_in_main_view() {
        let mut doc = Document::new(HostPage::Index);
        doc.modal.visible = true;
        doc.modal.title = CreateForm::ApiKey.title();
        doc.modal.body = Some(ModalBody::new(CreateForm::ApiKey, None));
        assert!(!render_console(&doc).contains("genericModal"));
        doc.show_main();
        assert!(render_console(&doc).contains("genericModal"));
    }
}
