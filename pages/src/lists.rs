use console::entity::EntityKind;
use console::view::{Cell, CellValue, Container, ContainerContent, HostPage, Payload, PayloadField, Row};
use leptos::{either::Either, prelude::*};
use templates::{data_table, placeholder_row};

use crate::links::{context_inputs, delete_action, expand_href, section_href};

/// Text shown instead of rows, if any.
fn status_text(kind: EntityKind, content: &ContainerContent) -> Option<String> {
    match content {
        ContainerContent::Idle | ContainerContent::Rows(_) => None,
        ContainerContent::Loading => Some(format!("Loading {}...", kind.plural())),
        ContainerContent::LoginRequired(text)
        | ContainerContent::Empty(text)
        | ContainerContent::Failed(text) => Some(text.clone()),
    }
}

fn payload_view(page: HostPage, key: &str, label: &str, payload: &Payload) -> AnyView {
    match payload {
        Payload::Missing => "N/A".into_any(),
        Payload::Preview(text) => text.clone().into_any(),
        Payload::Structured { pretty, expanded } => {
            let field = PayloadField::from_slug(&label.to_lowercase()).unwrap_or(PayloadField::Request);
            let toggle = payload.toggle_label().unwrap_or_default();
            let href = if *expanded {
                section_href(page, EntityKind::ConversationLogs)
            } else {
                expand_href(page, key, field)
            };
            let details = expanded.then(|| {
                let pretty = pretty.clone();
                view! { <pre>{pretty}</pre> }
            });
            view! {
                <a class="toggle-details" href={href}>{toggle}</a>
                {details}
            }
            .into_any()
        }
    }
}

fn cell_view(page: HostPage, key: &str, cell: &Cell) -> AnyView {
    match &cell.value {
        CellValue::Text(text) => text.clone().into_any(),
        CellValue::Payload(payload) => payload_view(page, key, cell.label, payload),
    }
}

fn delete_form(page: HostPage, kind: EntityKind, id: &str) -> AnyView {
    let type_name = kind.type_name().unwrap_or_default().to_string();
    let prompt = serde_json::to_string(&format!(
        "Are you sure you want to delete this {}?",
        type_name
    ))
    .unwrap_or_default();
    // A declined prompt never leaves the browser; `confirmed` stays "no"
    // for submits that skip the script.
    let onsubmit = format!(
        "if (!confirm({})) return false; this.confirmed.value = 'yes';",
        prompt
    );
    let action = delete_action(kind, id);
    let id = id.to_string();
    view! {
        <form class="inline" method="POST" action={action} onsubmit={onsubmit}>
            {context_inputs(page, kind)}
            <input type="hidden" name="confirmed" value="no"/>
            <button type="submit" class="delete-btn danger" data-id={id} data-type={type_name}>"Delete"</button>
        </form>
    }
    .into_any()
}

fn table_row(page: HostPage, kind: EntityKind, row: &Row, deletable: bool) -> AnyView {
    let cells = row
        .cells
        .iter()
        .map(|cell| {
            let inner = cell_view(page, &row.key, cell);
            view! { <td>{inner}</td> }
        })
        .collect::<Vec<_>>();
    let actions = deletable.then(|| {
        let form = delete_form(page, kind, &row.key);
        view! { <td>{form}</td> }
    });
    view! { <tr>{cells}{actions}</tr> }.into_any()
}

/// Index layout: one table per section, delete buttons in a trailing column.
pub fn container_table(page: HostPage, kind: EntityKind, container: &Container) -> AnyView {
    let deletable = container.delete_binding() == Some(kind);
    let mut columns = kind.columns().to_vec();
    if deletable {
        columns.push("Actions");
    }
    let rows = match status_text(kind, &container.content) {
        Some(text) => vec![placeholder_row(columns.len(), &text)],
        None => container
            .rows()
            .iter()
            .map(|row| table_row(page, kind, row, deletable))
            .collect(),
    };
    let body_id = format!("{}-table-body", kind.type_name().unwrap_or("conversation-log"));
    data_table(&body_id, &columns, rows)
}

fn list_item(page: HostPage, kind: EntityKind, row: &Row, deletable: bool) -> AnyView {
    let parts = row
        .cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let sep = if i > 0 { " - " } else { "" };
            let label = format!("{}: ", cell.label);
            let value = cell_view(page, &row.key, cell);
            view! { {sep}<strong>{label}</strong>{value} }
        })
        .collect::<Vec<_>>();
    let action = deletable.then(|| delete_form(page, kind, &row.key));
    view! { <li>{parts}" "{action}</li> }.into_any()
}

/// Dashboard layout: a bullet list per section.
pub fn container_list(page: HostPage, kind: EntityKind, container: &Container) -> AnyView {
    let deletable = container.delete_binding() == Some(kind);
    match status_text(kind, &container.content) {
        Some(text) => {
            let class = match container.content {
                ContainerContent::LoginRequired(_) | ContainerContent::Failed(_) => "message error",
                _ => "message",
            };
            Either::Left(view! { <p class={class}>{text}</p> })
        }
        None => {
            let items = container
                .rows()
                .iter()
                .map(|row| list_item(page, kind, row, deletable))
                .collect::<Vec<_>>();
            Either::Right(view! { <ul class="record-list">{items}</ul> })
        }
    }
    .into_any()
}
