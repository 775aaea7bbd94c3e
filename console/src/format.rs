//! Pure record → row formatting. No view or network access in here.

use common::format::timestamp;
use common::models::{
    bare_list, ApiKey, ApiKeyList, Connection, ConnectionList, ConversationLog, LogList, Model,
    Provider,
};
use common::truncate::preview;

use crate::entity::EntityKind;
use crate::view::{Cell, Payload, Row};

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

fn when(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => timestamp(v),
        _ => "N/A".to_string(),
    }
}

pub fn api_key_row(key: &ApiKey) -> Row {
    Row {
        key: key.id.to_string(),
        cells: vec![
            Cell::text("ID", or_na(Some(key.id.as_str()))),
            Cell::text("Name", key.name.clone()),
            Cell::text("Created At", when(key.created_at.as_deref())),
            Cell::text(
                "Last Used",
                match key.last_used_at.as_deref() {
                    Some(ts) if !ts.is_empty() => timestamp(ts),
                    _ => "Never".to_string(),
                },
            ),
        ],
    }
}

pub fn model_row(model: &Model) -> Row {
    Row {
        key: model.id.to_string(),
        cells: vec![
            Cell::text("ID", model.id.to_string()),
            Cell::text("Proxy Model ID", model.proxy_model_id.clone()),
            Cell::text("Provider Model ID", model.provider_model_id.clone()),
            Cell::text("Connection ID", model.connection_id.to_string()),
            Cell::text("Price Input", model.price_input.to_string()),
            Cell::text("Price Output", model.price_output.to_string()),
            Cell::text("Thinking", model.thinking.to_string()),
            Cell::text("Tools Usage", model.tools_usage.to_string()),
            Cell::text("Type", or_na(model.model_type.map(|t| t.as_str()))),
        ],
    }
}

pub fn connection_row(conn: &Connection) -> Row {
    Row {
        key: conn.id.to_string(),
        cells: vec![
            Cell::text("ID", conn.id.to_string()),
            Cell::text("Name", conn.name.clone()),
            Cell::text("Provider", conn.provider.clone()),
            Cell::text("Created At", when(conn.created_at.as_deref())),
        ],
    }
}

pub fn provider_row(provider: &Provider) -> Row {
    Row {
        key: provider.id.to_string(),
        cells: vec![
            Cell::text("ID", provider.id.to_string()),
            Cell::text("Name", provider.name.clone()),
            Cell::text("Type", provider.provider_type.as_str()),
            Cell::text("Base URL", or_na(provider.base_url.as_deref())),
        ],
    }
}

pub fn log_row(log: &ConversationLog, preview_len: usize) -> Row {
    Row {
        key: log.id.to_string(),
        cells: vec![
            Cell::text("ID", log.id.to_string()),
            Cell::text("Connection ID", log.connection_id.to_string()),
            Cell::text("Model ID", log.model_id.to_string()),
            Cell::text("Prompt Tokens", log.prompt_tokens.to_string()),
            Cell::text("Completion Tokens", log.completion_tokens.to_string()),
            Cell::payload(
                "Request",
                payload(log.request_payload.as_deref(), preview_len),
            ),
            Cell::payload(
                "Response",
                payload(log.response_payload.as_deref(), preview_len),
            ),
            Cell::text("Created At", when(log.created_at.as_deref())),
        ],
    }
}

/// Structured payloads are pretty-printed behind a toggle; anything else is
/// cut down to a preview.
pub fn payload(raw: Option<&str>, preview_len: usize) -> Payload {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Payload::Missing;
    };
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => Payload::Structured {
            pretty: serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
            expanded: false,
        },
        Err(_) => Payload::Preview(preview(raw, preview_len)),
    }
}

/// A parsed collection response, already formatted.
#[derive(Debug)]
pub struct Listing {
    pub rows: Vec<Row>,
    pub total: Option<i64>,
}

pub fn parse_listing(
    kind: EntityKind,
    body: &str,
    preview_len: usize,
) -> serde_json::Result<Listing> {
    let (rows, total) = match kind {
        EntityKind::ApiKeys => {
            let list: ApiKeyList = serde_json::from_str(body)?;
            (list.api_keys.iter().map(api_key_row).collect(), None)
        }
        EntityKind::Models => {
            let list: Vec<Model> = bare_list(body)?;
            (list.iter().map(model_row).collect(), None)
        }
        EntityKind::Connections => {
            let list: ConnectionList = serde_json::from_str(body)?;
            (list.connections.iter().map(connection_row).collect(), None)
        }
        EntityKind::Providers => {
            let list: Vec<Provider> = bare_list(body)?;
            (list.iter().map(provider_row).collect(), None)
        }
        EntityKind::ConversationLogs => {
            let list: LogList = serde_json::from_str(body)?;
            (
                list.logs.iter().map(|l| log_row(l, preview_len)).collect(),
                list.total,
            )
        }
    };
    Ok(Listing { rows, total })
}
