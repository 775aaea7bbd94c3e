//! The four create forms: what they post and what they tell the user.

use std::collections::HashMap;
use std::rc::Rc;

use common::models::{
    bare_list, ConnectionList, CreatedApiKey, ModelType, NewApiKey, NewConnection, NewModel,
    NewProvider, Provider,
};

use crate::entity::EntityKind;
use crate::session::SessionGate;
use crate::transport::{ApiRequest, Transport, TransportError};
use crate::view::{SelectOption, Tone, ViewHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateForm {
    ApiKey,
    Connection,
    Provider,
    Model,
}

impl CreateForm {
    pub fn slug(self) -> &'static str {
        match self {
            CreateForm::ApiKey => "api-key",
            CreateForm::Connection => "connection",
            CreateForm::Provider => "provider",
            CreateForm::Model => "model",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "api-key" => Some(CreateForm::ApiKey),
            "connection" => Some(CreateForm::Connection),
            "provider" => Some(CreateForm::Provider),
            "model" => Some(CreateForm::Model),
            _ => None,
        }
    }

    /// The "Add" button of a section, if it has one.
    pub fn for_section(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::ApiKeys => Some(CreateForm::ApiKey),
            EntityKind::Models => Some(CreateForm::Model),
            EntityKind::Connections => Some(CreateForm::Connection),
            EntityKind::Providers => Some(CreateForm::Provider),
            EntityKind::ConversationLogs => None,
        }
    }

    pub fn title(self) -> String {
        format!("Create New {}", self.entity_label())
    }

    pub fn entity_label(self) -> &'static str {
        match self {
            CreateForm::ApiKey => "API Key",
            CreateForm::Connection => "Connection",
            CreateForm::Provider => "Provider",
            CreateForm::Model => "Model",
        }
    }

    /// The list reloaded after a successful submit.
    pub fn refreshes(self) -> EntityKind {
        match self {
            CreateForm::ApiKey => EntityKind::ApiKeys,
            CreateForm::Connection => EntityKind::Connections,
            CreateForm::Provider => EntityKind::Providers,
            CreateForm::Model => EntityKind::Models,
        }
    }

    /// Collection feeding the form's select control.
    pub fn options_source(self) -> Option<EntityKind> {
        match self {
            CreateForm::Connection => Some(EntityKind::Providers),
            CreateForm::Model => Some(EntityKind::Connections),
            _ => None,
        }
    }

    fn option_noun(self) -> Option<&'static str> {
        match self {
            CreateForm::Connection => Some("Provider"),
            CreateForm::Model => Some("Connection"),
            _ => None,
        }
    }

    pub fn loading_placeholder(self) -> Option<String> {
        self.options_source()
            .map(|kind| format!("Loading {}...", kind.plural()))
    }

    pub fn select_placeholder(self) -> Option<String> {
        self.option_noun().map(|noun| format!("Select a {}", noun))
    }

    pub fn failed_placeholder(self) -> Option<String> {
        self.options_source()
            .map(|kind| format!("Failed to load {}", kind.plural()))
    }

    pub fn request(self, fields: &FormFields) -> Result<ApiRequest, TransportError> {
        let path = self.refreshes().collection_path();
        match self {
            CreateForm::ApiKey => ApiRequest::post_json(
                path,
                &NewApiKey {
                    name: fields.text("name"),
                },
            ),
            CreateForm::Connection => ApiRequest::post_json(
                path,
                &NewConnection {
                    name: fields.text("name"),
                    provider_id: fields.text("provider_id"),
                    api_key: fields.text("api_key"),
                },
            ),
            CreateForm::Provider => ApiRequest::post_json(
                path,
                &NewProvider {
                    name: fields.text("name"),
                    provider_type: fields.text("type"),
                    base_url: fields.text("base_url"),
                },
            ),
            CreateForm::Model => {
                let model_type = fields.text("type");
                let llm = ModelType::parse(&model_type) == Some(ModelType::Llm);
                ApiRequest::post_json(
                    path,
                    &NewModel {
                        connection_id: fields.text("connection_id"),
                        proxy_model_id: fields.text("proxy_model_id"),
                        provider_model_id: fields.text("provider_model_id"),
                        price_input: fields.number_or_zero("price_input"),
                        price_output: fields.number_or_zero("price_output"),
                        thinking: llm && fields.checked("thinking"),
                        tools_usage: llm && fields.checked("tools_usage"),
                        model_type,
                    },
                )
            }
        }
    }
}

/// Submitted form values by input name. Unchecked checkboxes are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: HashMap<String, String>,
}

impl FormFields {
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn text(&self, name: &str) -> String {
        self.values.get(name).cloned().unwrap_or_default()
    }

    pub fn checked(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn number_or_zero(&self, name: &str) -> f64 {
        self.values
            .get(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .unwrap_or(0.0)
    }
}

impl From<HashMap<String, String>> for FormFields {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

/// Posts create forms and loads select options.
pub struct FormController<T> {
    gate: Rc<SessionGate<T>>,
    view: ViewHandle,
}

impl<T: Transport> FormController<T> {
    pub fn new(gate: Rc<SessionGate<T>>, view: ViewHandle) -> Self {
        Self { gate, view }
    }

    fn notify(&self, tone: Tone, text: String) {
        self.view.borrow_mut().notify(tone, text);
    }

    /// Returns whether the record was created. Every outcome except a 401
    /// raises exactly one notice of its own.
    pub async fn submit(&self, form: CreateForm, fields: &FormFields) -> bool {
        let label = form.entity_label();
        let transport_failure = format!("An error occurred while creating the {}.", label);

        let resp = match form.request(fields) {
            Ok(request) => self.gate.authenticated_request(request).await,
            Err(err) => Err(err),
        };
        let resp = match resp {
            Ok(resp) => resp,
            Err(err) => {
                log::error!("creating {} failed: {}", label, err);
                self.notify(Tone::Error, transport_failure);
                return false;
            }
        };

        if resp.is_ok() {
            let text = match form {
                CreateForm::ApiKey => {
                    let key = resp
                        .json::<CreatedApiKey>()
                        .ok()
                        .and_then(|b| b.api_key)
                        .unwrap_or_default();
                    format!("API Key created: {}", key)
                }
                _ => format!("{} created successfully!", label),
            };
            log::info!("created {}", label);
            self.notify(Tone::Success, text);
            return true;
        }

        if !resp.is_unauthorized() {
            let reason = resp
                .error_message()
                .unwrap_or_else(|| resp.status_text.clone());
            self.notify(Tone::Error, format!("Error creating {}: {}", label, reason));
        }
        false
    }

    /// Options for a form's select control, labelled `<name> (ID: <id>)`.
    pub async fn fetch_options(&self, source: EntityKind) -> Result<Vec<SelectOption>, String> {
        let plural = source.plural();
        let resp = self
            .gate
            .authenticated_request(ApiRequest::get(source.collection_path()))
            .await
            .map_err(|err| {
                log::error!("error fetching {} for select: {}", plural, err);
                err.to_string()
            })?;
        if !resp.is_ok() {
            return Err(resp
                .error_message()
                .unwrap_or_else(|| format!("Failed to fetch {}", plural)));
        }

        let pairs: Vec<(String, String)> = match source {
            EntityKind::Providers => bare_list::<Provider>(&resp.body)
                .map(|list| list.into_iter().map(|p| (p.id.0, p.name)).collect()),
            EntityKind::Connections => resp
                .json::<ConnectionList>()
                .map(|list| list.connections.into_iter().map(|c| (c.id.0, c.name)).collect()),
            other => return Err(format!("{} cannot feed a select", other.plural())),
        }
        .map_err(|err| err.to_string())?;

        Ok(pairs
            .into_iter()
            .map(|(id, name)| SelectOption {
                label: format!("{} (ID: {})", name, id),
                value: id,
            })
            .collect())
    }
}
