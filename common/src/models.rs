use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// Backend record id. The backend sends UUID strings, older builds send integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
            Missing(()),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RecordId(s),
            Raw::Number(n) => RecordId(n.to_string()),
            Raw::Missing(()) => RecordId::default(),
        })
    }
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Ollama,
    Openai,
    #[serde(other)]
    Unknown,
}

impl ProviderType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderType::Ollama => "ollama",
            ProviderType::Openai => "openai",
            ProviderType::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ollama" => Some(ProviderType::Ollama),
            "openai" => Some(ProviderType::Openai),
            _ => None,
        }
    }

    /// Placeholder shown in the base URL input once a type is picked.
    pub fn base_url_hint(self) -> &'static str {
        match self {
            ProviderType::Ollama => "http://localhost:11435",
            ProviderType::Openai => "https://api.openai.com/v1",
            ProviderType::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Llm,
    Embedding,
    #[serde(other)]
    Unknown,
}

impl ModelType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Llm => "llm",
            ModelType::Embedding => "embedding",
            ModelType::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "llm" => Some(ModelType::Llm),
            "embedding" => Some(ModelType::Embedding),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    #[serde(default)]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_used_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Connection {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    pub id: RecordId,
    #[serde(default)]
    pub connection_id: RecordId,
    pub proxy_model_id: String,
    pub provider_model_id: String,
    #[serde(default)]
    pub price_input: f64,
    #[serde(default)]
    pub price_output: f64,
    #[serde(default)]
    pub thinking: bool,
    #[serde(default)]
    pub tools_usage: bool,
    #[serde(rename = "type", default)]
    pub model_type: Option<ModelType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationLog {
    pub id: RecordId,
    #[serde(default)]
    pub connection_id: RecordId,
    #[serde(default)]
    pub model_id: RecordId,
    #[serde(default)]
    pub prompt_tokens: i64,
    #[serde(default)]
    pub completion_tokens: i64,
    #[serde(default, deserialize_with = "opaque_text")]
    pub request_payload: Option<String>,
    #[serde(default, deserialize_with = "opaque_text")]
    pub response_payload: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload columns are usually JSON-encoded strings; embedded JSON values are
/// kept as their serialized text.
fn opaque_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub api_keys: Vec<ApiKey>,
}

#[derive(Debug, Deserialize)]
pub struct ConnectionList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub connections: Vec<Connection>,
}

#[derive(Debug, Deserialize)]
pub struct LogList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logs: Vec<ConversationLog>,
    #[serde(default)]
    pub total: Option<i64>,
}

/// Bare JSON arrays (providers, models) may come back as `null`.
pub fn bare_list<T: DeserializeOwned>(body: &str) -> serde_json::Result<Vec<T>> {
    Ok(serde_json::from_str::<Option<Vec<T>>>(body)?.unwrap_or_default())
}

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewApiKey {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatedApiKey {
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewConnection {
    pub name: String,
    pub provider_id: String,
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct NewProvider {
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub base_url: String,
}

#[derive(Debug, Serialize)]
pub struct NewModel {
    pub connection_id: String,
    pub proxy_model_id: String,
    pub provider_model_id: String,
    pub price_input: f64,
    pub price_output: f64,
    pub thinking: bool,
    pub tools_usage: bool,
    #[serde(rename = "type")]
    pub model_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
