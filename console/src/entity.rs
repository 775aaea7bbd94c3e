/// The five record collections the console manages. Each one owns a nav
/// button, a section and a list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    ApiKeys,
    Models,
    Connections,
    Providers,
    ConversationLogs,
}

impl EntityKind {
    /// Nav order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::ApiKeys,
        EntityKind::Models,
        EntityKind::Connections,
        EntityKind::Providers,
        EntityKind::ConversationLogs,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            EntityKind::ApiKeys => "api-keys",
            EntityKind::Models => "models",
            EntityKind::Connections => "connections",
            EntityKind::Providers => "providers",
            EntityKind::ConversationLogs => "conversation-logs",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            EntityKind::ApiKeys => "API Keys",
            EntityKind::Models => "Models",
            EntityKind::Connections => "Connections",
            EntityKind::Providers => "Providers",
            EntityKind::ConversationLogs => "Conversation Logs",
        }
    }

    /// Lower-case plural used inside sentences ("No API keys found.").
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::ApiKeys => "API keys",
            EntityKind::Models => "models",
            EntityKind::Connections => "connections",
            EntityKind::Providers => "providers",
            EntityKind::ConversationLogs => "conversation logs",
        }
    }

    /// The `data-type` discriminator carried by delete buttons. Conversation
    /// logs are read-only and have none.
    pub fn type_name(self) -> Option<&'static str> {
        match self {
            EntityKind::ApiKeys => Some("api-key"),
            EntityKind::Models => Some("model"),
            EntityKind::Connections => Some("connection"),
            EntityKind::Providers => Some("provider"),
            EntityKind::ConversationLogs => None,
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == Some(name))
    }

    pub fn is_deletable(self) -> bool {
        self.type_name().is_some()
    }

    pub fn collection_path(self) -> &'static str {
        match self {
            EntityKind::ApiKeys => "/api/api-keys",
            EntityKind::Models => "/api/models",
            EntityKind::Connections => "/api/connections",
            EntityKind::Providers => "/api/providers",
            EntityKind::ConversationLogs => "/api/conversation_logs",
        }
    }

    /// `None` for read-only kinds and for ids that would not stay a segment
    /// of their own once the URL is resolved.
    pub fn record_path(self, id: &str) -> Option<String> {
        if !self.is_deletable() || matches!(id, "" | "." | "..") {
            return None;
        }
        Some(format!("{}/{}", self.collection_path(), path_segment(id)))
    }

    /// Column labels, in the order the row formatters emit cells.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::ApiKeys => &["ID", "Name", "Created At", "Last Used"],
            EntityKind::Models => &[
                "ID",
                "Proxy Model ID",
                "Provider Model ID",
                "Connection ID",
                "Price Input",
                "Price Output",
                "Thinking",
                "Tools Usage",
                "Type",
            ],
            EntityKind::Connections => &["ID", "Name", "Provider", "Created At"],
            EntityKind::Providers => &["ID", "Name", "Type", "Base URL"],
            EntityKind::ConversationLogs => &[
                "ID",
                "Connection ID",
                "Model ID",
                "Prompt Tokens",
                "Completion Tokens",
                "Request",
                "Response",
                "Created At",
            ],
        }
    }
}

/// Percent-encodes a record id for use as one URL path segment.
pub fn path_segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
