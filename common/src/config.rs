use serde::Deserialize;

fn default_backend_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_token_key() -> String {
    "jwt_token".to_string()
}

fn default_theme_key() -> String {
    "theme".to_string()
}

fn default_preview_len() -> usize {
    100
}

fn default_section() -> String {
    "api-keys".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Base URL of the proxy backend serving `/api/*`.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Client storage key holding the session token.
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Client storage key holding the `dark`/`light` preference.
    #[serde(default = "default_theme_key")]
    pub theme_key: String,
    /// Characters kept when an opaque payload is shown as a raw preview.
    #[serde(default = "default_preview_len")]
    pub preview_len: usize,
    /// Section shown after login or on page load with a stored token.
    #[serde(default = "default_section")]
    pub default_section: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            token_key: default_token_key(),
            theme_key: default_theme_key(),
            preview_len: default_preview_len(),
            default_section: default_section(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
