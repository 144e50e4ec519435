//! CLI configuration.

use anyhow::{Context, Result};
use grocer_store::StoreConfig;
use serde::{Deserialize, Serialize};

/// Overrides `api.base_url`.
pub const API_URL_ENV: &str = "GROCER_API_URL";
/// Overrides `api.token`.
pub const API_TOKEN_ENV: &str = "GROCER_API_TOKEN";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Store behavior shared by every domain.
    #[serde(default)]
    pub store: StoreConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `GROCER_API_URL` / `GROCER_API_TOKEN` from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(API_TOKEN_ENV).ok(),
        )
    }

    fn with_overrides(mut self, url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api.token = Some(token);
        }
        self
    }
}

/// Storefront API connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token of the signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

/// Generate a default grocer.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Groceteria storefront client configuration

[api]
base_url = "{base_url}"
# token = "..."          # or set {token_env}

[store]
# How long a missing product page stays up before returning home (ms).
redirect_delay_ms = 4000
not_found_redirect = "/"

[store.shipping]
# Orders at or above this total ship for free (USD).
free_threshold = 50.0
fee = 5.0
"#,
        base_url = default_base_url(),
        token_env = API_TOKEN_ENV,
    )
}
