//! Configuration loading, validation, and management for Vitrine.
//!
//! Loads configuration from `vitrine.toml` (or the path in `VITRINE_CONFIG`)
//! with environment variable overrides for secrets. Validates all settings
//! at startup.

use serde::{Deserialize, Serialize};
use std::path::Path;
use vitrine_core::Error;

/// The root configuration structure.
///
/// Maps directly to `vitrine.toml`.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Admin credential pair guarding every administrative route
    #[serde(default)]
    pub admin: AdminConfig,

    /// Assistant / LLM provider settings
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// HTTP gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Document store settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &str) -> &'static str {
    if s.is_empty() { "<empty>" } else { "[REDACTED]" }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("admin", &self.admin)
            .field("assistant", &self.assistant)
            .field("gateway", &self.gateway)
            .field("store", &self.store)
            .finish()
    }
}

/// The single configured credential pair.
///
/// One pair is all there is; multi-user support would slot in behind the
/// auth crate's `CredentialVerifier`, not behind more config.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

fn default_username() -> String {
    "admin".into()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: String::new(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// OpenAI-compatible endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (override with VITRINE_API_KEY)
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4.1-mini".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Allowed CORS origins; "*" allows any origin
    #[serde(default = "default_cors")]
    pub cors_origins: Vec<String>,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_cors() -> Vec<String> {
    vec!["*".into()]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            cors_origins: default_cors(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend. Only "memory" is currently implemented.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Seed default portfolio and gallery content on startup
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
}

fn default_backend() -> String {
    "memory".into()
}
fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            seed_defaults: true,
        }
    }
}

impl AppConfig {
    /// Load configuration: `VITRINE_CONFIG` path if set, else `vitrine.toml`
    /// in the working directory, else defaults. Environment variables
    /// override secrets afterwards.
    pub fn load() -> Result<Self, Error> {
        let path = std::env::var("VITRINE_CONFIG").unwrap_or_else(|_| "vitrine.toml".into());
        let mut config = if Path::new(&path).exists() {
            Self::load_from(&path)?
        } else {
            tracing::debug!(path = %path, "No config file found, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit TOML file path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
            message: format!("cannot read {}: {e}", path.as_ref().display()),
        })?;
        toml::from_str(&raw).map_err(|e| Error::Config {
            message: format!("invalid config: {e}"),
        })
    }

    /// Secrets from the environment win over the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(username) = std::env::var("VITRINE_ADMIN_USERNAME") {
            self.admin.username = username;
        }
        if let Ok(password) = std::env::var("VITRINE_ADMIN_PASSWORD") {
            self.admin.password = password;
        }
        if let Ok(key) = std::env::var("VITRINE_API_KEY") {
            self.assistant.api_key = key;
        }
    }

    /// Reject configurations that cannot possibly work.
    pub fn validate(&self) -> Result<(), Error> {
        if self.admin.username.is_empty() {
            return Err(Error::Config {
                message: "admin.username must not be empty".into(),
            });
        }
        if self.gateway.port == 0 {
            return Err(Error::Config {
                message: "gateway.port must be non-zero".into(),
            });
        }
        if self.store.backend != "memory" {
            return Err(Error::Config {
                message: format!("unknown store backend: {}", self.store.backend),
            });
        }
        Ok(())
    }
}
