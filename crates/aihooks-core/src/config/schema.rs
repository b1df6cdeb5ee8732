//! Configuration schema.
//!
//! Hierarchy: `Config` → `ProviderConfig` list, `HttpConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.aihooks/config.json` + env vars.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Provider credentials, in registration order.
    pub providers: Vec<ProviderConfig>,
    /// Provider used when a call names none (must also be registered).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    pub http: HttpConfig,
}

impl Config {
    /// Find the entry for `provider` (case-insensitive name match).
    pub fn provider(&self, provider: &str) -> Option<&ProviderConfig> {
        self.providers
            .iter()
            .find(|p| p.provider.eq_ignore_ascii_case(provider))
    }

    /// Mutable variant of [`Config::provider`].
    pub fn provider_mut(&mut self, provider: &str) -> Option<&mut ProviderConfig> {
        self.providers
            .iter_mut()
            .find(|p| p.provider.eq_ignore_ascii_case(provider))
    }

    /// The registration payload for a provider registry.
    pub fn init_options(&self) -> InitOptions {
        InitOptions {
            providers: self.providers.clone(),
            default_provider: self.default_provider.clone(),
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// One provider registration: which provider, its key, optional default model.
///
/// `provider` stays a plain string here; it is validated against the closed
/// provider set when registered.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// Provider name, e.g. `"groq"`.
    pub provider: String,
    /// API key for authentication.
    pub key: String,
    /// Model used when a call does not pass one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
    /// Custom API base URL (overrides the provider's default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl ProviderConfig {
    pub fn new(provider: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("key", &if self.is_configured() { "<redacted>" } else { "<empty>" })
            .field("default_model", &self.default_model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Everything a registry needs to (re)initialize: the credential set plus
/// the process-wide default provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InitOptions {
    pub providers: Vec<ProviderConfig>,
    pub default_provider: Option<String>,
}

impl InitOptions {
    pub fn new(providers: Vec<ProviderConfig>) -> Self {
        Self {
            providers,
            default_provider: None,
        }
    }

    pub fn with_default_provider(mut self, provider: impl Into<String>) -> Self {
        self.default_provider = Some(provider.into());
        self
    }
}

// ─────────────────────────────────────────────
// HTTP
// ─────────────────────────────────────────────

/// Outbound HTTP settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 120 }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
