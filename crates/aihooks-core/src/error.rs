//! Error taxonomy — every failure surfaced by aihooks is an [`AiHookError`].
//!
//! An error carries a stable [`ErrorKind`], a human message, the offending
//! provider (when one is involved) and an optional remediation hint. The
//! presentation layer decides how to render them; [`AiHookError::pretty`]
//! is the default multi-line rendering.

use std::fmt;

use thiserror::Error;

use crate::provider_id::ProviderId;
use crate::task::TaskType;

/// Result alias used across the aihooks crates.
pub type Result<T> = std::result::Result<T, AiHookError>;

// ─────────────────────────────────────────────
// ErrorKind
// ─────────────────────────────────────────────

/// Fixed set of error kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCredential,
    BadRequest,
    ModelNotAllowed,
    RateLimited,
    ProviderError,
    NetworkError,
    UnknownError,
    NoProviderFound,
    ProviderNotAvailable,
    NoModelFound,
    UnsupportedProvider,
    InvalidTask,
}

impl ErrorKind {
    /// Stable upper-snake code, e.g. `"RATE_LIMIT"`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidCredential => "INVALID_API_KEY",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::ModelNotAllowed => "MODEL_NOT_ALLOWED",
            ErrorKind::RateLimited => "RATE_LIMIT",
            ErrorKind::ProviderError => "PROVIDER_ERROR",
            ErrorKind::NetworkError => "NETWORK_ERROR",
            ErrorKind::UnknownError => "UNKNOWN_ERROR",
            ErrorKind::NoProviderFound => "NO_PROVIDER_FOUND",
            ErrorKind::ProviderNotAvailable => "PROVIDER_NOT_AVAILABLE",
            ErrorKind::NoModelFound => "NO_MODEL_FOUND",
            ErrorKind::UnsupportedProvider => "UNSUPPORTED_PROVIDER",
            ErrorKind::InvalidTask => "INVALID_TASK",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ─────────────────────────────────────────────
// AiHookError
// ─────────────────────────────────────────────

/// A classified failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("[{kind}] {message}")]
pub struct AiHookError {
    kind: ErrorKind,
    message: String,
    provider: Option<ProviderId>,
    hint: Option<String>,
}

impl AiHookError {
    /// Build an error. An empty message is replaced by the kind's code so the
    /// rendered error is never blank.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.code().to_string()
        } else {
            message
        };
        Self {
            kind,
            message,
            provider: None,
            hint: None,
        }
    }

    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<ProviderId> {
        self.provider
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Multi-line rendering combining message, provider and hint.
    pub fn pretty(&self) -> String {
        let mut out = format!("\n❌ AI-HOOK ERROR [{}]: {}", self.kind, self.message);
        if let Some(provider) = self.provider {
            out.push_str(&format!("\n   Provider: {provider}"));
        }
        if let Some(ref hint) = self.hint {
            out.push_str(&format!("\n   Suggestion: {hint}\n"));
        }
        out
    }

    // ── Constructors for the fixed failure sites ──

    /// No key bound to the provider's adapter.
    pub fn missing_credential(provider: ProviderId) -> Self {
        Self::new(
            ErrorKind::InvalidCredential,
            format!("Missing {} API key.", provider.display_name()),
        )
        .with_provider(provider)
        .with_hint(format!(
            "Set {} or register a key for {}.",
            provider.env_key(),
            provider
        ))
    }

    /// Request sent but no response received.
    pub fn network(provider: ProviderId, detail: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::NetworkError,
            format!(
                "Network error while contacting {}: {}",
                provider.display_name(),
                detail
            ),
        )
        .with_provider(provider)
        .with_hint("Check your internet connection")
    }

    /// Response received but no text could be extracted from it.
    pub fn empty_response(provider: ProviderId) -> Self {
        Self::new(
            ErrorKind::ProviderError,
            format!("{} returned empty response", provider.display_name()),
        )
        .with_provider(provider)
        .with_hint("Check your model and API key")
    }

    /// Failure that fits no other kind.
    pub fn unknown(provider: Option<ProviderId>, detail: impl fmt::Display) -> Self {
        let err = Self::new(ErrorKind::UnknownError, detail.to_string());
        match provider {
            Some(p) => err.with_provider(p),
            None => err,
        }
    }

    pub fn unsupported_provider(name: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedProvider,
            format!("Unsupported provider: {name}"),
        )
        .with_hint(format!("Use one of: {}", ProviderId::valid_names()))
    }

    pub fn invalid_task(name: &str) -> Self {
        Self::new(
            ErrorKind::InvalidTask,
            format!(
                "Invalid task type: {name}. Valid tasks are: {}",
                TaskType::valid_names()
            ),
        )
        .with_hint("Please use one of the supported task types.")
    }

    /// Hint-less resolution with nothing registered.
    pub fn no_provider_found() -> Self {
        Self::new(
            ErrorKind::NoProviderFound,
            "No valid AI provider API key was found. At least one provider key is required.",
        )
        .with_hint(
            "Register a provider key (config `providers` list or an AI_HOOK_<PROVIDER>_KEY \
             environment variable such as AI_HOOK_OPENAI_KEY).",
        )
    }

    /// Explicit provider hint that has no usable credential.
    pub fn provider_not_available(provider: ProviderId) -> Self {
        Self::new(
            ErrorKind::ProviderNotAvailable,
            format!(
                "Provider {} was requested but has no registered API key.",
                provider.display_name()
            ),
        )
        .with_provider(provider)
        .with_hint(format!(
            "Register a key for {provider} (or set {}), or omit the provider to auto-select.",
            provider.env_key()
        ))
    }

    pub fn no_model_found(provider: ProviderId) -> Self {
        Self::new(
            ErrorKind::NoModelFound,
            format!(
                "No model found for {}: pass a model or configure a default model.",
                provider.display_name()
            ),
        )
        .with_provider(provider)
        .with_hint("Pass an explicit model or set defaultModel for this provider.")
    }
}

// ─────────────────────────────────────────────
// HTTP status classification
// ─────────────────────────────────────────────

/// Classify a non-2xx HTTP response.
///
/// `detail` is the upstream error text (already extracted from the body);
/// it is embedded in the message verbatim.
pub fn classify_status(provider: ProviderId, status: u16, detail: &str) -> AiHookError {
    let name = provider.display_name();
    let (kind, message, hint) = match status {
        400 => (
            ErrorKind::BadRequest,
            format!("{name} rejected the request: {detail}"),
            "Check your prompt and model".to_string(),
        ),
        401 => (
            ErrorKind::InvalidCredential,
            format!("Invalid {name} API key: {detail}"),
            format!("Verify your {} value", provider.env_key()),
        ),
        403 => (
            ErrorKind::ModelNotAllowed,
            format!("Your API key cannot access this model: {detail}"),
            "Try a different model or check API key permissions".to_string(),
        ),
        429 => (
            ErrorKind::RateLimited,
            format!("Too many requests to {name}: {detail}"),
            "Throttle requests or upgrade your plan".to_string(),
        ),
        _ => (
            ErrorKind::ProviderError,
            format!("{name} API error ({status}): {detail}"),
            "Check the provider status page".to_string(),
        ),
    };
    AiHookError::new(kind, message)
        .with_provider(provider)
        .with_hint(hint)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
