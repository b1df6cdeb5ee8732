//! Provider catalog — static adapter specs for all supported providers.
//!
//! Each `ProviderSpec` describes how to talk to one provider: where the
//! endpoint lives, which headers it needs, how the key is attached, which
//! request/response shape it speaks, and its built-in default model.
//! Per-provider variation is pure data here; [`crate::http_adapter`] is the
//! only code that interprets it.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use aihooks_core::{AiHookError, ErrorKind, ProviderId, Result};

use crate::wire::WireFormat;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// How the API key is attached to a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`.
    Bearer,
    /// Key sent verbatim in a custom header, e.g. `x-api-key`.
    Header(&'static str),
    /// Key appended as a URL query parameter, no auth header.
    QueryParam(&'static str),
}

/// Static specification describing one provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    pub id: ProviderId,
    /// Default API base URL, without trailing slash.
    pub default_api_base: &'static str,
    /// Path appended to the base. `{model}` is replaced by the model name.
    pub path: &'static str,
    /// Headers sent with every request.
    pub static_headers: &'static [(&'static str, &'static str)],
    pub auth: AuthStyle,
    pub wire: WireFormat,
    /// Model used when neither the call nor the registration names one.
    pub default_model: &'static str,
}

const JSON_HEADERS: &[(&str, &str)] = &[("content-type", "application/json")];

// ─────────────────────────────────────────────
// All providers
// ─────────────────────────────────────────────

/// Complete list of supported provider specifications.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        id: ProviderId::OpenAi,
        default_api_base: "https://api.openai.com/v1",
        path: "/chat/completions",
        static_headers: JSON_HEADERS,
        auth: AuthStyle::Bearer,
        wire: WireFormat::OpenAiChat,
        default_model: "gpt-4.1",
    },
    ProviderSpec {
        id: ProviderId::Groq,
        default_api_base: "https://api.groq.com/openai/v1",
        path: "/chat/completions",
        static_headers: JSON_HEADERS,
        auth: AuthStyle::Bearer,
        wire: WireFormat::OpenAiChat,
        default_model: "llama-3.3-70b-versatile",
    },
    // Claude: custom key header plus a pinned API version
    ProviderSpec {
        id: ProviderId::Claude,
        default_api_base: "https://api.anthropic.com/v1",
        path: "/messages",
        static_headers: &[
            ("content-type", "application/json"),
            ("anthropic-version", "2023-06-01"),
        ],
        auth: AuthStyle::Header("x-api-key"),
        wire: WireFormat::ClaudeMessages,
        default_model: "claude-sonnet-4-20250514",
    },
    // Gemini: model in the path, key in the query string
    ProviderSpec {
        id: ProviderId::Gemini,
        default_api_base: "https://generativelanguage.googleapis.com/v1beta",
        path: "/models/{model}:generateContent",
        static_headers: JSON_HEADERS,
        auth: AuthStyle::QueryParam("key"),
        wire: WireFormat::GeminiGenerate,
        default_model: "gemini-2.5-flash",
    },
    ProviderSpec {
        id: ProviderId::DeepSeek,
        default_api_base: "https://api.deepseek.com/v1",
        path: "/chat/completions",
        static_headers: JSON_HEADERS,
        auth: AuthStyle::Bearer,
        wire: WireFormat::OpenAiChat,
        default_model: "deepseek-chat",
    },
    ProviderSpec {
        id: ProviderId::Mistral,
        default_api_base: "https://api.mistral.ai/v1",
        path: "/chat/completions",
        static_headers: JSON_HEADERS,
        auth: AuthStyle::Bearer,
        wire: WireFormat::OpenAiChat,
        default_model: "mistral-small-latest",
    },
    ProviderSpec {
        id: ProviderId::Xai,
        default_api_base: "https://api.x.ai/v1",
        path: "/chat/completions",
        static_headers: JSON_HEADERS,
        auth: AuthStyle::Bearer,
        wire: WireFormat::OpenAiChat,
        default_model: "grok-4-fast-non-reasoning",
    },
    ProviderSpec {
        id: ProviderId::Perplexity,
        default_api_base: "https://api.perplexity.ai",
        path: "/chat/completions",
        static_headers: JSON_HEADERS,
        auth: AuthStyle::Bearer,
        wire: WireFormat::OpenAiChat,
        default_model: "sonar",
    },
    ProviderSpec {
        id: ProviderId::OpenRouter,
        default_api_base: "https://openrouter.ai/api/v1",
        path: "/chat/completions",
        static_headers: JSON_HEADERS,
        auth: AuthStyle::Bearer,
        wire: WireFormat::OpenAiChat,
        default_model: "openai/gpt-4o-mini",
    },
];

// ─────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────

/// Find the spec for a provider.
pub fn find_by_id(id: ProviderId) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.id == id)
}

/// Find a spec by provider name (case-insensitive).
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    name.parse::<ProviderId>().ok().and_then(find_by_id)
}

// ─────────────────────────────────────────────
// Request pieces
// ─────────────────────────────────────────────

impl ProviderSpec {
    pub fn display_name(&self) -> &'static str {
        self.id.display_name()
    }

    /// Full request URL for `model`, using `api_base` when overridden.
    ///
    /// The model is percent-encoded as a single path segment.
    pub fn endpoint(&self, api_base: Option<&str>, model: &str) -> String {
        let base = api_base
            .filter(|b| !b.trim().is_empty())
            .unwrap_or(self.default_api_base)
            .trim_end_matches('/');
        format!(
            "{}{}",
            base,
            self.path.replace("{model}", &urlencoding::encode(model))
        )
    }

    /// Static headers merged with the auth header for `api_key`.
    pub fn headers(&self, api_key: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.static_headers {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }

        let auth = match self.auth {
            AuthStyle::Bearer => Some((
                reqwest::header::AUTHORIZATION,
                format!("Bearer {api_key}"),
            )),
            AuthStyle::Header(name) => Some((HeaderName::from_static(name), api_key.to_string())),
            AuthStyle::QueryParam(_) => None,
        };

        if let Some((name, value)) = auth {
            let mut value = HeaderValue::from_str(&value).map_err(|_| {
                AiHookError::new(
                    ErrorKind::InvalidCredential,
                    format!(
                        "{} API key contains characters not allowed in an HTTP header",
                        self.display_name()
                    ),
                )
                .with_provider(self.id)
                .with_hint(format!("Check the value of {}", self.id.env_key()))
            })?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Query parameter carrying the key, for URL-embedded auth.
    pub fn auth_query<'k>(&self, api_key: &'k str) -> Option<(&'static str, &'k str)> {
        match self.auth {
            AuthStyle::QueryParam(param) => Some((param, api_key)),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
