//! Closed set of supported provider identifiers.
//!
//! Every table keyed by provider (display names, env vars, adapter specs)
//! is keyed by [`ProviderId`], so adding a provider is a compile error until
//! every table handles it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AiHookError;

/// An LLM vendor/API family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Claude,
    Gemini,
    Groq,
    DeepSeek,
    Mistral,
    Xai,
    Perplexity,
    OpenRouter,
}

/// The provider given fallback priority over registration order.
pub const PREFERRED_PROVIDER: ProviderId = ProviderId::OpenRouter;

impl ProviderId {
    /// All identifiers, in catalog order.
    pub const ALL: [ProviderId; 9] = [
        ProviderId::OpenAi,
        ProviderId::Claude,
        ProviderId::Gemini,
        ProviderId::Groq,
        ProviderId::DeepSeek,
        ProviderId::Mistral,
        ProviderId::Xai,
        ProviderId::Perplexity,
        ProviderId::OpenRouter,
    ];

    /// Wire/config name (e.g. `"openrouter"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Claude => "claude",
            ProviderId::Gemini => "gemini",
            ProviderId::Groq => "groq",
            ProviderId::DeepSeek => "deepseek",
            ProviderId::Mistral => "mistral",
            ProviderId::Xai => "xai",
            ProviderId::Perplexity => "perplexity",
            ProviderId::OpenRouter => "openrouter",
        }
    }

    /// Human-readable name for messages. E.g. `"OpenRouter"`, `"xAI"`.
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Claude => "Claude",
            ProviderId::Gemini => "Gemini",
            ProviderId::Groq => "Groq",
            ProviderId::DeepSeek => "DeepSeek",
            ProviderId::Mistral => "Mistral",
            ProviderId::Xai => "xAI",
            ProviderId::Perplexity => "Perplexity",
            ProviderId::OpenRouter => "OpenRouter",
        }
    }

    /// Environment variable read by the config loader for this provider's key.
    pub fn env_key(self) -> &'static str {
        match self {
            ProviderId::OpenAi => "AI_HOOK_OPENAI_KEY",
            ProviderId::Claude => "AI_HOOK_CLAUDE_KEY",
            ProviderId::Gemini => "AI_HOOK_GEMINI_KEY",
            ProviderId::Groq => "AI_HOOK_GROQ_KEY",
            ProviderId::DeepSeek => "AI_HOOK_DEEPSEEK_KEY",
            ProviderId::Mistral => "AI_HOOK_MISTRAL_KEY",
            ProviderId::Xai => "AI_HOOK_XAI_KEY",
            ProviderId::Perplexity => "AI_HOOK_PERPLEXITY_KEY",
            ProviderId::OpenRouter => "AI_HOOK_OPENROUTER_KEY",
        }
    }

    /// Comma-separated list of every valid name, for error messages.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = AiHookError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| AiHookError::unsupported_provider(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_round_trips_every_name() {
        for id in ProviderId::ALL {
            assert_eq!(id.as_str().parse::<ProviderId>().unwrap(), id);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("OpenRouter".parse::<ProviderId>().unwrap(), ProviderId::OpenRouter);
        assert_eq!(" groq ".parse::<ProviderId>().unwrap(), ProviderId::Groq);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "mock".parse::<ProviderId>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
        assert!(err.message().contains("mock"));
    }

    #[test]
    fn test_display_names_special_cases() {
        assert_eq!(ProviderId::Xai.display_name(), "xAI");
        assert_eq!(ProviderId::OpenAi.display_name(), "OpenAI");
        assert_eq!(ProviderId::DeepSeek.display_name(), "DeepSeek");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ProviderId::DeepSeek).unwrap();
        assert_eq!(json, "\"deepseek\"");
        let back: ProviderId = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(back, ProviderId::OpenAi);
    }

    #[test]
    fn test_env_keys_unique() {
        let mut keys: Vec<&str> = ProviderId::ALL.iter().map(|p| p.env_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), ProviderId::ALL.len());
    }
}
