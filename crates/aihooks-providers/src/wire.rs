//! Wire formats — request bodies and response text extraction.
//!
//! Three shapes cover every supported provider:
//! OpenAI-compatible chat completions, Claude messages, Gemini generateContent.

use serde::Serialize;
use serde_json::Value;

use aihooks_core::utils::truncate_string;

/// `max_tokens` sent with every Claude request (the API requires it).
pub const CLAUDE_MAX_TOKENS: u32 = 4096;

/// Upper bound on raw body text embedded in error messages.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Request/response shape spoken by a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireFormat {
    /// `{model, messages}` → `choices[0].message.content`
    OpenAiChat,
    /// `{model, max_tokens, messages}` → `content[0].text`
    ClaudeMessages,
    /// `{contents:[{parts:[{text}]}]}` → `candidates[0].content.parts[0].text`
    GeminiGenerate,
}

// ─────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ClaudeRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GeminiRequest<'a> {
    pub contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GeminiContent<'a> {
    pub parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GeminiPart<'a> {
    pub text: &'a str,
}

/// A provider-specific request body, serialized without a wrapper tag.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RequestBody<'a> {
    Chat(ChatRequest<'a>),
    Claude(ClaudeRequest<'a>),
    Gemini(GeminiRequest<'a>),
}

impl WireFormat {
    /// Build the request body for a single user prompt.
    pub fn request_body<'a>(self, prompt: &'a str, model: &'a str) -> RequestBody<'a> {
        let user = || {
            vec![ChatMessage {
                role: "user",
                content: prompt,
            }]
        };
        match self {
            WireFormat::OpenAiChat => RequestBody::Chat(ChatRequest {
                model,
                messages: user(),
            }),
            WireFormat::ClaudeMessages => RequestBody::Claude(ClaudeRequest {
                model,
                max_tokens: CLAUDE_MAX_TOKENS,
                messages: user(),
            }),
            // Gemini carries the model in the URL, not the body
            WireFormat::GeminiGenerate => RequestBody::Gemini(GeminiRequest {
                contents: vec![GeminiContent {
                    parts: vec![GeminiPart { text: prompt }],
                }],
            }),
        }
    }

    /// JSON pointer to the assistant text in a success response.
    fn text_pointer(self) -> &'static str {
        match self {
            WireFormat::OpenAiChat => "/choices/0/message/content",
            WireFormat::ClaudeMessages => "/content/0/text",
            WireFormat::GeminiGenerate => "/candidates/0/content/parts/0/text",
        }
    }

    /// Extract the assistant text. Missing, non-string and empty values all
    /// yield `None`.
    pub fn extract_text(self, body: &Value) -> Option<String> {
        body.pointer(self.text_pointer())
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

// ─────────────────────────────────────────────
// Error bodies
// ─────────────────────────────────────────────

/// Upstream error text for a failed response.
///
/// Prefers the compact JSON of the body's `error` member, then the raw body,
/// then the HTTP reason phrase.
pub fn error_detail(body: &str, reason: Option<&str>) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(error) = json.get("error").filter(|e| !e.is_null()) {
            return error.to_string();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return truncate_string(trimmed, MAX_ERROR_BODY_CHARS);
    }

    reason.unwrap_or("Unknown error").to_string()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
