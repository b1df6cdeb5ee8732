//! Task types and their prompt templates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AiHookError;

/// Target language used by [`TaskType::Translate`] when none is given.
pub const DEFAULT_TARGET_LANGUAGE: &str = "English";

/// A text-processing task that the prompt is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskType {
    Summarize,
    Translate,
    Explain,
    Rewrite,
    Sentiment,
    CodeReview,
}

impl TaskType {
    pub const ALL: [TaskType; 6] = [
        TaskType::Summarize,
        TaskType::Translate,
        TaskType::Explain,
        TaskType::Rewrite,
        TaskType::Sentiment,
        TaskType::CodeReview,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Summarize => "summarize",
            TaskType::Translate => "translate",
            TaskType::Explain => "explain",
            TaskType::Rewrite => "rewrite",
            TaskType::Sentiment => "sentiment",
            TaskType::CodeReview => "codeReview",
        }
    }

    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Build the prompt sent to the provider for `text`.
    ///
    /// `target_language` only affects [`TaskType::Translate`].
    pub fn build_prompt(self, text: &str, target_language: Option<&str>) -> String {
        match self {
            TaskType::Summarize => format!("Summarize the following text:\n{text}"),
            TaskType::Translate => {
                let language = target_language
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or(DEFAULT_TARGET_LANGUAGE);
                format!("Translate this text into {language}:\n{text}")
            }
            TaskType::Explain => format!("Explain this clearly:\n{text}"),
            TaskType::Rewrite => format!("Rewrite this text with better clarity:\n{text}"),
            TaskType::Sentiment => format!("Analyze the sentiment of this text:\n{text}"),
            TaskType::CodeReview => {
                format!("Review this code and suggest improvements:\n{text}")
            }
        }
    }
}

/// Build a prompt for an optional task; without a task the text is sent as-is.
pub fn build_prompt(task: Option<TaskType>, text: &str, target_language: Option<&str>) -> String {
    match task {
        Some(task) => task.build_prompt(text, target_language),
        None => text.to_string(),
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = AiHookError;

    /// Accepts the camelCase name plus the `code-review`/`code_review` spellings
    /// CLI users tend to type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().to_lowercase() == normalized)
            .ok_or_else(|| AiHookError::invalid_task(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_summarize_prompt() {
        assert_eq!(
            TaskType::Summarize.build_prompt("Hello world", None),
            "Summarize the following text:\nHello world"
        );
    }

    #[test]
    fn test_translate_defaults_to_english() {
        assert_eq!(
            TaskType::Translate.build_prompt("Hola", None),
            "Translate this text into English:\nHola"
        );
        assert_eq!(
            TaskType::Translate.build_prompt("Hola", Some("  ")),
            "Translate this text into English:\nHola"
        );
    }

    #[test]
    fn test_translate_target_language() {
        assert_eq!(
            TaskType::Translate.build_prompt("Hello", Some("Urdu")),
            "Translate this text into Urdu:\nHello"
        );
    }

    #[test]
    fn test_target_language_ignored_for_other_tasks() {
        assert_eq!(
            TaskType::Explain.build_prompt("x", Some("French")),
            "Explain this clearly:\nx"
        );
    }

    #[test]
    fn test_no_task_passes_text_through() {
        assert_eq!(build_prompt(None, "raw prompt", Some("French")), "raw prompt");
    }

    #[test]
    fn test_parse_task_spellings() {
        assert_eq!("codeReview".parse::<TaskType>().unwrap(), TaskType::CodeReview);
        assert_eq!("code-review".parse::<TaskType>().unwrap(), TaskType::CodeReview);
        assert_eq!("SENTIMENT".parse::<TaskType>().unwrap(), TaskType::Sentiment);
    }

    #[test]
    fn test_parse_invalid_task() {
        let err = "poem".parse::<TaskType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTask);
        assert!(err.message().contains("summarize, translate"));
    }

    #[test]
    fn test_serde_camel_case() {
        let json = serde_json::to_string(&TaskType::CodeReview).unwrap();
        assert_eq!(json, "\"codeReview\"");
    }
}
