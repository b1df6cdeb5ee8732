//! Interactive REPL for `aihooks chat`.
//!
//! Uses `rustyline` for readline-style editing with persistent history.
//! Each line is sent through the same task/provider/model options.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use aihooks_core::InvokeOptions;
use aihooks_providers::AiHooks;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
///
/// Failed calls are reported and the loop continues; only input errors end it.
pub async fn run(hooks: AiHooks, options: InvokeOptions) -> Result<()> {
    helpers::print_banner(options.task.map(|t| t.as_str()));

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye! 👋");
            break;
        }

        let _ = editor.add_history_entry(&input);

        debug!(chars = trimmed.len(), "sending chat line");
        helpers::print_thinking();

        let outcome = hooks.run(trimmed, &options).await;
        helpers::clear_thinking();
        match outcome {
            Ok(result) => helpers::print_answer(&result),
            Err(e) => helpers::print_error(&anyhow::Error::from(e)),
        }
    }

    save_history(&mut editor);

    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// ~/.aihooks/history/chat_history
fn history_path() -> std::path::PathBuf {
    aihooks_core::utils::get_data_path()
        .join("history")
        .join("chat_history")
}

fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("QUIT"));
        assert!(is_exit_command("/exit"));
        assert!(is_exit_command(":q"));
        assert!(!is_exit_command("summarize this"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn history_path_under_data_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".aihooks"));
        assert!(path.ends_with("history/chat_history"));
    }
}
