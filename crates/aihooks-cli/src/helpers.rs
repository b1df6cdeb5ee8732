//! Shared CLI helpers — path expansion, output/error printing, banner.

use std::path::PathBuf;

use colored::Colorize;

use aihooks_core::{AiHookError, ResultEnvelope};

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs_next::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        (None, Some(home)) if path == "~" => home,
        _ => PathBuf::from(path),
    }
}

/// Render a result either as plain output text or as the JSON envelope.
pub fn format_output(result: &ResultEnvelope, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    if result.output.is_empty() {
        return Ok("(no output)".dimmed().to_string());
    }
    Ok(result.output.clone())
}

/// Print one REPL answer with its provider/model footer.
pub fn print_answer(result: &ResultEnvelope) {
    println!();
    println!("{}", result.output);
    println!(
        "{}",
        format!(
            "── {} · {} · {} ms",
            result.meta.provider, result.meta.model, result.meta.latency_ms
        )
        .dimmed()
    );
    println!();
}

/// Print a failure to stderr. Classified errors use their pretty form.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{}", error_text(err).red());
}

fn error_text(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AiHookError>() {
        Some(e) => e.pretty(),
        None => format!("\n❌ Error: {err:#}\n"),
    }
}

/// Print the banner shown at REPL start.
pub fn print_banner(task: Option<&str>) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🪝 aihooks".cyan().bold(), version.dimmed());
    if let Some(task) = task {
        println!("{}", format!("Task: {task}").dimmed());
    }
    println!("{}", "Type some text, or \"exit\" to quit.".dimmed());
    println!();
}

/// Print a "thinking" placeholder while a call is in flight.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
