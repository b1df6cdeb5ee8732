//! `aihooks providers` — supported providers and their configuration status.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use aihooks_core::config::{get_config_path, load_config};
use aihooks_core::ProviderId;
use aihooks_providers::selector::resolve_model;
use aihooks_providers::{ProviderRegistry, ProviderSpec, RegistryEntry, Selector, PROVIDERS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Available,
    MissingKey,
    NotConfigured,
}

#[derive(Debug, PartialEq, Eq)]
struct ProviderRow {
    id: ProviderId,
    status: Status,
    model: String,
    resolved: bool,
}

fn provider_row(
    spec: &ProviderSpec,
    entry: Option<&RegistryEntry>,
    resolved: Option<ProviderId>,
) -> ProviderRow {
    let status = match entry {
        Some(e) if e.is_available() => Status::Available,
        Some(_) => Status::MissingKey,
        None => Status::NotConfigured,
    };
    let model = entry
        .and_then(|e| resolve_model(e, None).ok())
        .unwrap_or_else(|| spec.default_model.to_string());
    ProviderRow {
        id: spec.id,
        status,
        model,
        resolved: resolved == Some(spec.id),
    }
}

fn rows(registry: &ProviderRegistry) -> Vec<ProviderRow> {
    let resolved = Selector::new(registry)
        .select_provider(None)
        .ok()
        .map(|e| e.provider());
    PROVIDERS
        .iter()
        .map(|spec| provider_row(spec, registry.get(spec.id).as_ref(), resolved))
        .collect()
}

/// Run the providers command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(get_config_path);
    let config = load_config(Some(path.as_path()));
    let registry = ProviderRegistry::from_config(&config)?;

    println!();
    println!("{}", "🪝 aihooks providers".cyan().bold());
    println!();
    println!(
        "  {:<10} {} {}",
        "Config:".bold(),
        path.display(),
        if path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );
    println!();

    for row in rows(&registry) {
        let status = match row.status {
            Status::Available => format!("{:<16}", "✓ available").green(),
            Status::MissingKey => format!("{:<16}", "✗ empty key").yellow(),
            Status::NotConfigured => format!("{:<16}", "· not configured").dimmed(),
        };
        let marker = if row.resolved {
            "← default".cyan().bold().to_string()
        } else {
            String::new()
        };
        println!(
            "    {:<12} {} {:<34} {:<22} {}",
            row.id.display_name(),
            status,
            row.model,
            row.id.env_key().dimmed(),
            marker
        );
    }

    if !registry.snapshot().available.is_empty() {
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  {}",
        "No provider has a key. Run `aihooks init` or set AI_HOOK_<PROVIDER>_KEY.".yellow()
    );
    println!();
    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
