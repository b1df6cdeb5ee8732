//! `aihooks init` — write a template config file.
//!
//! The template lists every supported provider with an empty key, so the
//! user only has to fill in the ones they have.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use aihooks_core::config::{get_config_path, save_config, Config, ProviderConfig};
use aihooks_core::ProviderId;

/// Run the init command.
pub fn run(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(get_config_path);

    println!();
    println!("{}", "🪝 aihooks — Setup".cyan().bold());
    println!();

    if write_template(&path, force)? {
        println!("  {} created config at {}", "✓".green(), path.display());
        println!();
        println!(
            "{}",
            "  Add at least one key, then try `aihooks run \"hello\" --task explain`.".green()
        );
    } else {
        println!(
            "  {} config already exists at {} (use --force to overwrite)",
            "✓".green(),
            path.display()
        );
    }
    println!();

    Ok(())
}

/// Write the template to `path`. Returns `false` if a file was already there
/// and `force` is off.
fn write_template(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    save_config(&template(), Some(path))
        .with_context(|| format!("failed to write config: {}", path.display()))?;
    Ok(true)
}

fn template() -> Config {
    Config {
        providers: ProviderId::ALL
            .iter()
            .map(|id| ProviderConfig::new(id.as_str(), ""))
            .collect(),
        ..Config::default()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
