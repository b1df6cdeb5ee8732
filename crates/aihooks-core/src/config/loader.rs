//! Config loader — reads `~/.aihooks/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.aihooks/config.json`
//! 3. Environment variables (override JSON):
//!    `AI_HOOK_<PROVIDER>_KEY`, `AI_HOOK_DEFAULT_PROVIDER`, `AI_HOOK_TIMEOUT_SECS`

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};
use crate::provider_id::ProviderId;

/// Env var naming the default provider.
pub const DEFAULT_PROVIDER_ENV: &str = "AI_HOOK_DEFAULT_PROVIDER";
/// Env var overriding `http.timeoutSecs`.
pub const TIMEOUT_ENV: &str = "AI_HOOK_TIMEOUT_SECS";

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply process environment overrides on top of a loaded config.
fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_with(config, |name| std::env::var(name).ok())
}

/// Apply overrides from an arbitrary variable lookup.
///
/// A provider key found in the environment replaces the configured key, or
/// appends a new registration when the provider is not in the file.
fn apply_overrides_with(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    for provider in ProviderId::ALL {
        let Some(key) = lookup(provider.env_key()).filter(|k| !k.trim().is_empty()) else {
            continue;
        };
        match config.provider_mut(provider.as_str()) {
            Some(existing) => existing.key = key,
            None => config
                .providers
                .push(ProviderConfig::new(provider.as_str(), key)),
        }
        debug!(provider = %provider, "Provider key taken from {}", provider.env_key());
    }

    if let Some(val) = lookup(DEFAULT_PROVIDER_ENV).filter(|v| !v.trim().is_empty()) {
        config.default_provider = Some(val);
    }

    if let Some(val) = lookup(TIMEOUT_ENV) {
        match val.parse::<u64>() {
            Ok(secs) if secs > 0 => config.http.timeout_secs = secs,
            _ => warn!("Ignoring invalid {}={}", TIMEOUT_ENV, val),
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(r#"{
            "providers": [
                { "provider": "groq", "key": "gsk_123", "defaultModel": "llama-3.1-8b-instant" }
            ],
            "defaultProvider": "groq"
        }"#);

        let config = load_config_from_path(file.path());
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].key, "gsk_123");
        assert_eq!(config.default_provider.as_deref(), Some("groq"));
        // Default preserved
        assert_eq!(config.http.timeout_secs, 120);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config
            .providers
            .push(ProviderConfig::new("claude", "sk-ant-test").with_default_model("claude-3"));
        config.default_provider = Some("claude".into());

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config
            .providers
            .push(ProviderConfig::new("groq", "k").with_default_model("m"));
        save_config(&config, Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["providers"][0].get("defaultModel").is_some());
        assert!(raw["providers"][0].get("default_model").is_none());
        assert!(raw["http"].get("timeoutSecs").is_some());
    }

    #[test]
    fn test_env_key_appends_provider() {
        let config = apply_overrides_with(
            Config::default(),
            env(&[("AI_HOOK_GROQ_KEY", "gsk_env")]),
        );
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].provider, "groq");
        assert_eq!(config.providers[0].key, "gsk_env");
    }

    #[test]
    fn test_env_key_overrides_file_key_in_place() {
        let mut config = Config::default();
        config.providers.push(ProviderConfig::new("openai", "file-key"));
        config
            .providers
            .push(ProviderConfig::new("claude", "ant").with_default_model("c"));

        let config = apply_overrides_with(config, env(&[("AI_HOOK_CLAUDE_KEY", "env-ant")]));
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[1].key, "env-ant");
        // Default model from the file survives the key override
        assert_eq!(config.providers[1].default_model.as_deref(), Some("c"));
        assert_eq!(config.providers[0].key, "file-key");
    }

    #[test]
    fn test_env_empty_key_ignored() {
        let config = apply_overrides_with(Config::default(), env(&[("AI_HOOK_XAI_KEY", "")]));
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_env_default_provider_and_timeout() {
        let config = apply_overrides_with(
            Config::default(),
            env(&[(DEFAULT_PROVIDER_ENV, "mistral"), (TIMEOUT_ENV, "15")]),
        );
        assert_eq!(config.default_provider.as_deref(), Some("mistral"));
        assert_eq!(config.http.timeout_secs, 15);
    }

    #[test]
    fn test_env_invalid_timeout_ignored() {
        let config = apply_overrides_with(Config::default(), env(&[(TIMEOUT_ENV, "soon")]));
        assert_eq!(config.http.timeout_secs, 120);
        let config = apply_overrides_with(Config::default(), env(&[(TIMEOUT_ENV, "0")]));
        assert_eq!(config.http.timeout_secs, 120);
    }
}
