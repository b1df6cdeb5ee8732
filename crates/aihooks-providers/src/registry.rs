//! Provider registry — the set of configured providers and their credentials.
//!
//! The registry is an explicit object (no global); share it behind an `Arc`.
//! Mutation and reads go through an internal `RwLock`, so registering or
//! removing a provider while calls are resolving is safe. Each mutation is a
//! single atomic insert/replace/delete.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use aihooks_core::config::{Config, HttpConfig, InitOptions, ProviderConfig};
use aihooks_core::{AiHookError, ErrorKind, ProviderId, Result, PREFERRED_PROVIDER};

use crate::catalog::{find_by_id, ProviderSpec};
use crate::http_adapter::{build_client, HttpAdapter};
use crate::traits::ProviderAdapter;

// ─────────────────────────────────────────────
// ProviderCredential
// ─────────────────────────────────────────────

/// A validated registration: provider, secret key, optional default model
/// and optional base URL override.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredential {
    provider: ProviderId,
    key: String,
    default_model: Option<String>,
    api_base: Option<String>,
}

impl ProviderCredential {
    pub fn new(provider: ProviderId, key: impl Into<String>) -> Self {
        Self {
            provider,
            key: key.into(),
            default_model: None,
            api_base: None,
        }
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Configured default model; blank values count as unset.
    pub fn default_model(&self) -> Option<&str> {
        self.default_model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    /// Whether the key is non-empty.
    pub fn has_key(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

impl TryFrom<&ProviderConfig> for ProviderCredential {
    type Error = AiHookError;

    fn try_from(config: &ProviderConfig) -> Result<Self> {
        let provider: ProviderId = config.provider.parse()?;
        Ok(Self {
            provider,
            key: config.key.clone(),
            default_model: config.default_model.clone(),
            api_base: config.api_base.clone(),
        })
    }
}

impl std::fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredential")
            .field("provider", &self.provider)
            .field("key", &if self.has_key() { "<redacted>" } else { "<empty>" })
            .field("default_model", &self.default_model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

// ─────────────────────────────────────────────
// RegistryEntry
// ─────────────────────────────────────────────

/// A registered provider: its credential, the adapter bound to it, and its spec.
#[derive(Clone)]
pub struct RegistryEntry {
    pub credential: ProviderCredential,
    pub adapter: Arc<dyn ProviderAdapter>,
    pub spec: &'static ProviderSpec,
}

impl RegistryEntry {
    pub fn provider(&self) -> ProviderId {
        self.credential.provider()
    }

    /// Available iff the credential key is non-empty.
    pub fn is_available(&self) -> bool {
        self.credential.has_key()
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("credential", &self.credential)
            .field("adapter", &self.adapter.display_name())
            .finish()
    }
}

// ─────────────────────────────────────────────
// ProviderRegistry
// ─────────────────────────────────────────────

#[derive(Default)]
struct RegistryState {
    /// Insertion order; ids are unique.
    entries: Vec<RegistryEntry>,
    default_provider: Option<ProviderId>,
}

impl RegistryState {
    fn position(&self, id: ProviderId) -> Option<usize> {
        self.entries.iter().position(|e| e.provider() == id)
    }

    /// Insert, or replace in place so the original registration order holds.
    fn upsert(&mut self, entry: RegistryEntry) {
        match self.position(entry.provider()) {
            Some(idx) => self.entries[idx] = entry,
            None => self.entries.push(entry),
        }
    }

    /// Available entries: preferred provider first, then registration order.
    fn available(&self) -> Vec<RegistryEntry> {
        let mut available: Vec<RegistryEntry> = Vec::with_capacity(self.entries.len());
        if let Some(preferred) = self
            .entries
            .iter()
            .find(|e| e.provider() == PREFERRED_PROVIDER && e.is_available())
        {
            available.push(preferred.clone());
        }
        available.extend(
            self.entries
                .iter()
                .filter(|e| e.provider() != PREFERRED_PROVIDER && e.is_available())
                .cloned(),
        );
        available
    }
}

/// Consistent read of everything provider selection needs.
#[derive(Clone, Debug)]
pub struct RegistrySnapshot {
    /// Available entries in availability order.
    pub available: Vec<RegistryEntry>,
    pub default_provider: Option<ProviderId>,
}

/// Owns the configured providers and computes the available set.
pub struct ProviderRegistry {
    client: reqwest::Client,
    state: RwLock<RegistryState>,
}

impl ProviderRegistry {
    /// Create an empty registry with the default HTTP settings.
    pub fn new() -> Self {
        Self::with_http(&HttpConfig::default())
    }

    /// Create an empty registry whose adapters use `http` settings.
    pub fn with_http(http: &HttpConfig) -> Self {
        Self::with_client(build_client(std::time::Duration::from_secs(http.timeout_secs)))
    }

    /// Create an empty registry whose adapters share `client`.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Create a registry initialized from a loaded config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = Self::with_http(&config.http);
        registry.init(&config.init_options())?;
        Ok(registry)
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn build_entry(&self, credential: ProviderCredential) -> Result<RegistryEntry> {
        let spec = find_by_id(credential.provider())
            .ok_or_else(|| AiHookError::unsupported_provider(credential.provider().as_str()))?;
        let adapter = HttpAdapter::new(spec, &credential, self.client.clone());
        Ok(RegistryEntry {
            credential,
            adapter: Arc::new(adapter),
            spec,
        })
    }

    /// Replace the whole configured set and the default provider.
    ///
    /// Every record is validated before anything changes; on error the
    /// registry is left as it was.
    pub fn init(&self, options: &InitOptions) -> Result<()> {
        let mut next = RegistryState::default();
        for config in &options.providers {
            let credential = ProviderCredential::try_from(config)?;
            next.upsert(self.build_entry(credential)?);
        }
        next.default_provider = options
            .default_provider
            .as_deref()
            .map(str::parse::<ProviderId>)
            .transpose()?;

        let count = next.entries.len();
        let default_provider = next.default_provider;
        *self.write() = next;
        info!(
            providers = count,
            default_provider = ?default_provider,
            "initialized provider registry"
        );
        Ok(())
    }

    /// Register a provider from an unvalidated config record.
    ///
    /// Fails with `UnsupportedProvider` if the name is not a known provider.
    pub fn register(&self, config: &ProviderConfig) -> Result<ProviderId> {
        let credential = ProviderCredential::try_from(config)?;
        let id = credential.provider();
        self.register_credential(credential)?;
        Ok(id)
    }

    /// Register (or replace) a provider with an HTTP adapter bound to `credential`.
    pub fn register_credential(&self, credential: ProviderCredential) -> Result<()> {
        let entry = self.build_entry(credential)?;
        self.insert(entry);
        Ok(())
    }

    /// Register (or replace) a provider with a caller-supplied adapter.
    ///
    /// The adapter must talk to the credential's provider.
    pub fn register_with_adapter(
        &self,
        credential: ProviderCredential,
        adapter: Arc<dyn ProviderAdapter>,
    ) -> Result<()> {
        if adapter.provider() != credential.provider() {
            return Err(AiHookError::new(
                ErrorKind::UnsupportedProvider,
                format!(
                    "Adapter for {} cannot be registered as {}",
                    adapter.provider().display_name(),
                    credential.provider().display_name()
                ),
            )
            .with_provider(credential.provider()));
        }
        let spec = find_by_id(credential.provider())
            .ok_or_else(|| AiHookError::unsupported_provider(credential.provider().as_str()))?;
        self.insert(RegistryEntry {
            credential,
            adapter,
            spec,
        });
        Ok(())
    }

    fn insert(&self, entry: RegistryEntry) {
        let id = entry.provider();
        let available = entry.is_available();
        self.write().upsert(entry);
        info!(provider = %id, available, "registered provider");
    }

    /// Remove a provider. Returns whether it was registered.
    pub fn remove(&self, id: ProviderId) -> bool {
        let mut state = self.write();
        match state.position(id) {
            Some(idx) => {
                state.entries.remove(idx);
                info!(provider = %id, "removed provider");
                true
            }
            None => {
                debug!(provider = %id, "remove: provider not registered");
                false
            }
        }
    }

    /// Clear every registration and the default provider.
    pub fn reset(&self) {
        *self.write() = RegistryState::default();
        debug!("provider registry reset");
    }

    /// Look up a registered provider (available or not).
    pub fn get(&self, id: ProviderId) -> Option<RegistryEntry> {
        self.read().entries.iter().find(|e| e.provider() == id).cloned()
    }

    /// Providers with a non-empty key: preferred provider first, then
    /// registration order.
    pub fn available_providers(&self) -> Vec<ProviderId> {
        self.read()
            .available()
            .iter()
            .map(RegistryEntry::provider)
            .collect()
    }

    pub fn is_available(&self, id: ProviderId) -> bool {
        self.read()
            .entries
            .iter()
            .any(|e| e.provider() == id && e.is_available())
    }

    /// Every registered provider in registration order, keyed or not.
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        self.read().entries.iter().map(RegistryEntry::provider).collect()
    }

    /// The default provider set at initialization.
    pub fn default_provider(&self) -> Option<ProviderId> {
        self.read().default_provider
    }

    /// Available entries and default provider, read under one lock.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let state = self.read();
        RegistrySnapshot {
            available: state.available(),
            default_provider: state.default_provider,
        }
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(provider: &str, key: &str) -> ProviderConfig {
        ProviderConfig::new(provider, key)
    }

    fn registry_with(providers: &[(&str, &str)]) -> ProviderRegistry {
        let registry = ProviderRegistry::new();
        for (p, k) in providers {
            registry.register(&cfg(p, k)).unwrap();
        }
        registry
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.available_providers().is_empty());
        assert!(registry.default_provider().is_none());
    }

    #[test]
    fn test_available_excludes_empty_keys() {
        let registry = registry_with(&[("openai", "sk-1"), ("claude", ""), ("groq", "gsk")]);
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.available_providers(),
            vec![ProviderId::OpenAi, ProviderId::Groq]
        );
        assert!(!registry.is_available(ProviderId::Claude));
        assert!(registry.get(ProviderId::Claude).is_some());
    }

    #[test]
    fn test_preferred_provider_first() {
        let registry = registry_with(&[
            ("groq", "gsk"),
            ("openai", "sk-1"),
            ("openrouter", "sk-or"),
        ]);
        assert_eq!(
            registry.available_providers(),
            vec![ProviderId::OpenRouter, ProviderId::Groq, ProviderId::OpenAi]
        );
    }

    #[test]
    fn test_preferred_without_key_not_listed() {
        let registry = registry_with(&[("openrouter", ""), ("mistral", "m")]);
        assert_eq!(registry.available_providers(), vec![ProviderId::Mistral]);
    }

    #[test]
    fn test_insertion_order_not_alphabetical() {
        let registry = registry_with(&[("xai", "1"), ("deepseek", "2"), ("claude", "3")]);
        assert_eq!(
            registry.available_providers(),
            vec![ProviderId::Xai, ProviderId::DeepSeek, ProviderId::Claude]
        );
    }

    #[test]
    fn test_register_replaces_in_place() {
        let registry = registry_with(&[("groq", "old"), ("openai", "sk")]);
        registry
            .register(&cfg("groq", "new").with_default_model("llama-3.1-8b-instant"))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.configured_providers(),
            vec![ProviderId::Groq, ProviderId::OpenAi]
        );
        let entry = registry.get(ProviderId::Groq).unwrap();
        assert_eq!(entry.credential.key(), "new");
        assert_eq!(entry.credential.default_model(), Some("llama-3.1-8b-instant"));
        assert_eq!(entry.adapter.api_key(), Some("new"));
    }

    #[test]
    fn test_register_unknown_provider() {
        let registry = ProviderRegistry::new();
        let err = registry.register(&cfg("mock", "k")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = registry_with(&[("groq", "g"), ("openai", "o")]);
        assert!(registry.remove(ProviderId::Groq));
        assert!(!registry.remove(ProviderId::Groq));
        assert_eq!(registry.available_providers(), vec![ProviderId::OpenAi]);
        assert!(registry.get(ProviderId::Groq).is_none());
    }

    #[test]
    fn test_order_survives_remove_and_readd() {
        let registry = registry_with(&[("groq", "g"), ("openai", "o"), ("claude", "c")]);
        registry.remove(ProviderId::Groq);
        registry.register(&cfg("groq", "g2")).unwrap();
        assert_eq!(
            registry.available_providers(),
            vec![ProviderId::OpenAi, ProviderId::Claude, ProviderId::Groq]
        );
    }

    #[test]
    fn test_init_replaces_everything() {
        let registry = registry_with(&[("groq", "g")]);
        registry
            .init(
                &InitOptions::new(vec![cfg("claude", "c"), cfg("gemini", "g")])
                    .with_default_provider("gemini"),
            )
            .unwrap();

        assert_eq!(
            registry.configured_providers(),
            vec![ProviderId::Claude, ProviderId::Gemini]
        );
        assert_eq!(registry.default_provider(), Some(ProviderId::Gemini));
    }

    #[test]
    fn test_init_is_all_or_nothing() {
        let registry = registry_with(&[("groq", "g")]);
        let err = registry
            .init(&InitOptions::new(vec![cfg("claude", "c"), cfg("bogus", "x")]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
        assert_eq!(registry.configured_providers(), vec![ProviderId::Groq]);
    }

    #[test]
    fn test_init_unknown_default_provider() {
        let registry = ProviderRegistry::new();
        let err = registry
            .init(&InitOptions::new(vec![cfg("groq", "g")]).with_default_provider("nope"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
    }

    #[test]
    fn test_init_duplicate_ids_keep_last() {
        let registry = ProviderRegistry::new();
        registry
            .init(&InitOptions::new(vec![cfg("groq", "a"), cfg("groq", "b")]))
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(ProviderId::Groq).unwrap().credential.key(), "b");
    }

    #[test]
    fn test_reset_clears_default() {
        let registry = ProviderRegistry::new();
        registry
            .init(&InitOptions::new(vec![cfg("groq", "g")]).with_default_provider("groq"))
            .unwrap();
        registry.reset();
        assert!(registry.is_empty());
        assert!(registry.default_provider().is_none());
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            providers: vec![cfg("perplexity", "pplx")],
            default_provider: Some("perplexity".into()),
            ..Default::default()
        };
        let registry = ProviderRegistry::from_config(&config).unwrap();
        assert_eq!(registry.available_providers(), vec![ProviderId::Perplexity]);
        assert_eq!(registry.default_provider(), Some(ProviderId::Perplexity));
    }

    #[test]
    fn test_snapshot_matches_available() {
        let registry = registry_with(&[("groq", "g"), ("openrouter", "o")]);
        let snapshot = registry.snapshot();
        let ids: Vec<ProviderId> = snapshot.available.iter().map(|e| e.provider()).collect();
        assert_eq!(ids, registry.available_providers());
    }

    #[test]
    fn test_credential_blank_default_model_is_none() {
        let credential = ProviderCredential::new(ProviderId::Groq, "k").with_default_model(" ");
        assert!(credential.default_model().is_none());
    }

    #[test]
    fn test_credential_debug_redacts_key() {
        let dbg = format!("{:?}", ProviderCredential::new(ProviderId::Groq, "gsk_secret"));
        assert!(!dbg.contains("gsk_secret"));
    }

    #[test]
    fn test_register_with_adapter_rejects_other_provider() {
        let registry = ProviderRegistry::new();
        let groq = ProviderCredential::new(ProviderId::Groq, "g");
        let adapter = Arc::new(HttpAdapter::for_credential(&groq, reqwest::Client::new()).unwrap());

        let openai = ProviderCredential::new(ProviderId::OpenAi, "o");
        let err = registry
            .register_with_adapter(openai, adapter.clone())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
        assert_eq!(err.provider(), Some(ProviderId::OpenAi));
        assert!(registry.is_empty());

        registry.register_with_adapter(groq, adapter).unwrap();
        assert_eq!(registry.available_providers(), vec![ProviderId::Groq]);
    }

    #[test]
    fn test_concurrent_register_and_read() {
        let registry = Arc::new(ProviderRegistry::new());
        let handles: Vec<_> = ProviderId::ALL
            .iter()
            .map(|id| {
                let registry = Arc::clone(&registry);
                let id = *id;
                std::thread::spawn(move || {
                    registry
                        .register_credential(ProviderCredential::new(id, "k"))
                        .unwrap();
                    registry.available_providers().len()
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap() >= 1);
        }
        assert_eq!(registry.len(), ProviderId::ALL.len());
        assert_eq!(registry.available_providers()[0], PREFERRED_PROVIDER);
    }
}
