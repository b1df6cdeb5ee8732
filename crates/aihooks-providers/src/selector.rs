//! Provider/model resolution.
//!
//! Provider order, first match wins:
//! 1. explicit hint (never overridden: an unavailable hint is an error)
//! 2. the registry's default provider
//! 3. the preferred provider
//! 4. the first available provider in registration order
//!
//! Model order: explicit model, the registration's default model, the
//! provider's built-in default.

use std::sync::Arc;

use tracing::debug;

use aihooks_core::{AiHookError, ProviderId, Result, PREFERRED_PROVIDER};

use crate::registry::{ProviderRegistry, RegistryEntry, RegistrySnapshot};
use crate::traits::ProviderAdapter;

/// A concrete provider + model pair ready to call.
#[derive(Clone)]
pub struct Resolution {
    pub provider: ProviderId,
    pub model: String,
    pub adapter: Arc<dyn ProviderAdapter>,
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .finish()
    }
}

/// Resolves hints against a registry.
#[derive(Clone, Copy)]
pub struct Selector<'a> {
    registry: &'a ProviderRegistry,
}

impl<'a> Selector<'a> {
    pub fn new(registry: &'a ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Resolve an optional provider hint and model hint to exactly one pair.
    pub fn resolve(&self, provider: Option<ProviderId>, model: Option<&str>) -> Result<Resolution> {
        let entry = self.select_provider(provider)?;
        let model = resolve_model(&entry, model)?;
        debug!(
            provider = %entry.provider(),
            model = %model,
            hinted = provider.is_some(),
            "resolved provider"
        );
        Ok(Resolution {
            provider: entry.provider(),
            model,
            adapter: entry.adapter,
        })
    }

    /// Pick the registry entry that answers a call.
    pub fn select_provider(&self, hint: Option<ProviderId>) -> Result<RegistryEntry> {
        select_from(&self.registry.snapshot(), hint)
    }
}

fn select_from(snapshot: &RegistrySnapshot, hint: Option<ProviderId>) -> Result<RegistryEntry> {
    let find = |id: ProviderId| snapshot.available.iter().find(|e| e.provider() == id);

    if let Some(id) = hint {
        return find(id)
            .cloned()
            .ok_or_else(|| AiHookError::provider_not_available(id));
    }

    snapshot
        .default_provider
        .and_then(find)
        .or_else(|| find(PREFERRED_PROVIDER))
        .or_else(|| snapshot.available.first())
        .cloned()
        .ok_or_else(AiHookError::no_provider_found)
}

/// Pick the model for an already-selected provider.
pub fn resolve_model(entry: &RegistryEntry, explicit: Option<&str>) -> Result<String> {
    let non_blank = |m: &&str| !m.trim().is_empty();
    explicit
        .filter(non_blank)
        .or_else(|| entry.credential.default_model())
        .or_else(|| Some(entry.spec.default_model).filter(non_blank))
        .map(|m| m.trim().to_string())
        .ok_or_else(|| AiHookError::no_model_found(entry.provider()))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_by_id;
    use crate::registry::ProviderCredential;
    use aihooks_core::config::{InitOptions, ProviderConfig};
    use aihooks_core::ErrorKind;

    fn registry(providers: &[(&str, &str)], default: Option<&str>) -> ProviderRegistry {
        let registry = ProviderRegistry::new();
        let mut opts = InitOptions::new(
            providers
                .iter()
                .map(|(p, k)| ProviderConfig::new(*p, *k))
                .collect(),
        );
        if let Some(d) = default {
            opts = opts.with_default_provider(d);
        }
        registry.init(&opts).unwrap();
        registry
    }

    fn picked(registry: &ProviderRegistry, hint: Option<ProviderId>) -> Result<ProviderId> {
        Selector::new(registry).select_provider(hint).map(|e| e.provider())
    }

    #[test]
    fn test_explicit_hint_wins() {
        let r = registry(&[("openrouter", "o"), ("groq", "g")], Some("openrouter"));
        assert_eq!(picked(&r, Some(ProviderId::Groq)).unwrap(), ProviderId::Groq);
    }

    #[test]
    fn test_explicit_hint_without_key_is_not_available() {
        let r = registry(&[("openrouter", "o"), ("groq", "")], None);
        let err = picked(&r, Some(ProviderId::Groq)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProviderNotAvailable);
        assert_eq!(err.provider(), Some(ProviderId::Groq));
    }

    #[test]
    fn test_explicit_hint_unregistered_never_falls_back() {
        let r = registry(&[("openai", "o")], Some("openai"));
        let err = picked(&r, Some(ProviderId::Claude)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProviderNotAvailable);
    }

    #[test]
    fn test_default_provider_beats_preferred() {
        let r = registry(&[("openrouter", "o"), ("claude", "c")], Some("claude"));
        assert_eq!(picked(&r, None).unwrap(), ProviderId::Claude);
    }

    #[test]
    fn test_unavailable_default_falls_through() {
        let r = registry(&[("claude", ""), ("groq", "g"), ("openrouter", "o")], Some("claude"));
        assert_eq!(picked(&r, None).unwrap(), ProviderId::OpenRouter);
    }

    #[test]
    fn test_preferred_regardless_of_order() {
        for providers in [
            [("openrouter", "o"), ("openai", "k")],
            [("openai", "k"), ("openrouter", "o")],
        ] {
            let r = registry(&providers, None);
            assert_eq!(picked(&r, None).unwrap(), ProviderId::OpenRouter);
        }
    }

    #[test]
    fn test_first_registered_otherwise() {
        let r = registry(&[("mistral", "m"), ("claude", "c"), ("deepseek", "d")], None);
        assert_eq!(picked(&r, None).unwrap(), ProviderId::Mistral);
    }

    #[test]
    fn test_first_registered_after_remove() {
        let r = registry(&[("mistral", "m"), ("claude", "c")], None);
        r.remove(ProviderId::Mistral);
        assert_eq!(picked(&r, None).unwrap(), ProviderId::Claude);
    }

    #[test]
    fn test_empty_registry() {
        let r = ProviderRegistry::new();
        let err = picked(&r, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoProviderFound);
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_only_keyless_providers() {
        let r = registry(&[("openai", ""), ("groq", " ")], None);
        assert_eq!(picked(&r, None).unwrap_err().kind(), ErrorKind::NoProviderFound);
    }

    #[test]
    fn test_model_precedence_for_every_provider() {
        for id in ProviderId::ALL {
            let builtin = find_by_id(id).unwrap().default_model;
            let r = ProviderRegistry::new();

            r.register_credential(ProviderCredential::new(id, "k")).unwrap();
            let entry = r.get(id).unwrap();
            assert_eq!(resolve_model(&entry, None).unwrap(), builtin, "{id} builtin");
            assert_eq!(resolve_model(&entry, Some("")).unwrap(), builtin, "{id} blank");

            r.register_credential(ProviderCredential::new(id, "k").with_default_model("configured"))
                .unwrap();
            let entry = r.get(id).unwrap();
            assert_eq!(resolve_model(&entry, None).unwrap(), "configured", "{id} configured");
            assert_eq!(
                resolve_model(&entry, Some("explicit")).unwrap(),
                "explicit",
                "{id} explicit"
            );
        }
    }

    #[test]
    fn test_resolve_returns_model_and_adapter() {
        let r = registry(&[("groq", "g")], None);
        let res = Selector::new(&r).resolve(None, None).unwrap();
        assert_eq!(res.provider, ProviderId::Groq);
        assert_eq!(res.model, "llama-3.3-70b-versatile");
        assert_eq!(res.adapter.provider(), ProviderId::Groq);
    }
}
