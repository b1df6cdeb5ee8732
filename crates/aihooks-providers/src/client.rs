//! Invocation facade — task prompt → resolved provider → result envelope.
//!
//! ```no_run
//! # async fn demo() -> aihooks_core::Result<()> {
//! use aihooks_core::config::{InitOptions, ProviderConfig};
//! use aihooks_core::{InvokeOptions, TaskType};
//! use aihooks_providers::AiHooks;
//!
//! let hooks = AiHooks::default();
//! hooks.registry().init(&InitOptions::new(vec![ProviderConfig::new("groq", "gsk_...")]))?;
//!
//! let result = hooks
//!     .run("Rust is a systems language.", &InvokeOptions::task(TaskType::Summarize))
//!     .await?;
//! println!("{} ({})", result.output, result.meta.model);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use aihooks_core::config::Config;
use aihooks_core::task::build_prompt;
use aihooks_core::{InvokeOptions, ProviderId, Result, ResultEnvelope};

use crate::registry::ProviderRegistry;
use crate::selector::Selector;

/// Entry point for callers: resolves a provider per call and wraps the output.
#[derive(Clone)]
pub struct AiHooks {
    registry: Arc<ProviderRegistry>,
}

impl AiHooks {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Build a facade over a registry initialized from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(ProviderRegistry::from_config(config)?)))
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Apply `options.task` to `text` and send it to the resolved provider.
    pub async fn run(&self, text: &str, options: &InvokeOptions) -> Result<ResultEnvelope> {
        let prompt = build_prompt(options.task, text, options.target_language.as_deref());
        debug!(
            task = options.task.map(|t| t.as_str()).unwrap_or("none"),
            "running task"
        );
        self.call(&prompt, options.provider.as_deref(), options.model.as_deref())
            .await
    }

    /// Send a ready-made prompt.
    ///
    /// `provider` is a name from the closed provider set; anything else fails
    /// with `UnsupportedProvider` before resolution.
    pub async fn call(
        &self,
        prompt: &str,
        provider: Option<&str>,
        model: Option<&str>,
    ) -> Result<ResultEnvelope> {
        let hint = provider
            .filter(|p| !p.trim().is_empty())
            .map(str::parse::<ProviderId>)
            .transpose()?;

        let resolution = Selector::new(&self.registry).resolve(hint, model)?;

        let started = Instant::now();
        let output = resolution
            .adapter
            .call(prompt, &resolution.model)
            .await
            .map_err(|e| {
                warn!(
                    provider = %resolution.provider,
                    kind = %e.kind(),
                    "provider call failed"
                );
                e
            })?;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        Ok(ResultEnvelope::new(
            output,
            resolution.provider,
            resolution.model,
            latency_ms,
        ))
    }
}

impl Default for AiHooks {
    fn default() -> Self {
        Self::new(Arc::new(ProviderRegistry::new()))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
