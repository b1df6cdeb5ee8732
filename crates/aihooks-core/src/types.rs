//! Invocation options and the success envelope returned to callers.
//!
//! The envelope serializes as `{output, meta: {provider, model, latencyMs,
//! cached, estimatedCostUSD}}`.

use serde::{Deserialize, Serialize};

use crate::provider_id::ProviderId;
use crate::task::TaskType;

// ─────────────────────────────────────────────
// Invocation options
// ─────────────────────────────────────────────

/// Per-call options for a task invocation.
///
/// `provider` is kept as free text so unknown names surface as
/// `UnsupportedProvider` instead of being dropped during parsing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvokeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

impl InvokeOptions {
    pub fn task(task: TaskType) -> Self {
        Self {
            task: Some(task),
            ..Default::default()
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = Some(language.into());
        self
    }
}

// ─────────────────────────────────────────────
// Result envelope
// ─────────────────────────────────────────────

/// Successful call result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub output: String,
    pub meta: ResultMeta,
}

/// Metadata describing how a result was produced.
///
/// `cached` and `estimated_cost_usd` are always `false`/`0.0`; they exist so
/// the serialized shape stays stable for consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMeta {
    pub provider: ProviderId,
    pub model: String,
    pub latency_ms: u64,
    pub cached: bool,
    #[serde(rename = "estimatedCostUSD")]
    pub estimated_cost_usd: f64,
}

impl ResultEnvelope {
    pub fn new(
        output: impl Into<String>,
        provider: ProviderId,
        model: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            output: output.into(),
            meta: ResultMeta {
                provider,
                model: model.into(),
                latency_ms,
                cached: false,
                estimated_cost_usd: 0.0,
            },
        }
    }
}
