//! Generic HTTP adapter driven by a provider's catalog spec.
//!
//! One implementation serves every provider: URL shape, headers, auth
//! placement, request body and response path all come from the
//! [`ProviderSpec`], so there are no per-provider subclasses.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, error};

use aihooks_core::error::classify_status;
use aihooks_core::{AiHookError, ProviderId, Result};

use crate::catalog::{find_by_id, ProviderSpec};
use crate::registry::ProviderCredential;
use crate::traits::ProviderAdapter;
use crate::wire::error_detail;

/// Timeout applied by [`build_client`] when no config is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the shared HTTP client with a whole-request timeout.
///
/// Falls back to a client without the timeout if the TLS backend cannot be
/// configured with one.
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            error!(error = %e, "Failed to build HTTP client with timeout, using defaults");
            reqwest::Client::new()
        })
}

// ─────────────────────────────────────────────
// HttpAdapter
// ─────────────────────────────────────────────

/// An adapter bound to one credential, talking to one provider over HTTP.
pub struct HttpAdapter {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// Static spec for this provider.
    spec: &'static ProviderSpec,
    /// API key for authentication. May be empty; checked on each call.
    api_key: String,
    /// Base URL override from the registration.
    api_base: Option<String>,
}

impl std::fmt::Debug for HttpAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAdapter")
            .field("provider", &self.spec.display_name())
            .field("api_base", &self.api_base)
            .field("has_key", &self.api_key().is_some())
            .finish()
    }
}

impl HttpAdapter {
    /// Create an adapter for `spec` bound to `credential`'s key and base URL.
    pub fn new(
        spec: &'static ProviderSpec,
        credential: &ProviderCredential,
        client: reqwest::Client,
    ) -> Self {
        HttpAdapter {
            client,
            spec,
            api_key: credential.key().to_string(),
            api_base: credential.api_base().map(String::from),
        }
    }

    /// Create an adapter for the credential's provider, looking up its spec.
    pub fn for_credential(credential: &ProviderCredential, client: reqwest::Client) -> Result<Self> {
        let spec = find_by_id(credential.provider())
            .ok_or_else(|| AiHookError::unsupported_provider(credential.provider().as_str()))?;
        Ok(Self::new(spec, credential, client))
    }

    pub fn spec(&self) -> &'static ProviderSpec {
        self.spec
    }

    /// Full request URL for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        self.spec.endpoint(self.api_base.as_deref(), model)
    }

    /// Classify a non-2xx response by its status.
    ///
    /// An unreadable body only loses the upstream detail; the kind still
    /// comes from the status.
    fn classify_error_response<E>(
        &self,
        status: reqwest::StatusCode,
        body: std::result::Result<String, E>,
    ) -> AiHookError {
        let text = body.unwrap_or_default();
        let detail = error_detail(&text, status.canonical_reason());
        error!(
            provider = self.spec.display_name(),
            status = %status,
            body = %detail,
            "API error"
        );
        classify_status(self.spec.id, status.as_u16(), &detail)
    }

    /// Classify a transport-level failure.
    ///
    /// The URL is stripped first: for query-param auth it carries the key.
    fn classify_transport(&self, e: reqwest::Error) -> AiHookError {
        let provider = self.spec.id;
        let e = e.without_url();
        error!(provider = self.spec.display_name(), error = %e, "HTTP request failed");
        if e.is_timeout() || e.is_connect() || e.is_request() {
            AiHookError::network(provider, e)
        } else if e.is_body() || e.is_decode() {
            AiHookError::empty_response(provider)
        } else {
            AiHookError::unknown(
                Some(provider),
                format!("Unexpected error calling {}: {}", self.spec.display_name(), e),
            )
        }
    }
}

#[async_trait]
impl ProviderAdapter for HttpAdapter {
    fn provider(&self) -> ProviderId {
        self.spec.id
    }

    fn api_key(&self) -> Option<&str> {
        Some(self.api_key.as_str()).filter(|k| !k.trim().is_empty())
    }

    async fn call(&self, prompt: &str, model: &str) -> Result<String> {
        let provider = self.spec.id;
        let api_key = self
            .api_key()
            .ok_or_else(|| AiHookError::missing_credential(provider))?;

        let url = self.endpoint(model);
        let headers = self.spec.headers(api_key)?;
        let body = self.spec.wire.request_body(prompt, model);

        let mut request = self.client.post(&url).headers(headers).json(&body);
        if let Some(param) = self.spec.auth_query(api_key) {
            request = request.query(&[param]);
        }

        debug!(
            provider = self.spec.display_name(),
            model = model,
            prompt_chars = prompt.chars().count(),
            "Calling provider"
        );
        let started = Instant::now();

        let response = request
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.classify_error_response(status, response.text().await));
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let output = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|json| self.spec.wire.extract_text(&json))
            .ok_or_else(|| {
                error!(
                    provider = self.spec.display_name(),
                    "No text in provider response"
                );
                AiHookError::empty_response(provider)
            })?;

        debug!(
            provider = self.spec.display_name(),
            latency_ms = started.elapsed().as_millis() as u64,
            output_chars = output.chars().count(),
            "Provider response received"
        );

        Ok(output)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
