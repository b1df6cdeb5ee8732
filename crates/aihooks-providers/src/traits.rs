//! Provider adapter trait — the core abstraction over provider APIs.
//!
//! Every provider is reached through an implementation of this trait.
//! The `HttpAdapter` in `http_adapter.rs` covers all supported providers by
//! interpreting their catalog spec.

use async_trait::async_trait;

use aihooks_core::{ProviderId, Result};

/// Trait that all provider adapters implement.
///
/// Adapters hold no mutable state across calls: an adapter is its immutable
/// spec plus the credential it was bound to.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter talks to.
    fn provider(&self) -> ProviderId;

    /// The bound API key, if any. `None` when the key is missing or blank.
    fn api_key(&self) -> Option<&str>;

    /// Send `prompt` to `model` and return the assistant's text.
    ///
    /// Every failure comes back classified; transport errors never leak raw.
    async fn call(&self, prompt: &str, model: &str) -> Result<String>;

    /// Display name for logging.
    fn display_name(&self) -> &str {
        self.provider().display_name()
    }
}
