//! Provider layer for aihooks.
//!
//! # Architecture
//!
//! - [`traits::ProviderAdapter`] — trait every provider adapter implements
//! - [`catalog`] — static specs for the supported providers (endpoint, auth, wire shape)
//! - [`http_adapter::HttpAdapter`] — one HTTP adapter driven by a catalog spec
//! - [`registry::ProviderRegistry`] — configured providers and the available set
//! - [`selector::Selector`] — provider/model resolution for a call
//! - [`client::AiHooks`] — task prompt in, result envelope out

pub mod catalog;
pub mod client;
pub mod http_adapter;
pub mod registry;
pub mod selector;
pub mod traits;
pub mod wire;

// Re-export main types for convenience
pub use catalog::{ProviderSpec, PROVIDERS};
pub use client::AiHooks;
pub use http_adapter::HttpAdapter;
pub use registry::{ProviderCredential, ProviderRegistry, RegistryEntry};
pub use selector::{Resolution, Selector};
pub use traits::ProviderAdapter;
