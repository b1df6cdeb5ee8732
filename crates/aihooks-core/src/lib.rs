//! Core types for aihooks — shared by the provider layer and the CLI.
//!
//! - [`provider_id::ProviderId`] — the closed set of supported providers
//! - [`error`] — error taxonomy and HTTP status classification
//! - [`task`] — task types and prompt templates
//! - [`types`] — invocation options and the result envelope
//! - [`config`] — config file schema, loader, env overrides

pub mod config;
pub mod error;
pub mod provider_id;
pub mod task;
pub mod types;
pub mod utils;

pub use error::{AiHookError, ErrorKind, Result};
pub use provider_id::{ProviderId, PREFERRED_PROVIDER};
pub use task::TaskType;
pub use types::{InvokeOptions, ResultEnvelope, ResultMeta};
