//! Interaction service client module
//!
//! Typed access to the Gemini interactions API (create/poll lifecycle)
//! and the one-shot content generation endpoint.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;
mod types;

pub use client::InteractionClient;
pub use error::ClientError;
pub use gemini::GeminiClient;
pub use types::{
    ContentPart, GeneratedContent, InlineData, Interaction, InteractionRequest, InteractionStatus,
    OutputItem, ToolSpec,
};

use crate::config::ClientConfig;

/// Create a client for the configured service endpoint
pub fn create_client(config: &ClientConfig) -> Result<Arc<dyn InteractionClient>, ClientError> {
    debug!(base_url = %config.base_url, "create_client: called");
    Ok(Arc::new(GeminiClient::from_config(config)?))
}
