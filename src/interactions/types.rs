//! Request and response types for the interaction service
//!
//! These are the shapes the rest of the crate programs against; the wire
//! protocol matches them closely enough that they serialize directly.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ClientError;

/// Lifecycle status the service reports for an interaction
///
/// Anything other than `in_progress` is terminal; the service never moves
/// an interaction back out of a terminal status. Unrecognized wire values
/// decode to [`InteractionStatus::Unknown`] and count as terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStatus {
    InProgress,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl InteractionStatus {
    /// True once the service will not change this interaction again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InteractionStatus::InProgress)
    }
}

impl std::fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// One output item of an interaction; only textual payloads are consumed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One request/response unit owned by the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Opaque identifier, stable for the life of the interaction
    pub id: String,

    pub status: InteractionStatus,

    #[serde(default)]
    pub outputs: Vec<OutputItem>,

    /// Causal-chain reference giving the service conversational context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_interaction_id: Option<String>,
}

impl Interaction {
    /// Concatenate all non-empty textual outputs, one per line
    pub fn text(&self) -> String {
        let text = self
            .outputs
            .iter()
            .filter_map(|item| item.text.as_deref())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        debug!(outputs = self.outputs.len(), chars = text.len(), "Interaction::text: extracted");
        text
    }
}

/// Tool capability attached to an interaction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ToolSpec {
    /// The service's grounded web-search tool
    pub fn google_search() -> Self {
        Self {
            kind: "google_search".to_string(),
        }
    }
}

/// Request body for creating an interaction
///
/// Exactly one of `model` or `agent` is set; the service routes plain
/// model calls and managed-agent calls differently. Interactions are
/// stored by default so later phases can chain onto them.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    pub input: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_interaction_id: Option<String>,

    pub background: bool,

    pub store: bool,
}

impl InteractionRequest {
    /// Request routed to a plain model
    pub fn with_model(model: impl Into<String>, input: impl Into<String>) -> Self {
        let model = model.into();
        debug!(%model, "InteractionRequest::with_model: called");
        Self {
            model: Some(model),
            agent: None,
            input: input.into(),
            tools: Vec::new(),
            previous_interaction_id: None,
            background: false,
            store: true,
        }
    }

    /// Request routed to a managed agent (deep research)
    pub fn with_agent(agent: impl Into<String>, input: impl Into<String>) -> Self {
        let agent = agent.into();
        debug!(%agent, "InteractionRequest::with_agent: called");
        Self {
            model: None,
            agent: Some(agent),
            input: input.into(),
            tools: Vec::new(),
            previous_interaction_id: None,
            background: false,
            store: true,
        }
    }

    /// Chain onto a prior interaction so the service carries context forward
    pub fn chained_to(mut self, interaction_id: impl Into<String>) -> Self {
        self.previous_interaction_id = Some(interaction_id.into());
        self
    }

    /// Execute asynchronously on the service side; completion is observed
    /// by polling
    pub fn in_background(mut self) -> Self {
        self.background = true;
        self
    }

    /// Attach the web-search tool
    pub fn with_google_search(mut self) -> Self {
        self.tools.push(ToolSpec::google_search());
        self
    }
}

/// Content returned by the one-shot generation endpoint
#[derive(Debug, Clone, Default)]
pub struct GeneratedContent {
    pub parts: Vec<ContentPart>,
}

impl GeneratedContent {
    /// First part carrying inline binary data, if any
    pub fn first_inline(&self) -> Option<&InlineData> {
        self.parts.iter().find_map(|part| part.inline_data.as_ref())
    }
}

/// One part of generated content: text, inline binary data, or both absent
#[derive(Debug, Clone, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(rename = "inlineData", default)]
    pub inline_data: Option<InlineData>,
}

/// Base64-encoded binary payload with its mime type
#[derive(Debug, Clone, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,

    pub data: String,
}

impl InlineData {
    /// Decode the base64 payload
    pub fn bytes(&self) -> Result<Vec<u8>, ClientError> {
        BASE64
            .decode(self.data.as_bytes())
            .map_err(|e| ClientError::InvalidResponse(format!("invalid base64 inline data: {}", e)))
    }
}
