//! Gemini API client implementation
//!
//! Implements the InteractionClient trait over the Gemini interactions
//! endpoints plus the one-shot generateContent endpoint used for images.
//! Requests are single-shot; recovery from transient failures happens in
//! the polling layer, not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    ClientError, ContentPart, GeneratedContent, Interaction, InteractionClient, InteractionRequest,
};
use crate::config::ClientConfig;

/// Gemini API client
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        debug!(?config, "from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            http,
        })
    }

    // Gemini authenticates with a key query parameter rather than a header.
    fn interactions_url(&self) -> String {
        format!("{}/v1beta/interactions?key={}", self.base_url, self.api_key)
    }

    fn interaction_url(&self, interaction_id: &str) -> String {
        format!(
            "{}/v1beta/interactions/{}?key={}",
            self.base_url, interaction_id, self.api_key
        )
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        )
    }

    /// Check the HTTP status and decode the response body
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "read_json: API error");
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl InteractionClient for GeminiClient {
    async fn create(&self, request: InteractionRequest) -> Result<Interaction, ClientError> {
        debug!(
            model = ?request.model,
            agent = ?request.agent,
            background = request.background,
            "create: called"
        );
        let response = self
            .http
            .post(self.interactions_url())
            .json(&request)
            .send()
            .await?;

        let interaction: Interaction = Self::read_json(response).await?;
        debug!(id = %interaction.id, status = %interaction.status, "create: success");
        Ok(interaction)
    }

    async fn get(&self, interaction_id: &str) -> Result<Interaction, ClientError> {
        debug!(%interaction_id, "get: called");
        let response = self
            .http
            .get(self.interaction_url(interaction_id))
            .send()
            .await?;

        let interaction: Interaction = Self::read_json(response).await?;
        debug!(id = %interaction.id, status = %interaction.status, "get: success");
        Ok(interaction)
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GeneratedContent, ClientError> {
        debug!(%model, prompt_chars = prompt.len(), "generate_content: called");
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.generate_url(model))
            .json(&body)
            .send()
            .await?;

        let decoded: GenerateResponse = Self::read_json(response).await?;

        // Some failures come back 200 with an error envelope in the body.
        if let Some(error) = decoded.error {
            debug!(code = ?error.code, "generate_content: error envelope");
            return Err(ClientError::ApiError {
                status: error.code.unwrap_or(0),
                message: error.message,
            });
        }

        let mut candidates = decoded.candidates.unwrap_or_default();
        if candidates.is_empty() {
            return Err(ClientError::InvalidResponse(
                "generation response contained no candidates".to_string(),
            ));
        }

        let content = candidates.remove(0).content.ok_or_else(|| {
            ClientError::InvalidResponse("candidate missing content".to_string())
        })?;

        debug!(parts = content.parts.len(), "generate_content: success");
        Ok(GeneratedContent {
            parts: content.parts,
        })
    }
}

// Wire types for the generateContent endpoint

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,

    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<u16>,

    message: String,
}
