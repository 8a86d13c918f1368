//! Client trait for the interaction service
//!
//! The session layer programs against [`InteractionClient`] so tests can
//! script responses without touching the network.

use async_trait::async_trait;

use super::{ClientError, GeneratedContent, Interaction, InteractionRequest};

/// Operations the research pipeline needs from the interaction service
#[async_trait]
pub trait InteractionClient: Send + Sync {
    /// Create a new interaction and return its initial server-side state
    async fn create(&self, request: InteractionRequest) -> Result<Interaction, ClientError>;

    /// Fetch the current state of an existing interaction
    async fn get(&self, interaction_id: &str) -> Result<Interaction, ClientError>;

    /// One-shot content generation outside the interaction lifecycle
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GeneratedContent, ClientError>;
}


#[cfg(test)]
mod tests {
    use super::mock::{MockInteractionClient, interaction};
    use super::*;
    use crate::interactions::InteractionStatus;

    #[tokio::test]
    async fn test_mock_replays_scripted_responses_in_order() {
        let mock = MockInteractionClient::new();
        mock.enqueue_get(Ok(interaction("i-1", InteractionStatus::InProgress, "")));
        mock.enqueue_get(Ok(interaction("i-1", InteractionStatus::Completed, "done")));

        let first = mock.get("i-1").await.unwrap();
        assert_eq!(first.status, InteractionStatus::InProgress);

        let second = mock.get("i-1").await.unwrap();
        assert_eq!(second.status, InteractionStatus::Completed);
        assert_eq!(second.text(), "done");
        assert_eq!(mock.get_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_errors_when_script_runs_dry() {
        let mock = MockInteractionClient::new();
        let result = mock
            .create(InteractionRequest::with_model("m", "input"))
            .await;
        assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
        assert_eq!(mock.create_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_records_created_requests() {
        let mock = MockInteractionClient::new();
        mock.enqueue_create(Ok(interaction("i-1", InteractionStatus::Completed, "ok")));

        mock.create(InteractionRequest::with_model("planner", "goal").with_google_search())
            .await
            .unwrap();

        let requests = mock.created_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model.as_deref(), Some("planner"));
        assert_eq!(requests[0].tools.len(), 1);
    }
}
