//! Async task management for non-blocking API operations.
//!
//! API calls run in background tokio tasks while the main loop keeps
//! rendering and handling input. Results come back to the main event loop
//! as `ApiMessage`s through an unbounded channel, polled with
//! `try_recv()`.
//!
//! Suggestion fetches carry the sequence number the ingredient editor
//! assigned when it issued the query; the editor uses it to discard
//! results that were superseded by a newer query before they arrived.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::types::{DietaryOptions, HealthStatus, RecommendRequest, RecommendResponse};
use crate::api::RecommenderClient;
use crate::error::AppError;

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Startup health probe result.
    HealthChecked(Result<HealthStatus, String>),

    /// Ingredient suggestions for an autocomplete query.
    SuggestionsFetched {
        /// Sequence number assigned by the editor when the fetch was issued.
        seq: u64,
        result: Result<Vec<String>, String>,
    },

    /// Dietary filter options for the form multi-selects.
    DietaryOptionsFetched(Result<DietaryOptions, String>),

    /// Product recommendations for a submitted recipe.
    RecommendationsFetched {
        result: Result<RecommendResponse, String>,
    },
}

/// Spawns background tasks for async operations.
///
/// Holds the channel sender; each spawn method clones the client and
/// sends its result through the channel when done.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task to probe the service health.
    pub fn spawn_health_check(&self, client: &RecommenderClient) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client
                .health()
                .await
                .map_err(|e| AppError::from(e).user_message());
            let _ = tx.send(ApiMessage::HealthChecked(result));
        });
    }

    /// Spawn a task to fetch ingredient suggestions.
    ///
    /// The `seq` travels with the result so the editor can apply its
    /// staleness guard.
    pub fn spawn_fetch_suggestions(
        &self,
        client: &RecommenderClient,
        seq: u64,
        query: String,
        limit: u32,
    ) {
        let tx = self.tx.clone();
        let client = client.clone();
        debug!(seq, query = %query, "Spawning suggestion fetch");
        tokio::spawn(async move {
            let result = client
                .ingredient_suggestions(&query, limit)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::SuggestionsFetched { seq, result });
        });
    }

    /// Spawn a task to fetch the dietary filter options.
    pub fn spawn_fetch_dietary_options(&self, client: &RecommenderClient) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client.dietary_options().await.map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::DietaryOptionsFetched(result));
        });
    }

    /// Spawn a task to request recommendations for a submitted recipe.
    pub fn spawn_recommend(&self, client: &RecommenderClient, request: RecommendRequest) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client
                .recommend(&request)
                .await
                .map_err(|e| AppError::from(e).user_message());
            let _ = tx.send(ApiMessage::RecommendationsFetched { result });
        });
    }
}

/// Create a new task channel and spawner.
///
/// The receiver is polled in the main event loop; the spawner is used to
/// launch background API calls.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawner_sends_results_through_channel() {
        // The client points at an unroutable address, so the fetch fails;
        // the error must still arrive as a message with the right seq.
        let (mut rx, spawner) = create_task_channel();
        let client = RecommenderClient::new("http://127.0.0.1:1").unwrap();

        spawner.spawn_fetch_suggestions(&client, 7, "egg".to_string(), 5);

        match rx.recv().await {
            Some(ApiMessage::SuggestionsFetched { seq, result }) => {
                assert_eq!(seq, 7);
                assert!(result.is_err());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
