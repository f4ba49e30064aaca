//! The summary engine: history projection, model call, artifact persistence.

use std::path::PathBuf;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::analysis::{self, RecommendationSet};
use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::artifact;
use crate::config::SummaryConfig;
use crate::error::{Result, SummaryError};
use crate::prompt;

/// Aggregates a chat's link history, asks the language model for
/// recommendations, and persists the structured result.
pub struct SummaryEngine {
    client: Client,
    config: SummaryConfig,
    storage_dir: PathBuf,
}

impl SummaryEngine {
    /// Create a new engine writing artifacts into `storage_dir`.
    pub fn new(config: SummaryConfig, storage_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                SummaryError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config,
            storage_dir: storage_dir.into(),
        })
    }

    /// Create an engine from environment variables.
    ///
    /// See [`SummaryConfig::from_env`] for the variables involved.
    pub fn from_env(storage_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::new(SummaryConfig::from_env()?, storage_dir)
    }

    /// Get the configuration.
    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Summarize a chat's link history into a recommendation set.
    ///
    /// Fails with [`SummaryError::NoLinks`] when the chat has no history —
    /// nothing is written in that case. Model transport and parse failures
    /// are absorbed into a degraded set. The resulting set replaces any
    /// prior artifact for the chat.
    pub async fn summarize(&self, pool: &SqlitePool, chat_id: &str) -> Result<RecommendationSet> {
        let links = database::link::list_links_with_tags(pool, chat_id).await?;
        if links.is_empty() {
            return Err(SummaryError::NoLinks {
                chat_id: chat_id.to_string(),
            });
        }

        info!("Summarizing {} link(s) for chat {}", links.len(), chat_id);

        let messages = vec![
            ChatMessage::system(prompt::SYSTEM_PROMPT),
            ChatMessage::user(prompt::build_user_prompt(&links)),
        ];

        let set = match self.chat_completion(messages).await {
            Ok(content) => analysis::parse_analysis(&content),
            Err(e) => {
                warn!("Summary model call failed for chat {}: {}", chat_id, e);
                RecommendationSet::parse_error()
            }
        };

        artifact::store(&self.storage_dir, chat_id, &set)?;
        info!(
            "Stored {} recommendation(s) for chat {}",
            set.recommendations.len(),
            chat_id
        );

        Ok(set)
    }

    /// Make a chat completion request and return the response content.
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> std::result::Result<String, String> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                ));
            }

            return Err(format!("API error ({}): {}", status.as_u16(), error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| format!("failed to decode response: {}", e))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| "no content in response".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{link, Database, NewLink};
    use std::time::Duration;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn unreachable_engine(dir: &std::path::Path) -> SummaryEngine {
        let config = SummaryConfig::builder()
            .api_key("test-key")
            .api_url("http://127.0.0.1:9")
            .timeout(Duration::from_millis(250))
            .build();
        SummaryEngine::new(config, dir).unwrap()
    }

    #[tokio::test]
    async fn test_empty_history_is_rejected() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let engine = unreachable_engine(dir.path());

        let result = engine.summarize(db.pool(), "nobody").await;
        assert!(matches!(result, Err(SummaryError::NoLinks { .. })));

        // No artifact may be written for an empty history.
        assert!(artifact::load(dir.path(), "nobody").is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_and_persists() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let engine = unreachable_engine(dir.path());

        let new = NewLink {
            chat_id: "chat-1".to_string(),
            link: "https://example.com/a".to_string(),
            title: Some("An article".to_string()),
            ..Default::default()
        };
        link::save_link(db.pool(), &new, &["reading".to_string()])
            .await
            .unwrap();

        let set = engine.summarize(db.pool(), "chat-1").await.unwrap();
        assert_eq!(set, RecommendationSet::parse_error());

        let stored = artifact::load(dir.path(), "chat-1").unwrap();
        assert_eq!(stored, set);
    }
}
