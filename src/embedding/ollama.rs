//! Ollama embedding provider (`POST /api/embeddings`).

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{check_status, EmbeddingError, EmbeddingProvider};

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

/// Embeds text through a local or remote Ollama server.
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaEmbeddingProvider {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/embeddings", base_url.trim_end_matches('/')),
            model: model.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingsRequest {
            model: &self.model,
            prompt: text,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(EmbeddingError::from)?;
        let response = check_status(response).await?;

        let body: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Decode(e.to_string()))?;

        if body.embedding.is_empty() {
            return Err(EmbeddingError::EmptyEmbedding.into());
        }

        tracing::debug!(
            model = %self.model,
            dimensions = body.embedding.len(),
            "ollama embedding generated"
        );
        Ok(body.embedding)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
