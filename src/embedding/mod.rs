//! Text-to-vector embedding providers.
//!
//! Provides the [`EmbeddingProvider`] trait and HTTP implementations for an
//! Ollama server ([`ollama`]) and OpenAI-compatible endpoints ([`openai`]).
//! The provider is created via [`create_provider`] from configuration.
//!
//! Providers never retry. A failed call surfaces to the caller as an
//! [`EmbeddingError`] wrapped in `anyhow::Error`.

pub mod ollama;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

/// Failure talking to an embedding backend.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("embedding endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("embedding response could not be decoded: {0}")]
    Decode(String),

    #[error("embedding endpoint returned an empty vector")]
    EmptyEmbedding,
}

/// Trait for embedding text into vectors.
///
/// Vector length is whatever the backing model produces; the vector index
/// treats mismatched lengths as zero similarity rather than an error.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of text strings. Implementations may override for batched requests.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    /// Model identifier sent to the backend.
    fn model(&self) -> &str;
}

/// Create an embedding provider from config.
///
/// Supported providers: `"ollama"`, `"openai"`.
pub fn create_provider(
    config: &crate::config::EmbeddingConfig,
) -> Result<Arc<dyn EmbeddingProvider>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    match config.provider.as_str() {
        "ollama" => Ok(Arc::new(ollama::OllamaEmbeddingProvider::new(
            client,
            &config.base_url,
            &config.model,
        ))),
        "openai" => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                anyhow::anyhow!("OPENAI_API_KEY is required when embedding provider is openai")
            })?;
            Ok(Arc::new(openai::OpenAiEmbeddingProvider::new(
                client,
                &config.base_url,
                &config.model,
                api_key,
            )))
        }
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: ollama, openai"),
    }
}

/// Turn a non-2xx response into [`EmbeddingError::Status`].
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, EmbeddingError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(EmbeddingError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbeddingConfig;

    #[test]
    fn create_ollama_provider() {
        let config = EmbeddingConfig::default();
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model(), "ministral-3:8b");
    }

    #[test]
    fn create_openai_requires_key() {
        let config = EmbeddingConfig {
            provider: "openai".into(),
            api_key: None,
            ..EmbeddingConfig::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn create_unknown_provider_fails() {
        let config = EmbeddingConfig {
            provider: "onnx".into(),
            ..EmbeddingConfig::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(err.to_string().contains("unknown embedding provider"));
    }

    struct Echo;

    #[async_trait]
    impl EmbeddingProvider for Echo {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32])
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn default_embed_batch_preserves_order() {
        let vectors = Echo.embed_batch(&["a", "abc", "ab"]).await.unwrap();
        assert_eq!(vectors, vec![vec![1.0], vec![3.0], vec![2.0]]);
    }
}
