use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RecallConfig {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// `"ollama"` or `"openai"`.
    pub provider: String,
    pub base_url: String,
    pub model: String,
    /// Bearer token for OpenAI-compatible endpoints.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Lexical ranking limit when the caller does not pass one.
    pub default_limit: usize,
    /// Memories injected into a character's response prompt.
    pub response_limit: usize,
    /// Memories considered when evolving a universe.
    pub evolution_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".into(),
            base_url: "http://localhost:11434".into(),
            model: "ministral-3:8b".into(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: crate::memory::ranking::DEFAULT_LIMIT,
            response_limit: crate::memory::context::RESPONSE_MEMORY_LIMIT,
            evolution_limit: crate::memory::context::EVOLUTION_MEMORY_LIMIT,
        }
    }
}

/// Returns `~/.talae/`
pub fn default_talae_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".talae")
}

/// Returns the default config file path: `~/.talae/config.toml`
pub fn default_config_path() -> PathBuf {
    default_talae_dir().join("config.toml")
}

impl RecallConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            RecallConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// `TALAE_LOG_LEVEL`, `TALAE_EMBEDDING_PROVIDER`, `TALAE_EMBEDDING_URL`,
    /// `TALAE_EMBEDDING_MODEL`, `OPENAI_API_KEY`.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TALAE_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("TALAE_EMBEDDING_PROVIDER") {
            self.embedding.provider = val;
        }
        if let Ok(val) = std::env::var("TALAE_EMBEDDING_URL") {
            self.embedding.base_url = val;
        }
        if let Ok(val) = std::env::var("TALAE_EMBEDDING_MODEL") {
            self.embedding.model = val;
        }
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            self.embedding.api_key = Some(val);
        }
    }

    /// Reject provider settings that cannot produce a working client.
    pub fn validate(&self) -> Result<()> {
        match self.embedding.provider.as_str() {
            "ollama" => {}
            "openai" => {
                let has_key = self
                    .embedding
                    .api_key
                    .as_deref()
                    .is_some_and(|k| !k.trim().is_empty());
                if !has_key {
                    bail!("OPENAI_API_KEY is required when embedding provider is openai");
                }
            }
            other => bail!("unknown embedding provider: {other}. Supported: ollama, openai"),
        }
        if self.embedding.base_url.trim().is_empty() {
            bail!("embedding base_url must not be empty");
        }
        Ok(())
    }
}
