//! Configuration for the retrieval engine.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use menuchat_embeddings::{EmbeddingProvider, OpenAIProvider};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for the retrieval engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Where the corpus comes from.
    pub corpus: CorpusConfig,

    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,
}

impl RetrievalConfig {
    /// Create a configuration reading the corpus from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            corpus: CorpusConfig { path: path.into() },
            embedding: EmbeddingConfig::default(),
        }
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, config: EmbeddingConfig) -> Self {
        self.embedding = config;
        self
    }
}

/// Location of the corpus file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// JSON file holding `[{"text": "..."}]` records.
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("trained_data.json"),
        }
    }
}

/// Configuration for the embedding provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Which provider to use.
    pub provider: EmbeddingProviderType,

    /// Model to use for embeddings.
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    pub base_url: Option<String>,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Requested output dimensions, if the model supports shortening.
    pub dimensions: Option<usize>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderType::OpenAI,
            model: None,
            base_url: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            dimensions: None,
            timeout_secs: 30,
        }
    }
}

impl EmbeddingConfig {
    /// Construct the configured provider.
    ///
    /// Returns `None` when embeddings are disabled or the API key variable is
    /// unset; the index built without a provider is unavailable.
    pub fn build_provider(&self) -> Option<Arc<dyn EmbeddingProvider>> {
        match self.provider {
            EmbeddingProviderType::None => None,
            EmbeddingProviderType::OpenAI => {
                let Ok(api_key) = std::env::var(&self.api_key_env) else {
                    warn!(
                        "{} is not set, embedding provider unavailable",
                        self.api_key_env
                    );
                    return None;
                };

                let mut provider = OpenAIProvider::new()
                    .with_api_key(api_key)
                    .with_timeout(Duration::from_secs(self.timeout_secs));
                if let Some(url) = &self.base_url {
                    provider = provider.with_base_url(url);
                }
                if let Some(model) = &self.model {
                    provider = provider.with_model(model);
                }
                if let Some(dims) = self.dimensions {
                    provider = provider.with_dimensions(dims);
                }
                Some(Arc::new(provider))
            }
        }
    }
}

/// Type of embedding provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderType {
    /// OpenAI-compatible embeddings API.
    #[serde(rename = "openai")]
    OpenAI,
    /// No embeddings; every query is answered as unavailable.
    None,
}
