//! Command line flags.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use menuchat_retrieval::EmbeddingProviderType;

use crate::config::ServerConfig;

#[derive(Parser, Debug, Default)]
#[command(
    name = "menuchat-server",
    about = "Answers chat questions with the closest entry of a fixed menu corpus"
)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, short, env = "MENUCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "MENUCHAT_BIND")]
    pub bind: Option<String>,

    /// JSON corpus file (`[{"text": "..."}]`).
    #[arg(long, env = "MENUCHAT_CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Embedding model identifier.
    #[arg(long, env = "MENUCHAT_EMBEDDING_MODEL")]
    pub model: Option<String>,

    /// Base URL for OpenAI-compatible endpoints.
    #[arg(long, env = "MENUCHAT_EMBEDDING_BASE_URL")]
    pub base_url: Option<String>,

    /// Start without an embedding provider; every chat is answered as not ready.
    #[arg(long)]
    pub no_embeddings: bool,
}

impl Cli {
    /// Load the config file, if any, and apply flag overrides on top.
    pub fn load_config(&self) -> Result<ServerConfig> {
        let config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        Ok(self.apply(config))
    }

    fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(corpus) = &self.corpus {
            config.retrieval.corpus.path = corpus.clone();
        }
        let embedding = &mut config.retrieval.embedding;
        if let Some(model) = &self.model {
            embedding.model = Some(model.clone());
        }
        if let Some(base_url) = &self.base_url {
            embedding.base_url = Some(base_url.clone());
        }
        if self.no_embeddings {
            embedding.provider = EmbeddingProviderType::None;
        }
        config
    }
}
