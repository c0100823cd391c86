//! Server configuration file.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:5000"
//!
//! [corpus]
//! path = "trained_data.json"
//!
//! [embedding]
//! provider = "openai"
//! model = "all-MiniLM-L6-v2"
//! base_url = "http://localhost:8080/v1"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use menuchat_retrieval::RetrievalConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the chat server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener settings.
    pub server: ListenConfig,

    /// Corpus and embedding settings.
    #[serde(flatten)]
    pub retrieval: RetrievalConfig,
}

impl ServerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid configuration")
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Address to bind the HTTP server to (host:port).
    pub bind: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}
