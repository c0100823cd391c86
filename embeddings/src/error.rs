//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur in the embeddings system.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Provider not configured.
    #[error("embedding provider not configured")]
    ProviderNotConfigured,

    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Nothing to embed.
    #[error("cannot embed empty text")]
    EmptyInput,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl EmbeddingError {
    /// A short description that is safe to show to end users.
    ///
    /// Unlike the `Display` output this never includes upstream response
    /// bodies or transport details.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::ProviderNotConfigured => "embedding provider not configured",
            Self::ApiRequest(_) | Self::Http(_) => "embedding request failed",
            Self::InvalidResponse(_) | Self::Serialization(_) => "invalid embedding response",
            Self::RateLimited { .. } => "embedding provider is rate limited",
            Self::DimensionMismatch { .. } => "embedding dimension mismatch",
            Self::EmptyInput => "nothing to embed",
        }
    }
}
