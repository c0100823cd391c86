//! Error types for the retrieval engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur while building or querying the corpus index.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Embedding error.
    #[error("embedding error: {0}")]
    Embedding(#[from] menuchat_embeddings::EmbeddingError),

    /// The provider returned vectors of different sizes for the corpus.
    #[error(
        "embedding dimension mismatch at corpus entry {position}: expected {expected}, got {actual}"
    )]
    EmbeddingDimensionMismatch {
        position: usize,
        expected: usize,
        actual: usize,
    },

    /// No usable corpus entries.
    #[error("corpus is empty")]
    EmptyCorpus,

    /// No embedding provider, or the provider reports itself unusable.
    #[error("embedding provider unavailable")]
    ProviderUnavailable,

    /// Corpus file could not be read.
    #[error("failed to read corpus {}: {source}", path.display())]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corpus file is not a JSON array of `{"text": ...}` records.
    #[error("invalid corpus format: {0}")]
    CorpusFormat(#[from] serde_json::Error),
}
