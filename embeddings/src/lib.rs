//! # Embeddings
//!
//! Embedding generation and vector similarity for the menuchat retrieval
//! engine.
//!
//! ## Features
//!
//! - **Embedding Providers**: a provider trait plus an OpenAI-compatible HTTP client
//! - **Similarity**: cosine similarity and deterministic best-match selection
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings                                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► cosine_similarity          │
//! │       │                                   │                     │
//! │       ▼                                   ▼                     │
//! │  OpenAI-compatible API                best_match                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, OpenAIProvider};
pub use similarity::{best_match, cosine_similarity};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings (varies by model).
pub const DEFAULT_DIMENSION: usize = 1536; // OpenAI text-embedding-3-small
