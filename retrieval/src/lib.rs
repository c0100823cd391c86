//! # Retrieval Engine
//!
//! Answers a free-text query with the single most similar text from a small,
//! fixed corpus (menu items, FAQ answers).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Retrieval Engine                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐        ┌──────────────┐                       │
//! │  │    Corpus    │───────►│    Corpus    │  built once, then     │
//! │  │    Loader    │        │    Index     │  read-only            │
//! │  └──────────────┘        └──────────────┘                       │
//! │                                  │                              │
//! │  ┌──────────────┐                ▼                              │
//! │  │  Embedding   │───────►┌──────────────┐                       │
//! │  │  Provider    │        │  retrieve()  │──► RetrievalResult    │
//! │  └──────────────┘        └──────────────┘                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use menuchat_retrieval::RetrievalEngine;
//!
//! let engine = RetrievalEngine::builder()
//!     .with_corpus(["espresso: a strong coffee", "latte: coffee with milk"])
//!     .with_provider(provider)
//!     .build()
//!     .await;
//!
//! let result = engine.retrieve("what is espresso").await;
//! println!("{}", result.reply());
//! ```

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod result;

#[cfg(test)]
mod test_support;

pub use config::{CorpusConfig, EmbeddingConfig, EmbeddingProviderType, RetrievalConfig};
pub use corpus::{CorpusRecord, load_corpus, parse_corpus};
pub use engine::{RetrievalEngine, RetrievalEngineBuilder};
pub use error::{Result, RetrievalError};
pub use index::{CorpusEntry, CorpusIndex, UnavailableReason};
pub use result::RetrievalResult;

// Re-export from dependencies for convenience
pub use menuchat_embeddings::EmbeddingProvider;
