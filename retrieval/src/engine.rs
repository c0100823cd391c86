//! Top-1 retrieval over the corpus index.

use std::sync::Arc;

use menuchat_embeddings::{EmbeddingProvider, EmbeddingRequest};
use tracing::{debug, error, info, warn};

use crate::config::RetrievalConfig;
use crate::corpus::{CorpusRecord, load_corpus};
use crate::index::{CorpusIndex, UnavailableReason};
use crate::result::RetrievalResult;

/// Answers queries with the most similar corpus text.
///
/// The engine owns the index for the life of the process. It holds no
/// mutable state, so one instance can be shared behind an `Arc` by any
/// number of concurrent request handlers.
pub struct RetrievalEngine {
    /// Corpus embeddings, read-only after construction.
    index: CorpusIndex,

    /// Provider used to embed queries.
    provider: Option<Arc<dyn EmbeddingProvider>>,
}

impl RetrievalEngine {
    /// Create a new engine builder.
    pub fn builder() -> RetrievalEngineBuilder {
        RetrievalEngineBuilder::new()
    }

    /// Wrap an already built index.
    ///
    /// `provider` should be the one the index was built with; query vectors
    /// from a different model would not be comparable.
    pub fn new(index: CorpusIndex, provider: Option<Arc<dyn EmbeddingProvider>>) -> Self {
        let provider = if index.is_available() {
            provider
        } else {
            None
        };
        Self { index, provider }
    }

    /// Load the corpus and provider described by `config` and build the
    /// index. Load failures leave the engine unavailable.
    pub async fn from_config(config: &RetrievalConfig) -> Self {
        let records = match load_corpus(&config.corpus.path).await {
            Ok(records) => records,
            Err(err) => {
                error!("Error loading corpus: {err}");
                Vec::new()
            }
        };

        Self::builder()
            .with_records(records)
            .with_provider_opt(config.embedding.build_provider())
            .build()
            .await
    }

    /// The corpus index.
    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    /// Whether queries can be answered.
    pub fn is_ready(&self) -> bool {
        self.provider.is_some()
    }

    /// Why queries cannot be answered, if they can't.
    pub fn unavailable_reason(&self) -> Option<&UnavailableReason> {
        self.index.unavailable_reason()
    }

    /// Find the corpus text most similar to `query_text`.
    ///
    /// An unavailable index answers every query, blank or not, with
    /// `ServiceUnavailable`. Blank queries against an available index are
    /// answered without calling the embedding provider. Otherwise the
    /// provider is called exactly once, and the full corpus is scanned.
    pub async fn retrieve(&self, query_text: &str) -> RetrievalResult {
        let Some(provider) = &self.provider else {
            return RetrievalResult::ServiceUnavailable;
        };

        let query = query_text.trim();
        if query.is_empty() {
            debug!("Empty query");
            return RetrievalResult::EmptyQuery;
        }

        debug!("Processing query: {query}");

        let response = match provider.embed(EmbeddingRequest::new(query)).await {
            Ok(response) => response,
            Err(err) => {
                warn!("Failed to embed query: {err}");
                return RetrievalResult::ProviderError {
                    detail: err.summary().to_string(),
                };
            }
        };

        match self.index.best_match(&response.embedding) {
            Ok(Some((entry, score))) => RetrievalResult::Match {
                text: entry.text().to_string(),
                score,
            },
            Ok(None) => RetrievalResult::ServiceUnavailable,
            Err(err) => {
                warn!("Query embedding not comparable with corpus: {err}");
                RetrievalResult::ProviderError {
                    detail: err.summary().to_string(),
                }
            }
        }
    }
}

/// Builder for [`RetrievalEngine`].
pub struct RetrievalEngineBuilder {
    texts: Vec<String>,
    provider: Option<Arc<dyn EmbeddingProvider>>,
}

impl RetrievalEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            texts: Vec::new(),
            provider: None,
        }
    }

    /// Set the corpus texts, in corpus order.
    pub fn with_corpus<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texts = texts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the corpus from loaded records.
    pub fn with_records(mut self, records: Vec<CorpusRecord>) -> Self {
        self.texts = records.into_iter().map(|r| r.text).collect();
        self
    }

    /// Set the embedding provider.
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set or clear the embedding provider.
    pub fn with_provider_opt(mut self, provider: Option<Arc<dyn EmbeddingProvider>>) -> Self {
        self.provider = provider;
        self
    }

    /// Embed the corpus and build the engine.
    pub async fn build(self) -> RetrievalEngine {
        let index = CorpusIndex::build(self.texts.as_slice(), self.provider.as_deref()).await;
        if index.is_available() {
            info!("Retrieval engine ready with {} entries", index.len());
        }
        RetrievalEngine::new(index, self.provider)
    }
}

impl Default for RetrievalEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
