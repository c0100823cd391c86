//! Immutable corpus index.
//!
//! The index is built once from the corpus texts and the embedding provider.
//! Construction never fails: every problem is absorbed into an explicit
//! [`UnavailableReason`] so the process can still start and answer "not
//! ready". After construction the index exposes no mutating API, which is
//! what lets request handlers share it without locks.

use std::fmt;

use menuchat_embeddings::{Embedding, EmbeddingError, EmbeddingProvider, EmbeddingRequest};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{Result, RetrievalError};

/// A corpus text and its precomputed embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusEntry {
    position: usize,
    text: String,
    #[serde(skip)]
    embedding: Embedding,
}

impl CorpusEntry {
    /// Position of the text in the corpus source.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }
}

/// Why an index could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The corpus had no non-blank entries.
    EmptyCorpus,
    /// No embedding provider was configured or it reported itself unusable.
    ProviderUnavailable,
    /// The provider failed while encoding the corpus.
    EmbeddingFailed { message: String },
    /// The provider returned vectors of different sizes.
    EmbeddingDimensionMismatch {
        position: usize,
        expected: usize,
        actual: usize,
    },
}

impl From<&RetrievalError> for UnavailableReason {
    fn from(err: &RetrievalError) -> Self {
        match err {
            RetrievalError::EmptyCorpus => Self::EmptyCorpus,
            RetrievalError::ProviderUnavailable => Self::ProviderUnavailable,
            RetrievalError::EmbeddingDimensionMismatch {
                position,
                expected,
                actual,
            } => Self::EmbeddingDimensionMismatch {
                position: *position,
                expected: *expected,
                actual: *actual,
            },
            RetrievalError::Embedding(e) => Self::EmbeddingFailed {
                message: e.summary().to_string(),
            },
            other => Self::EmbeddingFailed {
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCorpus => write!(f, "corpus is empty"),
            Self::ProviderUnavailable => write!(f, "embedding provider unavailable"),
            Self::EmbeddingFailed { message } => write!(f, "corpus embedding failed: {message}"),
            Self::EmbeddingDimensionMismatch {
                position,
                expected,
                actual,
            } => write!(
                f,
                "corpus entry {position} has embedding dimension {actual}, expected {expected}"
            ),
        }
    }
}

#[derive(Debug)]
enum IndexState {
    Available {
        entries: Vec<CorpusEntry>,
        dimension: usize,
    },
    Unavailable(UnavailableReason),
}

/// Write-once index over the corpus embeddings.
#[derive(Debug)]
pub struct CorpusIndex {
    state: IndexState,
}

impl CorpusIndex {
    /// An index that answers every query as unavailable.
    pub fn unavailable(reason: UnavailableReason) -> Self {
        Self {
            state: IndexState::Unavailable(reason),
        }
    }

    /// Build the index, falling back to [`CorpusIndex::unavailable`] on any
    /// failure. The reason is logged here, once.
    pub async fn build<S: AsRef<str>>(
        texts: &[S],
        provider: Option<&dyn EmbeddingProvider>,
    ) -> Self {
        match Self::try_build(texts, provider).await {
            Ok(index) => index,
            Err(err) => {
                let reason = UnavailableReason::from(&err);
                match &err {
                    RetrievalError::EmptyCorpus | RetrievalError::ProviderUnavailable => {
                        warn!("Corpus index unavailable: {err}");
                    }
                    _ => error!("Corpus index unavailable: {err}"),
                }
                Self::unavailable(reason)
            }
        }
    }

    /// Build the index, reporting why it could not be built.
    ///
    /// Blank texts are skipped. The remaining texts are encoded with one
    /// batched provider call and must all produce vectors of the same,
    /// non-zero dimension.
    pub async fn try_build<S: AsRef<str>>(
        texts: &[S],
        provider: Option<&dyn EmbeddingProvider>,
    ) -> Result<Self> {
        let mut pending: Vec<(usize, &str)> = Vec::with_capacity(texts.len());
        for (position, text) in texts.iter().enumerate() {
            let text = text.as_ref();
            if text.trim().is_empty() {
                warn!("Skipping blank corpus entry at position {position}");
                continue;
            }
            pending.push((position, text));
        }

        if pending.is_empty() {
            return Err(RetrievalError::EmptyCorpus);
        }

        let provider = provider
            .filter(|p| p.is_available())
            .ok_or(RetrievalError::ProviderUnavailable)?;

        info!(
            "Embedding {} corpus entries with {} ({})",
            pending.len(),
            provider.name(),
            provider.default_model()
        );

        let requests = pending
            .iter()
            .map(|(_, text)| EmbeddingRequest::new(*text))
            .collect();
        let responses = provider.embed_batch(requests).await?;

        if responses.len() != pending.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                pending.len(),
                responses.len()
            ))
            .into());
        }

        let dimension = responses.first().map_or(0, |r| r.embedding.len());
        if dimension == 0 {
            return Err(
                EmbeddingError::InvalidResponse("provider returned an empty embedding".to_string())
                    .into(),
            );
        }

        let mut entries = Vec::with_capacity(pending.len());
        for ((position, text), response) in pending.into_iter().zip(responses) {
            if response.embedding.len() != dimension {
                return Err(RetrievalError::EmbeddingDimensionMismatch {
                    position,
                    expected: dimension,
                    actual: response.embedding.len(),
                });
            }
            entries.push(CorpusEntry {
                position,
                text: text.to_string(),
                embedding: response.embedding,
            });
        }

        info!(
            "Corpus index ready: {} entries, dimension {dimension}",
            entries.len()
        );

        Ok(Self {
            state: IndexState::Available { entries, dimension },
        })
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, IndexState::Available { .. })
    }

    pub fn unavailable_reason(&self) -> Option<&UnavailableReason> {
        match &self.state {
            IndexState::Available { .. } => None,
            IndexState::Unavailable(reason) => Some(reason),
        }
    }

    /// Indexed entries in corpus order. Empty when unavailable.
    pub fn entries(&self) -> &[CorpusEntry] {
        match &self.state {
            IndexState::Available { entries, .. } => entries,
            IndexState::Unavailable(_) => &[],
        }
    }

    /// Embedding dimension shared by every entry.
    pub fn dimension(&self) -> Option<usize> {
        match &self.state {
            IndexState::Available { dimension, .. } => Some(*dimension),
            IndexState::Unavailable(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Score `query` against every entry and return the best one.
    ///
    /// Ties go to the entry that comes first in the corpus.
    pub fn best_match(
        &self,
        query: &[f32],
    ) -> menuchat_embeddings::Result<Option<(&CorpusEntry, f32)>> {
        let IndexState::Available { entries, dimension } = &self.state else {
            return Ok(None);
        };

        if query.len() != *dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: *dimension,
                actual: query.len(),
            });
        }

        let best =
            menuchat_embeddings::best_match(query, entries.iter().map(CorpusEntry::embedding))?;
        if let Some((i, score)) = best {
            debug!("Best corpus match: entry {} (score {score})", entries[i].position);
        }
        Ok(best.map(|(i, score)| (&entries[i], score)))
    }
}
