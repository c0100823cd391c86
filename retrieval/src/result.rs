//! Outcome of a single query.

use serde::Serialize;

/// Reply shown when the query is blank.
pub const EMPTY_QUERY_REPLY: &str = "Please type something before asking.";

/// Reply shown when the embedding provider fails for a query.
pub const PROVIDER_ERROR_REPLY: &str = "Something went wrong while answering. Please try again.";

/// Reply shown while the index is unavailable.
pub const SERVICE_UNAVAILABLE_REPLY: &str = "Backend not ready. Check server logs.";

/// Result of [`RetrievalEngine::retrieve`](crate::RetrievalEngine::retrieve).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RetrievalResult {
    /// The most similar corpus text and its cosine similarity.
    Match { text: String, score: f32 },

    /// The query was empty after trimming.
    EmptyQuery,

    /// Embedding the query failed. `detail` is a short, user-safe description.
    ProviderError { detail: String },

    /// The corpus index could not be built at startup.
    ServiceUnavailable,
}

impl RetrievalResult {
    /// Text to send back to the user.
    pub fn reply(&self) -> &str {
        match self {
            Self::Match { text, .. } => text,
            Self::EmptyQuery => EMPTY_QUERY_REPLY,
            Self::ProviderError { .. } => PROVIDER_ERROR_REPLY,
            Self::ServiceUnavailable => SERVICE_UNAVAILABLE_REPLY,
        }
    }

    /// Snake-case name of the outcome, identical to the serialized `status` tag.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Match { .. } => "match",
            Self::EmptyQuery => "empty_query",
            Self::ProviderError { .. } => "provider_error",
            Self::ServiceUnavailable => "service_unavailable",
        }
    }

    /// Similarity score, for matches.
    pub fn score(&self) -> Option<f32> {
        match self {
            Self::Match { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}
