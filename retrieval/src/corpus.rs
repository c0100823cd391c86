//! Corpus source records.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, RetrievalError};

/// One record of the corpus source file.
///
/// Unknown fields are ignored so richer menu exports can be used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    /// The reply text for this record.
    pub text: String,
}

impl CorpusRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Parse a JSON array of records.
pub fn parse_corpus(json: &str) -> Result<Vec<CorpusRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Load corpus records from a JSON file.
pub async fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<CorpusRecord>> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RetrievalError::CorpusRead {
            path: path.to_path_buf(),
            source,
        })?;

    let records = parse_corpus(&json)?;
    info!("Loaded {} corpus records from {}", records.len(), path.display());
    Ok(records)
}
