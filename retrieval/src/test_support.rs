//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use menuchat_embeddings::{
    Embedding, EmbeddingError, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
};

/// Provider returning fixed vectors for known texts.
pub(crate) struct StaticProvider {
    vectors: HashMap<String, Embedding>,
    available: bool,
    failing: AtomicBool,
    embed_calls: AtomicUsize,
    batch_calls: AtomicUsize,
}

impl StaticProvider {
    pub(crate) fn new<'a>(vectors: impl IntoIterator<Item = (&'a str, Vec<f32>)>) -> Self {
        Self {
            vectors: vectors
                .into_iter()
                .map(|(text, v)| (text.to_string(), v))
                .collect(),
            available: true,
            failing: AtomicBool::new(false),
            embed_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, text: &str) -> menuchat_embeddings::Result<EmbeddingResponse> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EmbeddingError::ApiRequest("connection refused".to_string()));
        }
        self.vectors
            .get(text)
            .cloned()
            .map(|v| EmbeddingResponse::new(v, "static"))
            .ok_or_else(|| EmbeddingError::InvalidResponse(format!("unknown text: {text}")))
    }
}

#[async_trait]
impl EmbeddingProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn default_model(&self) -> &str {
        "static"
    }

    fn default_dimension(&self) -> usize {
        self.vectors.values().next().map_or(0, Vec::len)
    }

    async fn embed(
        &self,
        request: EmbeddingRequest,
    ) -> menuchat_embeddings::Result<EmbeddingResponse> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(&request.text)
    }

    async fn embed_batch(
        &self,
        requests: Vec<EmbeddingRequest>,
    ) -> menuchat_embeddings::Result<Vec<EmbeddingResponse>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        requests.iter().map(|r| self.lookup(&r.text)).collect()
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
