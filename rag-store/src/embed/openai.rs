//! OpenAI embedding provider implementation.
//!
//! Delegates to the shared [`OpenAiService`], using its batched
//! `/v1/embeddings` call while indexing.

use std::sync::Arc;

use ai_llm_service::OpenAiService;
use futures::future::BoxFuture;

use crate::{EmbeddingsProvider, RagError};

/// OpenAI embedding provider (async).
#[derive(Clone, Debug)]
pub struct OpenAiEmbedder {
    svc: Arc<OpenAiService>,
}

impl OpenAiEmbedder {
    /// Wraps an embeddings-configured service.
    pub fn new(svc: Arc<OpenAiService>) -> Self {
        Self { svc }
    }
}

impl EmbeddingsProvider for OpenAiEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async move { Ok(self.svc.embeddings(text).await?) })
    }

    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, RagError>> {
        Box::pin(async move { Ok(self.svc.embeddings_batch(texts).await?) })
    }
}
