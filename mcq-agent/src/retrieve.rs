//! Context retrieval seam: the text block placed under `Background Context:`.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use rag_store::{EmbeddingsProvider, RagQuery, RagStore};
use tracing::debug;

use crate::error::AgentError;

/// Produces background context for a question and its choices.
pub trait ContextRetriever: Send + Sync {
    fn retrieve<'a>(
        &'a self,
        question: &'a str,
        answer_choices: &'a [String],
    ) -> BoxFuture<'a, Result<String, AgentError>>;
}

/// Retriever used when augmentation is off; always yields empty context.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRetriever;

impl ContextRetriever for NoopRetriever {
    fn retrieve<'a>(
        &'a self,
        _question: &'a str,
        _answer_choices: &'a [String],
    ) -> BoxFuture<'a, Result<String, AgentError>> {
        Box::pin(async { Ok(String::new()) })
    }
}

/// Retriever over a built [`RagStore`].
///
/// Passages are joined with `\n` in retrieval order, without deduplication:
/// first the hits for the question, then (when enabled) the hits for each
/// answer choice in choice order.
pub struct StoreRetriever {
    store: RagStore,
    embedder: Arc<dyn EmbeddingsProvider>,
    top_k: usize,
    include_answer_choices: bool,
}

impl StoreRetriever {
    /// `top_k` is taken from the store's config.
    pub fn new(
        store: RagStore,
        embedder: Arc<dyn EmbeddingsProvider>,
        include_answer_choices: bool,
    ) -> Self {
        let top_k = store.config().top_k;
        Self {
            store,
            embedder,
            top_k,
            include_answer_choices,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    async fn passages(&self, text: &str) -> Result<Vec<String>, AgentError> {
        let query = RagQuery {
            text,
            top_k: self.top_k,
        };
        let hits = self.store.rag_context(query, self.embedder.as_ref()).await?;
        Ok(hits.into_iter().map(|h| h.text).collect())
    }
}

impl fmt::Debug for StoreRetriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreRetriever")
            .field("chunks", &self.store.len())
            .field("top_k", &self.top_k)
            .field("include_answer_choices", &self.include_answer_choices)
            .finish()
    }
}

impl ContextRetriever for StoreRetriever {
    fn retrieve<'a>(
        &'a self,
        question: &'a str,
        answer_choices: &'a [String],
    ) -> BoxFuture<'a, Result<String, AgentError>> {
        Box::pin(async move {
            let mut passages = self.passages(question).await?;
            if self.include_answer_choices {
                for choice in answer_choices {
                    passages.extend(self.passages(choice).await?);
                }
            }
            debug!(
                passages = passages.len(),
                with_choices = self.include_answer_choices,
                "context retrieved"
            );
            Ok(passages.join("\n"))
        })
    }
}
