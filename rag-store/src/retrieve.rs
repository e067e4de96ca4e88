//! Retrieval helpers: embed the query text, then search the flat index.

use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::index::FlatIndex;
use crate::record::{RagHit, RagQuery};

use tracing::trace;

/// Embeds the query text and returns the top-K hits, best first.
///
/// # Errors
/// Returns embedding/provider errors or a dimension mismatch.
pub async fn rag_context(
    index: &FlatIndex,
    query: RagQuery<'_>,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<RagHit>, RagError> {
    trace!(top_k = query.top_k, "retrieve::rag_context");

    let qv = provider.embed(query.text).await?;
    let hits = index.search(&qv, query.top_k)?;

    trace!(hits = hits.len(), "retrieve::rag_context done");
    Ok(hits)
}
