//! High-level RAG facade: corpus indexing + retrieval, fully in memory.
//!
//! This crate provides a small API to:
//! - Split a plain-text corpus into overlapping chunks
//! - Embed the chunks in batches through an [`EmbeddingsProvider`]
//! - Retrieve the top-K chunks for a textual query
//!
//! The index is built once and is read-only afterwards.

mod chunking;
mod config;
mod errors;
mod index;
mod record;
mod retrieve;

pub mod embed;

pub use chunking::split_corpus;
pub use config::RagConfig;
pub use embed::EmbeddingsProvider;
pub use errors::RagError;
pub use index::{FlatIndex, cosine};
pub use record::{RagHit, RagQuery};

use tracing::{debug, info, warn};

/// Facade over a built index and the configuration it was built with.
///
/// This is the single entry point recommended for application code.
#[derive(Debug)]
pub struct RagStore {
    cfg: RagConfig,
    index: FlatIndex,
}

impl RagStore {
    /// Reads the corpus file named in `cfg`, chunks it and embeds every chunk.
    ///
    /// # Errors
    /// - [`RagError::Config`] for invalid knobs
    /// - [`RagError::Corpus`] if the file cannot be read
    /// - embedding errors from `provider`
    pub async fn build(cfg: RagConfig, provider: &dyn EmbeddingsProvider) -> Result<Self, RagError> {
        cfg.validate()?;
        debug!("RagStore::build corpus={:?}", cfg.corpus_path);

        let text = std::fs::read_to_string(&cfg.corpus_path).map_err(|source| RagError::Corpus {
            path: cfg.corpus_path.clone(),
            source,
        })?;

        Self::build_from_text(cfg, &text, provider).await
    }

    /// Same as [`RagStore::build`] over an in-memory corpus; `cfg.corpus_path`
    /// is only kept for reporting.
    ///
    /// # Errors
    /// Config, chunking, embedding or dimension errors.
    pub async fn build_from_text(
        cfg: RagConfig,
        text: &str,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Self, RagError> {
        cfg.validate()?;

        let chunks = split_corpus(text, cfg.chunk_size, cfg.chunk_overlap)?;
        if chunks.is_empty() {
            warn!("corpus {:?} produced no chunks; retrieval will return no context", cfg.corpus_path);
        }

        let mut index = FlatIndex::new();
        for batch in chunks.chunks(cfg.embed_batch) {
            let vectors = provider.embed_batch(batch).await?;
            if vectors.len() != batch.len() {
                return Err(RagError::EmbeddingCountMismatch {
                    got: vectors.len(),
                    want: batch.len(),
                });
            }
            for (text, vector) in batch.iter().zip(vectors) {
                index.insert(text.clone(), vector)?;
            }
            debug!(indexed = index.len(), total = chunks.len(), "embedded batch");
        }

        info!(
            corpus = ?cfg.corpus_path,
            chunks = index.len(),
            dim = ?index.dim(),
            "RAG index built"
        );

        Ok(Self { cfg, index })
    }

    /// Builds RAG context for a textual query using the provided embedding provider.
    ///
    /// # Errors
    /// Returns embedding errors or a dimension mismatch.
    pub async fn rag_context(
        &self,
        query: RagQuery<'_>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Vec<RagHit>, RagError> {
        retrieve::rag_context(&self.index, query, provider).await
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::hashing::HashEmbedder;
    use futures::future::BoxFuture;
    use std::io::Write;

    const CORPUS: &str = "Sanger sequencing uses labeled ddNTPs to terminate chains.\n\n\
        Photosynthesis converts light energy into chemical energy in chloroplasts.\n\n\
        Mitochondria produce ATP through cellular respiration.";

    fn small_cfg(path: &str) -> RagConfig {
        RagConfig {
            chunk_size: 80,
            chunk_overlap: 10,
            top_k: 1,
            embed_batch: 2,
            ..RagConfig::new_default(path)
        }
    }

    #[tokio::test]
    async fn builds_from_file_and_retrieves() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CORPUS.as_bytes()).unwrap();

        let embedder = HashEmbedder::new(256);
        let cfg = small_cfg(file.path().to_str().unwrap());
        let store = RagStore::build(cfg, &embedder).await.unwrap();
        assert!(store.len() >= 3);

        let hits = store
            .rag_context(
                RagQuery {
                    text: "which chains do labeled ddNTPs terminate",
                    top_k: 1,
                },
                &embedder,
            )
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.contains("Sanger"));
    }

    #[tokio::test]
    async fn missing_corpus_is_an_error() {
        let embedder = HashEmbedder::new(16);
        let err = RagStore::build(small_cfg("/nonexistent/textbook.txt"), &embedder)
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::Corpus { .. }));
    }

    struct ShortBatch;

    impl EmbeddingsProvider for ShortBatch {
        fn embed<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
            Box::pin(async { Ok(vec![1.0]) })
        }

        fn embed_batch<'a>(
            &'a self,
            _texts: &'a [String],
        ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, RagError>> {
            Box::pin(async { Ok(vec![vec![1.0]]) })
        }
    }

    #[tokio::test]
    async fn provider_count_mismatch_is_rejected() {
        let err = RagStore::build_from_text(small_cfg("mem"), CORPUS, &ShortBatch)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RagError::EmbeddingCountMismatch { got: 1, want: 2 }
        ));
    }

    #[tokio::test]
    async fn empty_corpus_builds_empty_store() {
        let store = RagStore::build_from_text(small_cfg("mem"), "", &HashEmbedder::new(8))
            .await
            .unwrap();
        assert!(store.is_empty());
    }
}
