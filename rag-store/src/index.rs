//! Flat in-memory vector index with exact cosine search.

use tracing::trace;

use crate::errors::RagError;
use crate::record::RagHit;

/// Append-only list of `(text, vector)` pairs searched exhaustively.
///
/// All vectors share the dimension of the first inserted one.
#[derive(Debug, Default)]
pub struct FlatIndex {
    dim: Option<usize>,
    texts: Vec<String>,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chunk and returns its id.
    ///
    /// # Errors
    /// [`RagError::VectorSizeMismatch`] if `vector` differs in length from
    /// the vectors already stored.
    pub fn insert(&mut self, text: String, vector: Vec<f32>) -> Result<usize, RagError> {
        let want = *self.dim.get_or_insert(vector.len());
        if vector.len() != want {
            return Err(RagError::VectorSizeMismatch {
                got: vector.len(),
                want,
            });
        }
        self.texts.push(text);
        self.vectors.push(vector);
        Ok(self.texts.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Vector dimension, once the first chunk has been inserted.
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    /// Returns the `k` most similar chunks, best first. Equal scores keep
    /// corpus order.
    ///
    /// # Errors
    /// [`RagError::VectorSizeMismatch`] if `query` has the wrong dimension.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<RagHit>, RagError> {
        if let Some(want) = self.dim {
            if query.len() != want {
                return Err(RagError::VectorSizeMismatch {
                    got: query.len(),
                    want,
                });
            }
        }

        let mut scored: Vec<(f32, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(id, v)| (cosine(query, v), id))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.truncate(k);

        trace!(k, candidates = self.len(), hits = scored.len(), "flat index search");

        Ok(scored
            .into_iter()
            .map(|(score, chunk_id)| RagHit {
                score,
                chunk_id,
                text: self.texts[chunk_id].clone(),
            })
            .collect())
    }
}

/// Cosine similarity; `0.0` when either vector has zero norm.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut na, mut nb) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na.sqrt() * nb.sqrt())
    }
}
