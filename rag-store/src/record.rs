//! Core data models used by the library.

/// Query parameters for RAG retrieval.
#[derive(Clone, Copy, Debug)]
pub struct RagQuery<'a> {
    pub text: &'a str,
    pub top_k: usize,
}

/// A single retrieval hit: similarity score, chunk position and text.
#[derive(Clone, Debug, PartialEq)]
pub struct RagHit {
    pub score: f32,
    /// Position of the chunk in the corpus (0-based, insertion order).
    pub chunk_id: usize,
    pub text: String,
}
