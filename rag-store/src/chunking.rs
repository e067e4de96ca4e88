//! Corpus chunking.
//!
//! Splits text into overlapping, character-sized chunks using
//! `text-splitter`, which prefers paragraph, sentence and word boundaries
//! before falling back to characters.

use text_splitter::{ChunkConfig, TextSplitter};
use tracing::debug;

use crate::errors::RagError;

/// Splits `text` into chunks of at most `chunk_size` characters, with up to
/// `chunk_overlap` characters shared between neighbours.
///
/// # Errors
/// Returns [`RagError::Chunking`] if `chunk_overlap >= chunk_size`.
pub fn split_corpus(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Result<Vec<String>, RagError> {
    let config = ChunkConfig::new(chunk_size).with_overlap(chunk_overlap)?;
    let splitter = TextSplitter::new(config);

    let chunks: Vec<String> = splitter.chunks(text).map(str::to_owned).collect();

    debug!(
        input_len = text.len(),
        chunk_count = chunks.len(),
        chunk_size,
        chunk_overlap,
        "corpus chunked"
    );

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_respect_size() {
        let text = "Cells are the basic unit of life. ".repeat(200);
        let chunks = split_corpus(&text, 200, 50).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.chars().count() <= 200);
        }
    }

    fn numbered_words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    fn first_word(chunk: &str) -> &str {
        chunk.split_whitespace().next().unwrap()
    }

    #[test]
    fn consecutive_chunks_share_text() {
        let chunks = split_corpus(&numbered_words(300), 200, 50).unwrap();

        assert!(chunks.len() > 2);
        for pair in chunks.windows(2) {
            let head = first_word(&pair[1]);
            assert!(
                pair[0].split_whitespace().any(|w| w == head),
                "{head:?} not carried over from {:?}",
                pair[0]
            );
        }
    }

    #[test]
    fn zero_overlap_chunks_are_disjoint() {
        let chunks = split_corpus(&numbered_words(300), 200, 0).unwrap();

        for pair in chunks.windows(2) {
            let head = first_word(&pair[1]);
            assert!(!pair[0].split_whitespace().any(|w| w == head));
        }
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_corpus("Ribosomes build proteins.", 1000, 150).unwrap();
        assert_eq!(chunks, vec!["Ribosomes build proteins.".to_string()]);
    }

    #[test]
    fn empty_text() {
        assert!(split_corpus("", 1000, 150).unwrap().is_empty());
    }

    #[test]
    fn overlap_not_smaller_than_size_is_rejected() {
        assert!(matches!(
            split_corpus("abc", 100, 100),
            Err(RagError::Chunking(_))
        ));
    }
}
