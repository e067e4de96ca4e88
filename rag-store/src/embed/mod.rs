use crate::errors::RagError;
use futures::future::BoxFuture;

/// Asynchronous embedding provider.
///
/// Async is required because real providers (OpenAI, etc.) perform HTTP
/// requests. Implement this trait to plug in another backend.
pub trait EmbeddingsProvider: Send + Sync {
    /// Produces an embedding vector for the given text.
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>>;

    /// Produces one vector per text, in input order.
    ///
    /// The default implementation embeds sequentially; providers with a
    /// batch endpoint should override it.
    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, RagError>> {
        Box::pin(async move {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        })
    }
}

pub mod hashing;
pub mod openai;
