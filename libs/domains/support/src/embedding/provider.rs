use async_trait::async_trait;

use crate::error::SupportResult;
use crate::models::{EmbeddingModel, EmbeddingResult};

/// Trait for embedding generation providers
///
/// Implementations call a remote embedding API; the vectors are opaque to
/// the rest of the crate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, model: &EmbeddingModel, text: &str) -> SupportResult<EmbeddingResult>;

    /// Generate embeddings for multiple texts, in input order
    async fn embed_batch(
        &self,
        model: &EmbeddingModel,
        texts: &[String],
    ) -> SupportResult<Vec<EmbeddingResult>>;
}

/// Prepare free text for an embedding request: newlines become spaces and
/// surrounding whitespace is dropped.
pub fn normalize_text(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  washer\nwon't spin \n"), "washer won't spin");
        assert_eq!(normalize_text("line1\nline2"), "line1 line2");
        assert_eq!(normalize_text("\n\n"), "");
    }
}
