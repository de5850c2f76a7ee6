mod gemini;
mod provider;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use provider::{EmbeddingProvider, normalize_text};

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
