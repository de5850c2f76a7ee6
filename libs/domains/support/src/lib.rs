//! Support Domain Library
//!
//! Answers appliance troubleshooting questions by embedding the question and
//! returning the closest stored solution from a vector index partitioned into
//! one namespace per product category. The same crate loads the
//! issue/solution datasets into those namespaces.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐        ┌─────────────────┐
//! │ SupportService  │        │    Ingestor     │
//! └───┬─────────┬───┘        └────────┬────────┘
//!     │         │                     │
//! ┌───▼──────┐ ┌▼────────────┐        │
//! │Embedding │ │ VectorIndex ◄────────┘
//! │Provider  │ │  (trait)    │
//! └───┬──────┘ └┬───────────┬┘
//!     │         │           │
//! ┌───▼──────┐ ┌▼─────────┐ ┌▼────────────┐
//! │ Gemini   │ │ Pinecone │ │ InMemory    │
//! └──────────┘ └──────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_support::{
//!     GeminiProvider, PineconeConfig, PineconeIndex, SupportQuery, SupportService,
//! };
//! use core_config::FromEnv;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = GeminiProvider::from_env()?;
//! let index = PineconeIndex::connect(PineconeConfig::from_env()?).await?;
//!
//! let service = SupportService::new(Arc::new(embedder), Arc::new(index));
//!
//! let query = SupportQuery::new(
//!     Some("The drum won't spin".to_string()),
//!     Some("washingmachine".to_string()),
//! )?;
//! println!("{}", service.answer(&query).await?.response_text());
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod handlers;
pub mod index;
pub mod ingestion;
pub mod models;
pub mod pinecone;
pub mod service;

// Re-export commonly used types
pub use embedding::{EmbeddingProvider, GeminiConfig, GeminiProvider, normalize_text};
pub use error::{SupportError, SupportResult};
pub use handlers::SupportApiDoc;
pub use index::{InMemoryIndex, VectorIndex};
pub use ingestion::{CategoryOutcome, DatasetSource, IngestionReport, Ingestor};
pub use models::{
    Answer, ChatRequest, ChatResponse, EmbeddingModel, EmbeddingResult, IndexStats, IndexedEntry,
    IssueRecord, NamespaceStats, SearchMatch, SearchQuery, SupportQuery,
};
pub use pinecone::{PineconeConfig, PineconeIndex};
pub use service::SupportService;
