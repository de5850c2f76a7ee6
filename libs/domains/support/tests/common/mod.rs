#![allow(dead_code)]

use async_trait::async_trait;
use domain_support::{
    EmbeddingModel, EmbeddingProvider, EmbeddingResult, InMemoryIndex, IndexStats, IndexedEntry,
    SearchMatch, SearchQuery, SupportError, SupportResult, SupportService, VectorIndex,
};
use std::sync::Arc;

const DIMENSION: usize = 64;

/// Bag-of-words embedder: each lowercase word bumps one hashed bucket
pub struct FakeEmbedder;

impl FakeEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let mut values = vec![0.0; DIMENSION];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let hash = word
                .to_lowercase()
                .bytes()
                .fold(0xcbf29ce484222325u64, |h, b| {
                    (h ^ b as u64).wrapping_mul(0x100000001b3)
                });
            values[(hash % DIMENSION as u64) as usize] += 1.0;
        }
        values
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed(&self, _model: &EmbeddingModel, text: &str) -> SupportResult<EmbeddingResult> {
        Ok(EmbeddingResult::new(Self::vector(text)))
    }

    async fn embed_batch(
        &self,
        _model: &EmbeddingModel,
        texts: &[String],
    ) -> SupportResult<Vec<EmbeddingResult>> {
        Ok(texts
            .iter()
            .map(|t| EmbeddingResult::new(Self::vector(t)))
            .collect())
    }
}

/// Embedder whose provider is always down
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _model: &EmbeddingModel, _text: &str) -> SupportResult<EmbeddingResult> {
        Err(SupportError::Embedding("401 API key not valid".to_string()))
    }

    async fn embed_batch(
        &self,
        _model: &EmbeddingModel,
        _texts: &[String],
    ) -> SupportResult<Vec<EmbeddingResult>> {
        Err(SupportError::Embedding("401 API key not valid".to_string()))
    }
}

/// Index whose data plane is always down
pub struct FailingIndex;

#[async_trait]
impl VectorIndex for FailingIndex {
    async fn query(&self, _namespace: &str, _query: SearchQuery) -> SupportResult<Vec<SearchMatch>> {
        Err(SupportError::Index("503 Service Unavailable".to_string()))
    }

    async fn upsert(&self, _namespace: &str, _entries: Vec<IndexedEntry>) -> SupportResult<usize> {
        Err(SupportError::Index("503 Service Unavailable".to_string()))
    }

    async fn describe_stats(&self) -> SupportResult<IndexStats> {
        Err(SupportError::Index("503 Service Unavailable".to_string()))
    }
}

pub fn entry(id: &str, issue: &str, solution: &str) -> IndexedEntry {
    IndexedEntry {
        id: id.to_string(),
        embedding_source: issue.to_string(),
        metadata: solution.to_string(),
    }
}

/// In-memory index seeded with a couple of entries per category
pub async fn seeded_index() -> InMemoryIndex {
    let index = InMemoryIndex::new(Arc::new(FakeEmbedder));

    index
        .upsert(
            "washingmachine",
            vec![
                entry("wm-1", "drum does not spin", "Replace the drain filter."),
                entry("wm-2", "door will not open after cycle", "Wait two minutes for the lock to release."),
            ],
        )
        .await
        .unwrap();

    index
        .upsert(
            "fridge",
            vec![entry("fr-1", "ice builds up in freezer", "Defrost and check the door seal.")],
        )
        .await
        .unwrap();

    index
}

pub async fn seeded_service() -> SupportService {
    SupportService::new(Arc::new(FakeEmbedder), Arc::new(seeded_index().await))
}
