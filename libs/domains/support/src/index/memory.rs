use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::VectorIndex;
use crate::embedding::EmbeddingProvider;
use crate::error::{SupportError, SupportResult};
use crate::models::{
    EmbeddingModel, ISSUE_FIELD, IndexStats, IndexedEntry, NamespaceStats, SOLUTION_FIELD,
    SearchMatch, SearchQuery,
};

#[derive(Debug, Clone)]
struct StoredEntry {
    entry: IndexedEntry,
    vector: Vec<f32>,
}

type Namespaces = HashMap<String, HashMap<String, StoredEntry>>;

/// In-memory implementation of VectorIndex (for development/testing).
///
/// Like an index with integrated embedding, it embeds `embedding_source`
/// itself on upsert and ranks by cosine similarity. Matches carry the same
/// metadata object shape the hosted index returns.
#[derive(Clone)]
pub struct InMemoryIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    model: EmbeddingModel,
    namespaces: Arc<RwLock<Namespaces>>,
}

impl InMemoryIndex {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            model: EmbeddingModel::default(),
            namespaces: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_model(mut self, model: EmbeddingModel) -> Self {
        self.model = model;
        self
    }

    /// Number of entries stored in `namespace`
    pub async fn len(&self, namespace: &str) -> usize {
        let namespaces = self.namespaces.read().await;
        namespaces.get(namespace).map(HashMap::len).unwrap_or(0)
    }

    pub async fn is_empty(&self) -> bool {
        let namespaces = self.namespaces.read().await;
        namespaces.values().all(HashMap::is_empty)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn query(&self, namespace: &str, query: SearchQuery) -> SupportResult<Vec<SearchMatch>> {
        if query.vector.is_empty() {
            return Err(SupportError::Index("Query vector is empty".to_string()));
        }

        let namespaces = self.namespaces.read().await;
        let Some(entries) = namespaces.get(namespace) else {
            return Ok(vec![]);
        };

        let mut scored = Vec::with_capacity(entries.len());
        for stored in entries.values() {
            if stored.vector.len() != query.vector.len() {
                return Err(SupportError::Index(format!(
                    "Vector dimension {} does not match index dimension {}",
                    query.vector.len(),
                    stored.vector.len()
                )));
            }
            scored.push((cosine_similarity(&query.vector, &stored.vector), stored));
        }

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(query.top_k as usize)
            .map(|(score, stored)| SearchMatch {
                id: stored.entry.id.clone(),
                score,
                metadata: query.include_metadata.then(|| {
                    json!({
                        ISSUE_FIELD: stored.entry.embedding_source,
                        SOLUTION_FIELD: stored.entry.metadata,
                    })
                }),
            })
            .collect())
    }

    async fn upsert(&self, namespace: &str, entries: Vec<IndexedEntry>) -> SupportResult<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let sources: Vec<String> = entries.iter().map(|e| e.embedding_source.clone()).collect();
        let embeddings = self.embedder.embed_batch(&self.model, &sources).await?;

        let count = entries.len();
        if embeddings.len() != count {
            return Err(SupportError::Index(format!(
                "Embedder returned {} vectors for {} entries",
                embeddings.len(),
                count
            )));
        }

        let mut namespaces = self.namespaces.write().await;
        let target = namespaces.entry(namespace.to_string()).or_default();
        for (entry, embedding) in entries.into_iter().zip(embeddings) {
            target.insert(
                entry.id.clone(),
                StoredEntry {
                    entry,
                    vector: embedding.values,
                },
            );
        }

        tracing::debug!(namespace, count, "Upserted entries into in-memory index");
        Ok(count)
    }

    async fn describe_stats(&self) -> SupportResult<IndexStats> {
        let namespaces = self.namespaces.read().await;

        let dimension = namespaces
            .values()
            .flat_map(HashMap::values)
            .next()
            .map(|stored| stored.vector.len() as u32);

        let per_namespace = namespaces
            .iter()
            .map(|(name, entries)| {
                (
                    name.clone(),
                    NamespaceStats {
                        vector_count: entries.len() as u64,
                    },
                )
            })
            .collect();

        Ok(IndexStats {
            namespaces: per_namespace,
            dimension,
            index_fullness: None,
            total_vector_count: namespaces.values().map(|e| e.len() as u64).sum(),
        })
    }
}
