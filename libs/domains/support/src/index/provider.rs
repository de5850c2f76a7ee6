use async_trait::async_trait;

use crate::error::SupportResult;
use crate::models::{IndexStats, IndexedEntry, SearchMatch, SearchQuery};

/// Vector index partitioned into namespaces, one per product category.
///
/// Namespaces are fully independent: a query only ever sees entries that
/// were upserted into the same namespace.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Nearest-neighbour search in `namespace`, best match first
    async fn query(&self, namespace: &str, query: SearchQuery) -> SupportResult<Vec<SearchMatch>>;

    /// Insert or overwrite entries by id; returns how many were submitted
    async fn upsert(&self, namespace: &str, entries: Vec<IndexedEntry>) -> SupportResult<usize>;

    /// Index-wide statistics
    async fn describe_stats(&self) -> SupportResult<IndexStats>;
}
