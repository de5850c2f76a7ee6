use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::sync::Arc;

use super::dataset::{DatasetSource, parse_dataset};
use crate::error::{SupportError, SupportResult};
use crate::index::VectorIndex;
use crate::models::{IndexStats, IndexedEntry};

/// What happened to one configured category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CategoryOutcome {
    Upserted {
        category: String,
        upserted: usize,
        skipped_records: usize,
        /// Index statistics taken right after the upsert, if available
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stats: Option<IndexStats>,
    },
    MissingDataset {
        category: String,
        path: String,
    },
    UnreadableDataset {
        category: String,
        path: String,
        reason: String,
    },
}

impl CategoryOutcome {
    pub fn category(&self) -> &str {
        match self {
            CategoryOutcome::Upserted { category, .. }
            | CategoryOutcome::MissingDataset { category, .. }
            | CategoryOutcome::UnreadableDataset { category, .. } => category,
        }
    }

    pub fn is_skipped(&self) -> bool {
        !matches!(self, CategoryOutcome::Upserted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<CategoryOutcome>,
}

impl IngestionReport {
    pub fn total_upserted(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                CategoryOutcome::Upserted { upserted, .. } => *upserted,
                _ => 0,
            })
            .sum()
    }

    /// Categories whose dataset could not be loaded
    pub fn skipped_categories(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_skipped())
            .map(CategoryOutcome::category)
            .collect()
    }
}

type StatsCallback = Box<dyn Fn(&str, &IndexStats) + Send + Sync>;

/// Loads category datasets into their namespaces, one category at a time
pub struct Ingestor {
    index: Arc<dyn VectorIndex>,
    on_stats: Option<StatsCallback>,
}

impl Ingestor {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self {
            index,
            on_stats: None,
        }
    }

    /// Called with each category's stats snapshot as soon as it is taken,
    /// before the next category starts.
    pub fn on_stats<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &IndexStats) + Send + Sync + 'static,
    {
        self.on_stats = Some(Box::new(callback));
        self
    }

    /// Missing or unreadable datasets are recorded and skipped; a failed
    /// upsert aborts the run.
    pub async fn run(&self, sources: &[DatasetSource]) -> SupportResult<IngestionReport> {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(sources.len());

        for source in sources {
            outcomes.push(self.ingest(source).await?);
        }

        Ok(IngestionReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        })
    }

    #[tracing::instrument(skip(self, source), fields(category = %source.category))]
    async fn ingest(&self, source: &DatasetSource) -> SupportResult<CategoryOutcome> {
        let path = source.path.display().to_string();

        let contents = match tokio::fs::read_to_string(&source.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(%path, "Dataset not found, skipping category");
                return Ok(CategoryOutcome::MissingDataset {
                    category: source.category.clone(),
                    path,
                });
            }
            Err(e) => {
                tracing::warn!(%path, error = %e, "Dataset unreadable, skipping category");
                return Ok(CategoryOutcome::UnreadableDataset {
                    category: source.category.clone(),
                    path,
                    reason: e.to_string(),
                });
            }
        };

        let parsed = parse_dataset(&contents);
        let entries: Vec<IndexedEntry> = parsed.records.into_iter().map(Into::into).collect();

        let upserted = if entries.is_empty() {
            tracing::warn!(%path, "Dataset has no usable records");
            0
        } else {
            self.index
                .upsert(&source.category, entries)
                .await
                .map_err(|e| {
                    SupportError::Index(format!(
                        "upsert into namespace '{}' failed: {}",
                        source.category, e
                    ))
                })?
        };

        tracing::info!(upserted, skipped = parsed.skipped, "Category ingested");

        let stats = match self.index.describe_stats().await {
            Ok(stats) => {
                if let Some(callback) = &self.on_stats {
                    callback(&source.category, &stats);
                }
                Some(stats)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not fetch index stats");
                None
            }
        };

        Ok(CategoryOutcome::Upserted {
            category: source.category.clone(),
            upserted,
            skipped_records: parsed.skipped,
            stats,
        })
    }
}
