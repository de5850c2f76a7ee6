use std::sync::Arc;

use tracing::instrument;

use crate::embedding::{EmbeddingProvider, normalize_text};
use crate::error::{SupportError, SupportResult};
use crate::index::VectorIndex;
use crate::models::{Answer, DEFAULT_TOP_K, EmbeddingModel, SearchQuery, SupportQuery};

/// Answers support questions against the category namespaces of the index.
///
/// Every question runs the same linear flow: normalise and embed the query
/// text, search the category namespace, then format the best match.
#[derive(Clone)]
pub struct SupportService {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    model: EmbeddingModel,
    top_k: u32,
}

impl SupportService {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            embedder,
            index,
            model: EmbeddingModel::default(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_model(mut self, model: EmbeddingModel) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &EmbeddingModel {
        &self.model
    }

    #[instrument(skip(self, query), fields(category = %query.category))]
    pub async fn answer(&self, query: &SupportQuery) -> SupportResult<Answer> {
        let vector = self.embed_query(&query.query).await?;

        let search = SearchQuery::new(vector).with_top_k(self.top_k);
        let matches = self
            .index
            .query(&query.category, search)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Vector search failed");
                match e {
                    SupportError::Index(_) | SupportError::IndexNotFound(_) => e,
                    other => SupportError::Index(other.to_string()),
                }
            })?;

        let answer = match matches.into_iter().next() {
            Some(best) => {
                tracing::debug!(match_id = %best.id, score = best.score, "Found matching solution");
                Answer::from_match(best)
            }
            None => {
                tracing::debug!("No match in namespace");
                Answer::NoMatch
            }
        };

        Ok(answer)
    }

    async fn embed_query(&self, text: &str) -> SupportResult<Vec<f32>> {
        let text = normalize_text(text);
        if text.is_empty() {
            tracing::error!("Query text is empty after normalization");
            return Err(SupportError::Embedding("empty query text".to_string()));
        }

        let embedding = self
            .embedder
            .embed(&self.model, &text)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %self.model, "Query embedding failed");
                match e {
                    SupportError::Embedding(_) => e,
                    other => SupportError::Embedding(other.to_string()),
                }
            })?;

        if embedding.values.is_empty() {
            tracing::error!(model = %self.model, "Embedding provider returned an empty vector");
            return Err(SupportError::Embedding("empty embedding".to_string()));
        }

        Ok(embedding.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingProvider;
    use crate::index::MockVectorIndex;
    use crate::models::{EmbeddingResult, NO_MATCH_MESSAGE, SearchMatch};
    use serde_json::json;

    fn query(text: &str, category: &str) -> SupportQuery {
        SupportQuery::new(Some(text.to_string()), Some(category.to_string())).unwrap()
    }

    fn embedder_returning(values: Vec<f32>) -> MockEmbeddingProvider {
        let mut mock = MockEmbeddingProvider::new();
        mock.expect_embed()
            .returning(move |_, _| Ok(EmbeddingResult::new(values.clone())));
        mock
    }

    #[tokio::test]
    async fn test_answer_with_string_metadata() {
        let embedder = embedder_returning(vec![0.1, 0.2]);

        let mut index = MockVectorIndex::new();
        index
            .expect_query()
            .withf(|namespace, q| namespace == "washingmachine" && q.top_k == 1 && q.include_metadata)
            .times(1)
            .returning(|_, _| {
                Ok(vec![SearchMatch {
                    id: "wm-1".to_string(),
                    score: 0.82,
                    metadata: Some(json!("Clean the drain pump filter.")),
                }])
            });

        let service = SupportService::new(Arc::new(embedder), Arc::new(index));
        let answer = service
            .answer(&query("drum won't spin", "washingmachine"))
            .await
            .unwrap();

        assert_eq!(
            answer.response_text(),
            "Based on your issue, I found this potential solution:\n\nClean the drain pump filter."
        );
    }

    #[tokio::test]
    async fn test_answer_without_match() {
        let embedder = embedder_returning(vec![0.1, 0.2]);
        let mut index = MockVectorIndex::new();
        index.expect_query().returning(|_, _| Ok(vec![]));

        let service = SupportService::new(Arc::new(embedder), Arc::new(index));
        let answer = service.answer(&query("sparks", "microwave")).await.unwrap();

        assert_eq!(answer, Answer::NoMatch);
        assert_eq!(answer.response_text(), NO_MATCH_MESSAGE);
    }

    #[tokio::test]
    async fn test_query_text_is_normalized() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .withf(|model, text| *model == EmbeddingModel::default() && text == "water on the floor")
            .times(1)
            .returning(|_, _| Ok(EmbeddingResult::new(vec![1.0])));

        let mut index = MockVectorIndex::new();
        index.expect_query().returning(|_, _| Ok(vec![]));

        let service = SupportService::new(Arc::new(embedder), Arc::new(index));
        service
            .answer(&query("  water\non the floor\n", "fridge"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_embedding_failure_skips_search() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .returning(|_, _| Err(SupportError::Embedding("quota exceeded".to_string())));

        let mut index = MockVectorIndex::new();
        index.expect_query().never();

        let service = SupportService::new(Arc::new(embedder), Arc::new(index));
        let err = service.answer(&query("noise", "fridge")).await.unwrap_err();

        assert!(matches!(err, SupportError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_empty_embedding_is_a_failure() {
        let embedder = embedder_returning(vec![]);
        let mut index = MockVectorIndex::new();
        index.expect_query().never();

        let service = SupportService::new(Arc::new(embedder), Arc::new(index));
        let err = service.answer(&query("noise", "fridge")).await.unwrap_err();

        assert!(matches!(err, SupportError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_blank_query_text_is_an_embedding_failure() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder.expect_embed().never();
        let mut index = MockVectorIndex::new();
        index.expect_query().never();

        let service = SupportService::new(Arc::new(embedder), Arc::new(index));
        let err = service.answer(&query(" \n  ", "fridge")).await.unwrap_err();

        assert!(matches!(err, SupportError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_search_failure() {
        let embedder = embedder_returning(vec![0.3]);
        let mut index = MockVectorIndex::new();
        index
            .expect_query()
            .returning(|_, _| Err(SupportError::Index("503 Service Unavailable".to_string())));

        let service = SupportService::new(Arc::new(embedder), Arc::new(index));
        let err = service.answer(&query("noise", "fridge")).await.unwrap_err();

        assert!(matches!(err, SupportError::Index(_)));
    }
}
