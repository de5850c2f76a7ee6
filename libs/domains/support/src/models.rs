use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{SupportError, SupportResult};

/// Number of matches requested from the index for every query
pub const DEFAULT_TOP_K: u32 = 1;

/// Record field holding the text the index embeds
pub const ISSUE_FIELD: &str = "issue";

/// Record field holding the stored solution text
pub const SOLUTION_FIELD: &str = "metadata";

/// Sentence placed in front of a found solution
pub const SOLUTION_PREFIX: &str = "Based on your issue, I found this potential solution:";

/// Reply when the namespace has nothing to offer
pub const NO_MATCH_MESSAGE: &str = "I'm sorry, I couldn't find a matching solution in our database. Could you please try rephrasing the problem?";

/// One issue/solution pair read from a category dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub id: String,
    pub issue: String,
    pub solution: String,
}

/// An entry as stored in a category namespace of the vector index.
///
/// `embedding_source` is embedded by the index; `metadata` is always the
/// plain solution text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedEntry {
    pub id: String,
    pub embedding_source: String,
    pub metadata: String,
}

impl From<IssueRecord> for IndexedEntry {
    fn from(record: IssueRecord) -> Self {
        Self {
            id: record.id,
            embedding_source: record.issue,
            metadata: record.solution,
        }
    }
}

/// Name of the embedding model passed to the provider, e.g. `models/embedding-001`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingModel(String);

impl EmbeddingModel {
    /// Accepts both `embedding-001` and `models/embedding-001`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.trim();
        if name.starts_with("models/") {
            Self(name.to_string())
        } else {
            Self(format!("models/{}", name))
        }
    }

    /// Fully qualified resource name (`models/...`)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EmbeddingModel {
    fn default() -> Self {
        Self("models/embedding-001".to_string())
    }
}

impl std::fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of embedding a single text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResult {
    pub values: Vec<f32>,
    pub dimension: u32,
}

impl EmbeddingResult {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            dimension: values.len() as u32,
            values,
        }
    }
}

/// Nearest-neighbour query against one namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub vector: Vec<f32>,
    pub top_k: u32,
    pub include_metadata: bool,
}

impl SearchQuery {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            top_k: DEFAULT_TOP_K,
            include_metadata: true,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }
}

/// A single hit returned by the index, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub id: String,
    pub score: f32,
    pub metadata: Option<Value>,
}

impl SearchMatch {
    /// Solution text carried by this match.
    ///
    /// Plain string metadata is returned verbatim. An object carrying the
    /// solution field written at ingestion yields that field. Any other
    /// structure is rendered as compact JSON; missing metadata yields an
    /// empty solution.
    pub fn solution_text(&self) -> String {
        match &self.metadata {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Object(fields)) => match fields.get(SOLUTION_FIELD) {
                Some(Value::String(text)) => text.clone(),
                _ => Value::Object(fields.clone()).to_string(),
            },
            Some(other) => other.to_string(),
        }
    }
}

/// A validated support question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportQuery {
    pub query: String,
    pub category: String,
}

impl SupportQuery {
    /// Both fields must be present and non-empty. Content is not inspected:
    /// a whitespace category is just a namespace with no entries.
    pub fn new(query: Option<String>, category: Option<String>) -> SupportResult<Self> {
        match (query, category) {
            (Some(query), Some(category)) if !query.is_empty() && !category.is_empty() => {
                Ok(Self { query, category })
            }
            _ => Err(SupportError::MissingFields),
        }
    }
}

/// Outcome of answering a support question
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Found {
        match_id: String,
        score: f32,
        solution: String,
    },
    NoMatch,
}

impl Answer {
    pub fn from_match(best: SearchMatch) -> Self {
        Answer::Found {
            solution: best.solution_text(),
            match_id: best.id,
            score: best.score,
        }
    }

    /// Text returned to the client
    pub fn response_text(&self) -> String {
        match self {
            Answer::Found { solution, .. } => format!("{}\n\n{}", SOLUTION_PREFIX, solution),
            Answer::NoMatch => NO_MATCH_MESSAGE.to_string(),
        }
    }
}

/// Per-namespace statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceStats {
    #[serde(default)]
    pub vector_count: u64,
}

/// Index-wide statistics, reported after ingestion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_fullness: Option<f64>,
    #[serde(default)]
    pub total_vector_count: u64,
}

/// Body of `POST /chat`.
///
/// Both fields are optional at the wire level so that a missing field is
/// answered with the 400 message rather than a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ChatRequest {
    pub fn into_query(self) -> SupportResult<SupportQuery> {
        SupportQuery::new(self.query, self.category)
    }
}

/// Successful reply of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(metadata: Option<Value>) -> SearchMatch {
        SearchMatch {
            id: "wm-1".to_string(),
            score: 0.82,
            metadata,
        }
    }

    #[test]
    fn test_string_metadata_is_verbatim() {
        let m = hit(Some(json!("Replace the drain filter.")));
        assert_eq!(m.solution_text(), "Replace the drain filter.");
    }

    #[test]
    fn test_object_metadata_uses_solution_field() {
        let m = hit(Some(json!({ "issue": "won't drain", "metadata": "Clean the pump." })));
        assert_eq!(m.solution_text(), "Clean the pump.");
    }

    #[test]
    fn test_other_structured_metadata_is_serialized() {
        let m = hit(Some(json!({ "text": "Reset the unit." })));
        assert_eq!(m.solution_text(), r#"{"text":"Reset the unit."}"#);
    }

    #[test]
    fn test_missing_metadata_is_empty() {
        assert_eq!(hit(None).solution_text(), "");
    }

    #[test]
    fn test_found_answer_text() {
        let answer = Answer::from_match(hit(Some(json!("Replace the drain filter."))));
        assert_eq!(
            answer.response_text(),
            "Based on your issue, I found this potential solution:\n\nReplace the drain filter."
        );
    }

    #[test]
    fn test_no_match_answer_text() {
        assert_eq!(Answer::NoMatch.response_text(), NO_MATCH_MESSAGE);
    }

    #[test]
    fn test_support_query_requires_both_fields() {
        assert!(SupportQuery::new(Some("noise".into()), Some("fridge".into())).is_ok());
        assert!(matches!(
            SupportQuery::new(None, Some("fridge".into())),
            Err(SupportError::MissingFields)
        ));
        assert!(matches!(
            SupportQuery::new(Some("noise".into()), None),
            Err(SupportError::MissingFields)
        ));
        assert!(matches!(
            SupportQuery::new(Some("".into()), Some("fridge".into())),
            Err(SupportError::MissingFields)
        ));
        assert!(matches!(
            SupportQuery::new(Some("noise".into()), Some("".into())),
            Err(SupportError::MissingFields)
        ));
    }

    #[test]
    fn test_support_query_keeps_whitespace_values() {
        let query = SupportQuery::new(Some("  ".into()), Some(" fridge ".into())).unwrap();
        assert_eq!(query.query, "  ");
        assert_eq!(query.category, " fridge ");
    }

    #[test]
    fn test_embedding_model_normalizes_prefix() {
        assert_eq!(EmbeddingModel::new("embedding-001").as_str(), "models/embedding-001");
        assert_eq!(
            EmbeddingModel::new("models/text-embedding-004").as_str(),
            "models/text-embedding-004"
        );
        assert_eq!(EmbeddingModel::default().as_str(), "models/embedding-001");
    }

    #[test]
    fn test_issue_record_becomes_indexed_entry() {
        let entry = IndexedEntry::from(IssueRecord {
            id: "7".to_string(),
            issue: "Door won't lock".to_string(),
            solution: String::new(),
        });
        assert_eq!(entry.embedding_source, "Door won't lock");
        assert_eq!(entry.metadata, "");
    }

    #[test]
    fn test_index_stats_deserializes_provider_shape() {
        let stats: IndexStats = serde_json::from_value(json!({
            "namespaces": { "fridge": { "vectorCount": 12 } },
            "dimension": 768,
            "indexFullness": 0.0,
            "totalVectorCount": 12
        }))
        .unwrap();
        assert_eq!(stats.total_vector_count, 12);
        assert_eq!(stats.namespaces["fridge"].vector_count, 12);
        assert_eq!(stats.dimension, Some(768));
    }
}
