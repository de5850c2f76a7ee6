//! Pinecone index client
//!
//! Control plane (`GET /indexes`) resolves the data plane host; queries,
//! record upserts and statistics go to that host. Upserted records are
//! embedded by the index itself from their `issue` field.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::PineconeConfig;
use crate::error::{SupportError, SupportResult};
use crate::index::VectorIndex;
use crate::models::{IndexStats, IndexedEntry, SearchMatch, SearchQuery};

const API_VERSION: &str = "2025-01";

/// Largest number of records accepted by a single upsert request
pub const MAX_UPSERT_BATCH: usize = 96;

#[derive(Debug, Deserialize)]
struct IndexDescription {
    name: String,
    #[serde(default)]
    host: String,
}

#[derive(Debug, Deserialize)]
struct IndexList {
    #[serde(default)]
    indexes: Vec<IndexDescription>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    namespace: &'a str,
    vector: &'a [f32],
    top_k: u32,
    include_metadata: bool,
    include_values: bool,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Serialize)]
struct UpsertRecord<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
    issue: &'a str,
    metadata: &'a str,
}

fn with_scheme(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    }
}

/// Serialize entries as newline-delimited JSON records
fn ndjson(entries: &[IndexedEntry]) -> SupportResult<String> {
    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        let record = UpsertRecord {
            id: &entry.id,
            issue: &entry.embedding_source,
            metadata: &entry.metadata,
        };
        lines.push(
            serde_json::to_string(&record)
                .map_err(|e| SupportError::Index(format!("Failed to encode record: {}", e)))?,
        );
    }
    Ok(lines.join("\n"))
}

/// Pinecone-backed [`VectorIndex`]
#[derive(Clone)]
pub struct PineconeIndex {
    client: Client,
    api_key: String,
    index_name: String,
    host: String,
}

impl PineconeIndex {
    /// Connect to the configured index, verifying it exists.
    ///
    /// The index list is always consulted; an explicit `index_host` only
    /// replaces the host it reports.
    pub async fn connect(config: PineconeConfig) -> SupportResult<Self> {
        let client = Client::new();
        let url = format!("{}/indexes", config.controller_url.trim_end_matches('/'));

        let list: IndexList = send(
            client
                .get(&url)
                .header("Api-Key", &config.api_key)
                .header("X-Pinecone-API-Version", API_VERSION),
        )
        .await?;

        let names: Vec<&str> = list.indexes.iter().map(|i| i.name.as_str()).collect();
        tracing::debug!(indexes = ?names, "Listed Pinecone indexes");

        let description = list
            .indexes
            .iter()
            .find(|i| i.name == config.index_name)
            .ok_or_else(|| SupportError::IndexNotFound(config.index_name.clone()))?;

        let host = match config.index_host {
            Some(host) => host,
            None if description.host.is_empty() => {
                return Err(SupportError::Index(format!(
                    "Index '{}' has no host yet",
                    config.index_name
                )));
            }
            None => description.host.clone(),
        };

        tracing::info!(index = %config.index_name, host = %host, "Connected to Pinecone index");

        Ok(Self {
            client,
            api_key: config.api_key,
            index_name: config.index_name,
            host: with_scheme(&host),
        })
    }

    /// Use a known data plane host without consulting the control plane
    pub fn with_host(config: PineconeConfig, host: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key,
            index_name: config.index_name,
            host: with_scheme(host),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn post(&self, url: impl reqwest::IntoUrl) -> RequestBuilder {
        self.client
            .post(url)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
    }

    fn upsert_url(&self, namespace: &str) -> SupportResult<Url> {
        let mut url = Url::parse(&self.host)
            .map_err(|e| SupportError::Index(format!("Invalid index host '{}': {}", self.host, e)))?;
        url.path_segments_mut()
            .map_err(|_| SupportError::Index(format!("Invalid index host '{}'", self.host)))?
            .pop_if_empty()
            .extend(["records", "namespaces", namespace, "upsert"]);
        Ok(url)
    }
}

/// Send a request, turning transport failures and non-2xx statuses into errors
async fn execute(request: RequestBuilder) -> SupportResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| SupportError::Index(format!("Pinecone request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(SupportError::Index(format!(
            "Pinecone API error ({}): {}",
            status, error_text
        )));
    }

    Ok(response)
}

async fn send<R: DeserializeOwned>(request: RequestBuilder) -> SupportResult<R> {
    execute(request)
        .await?
        .json()
        .await
        .map_err(|e| SupportError::Index(format!("Invalid Pinecone response: {}", e)))
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, namespace: &str, query: SearchQuery) -> SupportResult<Vec<SearchMatch>> {
        let body = QueryRequest {
            namespace,
            vector: &query.vector,
            top_k: query.top_k,
            include_metadata: query.include_metadata,
            include_values: false,
        };

        let response: QueryResponse =
            send(self.post(format!("{}/query", self.host)).json(&body)).await?;

        Ok(response
            .matches
            .into_iter()
            .map(|m| SearchMatch {
                id: m.id,
                score: m.score,
                metadata: m.metadata,
            })
            .collect())
    }

    async fn upsert(&self, namespace: &str, entries: Vec<IndexedEntry>) -> SupportResult<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let url = self.upsert_url(namespace)?;
        for chunk in entries.chunks(MAX_UPSERT_BATCH) {
            execute(
                self.post(url.clone())
                    .header(CONTENT_TYPE, "application/x-ndjson")
                    .body(ndjson(chunk)?),
            )
            .await?;

            tracing::debug!(namespace, records = chunk.len(), "Upserted record batch");
        }

        Ok(entries.len())
    }

    async fn describe_stats(&self) -> SupportResult<IndexStats> {
        send(
            self.post(format!("{}/describe_index_stats", self.host))
                .json(&serde_json::json!({})),
        )
        .await
    }
}
