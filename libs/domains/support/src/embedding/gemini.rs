//! Gemini embedding provider implementation
//!
//! Uses the Generative Language API (`:embedContent` and
//! `:batchEmbedContents`) authenticated with an API key.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::error::{SupportError, SupportResult};
use crate::models::{EmbeddingModel, EmbeddingResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Model used for query embeddings
    pub model: EmbeddingModel,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: EmbeddingModel::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: EmbeddingModel) -> Self {
        self.model = model;
        self
    }

    /// `{base}/models/<name>:<method>`
    fn endpoint_url(&self, model: &EmbeddingModel, method: &str) -> String {
        format!(
            "{}/{}:{}",
            self.base_url.trim_end_matches('/'),
            model.as_str(),
            method
        )
    }
}

impl FromEnv for GeminiConfig {
    /// - GEMINI_API_KEY: required
    /// - GEMINI_BASE_URL: defaults to the public v1beta endpoint
    /// - GEMINI_EMBEDDING_MODEL: defaults to `models/embedding-001`
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("GEMINI_API_KEY")?;
        let base_url = env_or_default("GEMINI_BASE_URL", DEFAULT_BASE_URL);
        let model = env_optional("GEMINI_EMBEDDING_MODEL")
            .map(EmbeddingModel::new)
            .unwrap_or_default();

        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

/// Gemini embeddings provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> SupportResult<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> SupportResult<R>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| SupportError::Embedding(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SupportError::Embedding(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SupportError::Embedding(format!("Invalid Gemini response: {}", e)))
    }
}

// Gemini request/response types

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
}

impl<'a> EmbedContentRequest<'a> {
    fn new(model: &'a EmbeddingModel, text: &'a str) -> Self {
        Self {
            model: model.as_str(),
            content: Content {
                parts: vec![Part { text }],
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchEmbedContentsRequest<'a> {
    requests: Vec<EmbedContentRequest<'a>>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedContentsResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[async_trait]
impl EmbeddingProvider for GeminiProvider {
    async fn embed(&self, model: &EmbeddingModel, text: &str) -> SupportResult<EmbeddingResult> {
        let url = self.config.endpoint_url(model, "embedContent");
        let response: EmbedContentResponse = self
            .post(&url, &EmbedContentRequest::new(model, text))
            .await?;

        Ok(EmbeddingResult::new(response.embedding.values))
    }

    async fn embed_batch(
        &self,
        model: &EmbeddingModel,
        texts: &[String],
    ) -> SupportResult<Vec<EmbeddingResult>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let request = BatchEmbedContentsRequest {
            requests: texts
                .iter()
                .map(|text| EmbedContentRequest::new(model, text))
                .collect(),
        };

        let url = self.config.endpoint_url(model, "batchEmbedContents");
        let response: BatchEmbedContentsResponse = self.post(&url, &request).await?;

        if response.embeddings.len() != texts.len() {
            return Err(SupportError::Embedding(format!(
                "Gemini returned {} embeddings for {} texts",
                response.embeddings.len(),
                texts.len()
            )));
        }

        Ok(response
            .embeddings
            .into_iter()
            .map(|e| EmbeddingResult::new(e.values))
            .collect())
    }
}
