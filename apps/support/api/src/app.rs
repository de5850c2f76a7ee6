use axum::Router;
use axum_helpers::{create_permissive_cors_layer, create_router, health_router};
use core_config::AppInfo;
use domain_support::{SupportApiDoc, SupportService, handlers};

/// Full application router: `/chat`, `/health`, API docs, 404 fallback,
/// tracing and permissive CORS
pub fn build_router(service: SupportService, app: AppInfo) -> Router {
    let routes = handlers::router(service).merge(health_router(app));
    create_router::<SupportApiDoc>(routes, create_permissive_cors_layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stubs::{StubEmbedder, StubIndex};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use core_config::app_info;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    mod stubs {
        use async_trait::async_trait;
        use domain_support::{
            EmbeddingModel, EmbeddingProvider, EmbeddingResult, IndexStats, IndexedEntry,
            SearchMatch, SearchQuery, SupportResult, VectorIndex,
        };

        pub struct StubEmbedder;

        #[async_trait]
        impl EmbeddingProvider for StubEmbedder {
            async fn embed(&self, _: &EmbeddingModel, _: &str) -> SupportResult<EmbeddingResult> {
                Ok(EmbeddingResult::new(vec![1.0, 0.0]))
            }

            async fn embed_batch(
                &self,
                _: &EmbeddingModel,
                texts: &[String],
            ) -> SupportResult<Vec<EmbeddingResult>> {
                Ok(texts.iter().map(|_| EmbeddingResult::new(vec![1.0, 0.0])).collect())
            }
        }

        pub struct StubIndex;

        #[async_trait]
        impl VectorIndex for StubIndex {
            async fn query(&self, _: &str, _: SearchQuery) -> SupportResult<Vec<SearchMatch>> {
                Ok(vec![SearchMatch {
                    id: "wm-1".to_string(),
                    score: 0.9,
                    metadata: Some(serde_json::json!("Replace the drain filter.")),
                }])
            }

            async fn upsert(&self, _: &str, entries: Vec<IndexedEntry>) -> SupportResult<usize> {
                Ok(entries.len())
            }

            async fn describe_stats(&self) -> SupportResult<IndexStats> {
                Ok(IndexStats::default())
            }
        }
    }

    fn app() -> Router {
        let service = SupportService::new(Arc::new(StubEmbedder), Arc::new(StubIndex));
        build_router(service, app_info!())
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_route() {
        let request = Request::post("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::from(
                json!({ "query": "drum", "category": "washingmachine" }).to_string(),
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            json_body(response).await,
            json!({
                "response": "Based on your issue, I found this potential solution:\n\nReplace the drain filter."
            })
        );
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "support_api");
    }

    #[tokio::test]
    async fn test_openapi_documents_chat() {
        let response = app()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["paths"]["/chat"]["post"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "The requested resource was not found" })
        );
    }
}
