mod chat;

use axum::{Router, routing::post};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{ChatRequest, ChatResponse};
use crate::service::SupportService;

pub use chat::chat;

/// OpenAPI documentation for the support chat API
#[derive(OpenApi)]
#[openapi(
    paths(chat::chat),
    components(schemas(ChatRequest, ChatResponse, axum_helpers::ErrorResponse)),
    tags(
        (name = "support", description = "Appliance troubleshooting answers")
    )
)]
pub struct SupportApiDoc;

/// Create the support router (`POST /chat`)
pub fn router(service: SupportService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/chat", post(chat::chat))
        .with_state(shared_service)
}
