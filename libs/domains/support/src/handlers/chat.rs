use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use crate::error::{SupportError, SupportResult};
use crate::models::{ChatRequest, ChatResponse};
use crate::service::SupportService;

/// Answer a support question for a product category
#[utoipa::path(
    post,
    path = "/chat",
    tag = "support",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Suggested solution or apology", body = ChatResponse),
        (status = 400, description = "Missing query or category", body = axum_helpers::ErrorResponse),
        (status = 500, description = "Embedding or search failed", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn chat(
    State(service): State<Arc<SupportService>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> SupportResult<Json<ChatResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::info!(reason = %rejection.body_text(), "Rejected chat body");
        SupportError::MissingFields
    })?;

    let query = request.into_query()?;
    let answer = service.answer(&query).await?;

    Ok(Json(ChatResponse {
        response: answer.response_text(),
    }))
}
