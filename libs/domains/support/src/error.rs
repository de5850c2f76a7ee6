use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_config::ConfigError;
use thiserror::Error;

/// Client-facing message for a request without `query` or `category`
pub const MISSING_FIELDS_MESSAGE: &str = "A 'query' and 'category' must be provided.";

/// Client-facing message when the embedding provider fails
pub const EMBEDDING_FAILED_MESSAGE: &str = "Failed to generate embedding for the query.";

/// Client-facing message when the vector index fails
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching for a solution.";

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred.";

#[derive(Debug, Error)]
pub enum SupportError {
    #[error("A 'query' and 'category' must be provided.")]
    MissingFields,

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),
}

pub type SupportResult<T> = Result<T, SupportError>;

impl From<ConfigError> for SupportError {
    fn from(err: ConfigError) -> Self {
        SupportError::Config(err.to_string())
    }
}

/// Convert SupportError to AppError.
///
/// Provider detail is dropped here; callers log it before the conversion so
/// clients only ever see the generic message.
impl From<SupportError> for AppError {
    fn from(err: SupportError) -> Self {
        match err {
            SupportError::MissingFields => AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()),
            SupportError::Embedding(_) => {
                AppError::InternalServerError(EMBEDDING_FAILED_MESSAGE.to_string())
            }
            SupportError::Index(_) | SupportError::IndexNotFound(_) => {
                AppError::InternalServerError(SEARCH_FAILED_MESSAGE.to_string())
            }
            SupportError::Config(_) | SupportError::Dataset(_) => {
                AppError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for SupportError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
