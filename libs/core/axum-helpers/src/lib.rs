//! # Axum Helpers
//!
//! Shared building blocks for the Axum services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS layers
//! - **[`errors`]**: `AppError` and the `{"error": ...}` response body

pub mod errors;
pub mod http;
pub mod server;

pub use server::{HealthResponse, create_app, create_router, health_router, shutdown_signal};

pub use http::create_permissive_cors_layer;

pub use errors::{AppError, ErrorResponse};
