//! Server infrastructure module.
//!
//! - Router assembly with OpenAPI docs, tracing and CORS
//! - Health endpoint
//! - Graceful shutdown
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(routes, create_permissive_cors_layer())
//!     .merge(health_router(core_config::app_info!()));
//! create_app(router, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
