use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Creates a CORS layer that accepts requests from any origin.
///
/// Credentials are not allowed; the support API is called from browser
/// widgets without cookies.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}
