use axum_helpers::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_support::{GeminiProvider, PineconeIndex, SupportService};
use eyre::WrapErr;
use std::sync::Arc;
use tracing::info;

mod app;
mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Both provider keys are required; fails before anything is started
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let model = config.gemini.model.clone();
    let embedder = GeminiProvider::new(config.gemini.clone());

    info!(index = %config.pinecone.index_name, "Connecting to Pinecone");
    let index = PineconeIndex::connect(config.pinecone.clone())
        .await
        .wrap_err_with(|| {
            format!(
                "Failed to connect to Pinecone index '{}'",
                config.pinecone.index_name
            )
        })?;

    let service = SupportService::new(Arc::new(embedder), Arc::new(index)).with_model(model);
    let router = app::build_router(service, config.app);

    info!(model = %config.gemini.model, "Starting support API");

    create_app(router, &config.server)
        .await
        .wrap_err("Server error")?;

    info!("Support API shutdown complete");
    Ok(())
}
