//! Support dataset ingestion
//!
//! Loads category issue/solution datasets into their namespaces of the
//! Pinecone index, then exits.

use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_support::{CategoryOutcome, DatasetSource, IndexStats, Ingestor, PineconeIndex};
use eyre::{Result, WrapErr};
use std::sync::Arc;
use tracing::{info, warn};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "support-ingest")]
#[command(about = "Upsert issue/solution datasets into per-category index namespaces")]
struct Cli {
    /// Dataset as CATEGORY=PATH; repeatable. Overrides SUPPORT_DATASETS.
    #[arg(short, long = "dataset", value_name = "CATEGORY=PATH")]
    datasets: Vec<DatasetSource>,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let cli = Cli::parse();
    let datasets = config.datasets_or(cli.datasets)?;

    let index = PineconeIndex::connect(config.pinecone.clone())
        .await
        .wrap_err_with(|| {
            format!(
                "Failed to connect to Pinecone index '{}'",
                config.pinecone.index_name
            )
        })?;

    info!(categories = datasets.len(), "Starting ingestion");

    let report = Ingestor::new(Arc::new(index))
        .on_stats(print_stats)
        .run(&datasets)
        .await
        .wrap_err("Ingestion aborted")?;

    for outcome in &report.outcomes {
        match outcome {
            CategoryOutcome::Upserted {
                category,
                upserted,
                skipped_records,
                ..
            } => {
                info!(%category, upserted, skipped_records, "Namespace updated");
            }
            CategoryOutcome::MissingDataset { category, path } => {
                warn!(%category, %path, "Dataset not found; category skipped");
            }
            CategoryOutcome::UnreadableDataset {
                category,
                path,
                reason,
            } => {
                warn!(%category, %path, %reason, "Dataset unreadable; category skipped");
            }
        }
    }

    let elapsed = report.finished_at - report.started_at;
    info!(
        upserted = report.total_upserted(),
        skipped = ?report.skipped_categories(),
        elapsed_ms = elapsed.num_milliseconds(),
        "Ingestion complete"
    );

    Ok(())
}

fn print_stats(category: &str, stats: &IndexStats) {
    match serde_json::to_string_pretty(stats) {
        Ok(json) => println!("\nIndex stats for {} namespace:\n{}", category, json),
        Err(e) => warn!(%category, error = %e, "Could not render index stats"),
    }
}
