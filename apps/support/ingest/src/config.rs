use core_config::{ConfigError, Environment, FromEnv, env_list};
use domain_support::{DatasetSource, PineconeConfig};

/// Ingestion job configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub pinecone: PineconeConfig,
    /// `SUPPORT_DATASETS`, e.g. `washingmachine=/data/wm.jsonl,fridge=/data/fridge.jsonl`
    pub datasets: Vec<DatasetSource>,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let pinecone = PineconeConfig::from_env()?; // PINECONE_API_KEY is required
        let datasets = datasets_from_env()?;

        Ok(Self {
            pinecone,
            datasets,
            environment,
        })
    }

    /// Datasets given on the command line replace the configured ones
    pub fn datasets_or(&self, overrides: Vec<DatasetSource>) -> eyre::Result<Vec<DatasetSource>> {
        let datasets = if overrides.is_empty() {
            self.datasets.clone()
        } else {
            overrides
        };

        if datasets.is_empty() {
            eyre::bail!("No datasets configured; set SUPPORT_DATASETS or pass --dataset CATEGORY=PATH");
        }

        Ok(datasets)
    }
}

fn datasets_from_env() -> Result<Vec<DatasetSource>, ConfigError> {
    env_list("SUPPORT_DATASETS")
        .iter()
        .map(|item| {
            item.parse().map_err(|e: domain_support::SupportError| ConfigError::ParseError {
                key: "SUPPORT_DATASETS".to_string(),
                details: e.to_string(),
            })
        })
        .collect()
}
