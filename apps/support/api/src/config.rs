use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_support::{GeminiConfig, PineconeConfig};

pub use core_config::Environment;

/// Query service configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub pinecone: PineconeConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=5001
        let gemini = GeminiConfig::from_env()?; // GEMINI_API_KEY is required
        let pinecone = PineconeConfig::from_env()?; // PINECONE_API_KEY is required

        Ok(Self {
            app: app_info!(),
            server,
            gemini,
            pinecone,
            environment,
        })
    }
}
