use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_required};

pub const DEFAULT_INDEX_NAME: &str = "samsung-wm";
pub const DEFAULT_CONTROLLER_URL: &str = "https://api.pinecone.io";

/// Pinecone connection settings
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    pub index_name: String,
    /// Control plane base URL
    pub controller_url: String,
    /// Data plane host; resolved from the control plane when unset
    pub index_host: Option<String>,
}

impl PineconeConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            controller_url: DEFAULT_CONTROLLER_URL.to_string(),
            index_host: None,
        }
    }

    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    pub fn with_controller_url(mut self, controller_url: impl Into<String>) -> Self {
        self.controller_url = controller_url.into();
        self
    }

    pub fn with_index_host(mut self, index_host: impl Into<String>) -> Self {
        self.index_host = Some(index_host.into());
        self
    }
}

impl FromEnv for PineconeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("PINECONE_API_KEY")?,
            index_name: env_or_default("PINECONE_INDEX", DEFAULT_INDEX_NAME),
            controller_url: env_or_default("PINECONE_CONTROLLER_URL", DEFAULT_CONTROLLER_URL),
            index_host: env_optional("PINECONE_INDEX_HOST"),
        })
    }
}
