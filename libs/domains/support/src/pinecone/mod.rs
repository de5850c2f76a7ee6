mod client;
mod config;

pub use client::{MAX_UPSERT_BATCH, PineconeIndex};
pub use config::{DEFAULT_CONTROLLER_URL, DEFAULT_INDEX_NAME, PineconeConfig};
