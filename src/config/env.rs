use std::net::SocketAddr;

use thiserror::Error;

use crate::domain::StoragePolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub models: ModelConfig,
    pub storage: StoragePolicy,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub timezone: String,
    pub web: WebConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model_dir: String,
    pub vectorizer_file: String,
    pub classifier_file: String,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub max_body_bytes: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
