use std::{env, net::SocketAddr, str::FromStr};

use super::env::{AppConfig, ConfigError, DirectoryConfig, LoggingConfig, ModelConfig, WebConfig};
use crate::domain::{
    types::{DEFAULT_SPAM_SIZE_MB, DEFAULT_SPAM_THRESHOLD_MB},
    StoragePolicy,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_addr: SocketAddr = parse(&lookup, "BIND_ADDR", "127.0.0.1:8501".parse().ok())?;

        let models = ModelConfig {
            model_dir: var("MODEL_DIR", "models"),
            vectorizer_file: var("VECTORIZER_FILE", "vectorizer.json"),
            classifier_file: var("CLASSIFIER_FILE", "spam_classifier.json"),
        };

        let storage = StoragePolicy {
            per_message_mb: parse_storage(&lookup, "SPAM_SIZE_MB", DEFAULT_SPAM_SIZE_MB)?,
            alert_threshold_mb: parse_storage(
                &lookup,
                "SPAM_THRESHOLD_MB",
                DEFAULT_SPAM_THRESHOLD_MB,
            )?,
        };

        let directories = DirectoryConfig {
            logs_dir: var("LOGS_DIR", "logs"),
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL", "info"),
        };

        let timezone = var("APP_TIMEZONE", "UTC");

        let web = WebConfig {
            max_body_bytes: parse(&lookup, "MAX_BODY_BYTES", Some(1024 * 1024))?,
        };

        Ok(Self {
            bind_addr,
            models,
            storage,
            directories,
            logging,
            timezone,
            web,
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => default.ok_or(ConfigError::Invalid {
            key,
            value: String::new(),
        }),
    }
}

fn parse_storage(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: f64,
) -> Result<f64, ConfigError> {
    let value: f64 = parse(lookup, key, Some(default))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        });
    }
    Ok(value)
}
