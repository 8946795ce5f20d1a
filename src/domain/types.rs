use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::ClassificationResult;

pub const DEFAULT_SPAM_SIZE_MB: f64 = 0.5;
pub const DEFAULT_SPAM_THRESHOLD_MB: f64 = 200.0;

/// Fixed per-message size assumption and the inclusive alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoragePolicy {
    pub per_message_mb: f64,
    pub alert_threshold_mb: f64,
}

impl Default for StoragePolicy {
    fn default() -> Self {
        Self {
            per_message_mb: DEFAULT_SPAM_SIZE_MB,
            alert_threshold_mb: DEFAULT_SPAM_THRESHOLD_MB,
        }
    }
}

impl StoragePolicy {
    pub fn estimate_mb(&self, spam_count: usize) -> f64 {
        spam_count as f64 * self.per_message_mb
    }

    pub fn is_alert(&self, estimate_mb: f64) -> bool {
        estimate_mb >= self.alert_threshold_mb
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub results: Vec<ClassificationResult>,
    pub spam_count: usize,
    pub storage_estimate_mb: f64,
    pub alert_triggered: bool,
    pub analyzed_at: DateTime<Utc>,
}
