use askama_axum::Template;
use chrono_tz::Tz;

use crate::domain::{AnalysisReport, StoragePolicy};

pub struct RowView {
    pub message: String,
    pub label: String,
}

pub struct ReportView {
    pub rows: Vec<RowView>,
    pub spam_count: usize,
    pub storage: String,
    pub alert: bool,
    pub analyzed_at: String,
}

impl ReportView {
    pub fn new(report: AnalysisReport, timezone: &Tz) -> Self {
        Self {
            spam_count: report.spam_count,
            storage: format!("{:.1} MB", report.storage_estimate_mb),
            alert: report.alert_triggered,
            analyzed_at: report
                .analyzed_at
                .with_timezone(timezone)
                .format("%Y-%m-%d %H:%M:%S %Z")
                .to_string(),
            rows: report
                .results
                .into_iter()
                .map(|result| RowView {
                    label: result.label.to_string(),
                    message: result.message,
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub messages: String,
    pub threshold: String,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub report: Option<ReportView>,
}

impl IndexTemplate {
    pub fn new(policy: &StoragePolicy, messages: String) -> Self {
        Self {
            messages,
            threshold: policy.alert_threshold_mb.to_string(),
            warning: None,
            error: None,
            report: None,
        }
    }

    pub fn with_report(mut self, report: ReportView) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_warning(mut self, warning: &str) -> Self {
        self.warning = Some(warning.to_string());
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}
