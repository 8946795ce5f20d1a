use chrono::Utc;
use thiserror::Error;

use crate::{
    domain::{AnalysisReport, ClassificationResult, Label, StoragePolicy},
    model::{ClassificationError, Models},
};

use super::segments::split_messages;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no messages provided")]
    Validation,
    #[error("classification failed: {0}")]
    Classification(#[from] ClassificationError),
}

/// Labels every line of `raw` and derives the spam storage estimate.
///
/// Pure apart from the read-only model calls; nothing is retained between
/// invocations.
pub fn classify(
    raw: &str,
    models: &Models,
    policy: &StoragePolicy,
) -> Result<AnalysisReport, PipelineError> {
    let messages = split_messages(raw).ok_or(PipelineError::Validation)?;

    let vectors = models.vectorizer().transform(&messages)?;
    if vectors.len() != messages.len() {
        return Err(ClassificationError::LengthMismatch {
            expected: messages.len(),
            actual: vectors.len(),
        }
        .into());
    }

    let predictions = models.classifier().predict(&vectors)?;
    if predictions.len() != messages.len() {
        return Err(ClassificationError::LengthMismatch {
            expected: messages.len(),
            actual: predictions.len(),
        }
        .into());
    }

    let results = messages
        .iter()
        .zip(predictions)
        .map(|(message, raw_label)| {
            Ok(ClassificationResult {
                message: (*message).to_string(),
                label: Label::try_from(raw_label)?,
            })
        })
        .collect::<Result<Vec<_>, ClassificationError>>()?;

    let spam_count = results.iter().filter(|r| r.label.is_spam()).count();
    let storage_estimate_mb = policy.estimate_mb(spam_count);
    let alert_triggered = policy.is_alert(storage_estimate_mb);

    tracing::info!(
        target: "pipeline",
        total = results.len(),
        spam = spam_count,
        storage_mb = storage_estimate_mb,
        alert = alert_triggered,
        "analysis complete"
    );

    Ok(AnalysisReport {
        results,
        spam_count,
        storage_estimate_mb,
        alert_triggered,
        analyzed_at: Utc::now(),
    })
}
