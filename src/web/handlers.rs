use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::{self, JoinError};

use crate::{
    domain::AnalysisReport,
    pipeline::{classify, PipelineError},
};

use super::{
    views::{IndexTemplate, ReportView},
    AppState,
};

const EMPTY_INPUT_WARNING: &str = "Please enter at least one message.";

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub messages: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

#[derive(Debug, Error)]
pub(super) enum AnalysisError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("analysis task failed: {0}")]
    Task(#[from] JoinError),
}

/// Runs the CPU-bound pipeline on the blocking pool so large submissions do
/// not stall the async workers.
pub(super) async fn run_analysis(
    state: &Arc<AppState>,
    text: String,
) -> Result<AnalysisReport, AnalysisError> {
    let state = state.clone();
    let report =
        task::spawn_blocking(move || classify(&text, &state.models, &state.policy)).await??;
    Ok(report)
}

// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    IndexTemplate::new(&state.policy, String::new())
}

// POST / - form submission from the Analyze button
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    let page = IndexTemplate::new(&state.policy, form.messages.clone());
    match run_analysis(&state, form.messages).await {
        Ok(report) => page
            .with_report(ReportView::new(report, &state.timezone))
            .into_response(),
        Err(AnalysisError::Pipeline(PipelineError::Validation)) => {
            tracing::debug!(target: "web", "empty submission");
            page.with_warning(EMPTY_INPUT_WARNING).into_response()
        }
        Err(err) => {
            tracing::error!(target: "web", error = %err, "analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                page.with_error(err.to_string()),
            )
                .into_response()
        }
    }
}

// POST /api/classify
pub async fn classify_json(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Response {
    match run_analysis(&state, req.text).await {
        Ok(report) => Json(report).into_response(),
        Err(err @ AnalysisError::Pipeline(PipelineError::Validation)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::new(err.to_string())),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(target: "web", error = %err, "analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(err.to_string())),
            )
                .into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}
