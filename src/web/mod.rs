mod handlers;
mod views;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{domain::StoragePolicy, model::Models};

pub struct AppState {
    pub models: Models,
    pub policy: StoragePolicy,
    pub timezone: Tz,
}

impl AppState {
    pub fn new(models: Models, policy: StoragePolicy, timezone: &str) -> Self {
        let timezone = timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(target: "web", timezone, "unknown timezone; using UTC");
            Tz::UTC
        });
        Self {
            models,
            policy,
            timezone,
        }
    }
}

pub fn router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::analyze))
        .route("/api/classify", post(handlers::classify_json))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
