//! HTTP handlers for valuation-service.

pub mod app;
pub mod estimate;

use crate::models::{FEATURES, RANGE_TABLE};
use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "valuation-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// The model is loaded before the listener is bound, so a running server is ready.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "model": state.model.name(),
            "model_version": state.model.version(),
        })),
    )
}

pub async fn model_info(State(state): State<AppState>) -> impl IntoResponse {
    let ranges: Vec<_> = RANGE_TABLE
        .iter()
        .map(|rule| {
            json!({
                "key": rule.key,
                "field": rule.field_name(),
                "label": rule.label,
                "minimum": rule.minimum,
                "maximum": rule.maximum,
            })
        })
        .collect();
    let features: Vec<_> = FEATURES.iter().map(|f| f.field_name()).collect();

    Json(json!({
        "name": state.model.name(),
        "version": state.model.version(),
        "features": features,
        "ranges": ranges,
    }))
}

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
