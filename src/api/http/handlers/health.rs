use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::json;

use crate::api::http::state::AppState;
use crate::engine::GraphEngine;

pub async fn check() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "graphserve",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

#[derive(Debug, Serialize)]
pub struct UptimeResponse {
    pub uptime_seconds: i32,
}

/// Lock-free, so it stays responsive while engine work is in flight.
pub async fn uptime<E: GraphEngine>(State(state): State<AppState<E>>) -> Json<UptimeResponse> {
    Json(UptimeResponse {
        uptime_seconds: state.handler.uptime(),
    })
}
