use axum::extract::{Json, State};
use serde_json::json;
use tokio::task;

use crate::api::handler::{EdgeDataRequest, VertexDataRequest};
use crate::api::http::{error::HttpError, state::AppState};
use crate::core::error::ServiceError;
use crate::engine::GraphEngine;

/// CSV ingestion does file IO, so both loaders run on the blocking pool.
pub async fn load_vertices<E: GraphEngine>(
    State(state): State<AppState<E>>,
    Json(request): Json<VertexDataRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let handler = state.handler.clone();
    task::spawn_blocking(move || handler.load_csv_as_vertex_data(&request))
        .await
        .map_err(|e| HttpError::Service(ServiceError::new(format!("task failed: {e}"))))??;
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn load_edges<E: GraphEngine>(
    State(state): State<AppState<E>>,
    Json(request): Json<EdgeDataRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let handler = state.handler.clone();
    task::spawn_blocking(move || handler.load_csv_as_edge_data(&request))
        .await
        .map_err(|e| HttpError::Service(ServiceError::new(format!("task failed: {e}"))))??;
    Ok(Json(json!({ "status": "ok" })))
}
