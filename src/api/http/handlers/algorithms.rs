use axum::extract::{Json, State};
use serde::Deserialize;
use tokio::task;

use crate::api::http::{error::HttpError, state::AppState};
use crate::core::error::ServiceError;
use crate::core::types::{GraphId, Node2vecResult};
use crate::engine::GraphEngine;

#[derive(Debug, Deserialize)]
pub struct Node2vecRequest {
    pub start_vertices: Vec<i32>,
    pub max_depth: i32,
    #[serde(default)]
    pub graph_id: GraphId,
}

#[derive(Debug, Deserialize)]
pub struct PagerankRequest {
    #[serde(default)]
    pub graph_id: GraphId,
}

pub async fn node2vec<E: GraphEngine>(
    State(state): State<AppState<E>>,
    Json(request): Json<Node2vecRequest>,
) -> Result<Json<Node2vecResult>, HttpError> {
    let handler = state.handler.clone();
    let result = task::spawn_blocking(move || {
        handler.node2vec(&request.start_vertices, request.max_depth, request.graph_id)
    })
    .await
    .map_err(|e| HttpError::Service(ServiceError::new(format!("task failed: {e}"))))??;
    Ok(Json(result))
}

pub async fn pagerank<E: GraphEngine>(
    State(state): State<AppState<E>>,
    Json(request): Json<PagerankRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    state.handler.pagerank(request.graph_id)?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
