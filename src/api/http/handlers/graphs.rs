use axum::{
    extract::{Json, Path, State},
    response::Json as JsonResponse,
};
use serde::Serialize;
use tokio::task;

use crate::api::handler::ExtractSubgraphRequest;
use crate::api::http::{error::HttpError, state::AppState};
use crate::core::error::ServiceError;
use crate::core::types::GraphId;
use crate::engine::GraphEngine;

#[derive(Debug, Serialize)]
pub struct GraphIdResponse {
    pub graph_id: GraphId,
}

#[derive(Debug, Serialize)]
pub struct GraphIdsResponse {
    pub graph_ids: Vec<GraphId>,
}

#[derive(Debug, Serialize)]
pub struct NumEdgesResponse {
    pub num_edges: i32,
}

pub async fn create<E: GraphEngine>(
    State(state): State<AppState<E>>,
) -> Result<JsonResponse<GraphIdResponse>, HttpError> {
    let graph_id = state.handler.create_graph()?;
    Ok(JsonResponse(GraphIdResponse { graph_id }))
}

pub async fn list<E: GraphEngine>(
    State(state): State<AppState<E>>,
) -> Result<JsonResponse<GraphIdsResponse>, HttpError> {
    let graph_ids = state.handler.get_graph_ids()?;
    Ok(JsonResponse(GraphIdsResponse { graph_ids }))
}

pub async fn delete_graph<E: GraphEngine>(
    State(state): State<AppState<E>>,
    Path(graph_id): Path<GraphId>,
) -> Result<JsonResponse<serde_json::Value>, HttpError> {
    state.handler.delete_graph(graph_id)?;
    Ok(JsonResponse(serde_json::json!({ "status": "ok" })))
}

pub async fn num_edges<E: GraphEngine>(
    State(state): State<AppState<E>>,
    Path(graph_id): Path<GraphId>,
) -> Result<JsonResponse<NumEdgesResponse>, HttpError> {
    let num_edges = state.handler.get_num_edges(graph_id)?;
    Ok(JsonResponse(NumEdgesResponse { num_edges }))
}

/// Extraction walks the whole edge table, so it runs off the async executor.
pub async fn extract<E: GraphEngine>(
    State(state): State<AppState<E>>,
    Json(request): Json<ExtractSubgraphRequest>,
) -> Result<JsonResponse<GraphIdResponse>, HttpError> {
    let handler = state.handler.clone();
    let graph_id = task::spawn_blocking(move || handler.extract_subgraph(&request))
        .await
        .map_err(|e| HttpError::Service(ServiceError::new(format!("task failed: {e}"))))??;
    Ok(JsonResponse(GraphIdResponse { graph_id }))
}
