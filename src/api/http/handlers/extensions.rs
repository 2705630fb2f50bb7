use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::http::{error::HttpError, state::AppState};
use crate::core::types::GraphId;
use crate::engine::GraphEngine;

#[derive(Debug, Deserialize)]
pub struct LoadExtensionsRequest {
    pub extension_dir_path: String,
}

#[derive(Debug, Serialize)]
pub struct LoadExtensionsResponse {
    pub modules_loaded: i32,
}

#[derive(Debug, Deserialize)]
pub struct CallExtensionRequest {
    pub func_name: String,
    #[serde(default)]
    pub func_args_repr: String,
    #[serde(default)]
    pub func_kwargs_repr: String,
}

#[derive(Debug, Serialize)]
pub struct CallExtensionResponse {
    pub graph_id: GraphId,
}

pub async fn load<E: GraphEngine>(
    State(state): State<AppState<E>>,
    Json(request): Json<LoadExtensionsRequest>,
) -> Result<Json<LoadExtensionsResponse>, HttpError> {
    let modules_loaded = state
        .handler
        .load_graph_creation_extensions(&request.extension_dir_path)?;
    Ok(Json(LoadExtensionsResponse { modules_loaded }))
}

pub async fn unload<E: GraphEngine>(
    State(state): State<AppState<E>>,
) -> Json<serde_json::Value> {
    state.handler.unload_graph_creation_extensions();
    Json(json!({ "status": "ok" }))
}

pub async fn call<E: GraphEngine>(
    State(state): State<AppState<E>>,
    Json(request): Json<CallExtensionRequest>,
) -> Result<Json<CallExtensionResponse>, HttpError> {
    let graph_id = state.handler.call_graph_creation_extension(
        &request.func_name,
        &request.func_args_repr,
        &request.func_kwargs_repr,
    )?;
    Ok(Json(CallExtensionResponse { graph_id }))
}
