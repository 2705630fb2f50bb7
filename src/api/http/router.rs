use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::engine::GraphEngine;

use super::{
    handlers::{algorithms, data, extensions, graphs, health},
    middleware::logging,
    state::AppState,
};

pub fn create_router<E: GraphEngine>(state: AppState<E>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health::check))
        .route("/uptime", get(health::uptime::<E>))
        .route("/graphs", post(graphs::create::<E>).get(graphs::list::<E>))
        .route("/graphs/{id}", axum::routing::delete(graphs::delete_graph::<E>))
        .route("/graphs/{id}/num-edges", get(graphs::num_edges::<E>))
        .route("/graphs/extract-subgraph", post(graphs::extract::<E>))
        .route("/data/vertices", post(data::load_vertices::<E>))
        .route("/data/edges", post(data::load_edges::<E>))
        .route("/algorithms/node2vec", post(algorithms::node2vec::<E>))
        .route("/algorithms/pagerank", post(algorithms::pagerank::<E>))
        .route("/extensions/load", post(extensions::load::<E>))
        .route("/extensions/unload", post(extensions::unload::<E>))
        .route("/extensions/call", post(extensions::call::<E>))
        .layer(middleware::from_fn(logging::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
