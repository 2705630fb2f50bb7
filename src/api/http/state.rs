use std::sync::Arc;

use crate::api::handler::GraphServiceHandler;
use crate::engine::GraphEngine;

pub struct AppState<E: GraphEngine> {
    pub handler: Arc<GraphServiceHandler<E>>,
}

impl<E: GraphEngine> AppState<E> {
    pub fn new(handler: Arc<GraphServiceHandler<E>>) -> Self {
        Self { handler }
    }
}

// Manual impl: `E` itself need not be Clone.
impl<E: GraphEngine> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
        }
    }
}
