use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};
use tokio::net::TcpListener;
use tokio::signal;

pub mod handler;
pub mod http;

pub use handler::GraphServiceHandler;

use crate::config::Config;
use crate::engine::MemoryEngine;
use crate::extensions::LibraryLoader;

/// Bring up the service and run until a shutdown signal arrives.
pub async fn start_service(config: Config) -> Result<()> {
    let engine = Arc::new(MemoryEngine::new());
    let handler = Arc::new(GraphServiceHandler::new(engine, Box::new(LibraryLoader)));

    if let Some(dir) = &config.extension_dir {
        match handler.load_graph_creation_extensions(dir) {
            Ok(count) => info!("loaded {count} extension module(s) from {dir}"),
            Err(e) => warn!("extension preload from {dir} failed: {e}"),
        }
    }

    let state = http::AppState::new(handler);
    let router = http::create_router(state, Duration::from_secs(config.request_timeout_secs));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("service stopped");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("received shutdown signal");
}
