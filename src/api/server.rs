//! HTTP server: bind, serve, graceful shutdown on ctrl-c.

use std::sync::Arc;

use crate::api::router::api_router;
use crate::core_state::CoreState;

pub async fn serve(core: Arc<CoreState>, port: u16) -> std::io::Result<()> {
    let app = api_router(core);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
