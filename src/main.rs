use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use wellora::api::server;
use wellora::config;
use wellora::core_state::CoreState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Wellora starting v{}", config::APP_VERSION);

    let core = match CoreState::from_env() {
        Ok(core) => Arc::new(core),
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    server::serve(core, config::DEFAULT_PORT).await
}
