mod api_error;
mod routes;
mod server_config;
mod suggestion_response;
mod upload;

use journal_scout::SuggestionService;
use routes::{create_router, AppState};
use server_config::ServerConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{:#}", e);
        eprintln!("Journal scout failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    if config.scout.gemini.api_key.is_none() {
        log::warn!("GOOGLE_API_KEY is not set; suggestion requests will fail until it is");
    }

    let suggestion_service = SuggestionService::from_config(&config.scout)?;
    let state = Arc::new(AppState { suggestion_service });
    let app = create_router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!(
        "Listening on {} (model {})",
        listener.local_addr()?,
        config.scout.gemini.model
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
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

    log::info!("Shutdown signal received");
}
