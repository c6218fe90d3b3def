//! Server startup and graceful shutdown.

use anyhow::Result;
use axum::Router;
use papercast_core::upload::BYTES_PER_MB;
use papercast_core::Config;

/// Bind the listener and serve until a shutdown signal arrives.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port);
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        convert_mode = config.convert_mode.as_str(),
        backend_url = %config.backend_url,
        max_upload_mb = config.max_upload_size_bytes / BYTES_PER_MB,
        default_voice = %config.default_voice,
        "Server ready and accepting connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down cleanly");
    Ok(())
}

/// Resolves when SIGINT (Ctrl+C) or SIGTERM is received.
///
/// # Panics
///
/// Panics if the signal handlers cannot be installed, which only happens
/// when the process is in an unusable state anyway.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully");
        }
    }
}
