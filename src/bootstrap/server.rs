use std::net::SocketAddr;
use std::time::Instant;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::app::state::AppState;
use crate::bootstrap::database;
use crate::config::AppConfig;

pub async fn init_server(started_at: Instant) -> anyhow::Result<()> {
    let config = AppConfig::get().await?;
    serve(config, started_at).await
}

pub async fn serve(config: &AppConfig, started_at: Instant) -> anyhow::Result<()> {
    let db = database::connect(config).await?;

    // Build the router
    let app = crate::routes::routes(AppState::new(db.clone(), started_at), &config.cors_origins);

    // Start the server
    let served = match bind(config.socket_addr()).await {
        Ok(listener) => {
            tracing::info!("Server listening on {}", config.socket_addr());
            tracing::info!("🚀 Server ready at http://localhost:{}", config.port);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("server stopped unexpectedly")
        }
        Err(err) => Err(err),
    };

    if let Some(db) = db {
        database::disconnect(db).await;
    }

    served
}

pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot listen on {addr}"))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("cannot listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("cannot listen for SIGTERM: {err}");
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

    tracing::info!("shutdown signal received, draining connections");
}
