use std::future::Future;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{guitars::GuitarStore, runtime};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the store described by `cfg` and wrap it in the application router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.storage.data_file).await?;

    let store = GuitarStore::open(&cfg.storage).await;
    info!(
        path = %cfg.storage.data_file.display(),
        persist = store.is_persistent(),
        on_load_error = ?cfg.storage.on_load_error,
        "guitar store ready"
    );

    let state = ServerState { guitars: store };
    Ok(routes::build_router(state, build_cors()))
}

async fn bind(server: &ServerConfig) -> Result<TcpListener, StartupError> {
    let addr = format!("{}:{}", server.host, server.port);
    TcpListener::bind((server.host.as_str(), server.port))
        .await
        .map_err(|source| StartupError::Bind { addr, source })
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(event = "shutdown_signal", signal = "ctrl_c", "shutting down"),
        _ = terminate => info!(event = "shutdown_signal", signal = "terminate", "shutting down"),
    }
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
/// A mutation that is already running completes its file write before exit.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let listener = bind(&cfg.server).await?;
    let addr = listener.local_addr().map_err(StartupError::Serve)?;
    info!(%addr, "Fender Guitars API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve)?;
    info!(%addr, "server drained");
    Ok(())
}

/// Public entry: run the HTTP server until Ctrl+C or SIGTERM
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_until(cfg, shutdown_signal()).await
}
