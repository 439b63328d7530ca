use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

use shared::data::Config;

use crate::api::build_router;
use crate::daemon::state::AppState;
use crate::services::recovery;

/// Custom time formatter that outputs UTC time with millisecond precision.
/// Format: 2026-02-17T00:59:15.920Z
struct MillisecondTime;

impl FormatTime for MillisecondTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", jiff::Timestamp::now().strftime("%Y-%m-%dT%H:%M:%S.%3fZ"))
    }
}

/// Run the machinad server until interrupted.
pub async fn run_server(config: Config) -> Result<()> {
    // Env filter with fallback to 'info' level
    let (filter, using_default) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new("info"), true),
    };

    tracing_subscriber::fmt()
        .with_timer(MillisecondTime)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    if using_default {
        tracing::info!("RUST_LOG not set or invalid, using default 'info' level");
    }

    tracing::info!("Starting machinad server");

    let state = AppState::new(config.clone())
        .await
        .context("Failed to initialize application state")?;

    // Re-ensure host networks for everything in the catalog before taking
    // traffic. Guest domains are left as the hypervisor reports them.
    recovery::recover_networks(&state).await;

    let app = build_router().with_state(state.clone());

    let addr: SocketAddr = config
        .listen
        .parse()
        .context("Invalid listen address or port")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("machinad listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start server")?;

    // Let queued activity writes land before the process exits.
    state.activity.drain().await;

    tracing::info!("machinad server stopped");

    Ok(())
}

/// Handle shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown");
}
