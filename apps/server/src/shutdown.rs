use anyhow::{Context, Result};
use axum_server::Handle;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

/// How long open connections may keep running after a shutdown signal.
const GRACE: Duration = Duration::from_secs(30);

/// Waits for a shutdown signal, then asks the server to drain.
pub(crate) async fn watch(handle: Handle<SocketAddr>) {
    match wait_for_signal().await {
        Ok(name) => {
            info!(signal = name, grace_secs = GRACE.as_secs(), "Draining connections");
            handle.graceful_shutdown(Some(GRACE));
        }
        Err(err) => error!(error = %err, "Shutdown signals unavailable"),
    }
}

async fn wait_for_signal() -> Result<&'static str> {
    let ctrl_c = async { signal::ctrl_c().await.map(|()| "SIGINT") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())?.recv().await;
        Ok::<_, std::io::Error>("SIGTERM")
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<std::io::Result<&'static str>>();

    let received = tokio::select! {
        res = ctrl_c => res,
        res = terminate => res,
    };
    received.context("Failed to install signal handlers")
}
