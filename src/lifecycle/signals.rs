//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for Ctrl+C / SIGINT
//! - Combine OS signals with the internal shutdown broadcast
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A failed handler install never triggers shutdown on its own

use tokio::sync::broadcast;

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Resolves when either the shutdown broadcast fires or Ctrl+C is pressed.
pub async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = shutdown.recv() => tracing::info!("Shutdown requested"),
        _ = ctrl_c() => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use std::time::Duration;

    #[tokio::test]
    async fn test_broadcast_triggers_shutdown() {
        let shutdown = Shutdown::new();
        let waiter = tokio::spawn(shutdown_signal(shutdown.subscribe()));

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("shutdown_signal did not resolve")
            .unwrap();
    }
}
