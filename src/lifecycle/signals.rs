//! OS signal handling.

/// Resolve on the first SIGINT (ctrl-c) or, on Unix, SIGTERM.
pub async fn wait_for_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                tracing::info!(signal = "SIGINT", "Shutdown signal received");
            }
            _ = term.recv() => {
                tracing::info!(signal = "SIGTERM", "Shutdown signal received");
            }
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        tracing::info!(signal = "ctrl-c", "Shutdown signal received");
        Ok(())
    }
}
