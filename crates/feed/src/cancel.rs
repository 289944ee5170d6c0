//! Cancellation token and termination-signal wiring.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

/// Set once, read many. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Cancel `token` on SIGINT or SIGTERM (Ctrl-C elsewhere).
///
/// Handlers are registered before this returns, so a registration failure is
/// reported to the caller instead of silently disabling shutdown. Must be
/// called from within a tokio runtime.
#[cfg(unix)]
pub fn install_signal_handlers(token: CancelToken) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        let name = tokio::select! {
            _ = interrupt.recv() => "SIGINT",
            _ = terminate.recv() => "SIGTERM",
        };
        info!(signal = name, "Termination signal received, shutting down");
        token.cancel();
    }))
}

#[cfg(not(unix))]
pub fn install_signal_handlers(token: CancelToken) -> std::io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!(signal = "ctrl-c", "Termination signal received, shutting down");
            token.cancel();
        }
    }))
}
