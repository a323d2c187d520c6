//! Process-wide graceful shutdown coordination.
//!
//! Signal subscription lives here, not in each runtime: one coordinator owns
//! the SIGINT/SIGTERM subscription and fans out to every registered runtime's
//! stop operation. Stopping the servers is library-level; exiting the process
//! afterwards is the embedding application's decision.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::runtime::FunctionRuntime;

/// Waits for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
pub async fn wait_for_termination_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => {
                        if let Err(e) = result {
                            warn!("Failed to listen for Ctrl-C: {}", e);
                        }
                    }
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM listener: {}", e);
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
        }
    }
}

/// Fans one termination signal out to many runtimes.
///
/// A process embedding several runtimes registers each of them here and calls
/// [`run_until_signal`](Self::run_until_signal) once, instead of every
/// runtime installing its own process-level listener.
#[derive(Default)]
pub struct ShutdownCoordinator {
    runtimes: Mutex<Vec<Arc<FunctionRuntime>>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, runtime: Arc<FunctionRuntime>) {
        self.runtimes.lock().await.push(runtime);
    }

    /// Stops every registered runtime, in registration order.
    pub async fn shutdown_all(&self) {
        let runtimes = {
            let mut guard = self.runtimes.lock().await;
            std::mem::take(&mut *guard)
        };

        for runtime in runtimes {
            runtime.stop().await;
        }
    }

    /// Blocks until a termination signal arrives, then stops all registered
    /// runtimes and returns control to the caller.
    pub async fn run_until_signal(&self) {
        wait_for_termination_signal().await;
        info!("Termination signal received; stopping all registered runtimes");
        self.shutdown_all().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FunctionConfig;
    use serde_json::json;

    #[tokio::test]
    async fn shutdown_all_stops_every_runtime() {
        let coordinator = ShutdownCoordinator::new();

        let mut runtimes = Vec::new();
        for name in ["one", "two"] {
            let config = FunctionConfig::new(name)
                .unwrap()
                .with_auto_register(false);
            let runtime = Arc::new(FunctionRuntime::new(config).unwrap());
            runtime.attach_sync_handler(|input| Ok(json!({ "echo": input })));
            runtime.start(0, "127.0.0.1").await.unwrap();
            coordinator.register(Arc::clone(&runtime)).await;
            runtimes.push(runtime);
        }

        coordinator.shutdown_all().await;

        for runtime in &runtimes {
            assert!(!runtime.is_serving().await);
        }
    }

    #[tokio::test]
    async fn shutdown_all_twice_is_safe() {
        let coordinator = ShutdownCoordinator::new();
        coordinator.shutdown_all().await;
        coordinator.shutdown_all().await;
    }
}
