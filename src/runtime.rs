//! Lifecycle of one locally hosted agent function.
//!
//! A runtime owns the HTTP listener for the three function routes, the
//! attached handler, and the registration record against the platform. The
//! listener is either idle, serving, or stopped; it never re-enters serving,
//! so a restart requires a new instance.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::{FunctionConfig, FunctionIdentity, RuntimeConfig};
use crate::errors::{ConfigError, SdkError, StateError};
use crate::handler::HandlerSlot;
use crate::http::PlatformClient;
use crate::registration::{RegistrationRecord, RegistrationState};
use crate::shutdown::wait_for_termination_signal;
use crate::web::{create_router, AppState};

#[derive(Debug)]
enum ListenerState {
    Idle,
    Serving(ServerHandle),
    Stopped,
}

#[derive(Debug)]
struct ServerHandle {
    addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Runtime hosting one agent function.
#[derive(Debug)]
pub struct FunctionRuntime {
    identity: Arc<FunctionIdentity>,
    config: RuntimeConfig,
    handler: HandlerSlot,
    platform: PlatformClient,
    registration: Mutex<RegistrationState>,
    listener: Mutex<ListenerState>,
    endpoint: Mutex<Option<String>>,
}

impl FunctionRuntime {
    /// Creates a runtime from a validated configuration.
    ///
    /// Unlike earlier revisions, construction installs no process-signal
    /// listeners; signal handling belongs to the
    /// [`ShutdownCoordinator`](crate::shutdown::ShutdownCoordinator) or to
    /// [`run`](Self::run).
    pub fn new(config: FunctionConfig) -> Result<Self, ConfigError> {
        if config.name.trim().is_empty() {
            return Err(ConfigError::MissingName);
        }

        let platform = PlatformClient::new(config.runtime.platform_url.clone());

        Ok(Self {
            identity: Arc::new(config.identity()),
            config: config.runtime,
            handler: HandlerSlot::new(),
            platform,
            registration: Mutex::new(RegistrationState::default()),
            listener: Mutex::new(ListenerState::Idle),
            endpoint: Mutex::new(None),
        })
    }

    pub fn identity(&self) -> &FunctionIdentity {
        &self.identity
    }

    /// Attaches an asynchronous handler, replacing any previous one. Takes
    /// effect for all executions received after this call returns.
    pub fn attach_handler<F, Fut>(&self, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.handler.attach(handler);
    }

    /// Attaches a synchronous handler, replacing any previous one.
    pub fn attach_sync_handler<F>(&self, handler: F)
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.handler.attach_sync(handler);
    }

    /// Starts serving the function routes on `host:port`.
    ///
    /// Requires an attached handler; fails without binding a socket
    /// otherwise. When auto-register is enabled, one registration call is
    /// made first; its failure is logged and swallowed, and the server starts
    /// regardless. Resolves with the bound address once the listener accepts
    /// connections. Calling start on a serving or stopped runtime is a fatal
    /// state error.
    pub async fn start(&self, port: u16, host: &str) -> Result<SocketAddr> {
        let mut listener_state = self.listener.lock().await;
        match *listener_state {
            ListenerState::Idle => {}
            ListenerState::Serving(_) => return Err(SdkError::from(StateError::AlreadyServing).into()),
            ListenerState::Stopped => return Err(SdkError::from(StateError::AlreadyStopped).into()),
        }

        if !self.handler.is_attached() {
            return Err(SdkError::from(ConfigError::MissingHandler).into());
        }

        if self.config.auto_register {
            if let Err(e) = self.register_with_platform(host, port).await {
                warn!(
                    "Registration failed for '{}': {}. Serving without registration.",
                    self.identity.name, e
                );
            }
        }

        let listener = TcpListener::bind(format!("{}:{}", host, port)).await?;
        let addr = listener.local_addr()?;

        let app = create_router(AppState::new(
            Arc::clone(&self.identity),
            self.handler.clone(),
        ));

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let name = self.identity.name.clone();
        let task = tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.changed().await;
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!("Function server for '{}' failed: {}", name, e);
            }
        });

        info!(
            "Function server for '{}' listening on {}",
            self.identity.name, addr
        );

        *listener_state = ListenerState::Serving(ServerHandle {
            addr,
            shutdown: shutdown_tx,
            task,
        });

        Ok(addr)
    }

    /// Registers this function's endpoint with the platform.
    ///
    /// The endpoint URL `http://{host}:{port}/execute` is computed once and
    /// reused afterwards. Re-entrant calls while a registration exists or is
    /// in flight are rejected. Returns the platform's response body.
    pub async fn register_with_platform(&self, host: &str, port: u16) -> Result<Value, SdkError> {
        let endpoint = {
            let mut endpoint = self.endpoint.lock().await;
            endpoint
                .get_or_insert_with(|| format!("http://{}:{}/execute", host, port))
                .clone()
        };

        self.registration.lock().await.begin_register()?;

        // The lock is not held across the call; the Registering state keeps
        // the operation single-flight.
        match self.platform.register(&self.identity, &endpoint).await {
            Ok(response) => {
                self.registration
                    .lock()
                    .await
                    .complete_register(RegistrationRecord {
                        function_id: response.function_id,
                        endpoint,
                    });
                Ok(response.body)
            }
            Err(e) => {
                self.registration.lock().await.fail_register();
                Err(e.into())
            }
        }
    }

    /// Removes this function's registration from the platform.
    ///
    /// Without a registration on record this is a no-op reporting `false`.
    /// Failures are logged and reported as `false`; the record is retained so
    /// a later call retries.
    pub async fn unregister_from_platform(&self) -> bool {
        let record = self.registration.lock().await.begin_unregister();
        let Some(record) = record else {
            warn!(
                "No registration on record for '{}'; nothing to unregister",
                self.identity.name
            );
            return false;
        };

        if self.platform.unregister(&record.function_id).await {
            self.registration.lock().await.complete_unregister();
            true
        } else {
            self.registration.lock().await.fail_unregister();
            false
        }
    }

    /// Stops the listener and performs best-effort deregistration.
    ///
    /// Idempotent: calling stop when never started, or a second time, is a
    /// safe no-op with respect to the listener and never raises. When
    /// auto-register is enabled and an identifier is on record, one
    /// deregistration attempt is made; its failure is logged only, and the
    /// record is kept so another stop() retries.
    pub async fn stop(&self) {
        let handle = {
            let mut listener_state = self.listener.lock().await;
            match std::mem::replace(&mut *listener_state, ListenerState::Stopped) {
                ListenerState::Serving(handle) => Some(handle),
                ListenerState::Idle => {
                    // Never started; leave it startable.
                    *listener_state = ListenerState::Idle;
                    None
                }
                ListenerState::Stopped => None,
            }
        };

        if let Some(handle) = handle {
            let _ = handle.shutdown.send(true);
            if let Err(e) = handle.task.await {
                warn!("Function server task ended abnormally: {}", e);
            }
            info!(
                "Function server for '{}' stopped ({})",
                self.identity.name, handle.addr
            );
        }

        if self.config.auto_register {
            let has_record = self.registration.lock().await.record().is_some();
            if has_record && !self.unregister_from_platform().await {
                warn!(
                    "Deregistration failed for '{}'; record retained for retry",
                    self.identity.name
                );
            }
        }
    }

    /// Convenience loop: start, wait for SIGINT/SIGTERM, stop.
    ///
    /// Returns control to the caller after shutdown; exiting the process is
    /// the embedding application's decision, never the library's.
    pub async fn run(&self, port: u16, host: &str) -> Result<()> {
        self.start(port, host).await?;
        wait_for_termination_signal().await;
        info!(
            "Termination signal received; shutting down '{}'",
            self.identity.name
        );
        self.stop().await;
        Ok(())
    }

    /// Address the listener is bound to while serving.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        match &*self.listener.lock().await {
            ListenerState::Serving(handle) => Some(handle.addr),
            _ => None,
        }
    }

    pub async fn is_serving(&self) -> bool {
        matches!(&*self.listener.lock().await, ListenerState::Serving(_))
    }

    /// Platform-assigned identifier of the live registration, if any.
    pub async fn registration_id(&self) -> Option<String> {
        self.registration
            .lock()
            .await
            .record()
            .map(|record| record.function_id.clone())
    }
}
