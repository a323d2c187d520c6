//! Client SDK for exposing functions as HTTP-reachable agents.
//!
//! Two usage models are supported. The webhook model starts a local HTTP
//! server with three fixed routes, registers its endpoint URL with the
//! orchestration platform, and unregisters on shutdown:
//!
//! ```no_run
//! use agent_functions::constants::defaults;
//! use agent_functions::{FunctionConfig, FunctionRuntime};
//! use serde_json::json;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = FunctionConfig::new("Echo")?
//!     .with_description("Echoes its input back")
//!     .with_capabilities(vec!["echo".to_string()]);
//!
//! let runtime = FunctionRuntime::new(config)?;
//! runtime.attach_handler(|input| async move { Ok(json!({ "echo": input })) });
//! runtime.run(defaults::PORT, defaults::HOST).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The legacy polling model fetches pending messages from the platform
//! instead of serving a webhook; see [`PollingAgent`].

pub mod config;
pub mod constants;
pub mod errors;
pub mod handler;
pub mod http;
pub mod logging;
pub mod polling;
pub mod registration;
pub mod runtime;
pub mod shutdown;
pub mod web;

// Re-export commonly used types
pub use config::{FunctionConfig, FunctionIdentity, RuntimeConfig};
pub use errors::{ConfigError, RegistrationError, SdkError, StateError};
pub use handler::HandlerSlot;
pub use http::PlatformClient;
pub use logging::init_tracing;
pub use polling::PollingAgent;
pub use registration::{RegistrationRecord, RegistrationState};
pub use runtime::FunctionRuntime;
pub use shutdown::ShutdownCoordinator;
