//! SDK-wide constants for defaults, timeouts, and platform API paths.

use std::time::Duration;

/// HTTP client constants for outbound platform calls
pub mod http {
    use super::Duration;

    /// Timeout applied to every registration/deregistration/poll request
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Platform API paths
pub mod platform {
    /// Collection path for webhook function registrations
    pub const FUNCTIONS_PATH: &str = "/api/agent-functions";

    /// Collection path for legacy polling agents
    pub const AGENTS_PATH: &str = "/api/agents";
}

/// Default configuration values
pub mod defaults {
    use super::Duration;

    /// Conventional port for the function server. `start`/`run` always take
    /// the port explicitly; embedding applications pass this when they have
    /// no preference of their own.
    pub const PORT: u16 = 3001;

    /// Conventional host for the function server, advisory like [`PORT`].
    pub const HOST: &str = "localhost";

    /// Default base URL of the orchestration platform
    pub const PLATFORM_URL: &str = "http://localhost:3000";

    /// Default interval between legacy polling cycles
    pub const POLL_INTERVAL: Duration = Duration::from_secs(2);
}
