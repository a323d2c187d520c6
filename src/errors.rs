//! Custom error types for the agent function SDK
//!
//! Provides structured error handling with context for different failure scenarios.
//! Deregistration failures are deliberately absent: they are reported as a
//! boolean and logged, never raised.

use std::fmt;

/// Main error type for the SDK
#[derive(Debug)]
pub enum SdkError {
    /// Configuration-related errors (construction, missing handler)
    Config(ConfigError),

    /// Registration errors against the platform
    Registration(RegistrationError),

    /// Lifecycle state violations (double start, restart after stop)
    State(StateError),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Function name missing or empty at construction
    MissingName,

    /// start() called with no attached handler
    MissingHandler,

    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

/// Registration error variants
#[derive(Debug)]
pub enum RegistrationError {
    /// Connection to the platform failed
    ConnectionFailed { url: String, reason: String },

    /// Request timed out
    Timeout { url: String },

    /// Platform answered with an unexpected HTTP status
    UnexpectedStatus { status: u16, body: String },

    /// Response body did not carry `success: true` with a `data` object
    MalformedResponse { reason: String },
}

/// Lifecycle state error variants
#[derive(Debug)]
pub enum StateError {
    /// start() called while the listener is already serving
    AlreadyServing,

    /// start() called on a stopped instance; restart requires a new instance
    AlreadyStopped,

    /// A registration or deregistration call is already in flight
    RegistrationInFlight,
}

impl fmt::Display for SdkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdkError::Config(e) => write!(f, "Configuration error: {}", e),
            SdkError::Registration(e) => write!(f, "Registration error: {}", e),
            SdkError::State(e) => write!(f, "State error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingName => {
                write!(f, "Function name is required and must be non-empty")
            }
            ConfigError::MissingHandler => {
                write!(f, "No function handler attached; call attach_handler before start")
            }
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::ConnectionFailed { url, reason } => {
                write!(f, "Connection to {} failed: {}", url, reason)
            }
            RegistrationError::Timeout { url } => {
                write!(f, "Request to {} timed out", url)
            }
            RegistrationError::UnexpectedStatus { status, body } => {
                write!(f, "Platform returned status {}: {}", status, body)
            }
            RegistrationError::MalformedResponse { reason } => {
                write!(f, "Malformed platform response: {}", reason)
            }
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::AlreadyServing => {
                write!(f, "Listener is already serving; start() cannot be called twice")
            }
            StateError::AlreadyStopped => {
                write!(f, "Runtime was stopped; restart requires a new instance")
            }
            StateError::RegistrationInFlight => {
                write!(f, "A registration operation is already in flight")
            }
        }
    }
}

impl std::error::Error for SdkError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for RegistrationError {}
impl std::error::Error for StateError {}

impl From<ConfigError> for SdkError {
    fn from(err: ConfigError) -> Self {
        SdkError::Config(err)
    }
}

impl From<RegistrationError> for SdkError {
    fn from(err: RegistrationError) -> Self {
        SdkError::Registration(err)
    }
}

impl From<StateError> for SdkError {
    fn from(err: StateError) -> Self {
        SdkError::State(err)
    }
}
