//! Explicit registration state machine.
//!
//! The platform allows at most one live registration per runtime instance.
//! Instead of a bare optional id, transitions are guarded so re-entrant
//! register/unregister calls are rejected while one is in flight.

use crate::errors::StateError;

/// Local record of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    /// Platform-assigned function identifier
    pub function_id: String,
    /// Endpoint URL the platform was told to call
    pub endpoint: String,
}

/// Registration lifecycle for one runtime instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegistrationState {
    #[default]
    Unregistered,
    Registering,
    Registered(RegistrationRecord),
    Unregistering(RegistrationRecord),
}

impl RegistrationState {
    pub fn record(&self) -> Option<&RegistrationRecord> {
        match self {
            RegistrationState::Registered(record)
            | RegistrationState::Unregistering(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, RegistrationState::Registered(_))
    }

    /// Unregistered -> Registering. Rejected while a call is in flight or a
    /// live record exists.
    pub fn begin_register(&mut self) -> Result<(), StateError> {
        match self {
            RegistrationState::Unregistered => {
                *self = RegistrationState::Registering;
                Ok(())
            }
            _ => Err(StateError::RegistrationInFlight),
        }
    }

    /// Registering -> Registered.
    pub fn complete_register(&mut self, record: RegistrationRecord) {
        debug_assert!(matches!(self, RegistrationState::Registering));
        *self = RegistrationState::Registered(record);
    }

    /// Registering -> Unregistered, after a failed registration call.
    pub fn fail_register(&mut self) {
        debug_assert!(matches!(self, RegistrationState::Registering));
        *self = RegistrationState::Unregistered;
    }

    /// Registered -> Unregistering, handing the record to the caller.
    ///
    /// Returns `None` when there is nothing to unregister; callers report
    /// that as a boolean failure, never as an error.
    pub fn begin_unregister(&mut self) -> Option<RegistrationRecord> {
        match self {
            RegistrationState::Registered(record) => {
                let record = record.clone();
                *self = RegistrationState::Unregistering(record.clone());
                Some(record)
            }
            _ => None,
        }
    }

    /// Unregistering -> Unregistered.
    pub fn complete_unregister(&mut self) {
        *self = RegistrationState::Unregistered;
    }

    /// Unregistering -> Registered. The record is retained so a later stop()
    /// attempts deregistration again; the platform treats repeat deletes
    /// idempotently.
    pub fn fail_unregister(&mut self) {
        if let RegistrationState::Unregistering(record) = self {
            *self = RegistrationState::Registered(record.clone());
        }
    }
}
