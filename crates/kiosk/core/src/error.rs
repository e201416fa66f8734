//! Configuration errors for kiosk-core.
//!
//! Transition errors live next to the state machine that raises them
//! ([`crate::access::TransitionError`]); this module only covers values that
//! are rejected before a kiosk is ever constructed.

/// Invalid [`crate::KioskConfig`] values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a finite, positive distance (got {value})")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("check delay must be greater than zero")]
    ZeroDelay,

    #[error("required credential must not be empty")]
    EmptyCredential,
}
