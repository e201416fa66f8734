//! Deterministic access-control logic for a proximity-triggered kiosk.
//!
//! `kiosk-core` defines the canonical rules (proximity hysteresis, the check
//! delay, the access phases and the presentation they imply) as pure,
//! synchronous types. The async runtime drives these types once per frame and
//! owns everything that suspends, such as the credential lookup.
//!
//! State flows in one direction: [`ProximityMonitor`] detects a visit,
//! [`DelayTimer`] gates the lookup, and [`AccessStateMachine`] turns the lookup
//! result into a [`Phase`] from which [`PresentationIntent`] is derived.
pub mod access;
pub mod config;
pub mod credential;
pub mod error;
pub mod geometry;
pub mod presentation;
pub mod proximity;
pub mod timer;

pub use access::{AccessStateMachine, Phase, PhaseChange, TransitionError, Verdict};
pub use config::{KioskConfig, OracleFailurePolicy};
pub use credential::{ActorId, CredentialId, CredentialSet};
pub use error::ConfigError;
pub use geometry::Vec3;
pub use presentation::{DoorClip, DoorState, PresentationIntent, ScannerClip, SoundCue};
pub use proximity::{ProximityEvent, ProximityMonitor, TriggerFlags};
pub use timer::DelayTimer;
