//! Runtime orchestration for proximity-triggered access kiosks.
//!
//! This crate wires the pure [`kiosk_core`] logic to the outside world: the
//! credential oracle, the presentation sink, the actor being tracked, and a
//! background tick worker. Consumers either embed a [`Kiosk`] in their own
//! frame loop or start a [`Runtime`] and talk to it through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`kiosk`] hosts the session object and its tick function
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`], [`presentation`] and [`actor`] are the external seams
//! - [`scenario`] replays scripted actor movement
pub mod actor;
pub mod api;
pub mod events;
pub mod kiosk;
pub mod oracle;
pub mod presentation;
pub mod runtime;
pub mod scenario;

mod workers;

pub use actor::{ActorSource, StaticActor};
pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{AccessEvent, Event, EventBus, Topic, VisitEvent};
pub use kiosk::{CheckTicket, Kiosk, KioskStatus};
pub use oracle::{CredentialOracle, DelayedOracle, OracleError, StaticCredentialOracle};
pub use presentation::{
    AnimationState, Animator, AnimatorPresentation, AudioBank, AudioSource, NullPresentation,
    PresentationError, PresentationSink,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scenario::{Scenario, ScriptedActor, Waypoint};
