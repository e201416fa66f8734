//! Where the kiosk learns about the actor in front of it.
use std::time::Duration;

use kiosk_core::{ActorId, Vec3};

/// Per-frame view of the actor being evaluated.
///
/// Both accessors may return `None` while the actor has not spawned yet;
/// the kiosk treats that as "nothing to do" rather than an error.
pub trait ActorSource: Send {
    fn position(&self) -> Option<Vec3>;

    fn identity(&self) -> Option<ActorId>;

    /// Advances any internal motion by `delta`. Called once per tick before
    /// the kiosk samples the actor.
    fn advance(&mut self, _delta: Duration) {}
}

/// Actor whose position and identity are set explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticActor {
    position: Option<Vec3>,
    identity: Option<ActorId>,
}

impl StaticActor {
    pub fn new(identity: impl Into<ActorId>, position: Vec3) -> Self {
        Self {
            position: Some(position),
            identity: Some(identity.into()),
        }
    }

    /// An actor that has not spawned yet.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, position: Option<Vec3>) {
        self.position = position;
    }

    pub fn set_identity(&mut self, identity: Option<ActorId>) {
        self.identity = identity;
    }
}

impl ActorSource for StaticActor {
    fn position(&self) -> Option<Vec3> {
        self.position
    }

    fn identity(&self) -> Option<ActorId> {
        self.identity.clone()
    }
}
