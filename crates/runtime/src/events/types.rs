//! Event type definitions for the kiosk event bus.

use kiosk_core::{ActorId, PhaseChange};
use serde::{Deserialize, Serialize};

use crate::kiosk::CheckTicket;

/// Visit boundaries reported by the proximity monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VisitEvent {
    /// An actor came within range and a scan started.
    ActorEntered { distance: f32 },
    /// The actor left the zone, ending the visit.
    ActorLeft { distance: f32 },
}

/// Credential check progress and phase transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccessEvent {
    PhaseChanged(PhaseChange),

    /// The scan delay elapsed and the lookup was handed to the oracle.
    CheckDispatched { ticket: CheckTicket, actor: ActorId },

    /// The lookup produced no usable data. `ticket` is `None` when the actor
    /// identity was unavailable and no lookup was attempted.
    CheckFailed {
        ticket: Option<CheckTicket>,
        reason: String,
    },

    /// A lookup completed after a newer visit superseded it.
    ResultDiscarded { ticket: CheckTicket },
}
