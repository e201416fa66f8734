//! Presentation sinks: where the kiosk's intent turns into animation and audio.
//!
//! The kiosk pushes a [`PresentationIntent`] on every phase change. Sinks are
//! fire-and-forget and must tolerate receiving the same intent twice.
mod animator;

use kiosk_core::PresentationIntent;
use thiserror::Error;

pub use animator::{AnimationState, Animator, AnimatorPresentation, AudioBank, AudioSource};

/// Failures while mapping intent onto concrete engine objects.
///
/// These are logged by the sink; the kiosk keeps advancing its own phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    #[error("{object} has no animation state named {clip:?}")]
    NoMatchingState { object: &'static str, clip: String },

    #[error("no audio source registered for cue {cue:?}")]
    NoMatchingSound { cue: String },
}

/// Consumer of presentation intent.
pub trait PresentationSink: Send {
    fn apply_intent(&mut self, intent: &PresentationIntent);
}

impl<F> PresentationSink for F
where
    F: FnMut(&PresentationIntent) + Send,
{
    fn apply_intent(&mut self, intent: &PresentationIntent) {
        self(intent)
    }
}

/// Sink that only traces intent; useful for headless kiosks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresentation;

impl PresentationSink for NullPresentation {
    fn apply_intent(&mut self, intent: &PresentationIntent) {
        tracing::trace!(?intent, "presentation intent ignored");
    }
}
