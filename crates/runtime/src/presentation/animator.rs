//! Reference sink modelled on a scene with two animated objects and a bank of
//! one-shot audio sources.
use std::collections::HashMap;

use kiosk_core::{DoorClip, PresentationIntent, ScannerClip, SoundCue};
use tracing::{debug, warn};

use super::{PresentationError, PresentationSink};

/// One clip slot of an [`Animator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationState {
    pub clip: String,
    pub playing: bool,
}

/// Set of mutually exclusive clips belonging to one animated object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animator {
    name: &'static str,
    states: Vec<AnimationState>,
}

impl Animator {
    pub fn new<I, S>(name: &'static str, clips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            states: clips
                .into_iter()
                .map(|clip| AnimationState {
                    clip: clip.into(),
                    playing: false,
                })
                .collect(),
        }
    }

    /// Clip currently playing, if any.
    pub fn playing(&self) -> Option<&str> {
        self.states
            .iter()
            .find(|state| state.playing)
            .map(|state| state.clip.as_str())
    }

    pub fn states(&self) -> &[AnimationState] {
        &self.states
    }

    /// Stops every clip, then starts `clip` when given.
    ///
    /// An unknown clip still stops the others; the error reports the miss.
    pub fn play_exclusive(&mut self, clip: Option<&str>) -> Result<(), PresentationError> {
        for state in &mut self.states {
            state.playing = false;
        }

        let Some(clip) = clip else {
            return Ok(());
        };

        let state = self
            .states
            .iter_mut()
            .find(|state| state.clip == clip)
            .ok_or_else(|| PresentationError::NoMatchingState {
                object: self.name,
                clip: clip.to_string(),
            })?;
        state.playing = true;
        Ok(())
    }
}

/// A non-looping audio clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    pub clip_url: String,
    pub playing: bool,
    /// Number of times playback was started.
    pub plays: u32,
}

/// Audio sources addressed by cue name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioBank {
    sources: HashMap<String, AudioSource>,
}

impl AudioBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, cue: impl Into<String>, clip_url: impl Into<String>) -> Self {
        self.sources.insert(
            cue.into(),
            AudioSource {
                clip_url: clip_url.into(),
                playing: false,
                plays: 0,
            },
        );
        self
    }

    pub fn source(&self, cue: &str) -> Option<&AudioSource> {
        self.sources.get(cue)
    }

    pub fn play(&mut self, cue: &str) -> Result<(), PresentationError> {
        let source =
            self.sources
                .get_mut(cue)
                .ok_or_else(|| PresentationError::NoMatchingSound {
                    cue: cue.to_string(),
                })?;
        source.playing = true;
        source.plays += 1;
        Ok(())
    }
}

/// Drives a scanner animator, a door animator and an audio bank.
///
/// Re-applying the intent that is already showing changes nothing, so a sound
/// is never restarted by a duplicate emission.
#[derive(Debug, Clone)]
pub struct AnimatorPresentation {
    scanner: Animator,
    door: Animator,
    audio: AudioBank,
    applied: Option<PresentationIntent>,
}

impl AnimatorPresentation {
    pub fn new(scanner: Animator, door: Animator, audio: AudioBank) -> Self {
        Self {
            scanner,
            door,
            audio,
            applied: None,
        }
    }

    /// Scanner, barrier and sound assets of the stock wearable-reader kiosk.
    pub fn kiosk_default() -> Self {
        Self::new(
            Animator::new(
                "scanner",
                [
                    ScannerClip::LaserAction,
                    ScannerClip::AllowAction,
                    ScannerClip::NotAllowAction,
                ]
                .map(ScannerClip::name),
            ),
            Animator::new("door", [DoorClip::Close, DoorClip::Open].map(DoorClip::name)),
            AudioBank::new()
                .with_source(SoundCue::Scanning.name(), "sounds/LaserHum.mp3")
                .with_source(SoundCue::Accept.name(), "sounds/accept.mp3")
                .with_source(SoundCue::Reject.name(), "sounds/access_denied.mp3"),
        )
    }

    pub fn scanner(&self) -> &Animator {
        &self.scanner
    }

    pub fn door(&self) -> &Animator {
        &self.door
    }

    pub fn audio(&self) -> &AudioBank {
        &self.audio
    }

    fn apply(&mut self, intent: &PresentationIntent) -> Vec<PresentationError> {
        let mut errors = Vec::new();

        let scanner_clip = intent.animation.map(ScannerClip::name);
        if let Err(e) = self.scanner.play_exclusive(scanner_clip) {
            errors.push(e);
        }

        let door_clip = intent.door.map(DoorClip::name);
        if let Err(e) = self.door.play_exclusive(door_clip) {
            errors.push(e);
        }

        if let Some(cue) = intent.sound
            && let Err(e) = self.audio.play(cue.name())
        {
            errors.push(e);
        }

        errors
    }
}

impl Default for AnimatorPresentation {
    fn default() -> Self {
        Self::kiosk_default()
    }
}

impl PresentationSink for AnimatorPresentation {
    fn apply_intent(&mut self, intent: &PresentationIntent) {
        if self.applied.as_ref() == Some(intent) {
            debug!(?intent, "intent already showing");
            return;
        }

        for error in self.apply(intent) {
            warn!(%error, "presentation state not found");
        }
        self.applied = Some(*intent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::Phase;

    fn playing_counts(sink: &AnimatorPresentation) -> (u32, u32, u32) {
        let plays = |cue: SoundCue| sink.audio().source(cue.name()).unwrap().plays;
        (
            plays(SoundCue::Scanning),
            plays(SoundCue::Accept),
            plays(SoundCue::Reject),
        )
    }

    #[test]
    fn clips_are_mutually_exclusive() {
        let mut sink = AnimatorPresentation::kiosk_default();

        sink.apply_intent(&PresentationIntent::for_phase(Phase::Checking));
        assert_eq!(sink.scanner().playing(), Some("Laser_Action"));
        assert_eq!(sink.door().playing(), None);

        sink.apply_intent(&PresentationIntent::for_phase(Phase::Granted));
        assert_eq!(sink.scanner().playing(), Some("Allow_Action"));
        assert_eq!(sink.door().playing(), Some("Open"));
        assert_eq!(
            sink.scanner()
                .states()
                .iter()
                .filter(|state| state.playing)
                .count(),
            1
        );

        sink.apply_intent(&PresentationIntent::for_phase(Phase::Idle));
        assert_eq!(sink.scanner().playing(), None);
        assert_eq!(sink.door().playing(), None);
    }

    #[test]
    fn duplicate_intent_is_harmless() {
        let mut sink = AnimatorPresentation::kiosk_default();
        let denied = PresentationIntent::for_phase(Phase::Denied);

        sink.apply_intent(&denied);
        let before = sink.clone();
        sink.apply_intent(&denied);

        assert_eq!(sink.scanner(), before.scanner());
        assert_eq!(sink.door(), before.door());
        assert_eq!(playing_counts(&sink), (0, 0, 1));
        assert_eq!(sink.door().playing(), Some("Close"));
    }

    #[test]
    fn each_new_intent_plays_its_sound_once() {
        let mut sink = AnimatorPresentation::kiosk_default();
        for phase in [Phase::Checking, Phase::Checking, Phase::Denied, Phase::Checking] {
            sink.apply_intent(&PresentationIntent::for_phase(phase));
        }
        assert_eq!(playing_counts(&sink), (2, 0, 1));
    }

    #[test]
    fn unknown_clip_is_reported_not_fatal() {
        let mut sink = AnimatorPresentation::new(
            Animator::new("scanner", ["Laser_Action"]),
            Animator::new("door", ["Close"]),
            AudioBank::new(),
        );

        let errors = sink.apply(&PresentationIntent::for_phase(Phase::Granted));
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&PresentationError::NoMatchingState {
            object: "door",
            clip: "Open".into(),
        }));
        assert_eq!(sink.scanner().playing(), None);

        // Still usable afterwards.
        sink.apply_intent(&PresentationIntent::for_phase(Phase::Checking));
        assert_eq!(sink.scanner().playing(), Some("Laser_Action"));
    }
}
