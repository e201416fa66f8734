//! Presentation intent derived from the access phase.
//!
//! Intent is a pure function of [`Phase`]; nothing here is stored, so what the
//! scanner and barrier show can never drift from the logical state.
use crate::access::Phase;

/// Scanner animation clips.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScannerClip {
    #[strum(serialize = "Laser_Action")]
    LaserAction,
    #[strum(serialize = "Allow_Action")]
    AllowAction,
    #[strum(serialize = "NotAllow_Action")]
    NotAllowAction,
}

/// One-shot sound cues played by the scanner.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SoundCue {
    Scanning,
    Accept,
    Reject,
}

/// Barrier animation clips.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorClip {
    Open,
    Close,
}

impl ScannerClip {
    /// Name of the animation state in the scanner asset.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl DoorClip {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Logical barrier state implied by an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DoorState {
    Open,
    Closed,
}

/// Which clips should be active for a given phase. `None` means nothing of
/// that kind should be playing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresentationIntent {
    pub animation: Option<ScannerClip>,
    pub sound: Option<SoundCue>,
    pub door: Option<DoorClip>,
}

impl PresentationIntent {
    pub const IDLE: Self = Self {
        animation: None,
        sound: None,
        door: None,
    };

    pub const fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Idle => Self::IDLE,
            Phase::Checking => Self {
                animation: Some(ScannerClip::LaserAction),
                sound: Some(SoundCue::Scanning),
                door: None,
            },
            Phase::Granted => Self {
                animation: Some(ScannerClip::AllowAction),
                sound: Some(SoundCue::Accept),
                door: Some(DoorClip::Open),
            },
            Phase::Denied => Self {
                animation: Some(ScannerClip::NotAllowAction),
                sound: Some(SoundCue::Reject),
                door: Some(DoorClip::Close),
            },
        }
    }

    /// The barrier is open only while the open clip is intended.
    pub fn door_state(&self) -> DoorState {
        match self.door {
            Some(DoorClip::Open) => DoorState::Open,
            Some(DoorClip::Close) | None => DoorState::Closed,
        }
    }
}

impl From<Phase> for PresentationIntent {
    fn from(phase: Phase) -> Self {
        Self::for_phase(phase)
    }
}
