//! Kiosk configuration constants and tunable parameters.
use core::time::Duration;

use crate::credential::CredentialId;
use crate::error::ConfigError;
use crate::geometry::Vec3;

/// What the kiosk does when a credential lookup yields no usable data.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OracleFailurePolicy {
    /// Leave the phase in `Checking` until the actor starts a new visit.
    #[default]
    Stall,
    /// Fall back to `Denied` and close the barrier.
    Deny,
}

/// Static parameters of a single kiosk (scanner + barrier pair).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KioskConfig {
    /// Credential the actor must hold to be granted access.
    pub required_credential: CredentialId,
    /// Reference point distances are measured from.
    pub scanner_position: Vec3,
    /// An actor closer than this starts a visit.
    pub near_threshold: f32,
    /// An actor at or beyond this (or `near_threshold`, whichever is larger)
    /// ends the visit.
    pub far_threshold: f32,
    /// Scanning time between entering the zone and dispatching the lookup.
    pub check_delay: Duration,
    pub on_oracle_failure: OracleFailurePolicy,
}

impl KioskConfig {
    pub const DEFAULT_REQUIRED_CREDENTIAL: &'static str =
        "urn:decentraland:off-chain:base-avatars:m_sweater_02";
    pub const DEFAULT_SCANNER_POSITION: Vec3 = Vec3::new(7.0, 0.0, 11.0);
    pub const DEFAULT_NEAR_THRESHOLD: f32 = 2.5;
    pub const DEFAULT_FAR_THRESHOLD: f32 = 2.0;
    pub const DEFAULT_CHECK_DELAY: Duration = Duration::from_secs(3);

    pub fn new(required_credential: impl Into<CredentialId>) -> Self {
        Self {
            required_credential: required_credential.into(),
            ..Self::default()
        }
    }

    pub fn with_scanner_position(mut self, position: Vec3) -> Self {
        self.scanner_position = position;
        self
    }

    pub fn with_thresholds(mut self, near: f32, far: f32) -> Self {
        self.near_threshold = near;
        self.far_threshold = far;
        self
    }

    pub fn with_check_delay(mut self, delay: Duration) -> Self {
        self.check_delay = delay;
        self
    }

    pub fn with_failure_policy(mut self, policy: OracleFailurePolicy) -> Self {
        self.on_oracle_failure = policy;
        self
    }

    /// Distance at or beyond which the current visit ends.
    ///
    /// Never smaller than `near_threshold`, so a distance inside the band
    /// between the two thresholds can neither end a visit nor start a new one.
    pub fn release_radius(&self) -> f32 {
        self.near_threshold.max(self.far_threshold)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("near_threshold", self.near_threshold),
            ("far_threshold", self.far_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if self.check_delay.is_zero() {
            return Err(ConfigError::ZeroDelay);
        }
        if self.required_credential.as_str().is_empty() {
            return Err(ConfigError::EmptyCredential);
        }
        Ok(())
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            required_credential: CredentialId::new(Self::DEFAULT_REQUIRED_CREDENTIAL),
            scanner_position: Self::DEFAULT_SCANNER_POSITION,
            near_threshold: Self::DEFAULT_NEAR_THRESHOLD,
            far_threshold: Self::DEFAULT_FAR_THRESHOLD,
            check_delay: Self::DEFAULT_CHECK_DELAY,
            on_oracle_failure: OracleFailurePolicy::default(),
        }
    }
}
