//! Access phases and the transitions between them.
//!
//! ```text
//! Idle ──begin_check──▶ Checking ──resolve──▶ Granted | Denied
//!                          │
//!                          ├──fail(Deny)──▶ Denied
//!                          ├──fail(Stall)─▶ (stays Checking)
//!                          └──abandon────▶ Idle
//! ```
//!
//! `begin_check` is accepted from every phase: a new visit always restarts the
//! cycle. The machine never talks to the identity service itself; the caller
//! performs the lookup and reports its outcome.
use crate::config::OracleFailurePolicy;
use crate::credential::{CredentialId, CredentialSet};
use crate::presentation::PresentationIntent;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Checking,
    Granted,
    Denied,
}

impl Phase {
    /// Whether the phase is the end of a check cycle.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Granted | Self::Denied)
    }
}

/// Outcome of a successful credential lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Granted,
    Denied,
}

impl Verdict {
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Granted => Phase::Granted,
            Self::Denied => Phase::Denied,
        }
    }
}

/// A phase transition together with the intent the new phase implies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    pub intent: PresentationIntent,
}

impl PhaseChange {
    /// Verdict reached by this transition, if it ended a check.
    pub const fn verdict(&self) -> Option<Verdict> {
        match self.to {
            Phase::Granted => Some(Verdict::Granted),
            Phase::Denied => Some(Verdict::Denied),
            Phase::Idle | Phase::Checking => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("no check in progress (phase is {phase})")]
    NotChecking { phase: Phase },
}

/// Access state for a single kiosk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessStateMachine {
    required: CredentialId,
    phase: Phase,
    last_credentials: CredentialSet,
}

impl AccessStateMachine {
    pub fn new(required: CredentialId) -> Self {
        Self {
            required,
            phase: Phase::Idle,
            last_credentials: CredentialSet::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn required(&self) -> &CredentialId {
        &self.required
    }

    /// Credentials observed by the most recent successful lookup.
    pub fn last_credentials(&self) -> &CredentialSet {
        &self.last_credentials
    }

    pub fn intent(&self) -> PresentationIntent {
        PresentationIntent::for_phase(self.phase)
    }

    /// Starts a check cycle. The previous snapshot is discarded.
    pub fn begin_check(&mut self) -> PhaseChange {
        self.last_credentials = CredentialSet::new();
        self.transition(Phase::Checking)
    }

    /// Applies a successful lookup: `Granted` iff the required credential is
    /// in `credentials`, `Denied` otherwise.
    pub fn resolve(
        &mut self,
        credentials: CredentialSet,
    ) -> Result<PhaseChange, TransitionError> {
        self.ensure_checking()?;

        let verdict = if credentials.contains(&self.required) {
            Verdict::Granted
        } else {
            Verdict::Denied
        };
        self.last_credentials = credentials;
        Ok(self.transition(verdict.phase()))
    }

    /// Applies a failed lookup according to `policy`.
    ///
    /// Returns the transition taken, or `None` when the policy leaves the
    /// machine in `Checking`.
    pub fn fail(
        &mut self,
        policy: OracleFailurePolicy,
    ) -> Result<Option<PhaseChange>, TransitionError> {
        self.ensure_checking()?;

        Ok(match policy {
            OracleFailurePolicy::Stall => None,
            OracleFailurePolicy::Deny => Some(self.transition(Phase::Denied)),
        })
    }

    /// Returns to `Idle` when a visit ends before its lookup was dispatched.
    pub fn abandon(&mut self) -> Option<PhaseChange> {
        (self.phase == Phase::Checking).then(|| self.transition(Phase::Idle))
    }

    fn ensure_checking(&self) -> Result<(), TransitionError> {
        if self.phase == Phase::Checking {
            Ok(())
        } else {
            Err(TransitionError::NotChecking { phase: self.phase })
        }
    }

    fn transition(&mut self, to: Phase) -> PhaseChange {
        let from = self.phase;
        self.phase = to;
        PhaseChange {
            from,
            to,
            intent: PresentationIntent::for_phase(to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{DoorState, ScannerClip};

    const SWEATER: &str = "urn:decentraland:off-chain:base-avatars:m_sweater_02";

    fn machine() -> AccessStateMachine {
        AccessStateMachine::new(CredentialId::new(SWEATER))
    }

    #[test]
    fn grants_when_required_credential_is_held() {
        let mut machine = machine();
        let change = machine.begin_check();
        assert_eq!(change.from, Phase::Idle);
        assert_eq!(change.to, Phase::Checking);
        assert_eq!(change.intent.animation, Some(ScannerClip::LaserAction));

        let held: CredentialSet = ["urn:hat", SWEATER].into_iter().collect();
        let change = machine.resolve(held.clone()).unwrap();
        assert_eq!(change.from, Phase::Checking);
        assert_eq!(change.verdict(), Some(Verdict::Granted));
        assert_eq!(machine.phase(), Phase::Granted);
        assert_eq!(machine.intent().door_state(), DoorState::Open);
        assert_eq!(machine.last_credentials(), &held);
    }

    #[test]
    fn denies_when_required_credential_is_missing() {
        let mut machine = machine();
        machine.begin_check();

        let held: CredentialSet = ["urn:hat"].into_iter().collect();
        let change = machine.resolve(held).unwrap();
        assert_eq!(change.verdict(), Some(Verdict::Denied));
        assert_eq!(machine.phase(), Phase::Denied);
        assert_eq!(machine.intent().door_state(), DoorState::Closed);
    }

    #[test]
    fn resolution_is_deterministic() {
        for held in [
            CredentialSet::new(),
            [SWEATER].into_iter().collect(),
            ["a", "b", "c"].into_iter().collect::<CredentialSet>(),
        ] {
            let expected = held.contains(&CredentialId::new(SWEATER));
            for _ in 0..3 {
                let mut machine = machine();
                machine.begin_check();
                let verdict = machine.resolve(held.clone()).unwrap().verdict();
                assert!(machine.phase().is_terminal());
                assert_eq!(verdict == Some(Verdict::Granted), expected);
            }
        }
    }

    #[test]
    fn resolve_outside_checking_is_rejected() {
        let mut machine = machine();
        assert_eq!(
            machine.resolve(CredentialSet::new()),
            Err(TransitionError::NotChecking { phase: Phase::Idle })
        );

        machine.begin_check();
        machine.resolve(CredentialSet::new()).unwrap();
        assert_eq!(
            machine.resolve(CredentialSet::new()),
            Err(TransitionError::NotChecking {
                phase: Phase::Denied
            })
        );
    }

    #[test]
    fn failure_policy() {
        let mut stalled = machine();
        stalled.begin_check();
        assert_eq!(stalled.fail(OracleFailurePolicy::Stall), Ok(None));
        assert_eq!(stalled.phase(), Phase::Checking);

        let mut denied = machine();
        denied.begin_check();
        let change = denied.fail(OracleFailurePolicy::Deny).unwrap().unwrap();
        assert_eq!(change.to, Phase::Denied);
        assert_eq!(change.verdict(), Some(Verdict::Denied));
        assert_eq!(denied.phase(), Phase::Denied);
    }

    #[test]
    fn new_visit_clears_snapshot() {
        let mut machine = machine();
        machine.begin_check();
        machine.resolve([SWEATER].into_iter().collect()).unwrap();
        assert_eq!(machine.last_credentials().len(), 1);

        let change = machine.begin_check();
        assert_eq!(change.from, Phase::Granted);
        assert!(machine.last_credentials().is_empty());
    }

    #[test]
    fn abandon_only_from_checking() {
        let mut machine = machine();
        assert_eq!(machine.abandon(), None);

        machine.begin_check();
        let change = machine.abandon().unwrap();
        assert_eq!(change.to, Phase::Idle);
        assert_eq!(change.intent, PresentationIntent::IDLE);
    }
}
