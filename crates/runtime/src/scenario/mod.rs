//! Scripted actor movement.
//!
//! A scenario describes where an actor is over time as a list of waypoints.
//! Positions are interpolated linearly between consecutive waypoints; a
//! waypoint without a position means the actor is not spawned from that point
//! until the next waypoint.
//!
//! Scenarios can be written in RON:
//!
//! ```ron
//! (
//!     actor: Some("visitor"),
//!     waypoints: [
//!         (at: 0.0, position: Some((x: 13.0, y: 0.0, z: 11.0))),
//!         (at: 2.0, position: Some((x: 8.0, y: 0.0, z: 11.0))),
//!         (at: 8.0, position: Some((x: 8.0, y: 0.0, z: 11.0))),
//!         (at: 10.0, position: Some((x: 13.0, y: 0.0, z: 11.0))),
//!     ],
//! )
//! ```
use std::path::Path;
use std::time::Duration;

use kiosk_core::{ActorId, Vec3};
use serde::{Deserialize, Serialize};

use crate::actor::ActorSource;
use crate::api::{Result, RuntimeError};

/// Actor position at a point in time (seconds since the scenario started).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub at: f32,
    pub position: Option<Vec3>,
}

impl Waypoint {
    pub fn new(at: f32, position: Option<Vec3>) -> Self {
        Self { at, position }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub actor: Option<ActorId>,
    pub waypoints: Vec<Waypoint>,
}

impl Scenario {
    /// Creates a scenario; waypoints are sorted by time.
    pub fn new(actor: Option<ActorId>, mut waypoints: Vec<Waypoint>) -> Self {
        waypoints.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { actor, waypoints }
    }

    /// Walks up to `scanner`, stands in front of it for `dwell`, then leaves.
    pub fn walk_in_and_out(actor: impl Into<ActorId>, scanner: Vec3, dwell: Duration) -> Self {
        const APPROACH: f32 = 2.0;
        let outside = Vec3::new(scanner.x + 6.0, scanner.y, scanner.z);
        let in_front = Vec3::new(scanner.x + 1.0, scanner.y, scanner.z);
        let leave_at = APPROACH + dwell.as_secs_f32();

        Self::new(
            Some(actor.into()),
            vec![
                Waypoint::new(0.0, Some(outside)),
                Waypoint::new(APPROACH, Some(in_front)),
                Waypoint::new(leave_at, Some(in_front)),
                Waypoint::new(leave_at + APPROACH, Some(outside)),
            ],
        )
    }

    /// Parses a RON scenario and rejects invalid waypoint times.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let scenario: Self = ron::from_str(source)?;
        scenario.validate()?;
        Ok(Self::new(scenario.actor, scenario.waypoints))
    }

    /// Waypoint times must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        match self
            .waypoints
            .iter()
            .find(|waypoint| !waypoint.at.is_finite() || waypoint.at < 0.0)
        {
            Some(waypoint) => Err(RuntimeError::InvalidWaypoint { at: waypoint.at }),
            None => Ok(()),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| RuntimeError::ScenarioIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Time of the last waypoint.
    pub fn duration(&self) -> Duration {
        self.waypoints
            .last()
            .map(|waypoint| {
                Duration::try_from_secs_f32(waypoint.at.max(0.0)).unwrap_or(Duration::MAX)
            })
            .unwrap_or_default()
    }

    /// Actor position `elapsed` into the scenario.
    pub fn position_at(&self, elapsed: Duration) -> Option<Vec3> {
        let t = elapsed.as_secs_f32();
        let next = self.waypoints.iter().position(|waypoint| waypoint.at > t);

        match next {
            // Before the first waypoint: hold its position.
            Some(0) => self.waypoints[0].position,
            Some(index) => {
                let from = &self.waypoints[index - 1];
                let to = &self.waypoints[index];
                match (from.position, to.position) {
                    (Some(a), Some(b)) => {
                        let span = to.at - from.at;
                        Some(a.lerp(&b, (t - from.at) / span))
                    }
                    (position, _) => position,
                }
            }
            None => self.waypoints.last().and_then(|waypoint| waypoint.position),
        }
    }

    pub fn into_actor(self) -> ScriptedActor {
        ScriptedActor {
            scenario: self,
            elapsed: Duration::ZERO,
        }
    }
}

/// [`ActorSource`] that replays a [`Scenario`] as time advances.
#[derive(Clone, Debug)]
pub struct ScriptedActor {
    scenario: Scenario,
    elapsed: Duration,
}

impl ScriptedActor {
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.scenario.duration()
    }
}

impl ActorSource for ScriptedActor {
    fn position(&self) -> Option<Vec3> {
        self.scenario.position_at(self.elapsed)
    }

    fn identity(&self) -> Option<ActorId> {
        self.scenario.actor.clone()
    }

    fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn close(a: Option<Vec3>, b: Vec3) -> bool {
        a.is_some_and(|a| a.distance(&b) < 1e-4)
    }

    #[test]
    fn interpolates_between_waypoints() {
        let scenario = Scenario::walk_in_and_out("v", Vec3::ZERO, Duration::from_secs(4));

        assert!(close(scenario.position_at(Duration::ZERO), Vec3::new(6.0, 0.0, 0.0)));
        assert!(close(
            scenario.position_at(Duration::from_secs(1)),
            Vec3::new(3.5, 0.0, 0.0)
        ));
        assert!(close(
            scenario.position_at(Duration::from_secs(4)),
            Vec3::new(1.0, 0.0, 0.0)
        ));
        assert!(close(
            scenario.position_at(Duration::from_secs(60)),
            Vec3::new(6.0, 0.0, 0.0)
        ));
        assert_eq!(scenario.duration(), Duration::from_secs(8));
    }

    #[test]
    fn non_finite_waypoint_times_are_rejected() {
        for at in [f32::INFINITY, f32::NAN, -1.0] {
            let scenario = Scenario::new(None, vec![Waypoint::new(at, None)]);
            assert!(
                matches!(scenario.validate(), Err(RuntimeError::InvalidWaypoint { .. })),
                "at: {at} should be rejected"
            );
        }

        let source = "(actor: None, waypoints: [(at: -1.0, position: None)])";
        assert!(matches!(
            Scenario::from_ron_str(source),
            Err(RuntimeError::InvalidWaypoint { .. })
        ));
    }

    #[test]
    fn unbounded_scenario_duration_saturates() {
        let scenario = Scenario::new(None, vec![Waypoint::new(f32::INFINITY, None)]);
        assert_eq!(scenario.duration(), Duration::MAX);
    }

    #[test]
    fn missing_position_means_not_spawned() {
        let scenario = Scenario::new(
            Some("v".into()),
            vec![
                Waypoint::new(2.0, Some(Vec3::ZERO)),
                Waypoint::new(0.0, None),
            ],
        );

        assert_eq!(scenario.position_at(Duration::from_secs(1)), None);
        assert_eq!(scenario.position_at(Duration::from_secs(3)), Some(Vec3::ZERO));
    }

    #[test]
    fn scripted_actor_follows_elapsed_time() {
        let mut actor =
            Scenario::walk_in_and_out("visitor", Vec3::ZERO, Duration::from_secs(1)).into_actor();
        assert_eq!(actor.identity(), Some(ActorId::new("visitor")));

        for _ in 0..20 {
            actor.advance(Duration::from_millis(100));
        }
        assert!(close(actor.position(), Vec3::new(1.0, 0.0, 0.0)));
        assert!(!actor.is_finished());

        actor.advance(Duration::from_secs(10));
        assert!(actor.is_finished());
    }

    #[test]
    fn loads_from_ron_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                actor: Some("visitor"),
                waypoints: [
                    (at: 1.0, position: Some((x: 1.0, y: 0.0, z: 0.0))),
                    (at: 0.0, position: None),
                ],
            )"#
        )
        .unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.actor, Some(ActorId::new("visitor")));
        assert_eq!(scenario.waypoints[0].at, 0.0);
        assert_eq!(scenario.duration(), Duration::from_secs(1));
    }

    #[test]
    fn reports_unreadable_files() {
        let err = Scenario::load("/nonexistent/kiosk/scenario.ron").unwrap_err();
        assert!(matches!(err, RuntimeError::ScenarioIo { .. }));

        let err = Scenario::from_ron_str("(actor: 5)").unwrap_err();
        assert!(matches!(err, RuntimeError::ScenarioParse(_)));
    }
}
