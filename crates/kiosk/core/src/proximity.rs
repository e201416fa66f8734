//! Zone entry detection with hysteresis.
//!
//! The monitor is sampled once per frame with the actor's position. A visit
//! starts when the actor comes closer than the near threshold and ends only
//! once the actor is at or beyond [`KioskConfig::release_radius`], so standing
//! on the boundary cannot produce a stream of entries.
use bitflags::bitflags;

use crate::config::KioskConfig;
use crate::geometry::Vec3;

bitflags! {
    /// Per-visit trigger state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TriggerFlags: u8 {
        /// The actor is inside the zone and has already been scanned.
        const TRIGGERED          = 1 << 0;
        /// Access was granted during this visit; suppresses rescans.
        const GRANTED_THIS_VISIT = 1 << 1;
    }
}

/// Edge emitted by [`ProximityMonitor::sample`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProximityEvent {
    /// A new visit started.
    Entered { distance: f32 },
    /// The active visit ended.
    Exited { distance: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProximityMonitor {
    reference: Vec3,
    near_threshold: f32,
    release_radius: f32,
    flags: TriggerFlags,
}

impl ProximityMonitor {
    pub fn new(reference: Vec3, near_threshold: f32, far_threshold: f32) -> Self {
        Self {
            reference,
            near_threshold,
            release_radius: near_threshold.max(far_threshold),
            flags: TriggerFlags::empty(),
        }
    }

    pub fn from_config(config: &KioskConfig) -> Self {
        Self::new(
            config.scanner_position,
            config.near_threshold,
            config.far_threshold,
        )
    }

    /// Samples the actor position for the current frame.
    ///
    /// `None` (actor not spawned yet) leaves the monitor untouched.
    pub fn sample(&mut self, position: Option<Vec3>) -> Option<ProximityEvent> {
        let distance = position?.distance(&self.reference);

        if distance < self.near_threshold && self.flags.is_empty() {
            self.flags.insert(TriggerFlags::TRIGGERED);
            return Some(ProximityEvent::Entered { distance });
        }

        if distance >= self.release_radius && !self.flags.is_empty() {
            self.flags = TriggerFlags::empty();
            return Some(ProximityEvent::Exited { distance });
        }

        None
    }

    /// Records that access was granted, suppressing rescans until the actor
    /// leaves the zone. Ignored when no visit is active.
    pub fn mark_granted(&mut self) {
        if self.flags.contains(TriggerFlags::TRIGGERED) {
            self.flags.insert(TriggerFlags::GRANTED_THIS_VISIT);
        }
    }

    pub fn flags(&self) -> TriggerFlags {
        self.flags
    }

    pub fn is_triggered(&self) -> bool {
        self.flags.contains(TriggerFlags::TRIGGERED)
    }

    pub fn granted_this_visit(&self) -> bool {
        self.flags.contains(TriggerFlags::GRANTED_THIS_VISIT)
    }

    pub fn reference(&self) -> Vec3 {
        self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> ProximityMonitor {
        ProximityMonitor::new(Vec3::ZERO, 2.5, 2.0)
    }

    fn at(distance: f32) -> Option<Vec3> {
        Some(Vec3::new(distance, 0.0, 0.0))
    }

    #[test]
    fn enters_once_per_visit() {
        let mut monitor = monitor();

        assert_eq!(
            monitor.sample(at(1.0)),
            Some(ProximityEvent::Entered { distance: 1.0 })
        );
        for _ in 0..10 {
            assert_eq!(monitor.sample(at(1.0)), None);
        }
        assert!(monitor.is_triggered());
    }

    #[test]
    fn no_chatter_inside_the_band() {
        let mut monitor = monitor();
        let distances = [2.1, 2.4, 2.01, 2.49, 2.2, 2.3, 2.05, 2.45];

        let entries = distances
            .iter()
            .cycle()
            .take(200)
            .filter_map(|&d| monitor.sample(at(d)))
            .filter(|event| matches!(event, ProximityEvent::Entered { .. }))
            .count();

        assert_eq!(entries, 1);
    }

    #[test]
    fn no_chatter_with_outer_far_threshold() {
        let mut monitor = ProximityMonitor::new(Vec3::ZERO, 2.0, 3.0);

        assert!(matches!(
            monitor.sample(at(1.5)),
            Some(ProximityEvent::Entered { .. })
        ));
        for d in [2.5, 2.9, 2.1, 1.9, 2.99] {
            assert_eq!(monitor.sample(at(d)), None);
        }
        assert!(matches!(
            monitor.sample(at(3.0)),
            Some(ProximityEvent::Exited { .. })
        ));
    }

    #[test]
    fn exit_and_return_retriggers() {
        let mut monitor = monitor();

        assert!(monitor.sample(at(1.0)).is_some());
        assert_eq!(
            monitor.sample(at(2.5)),
            Some(ProximityEvent::Exited { distance: 2.5 })
        );
        assert!(monitor.flags().is_empty());
        assert!(matches!(
            monitor.sample(at(1.0)),
            Some(ProximityEvent::Entered { .. })
        ));
    }

    #[test]
    fn grant_outside_a_visit_is_ignored() {
        let mut monitor = monitor();
        monitor.mark_granted();
        assert!(monitor.flags().is_empty());
        assert!(matches!(
            monitor.sample(at(1.0)),
            Some(ProximityEvent::Entered { .. })
        ));
    }

    #[test]
    fn grant_suppresses_until_exit() {
        let mut monitor = monitor();
        monitor.sample(at(1.0));
        monitor.mark_granted();

        assert_eq!(monitor.sample(at(0.5)), None);
        assert!(monitor.granted_this_visit());

        assert!(matches!(
            monitor.sample(at(10.0)),
            Some(ProximityEvent::Exited { .. })
        ));
        assert!(!monitor.granted_this_visit());
        assert!(matches!(
            monitor.sample(at(1.0)),
            Some(ProximityEvent::Entered { .. })
        ));
    }

    #[test]
    fn missing_position_is_a_no_op() {
        let mut monitor = monitor();
        assert_eq!(monitor.sample(None), None);
        assert!(monitor.flags().is_empty());

        monitor.sample(at(1.0));
        assert_eq!(monitor.sample(None), None);
        assert!(monitor.is_triggered());
    }

    #[test]
    fn far_away_without_visit_is_silent() {
        let mut monitor = monitor();
        assert_eq!(monitor.sample(at(50.0)), None);
    }
}
