//! One-shot delay measured in accumulated frame time.
use core::time::Duration;

/// Fires once after a fixed amount of elapsed time has been fed to it.
///
/// The timer sums the `delta` of every [`advance`](Self::advance) call, so it
/// is independent of the frame rate driving it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelayTimer {
    delay: Duration,
    elapsed: Duration,
    active: bool,
}

impl DelayTimer {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            active: false,
        }
    }

    /// Arms the timer from zero. Restarts the count if already armed.
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.active = true;
    }

    /// Disarms the timer without firing. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.elapsed = Duration::ZERO;
        was_active
    }

    /// Accumulates `delta` and returns `true` on the tick the delay is reached.
    ///
    /// Returns `true` at most once per [`start`](Self::start).
    pub fn advance(&mut self, delta: Duration) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.delay {
            self.active = false;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time left before the timer fires, or `None` when disarmed.
    pub fn remaining(&self) -> Option<Duration> {
        self.active.then(|| self.delay.saturating_sub(self.elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(3);

    #[test]
    fn fires_once_after_delay() {
        let mut timer = DelayTimer::new(DELAY);
        timer.start();

        assert!(!timer.advance(Duration::from_secs(1)));
        assert!(!timer.advance(Duration::from_secs(1)));
        assert!(timer.advance(Duration::from_secs(1)));
        assert!(!timer.is_active());

        // Inert until restarted.
        assert!(!timer.advance(Duration::from_secs(10)));
        assert!(!timer.advance(Duration::from_secs(10)));
    }

    #[test]
    fn frame_rate_independent() {
        let mut fast = DelayTimer::new(DELAY);
        let mut slow = DelayTimer::new(DELAY);
        fast.start();
        slow.start();

        let fast_fires = (0..300)
            .filter(|_| fast.advance(Duration::from_millis(12)))
            .count();
        let slow_fires = (0..10)
            .filter(|_| slow.advance(Duration::from_millis(500)))
            .count();

        assert_eq!(fast_fires, 1);
        assert_eq!(slow_fires, 1);
    }

    #[test]
    fn unarmed_timer_never_fires() {
        let mut timer = DelayTimer::new(DELAY);
        assert!(!timer.advance(Duration::from_secs(5)));
        assert_eq!(timer.remaining(), None);
    }

    #[test]
    fn restart_resets_the_count() {
        let mut timer = DelayTimer::new(DELAY);
        timer.start();
        assert!(!timer.advance(Duration::from_millis(2_500)));

        timer.start();
        assert!(!timer.advance(Duration::from_millis(2_500)));
        assert_eq!(timer.remaining(), Some(Duration::from_millis(500)));
        assert!(timer.advance(Duration::from_millis(500)));
    }

    #[test]
    fn cancel_disarms() {
        let mut timer = DelayTimer::new(DELAY);
        timer.start();
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.advance(DELAY));
    }
}
