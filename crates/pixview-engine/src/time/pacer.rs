use std::time::{Duration, Instant};

/// Paces a loop to a fixed rate without accumulating drift.
///
/// Deadlines advance by exactly one period; if the loop falls more than one period
/// behind, the schedule restarts from now instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    next: Instant,
}

impl FramePacer {
    /// `fps` is clamped to at least 1.
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            next: Instant::now(),
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next deadline, advancing the schedule.
    pub fn advance(&mut self, now: Instant) -> Duration {
        self.next += self.period;
        if self.next + self.period < now {
            self.next = now;
        }
        self.next.saturating_duration_since(now)
    }

    /// Sleeps until the next deadline.
    pub fn wait(&mut self) {
        let remaining = self.advance(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_follows_fps() {
        assert_eq!(FramePacer::new(50).period(), Duration::from_millis(20));
        assert_eq!(FramePacer::new(0).period(), Duration::from_secs(1));
    }

    #[test]
    fn on_schedule_waits_one_period() {
        let mut p = FramePacer::new(10);
        let start = p.next;
        assert_eq!(p.advance(start), Duration::from_millis(100));
    }

    #[test]
    fn far_behind_schedule_resets_instead_of_bursting() {
        let mut p = FramePacer::new(10);
        let late = p.next + Duration::from_secs(5);
        assert_eq!(p.advance(late), Duration::ZERO);
        assert_eq!(p.advance(late), Duration::from_millis(100));
    }
}
