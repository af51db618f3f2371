use std::time::Duration;

/// A recurring firing owned by the controller. Dropping the handle cancels it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Periodic {
    next: Duration,
    period: Duration,
}

impl Periodic {
    /// First firing one period after `now`, like a repeating UI timer.
    pub(crate) fn every(now: Duration, period: Duration) -> Periodic {
        Periodic::after_delay(now, Duration::ZERO, period)
    }

    /// Waits `delay` before arming, then fires every `period`.
    pub(crate) fn after_delay(now: Duration, delay: Duration, period: Duration) -> Periodic {
        debug_assert!(period > Duration::ZERO);
        Periodic {
            next: now + delay + period,
            period,
        }
    }

    pub(crate) fn next_deadline(&self) -> Duration {
        self.next
    }

    /// Deadline of the pending firing if it is due at `now`
    pub(crate) fn due(&self, now: Duration) -> Option<Duration> {
        if self.next <= now {
            Some(self.next)
        } else {
            None
        }
    }

    pub(crate) fn fire(&mut self) {
        self.next += self.period;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn fires_one_period_after_creation() {
        let mut p = Periodic::every(Duration::from_secs(10), SECOND);
        assert_eq!(p.due(Duration::from_millis(10_999)), None);
        assert_eq!(p.due(Duration::from_secs(11)), Some(Duration::from_secs(11)));

        p.fire();
        assert_eq!(p.next_deadline(), Duration::from_secs(12));
    }

    #[test]
    fn delay_pushes_first_firing() {
        let p = Periodic::after_delay(Duration::ZERO, SECOND, SECOND);
        assert_eq!(p.due(SECOND), None);
        assert_eq!(p.next_deadline(), Duration::from_secs(2));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn zero_period_is_rejected() {
        Periodic::every(Duration::ZERO, Duration::ZERO);
    }

    #[test]
    fn late_poll_reports_oldest_deadline() {
        let mut p = Periodic::every(Duration::ZERO, SECOND);
        let now = Duration::from_millis(3500);

        let mut fired = Vec::new();
        while let Some(deadline) = p.due(now) {
            fired.push(deadline);
            p.fire();
        }

        assert_eq!(
            fired,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(3)
            ]
        );
    }
}
