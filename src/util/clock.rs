use std::time::{Duration, Instant};

/// Monotonic time source driving the stopwatch. Times are measured from an arbitrary origin that
/// stays fixed for the lifetime of the clock.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> SystemClock {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        Instant::now() - self.start
    }
}

#[cfg(test)]
pub(crate) use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;

    use std::{cell::Cell, rc::Rc, time::Duration};

    /// Clock that only moves when told to. Clones share the same time, so a test can hand one
    /// copy to the controller and keep another to advance.
    #[derive(Clone, Default)]
    pub(crate) struct ManualClock {
        now: Rc<Cell<Duration>>,
    }

    impl ManualClock {
        pub(crate) fn new() -> ManualClock {
            Default::default()
        }

        pub(crate) fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }

        pub(crate) fn set(&self, now: Duration) {
            self.now.set(now);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            self.now.get()
        }
    }
}
