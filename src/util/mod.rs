mod clock;

pub use clock::{Clock, SystemClock};

#[cfg(test)]
pub(crate) use clock::ManualClock;
