//! Wall clocks consulted when sequencing new blocks.

use core::fmt::Debug;

/// A source of the current unix time, in seconds.
pub trait WallClock: Debug {
    /// Returns the current unix timestamp in seconds.
    fn now(&self) -> u64;
}

/// A [`WallClock`] backed by the system time.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl WallClock for SystemClock {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// A [`WallClock`] frozen at a single timestamp.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl WallClock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}
