//! Frame time primitives
//!
//! All gating thresholds are expressed in milliseconds, so frame timestamps
//! are a monotonic millisecond counter. Timestamps are passed in explicitly
//! with each frame sample; nothing here reads a system clock, which keeps
//! the gating machine deterministic under test.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Monotonic frame timestamp in milliseconds since an arbitrary epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameTime(pub u64);

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime(0);

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        FrameTime(millis)
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        FrameTime(self.0.saturating_add(duration.as_millis() as u64))
    }
}

impl Add<Duration> for FrameTime {
    type Output = FrameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        FrameTime(self.0 + rhs.as_millis() as u64)
    }
}

impl Sub<FrameTime> for FrameTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: FrameTime) -> Self::Output {
        Duration::from_millis(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_arithmetic() {
        let t1 = FrameTime::from_millis(100);
        let t2 = t1 + Duration::from_millis(250);

        assert!(t2 > t1);
        assert_eq!(t2 - t1, Duration::from_millis(250));
        assert_eq!(t2.as_millis(), 350);
    }

    #[test]
    fn test_frame_time_sub_saturates() {
        let t1 = FrameTime::from_millis(100);
        let t2 = FrameTime::from_millis(400);
        assert_eq!(t1 - t2, Duration::ZERO);
    }
}
