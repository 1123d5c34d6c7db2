//! Time abstraction traits for platform-agnostic timing.
//!
//! The controller never reads a clock directly. Hosts wrap their own instant
//! and duration types (e.g. `embassy_time::Instant`, `std::time::Instant`)
//! in newtypes implementing these traits.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Returns true for a zero-length duration.
    #[inline]
    fn is_zero(&self) -> bool {
        self.as_millis() == 0
    }
}

/// Trait abstraction for instant types.
///
/// Instants must be ordered so deadlines can be compared against `now`.
pub trait TimeInstant: Copy + PartialOrd {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

/// Ratio `part / whole` of two durations, computed in milliseconds.
///
/// Returns 0.0 when `whole` is zero.
pub(crate) fn ratio<D: TimeDuration>(part: D, whole: D) -> f32 {
    let whole = whole.as_millis();
    if whole == 0 {
        return 0.0;
    }
    part.as_millis() as f32 / whole as f32
}
