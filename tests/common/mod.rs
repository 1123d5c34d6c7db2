//! Shared test infrastructure for neopixel-fader integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use neopixel_fader::{Color, StripSink, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        Some(TestInstant(self.0 + duration.0))
    }
}

// ============================================================================
// Mock Strip
// ============================================================================

/// Error reported by [`MockStrip`] when failure is switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

/// Mock strip that records every shown frame.
pub struct MockStrip {
    staged: Vec<[u8; 3]>,
    frames: Vec<Vec<[u8; 3]>>,
    pub fail: bool,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            staged: Vec::new(),
            frames: Vec::new(),
            fail: false,
        }
    }

    /// All frames pushed so far, oldest first.
    pub fn frames(&self) -> &[Vec<[u8; 3]>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[[u8; 3]]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// First pixel of the last frame.
    pub fn last_pixel(&self) -> Option<[u8; 3]> {
        self.last_frame().and_then(|frame| frame.first().copied())
    }

    /// First pixel of every frame, oldest first.
    pub fn pixel_history(&self) -> Vec<[u8; 3]> {
        self.frames.iter().filter_map(|frame| frame.first().copied()).collect()
    }
}

impl StripSink for MockStrip {
    type Error = BusError;

    fn set_pixel(&mut self, index: usize, channels: [u8; 3]) {
        if self.staged.len() <= index {
            self.staged.resize(index + 1, [0; 3]);
        }
        self.staged[index] = channels;
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BusError);
        }
        self.frames.push(self.staged.clone());
        Ok(())
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two hues with floating-point tolerance, treating 360 as 0
pub fn hues_equal(a: f32, b: f32, epsilon: f32) -> bool {
    let diff = (a - b).abs();
    diff < epsilon || (360.0 - diff) < epsilon
}

/// Compare two colors channel by channel on the 0-255 scale
pub fn rgb_equal_epsilon(a: &Color, b: &Color, epsilon: f32) -> bool {
    let (ar, ag, ab) = a.rgb();
    let (br, bg, bb) = b.rgb();
    (ar - br).abs() <= epsilon && (ag - bg).abs() <= epsilon && (ab - bb).abs() <= epsilon
}
