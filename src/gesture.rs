//! Power-on cadence detection for switching between static and fading modes.
//!
//! Remote lightbulb protocols expose no "mode" property, so the mode switch is
//! encoded as a rhythm: switching the light on several times in a row with a
//! gap of a few seconds between each on-event.

use crate::time::{TimeDuration, TimeInstant};
use crate::types::Mode;

/// Where an on-event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OnOrigin {
    /// The user switched the light on.
    Remote,
    /// The host protocol re-sent "On" as a side effect of a brightness edit.
    BrightnessEcho,
}

/// Timing thresholds for the mode gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureConfig<D: TimeDuration> {
    /// Shortest qualifying gap between two on-events (inclusive).
    pub min_gap: D,
    /// Longest qualifying gap between two on-events (exclusive).
    pub max_gap: D,
    /// On-events in one chain needed to toggle the mode.
    pub required_events: u8,
}

impl<D: TimeDuration> Default for GestureConfig<D> {
    fn default() -> Self {
        Self {
            min_gap: D::from_millis(1_000),
            max_gap: D::from_millis(5_000),
            required_events: 3,
        }
    }
}

/// What the detector made of an on-event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureOutcome {
    /// Brightness echo; not counted and the timestamp is left alone.
    Ignored,
    /// The event extended the chain to the given length.
    Counted(u8),
    /// The gap did not qualify; a new chain starts at this event.
    Restarted,
    /// The chain completed and the mode switched to the given value.
    Toggled(Mode),
}

/// Counts qualifying on-events and toggles [`Mode`] when a chain completes.
///
/// A chain is a run of on-events where each gap to the previous on-event lies
/// in `[min_gap, max_gap)`. The first on-event of a chain counts as one. When
/// the chain reaches `required_events` the mode toggles and the count drops to
/// zero, so the next qualifying event opens a fresh chain.
#[derive(Debug, Clone, Copy)]
pub struct ModeGestureDetector<I: TimeInstant> {
    config: GestureConfig<I::Duration>,
    mode: Mode,
    last_on: Option<I>,
    count: u8,
}

impl<I: TimeInstant> ModeGestureDetector<I> {
    pub fn new(config: GestureConfig<I::Duration>, initial_mode: Mode) -> Self {
        Self {
            config,
            mode: initial_mode,
            last_on: None,
            count: 0,
        }
    }

    /// Registers an on-event observed at `now`.
    pub fn register_on(&mut self, now: I, origin: OnOrigin) -> GestureOutcome {
        if origin == OnOrigin::BrightnessEcho {
            return GestureOutcome::Ignored;
        }

        let qualifies = self.last_on.is_some_and(|last| {
            let gap = now.duration_since(last).as_millis();
            gap >= self.config.min_gap.as_millis() && gap < self.config.max_gap.as_millis()
        });
        self.last_on = Some(now);

        if !qualifies {
            self.count = 1;
            return GestureOutcome::Restarted;
        }

        self.count = self.count.saturating_add(1);
        if self.count >= self.config.required_events {
            self.count = 0;
            self.mode = self.mode.toggled();
            return GestureOutcome::Toggled(self.mode);
        }

        GestureOutcome::Counted(self.count)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Length of the chain in progress.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Forgets the chain in progress and the last on-event.
    pub fn reset(&mut self) {
        self.last_on = None;
        self.count = 0;
    }
}
