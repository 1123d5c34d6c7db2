//! Two-color fade: the working color set and the tick-driven engine.

use crate::color::Color;
use crate::time::{TimeDuration, ratio};

/// The three working colors of a fade cycle.
///
/// Every slot owns its own [`Color`]; setters copy, so editing `current` can
/// never leak into `primary` or `secondary`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeColorSet {
    primary: Color,
    secondary: Color,
    current: Color,
}

impl FadeColorSet {
    /// Creates a set with `current` starting at `primary`.
    pub fn new(primary: Color, secondary: Color) -> Self {
        Self {
            primary,
            secondary,
            current: primary,
        }
    }

    /// Demotes the primary color to secondary and installs `color` as primary.
    pub fn insert_new_color(&mut self, color: Color) {
        self.secondary = self.primary;
        self.primary = color;
    }

    pub fn primary(&self) -> &Color {
        &self.primary
    }

    pub fn secondary(&self) -> &Color {
        &self.secondary
    }

    pub fn current(&self) -> &Color {
        &self.current
    }

    pub fn primary_mut(&mut self) -> &mut Color {
        &mut self.primary
    }

    pub fn secondary_mut(&mut self) -> &mut Color {
        &mut self.secondary
    }

    pub fn current_mut(&mut self) -> &mut Color {
        &mut self.current
    }

    pub fn set_primary(&mut self, color: &Color) {
        self.primary = *color;
    }

    pub fn set_secondary(&mut self, color: &Color) {
        self.secondary = *color;
    }

    pub fn set_current(&mut self, color: &Color) {
        self.current = *color;
    }

    /// Moves `current` back to `primary`.
    pub fn reset_current(&mut self) {
        self.current = self.primary;
    }

    /// Applies a brightness edit to both fade endpoints.
    pub fn set_brightness(&mut self, brightness: f32) {
        self.primary.set_brightness(brightness);
        self.secondary.set_brightness(brightness);
    }

    /// Returns true when the endpoints are indistinguishable to the fade.
    pub fn is_degenerate(&self) -> bool {
        self.primary.is_close_to(&self.secondary)
    }
}

impl Default for FadeColorSet {
    fn default() -> Self {
        Self::new(Color::RED, Color::BLUE)
    }
}

/// Which endpoint the fade is currently heading for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeDirection {
    /// Primary towards secondary.
    #[default]
    Forward,
    /// Secondary towards primary.
    Reverse,
}

impl FadeDirection {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            FadeDirection::Forward => FadeDirection::Reverse,
            FadeDirection::Reverse => FadeDirection::Forward,
        }
    }
}

/// Result of one fade tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeTick {
    /// `current` moved one increment towards the target endpoint.
    Advanced,
    /// `current` reached the target endpoint; the fade now heads the given way.
    Reversed(FadeDirection),
    /// Primary and secondary are equal. Nothing moved.
    Degenerate,
}

/// Tick-driven fade between the two endpoints of a [`FadeColorSet`].
///
/// Each tick moves `current` by a fixed fraction of the endpoint difference:
/// `delta / transition_length * tick_interval`. Hue travels the plain numeric
/// difference between the endpoints, not the shortest arc.
///
/// Position along a leg is `ticks * step_fraction`, measured from the endpoint
/// behind, so `current` always lies on the primary-secondary path and never
/// wraps through 0/360 degrees mid-leg.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeEngine {
    direction: FadeDirection,
    step_fraction: f32,
    leg_ticks: u32,
}

impl FadeEngine {
    /// Creates an engine moving `tick_interval / transition_length` of the
    /// endpoint difference per tick.
    ///
    /// Short transitions step visibly because hue resolution is coarse
    /// compared to 8-bit RGB.
    pub fn new<D: TimeDuration>(tick_interval: D, transition_length: D) -> Self {
        Self {
            direction: FadeDirection::Forward,
            step_fraction: ratio(tick_interval, transition_length),
            leg_ticks: 0,
        }
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Starts a fresh leg heading the given way.
    ///
    /// The next tick moves away from the endpoint opposite `direction`.
    pub fn set_direction(&mut self, direction: FadeDirection) {
        self.direction = direction;
        self.leg_ticks = 0;
    }

    /// Starts a fresh forward leg from the primary color.
    pub fn restart(&mut self) {
        self.set_direction(FadeDirection::Forward);
    }

    /// Fraction of the endpoint difference covered per tick.
    pub fn step_fraction(&self) -> f32 {
        self.step_fraction
    }

    /// Fraction of the current leg covered so far, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.leg_ticks as f32 * self.step_fraction).min(1.0)
    }

    /// Advances `colors.current` by one tick.
    pub fn tick(&mut self, colors: &mut FadeColorSet) -> FadeTick {
        if colors.is_degenerate() {
            return FadeTick::Degenerate;
        }

        let (from, to) = match self.direction {
            FadeDirection::Forward => (colors.primary, colors.secondary),
            FadeDirection::Reverse => (colors.secondary, colors.primary),
        };

        self.leg_ticks = self.leg_ticks.saturating_add(1);
        let progress = self.progress();

        let current = &mut colors.current;
        current.set_hsv(
            lerp(from.hue(), to.hue(), progress),
            lerp(from.saturation(), to.saturation(), progress),
            current.brightness(),
        );

        if progress >= 1.0 || current.is_close_to(&to) {
            // Land exactly on the endpoint before heading back.
            current.set_hsv(to.hue(), to.saturation(), current.brightness());
            self.set_direction(self.direction.flipped());
            return FadeTick::Reversed(self.direction);
        }

        FadeTick::Advanced
    }
}

#[inline]
fn lerp(from: f32, to: f32, progress: f32) -> f32 {
    from + (to - from) * progress
}
