//! Construction-time configuration.
//!
//! Defaults reproduce the classic accessory: a GRB strip, a 1 s tick, a
//! ten-minute fade between red and blue, a three-tap gesture with 1-5 s gaps,
//! and three half-second acknowledgement flashes.

use crate::color::Color;
use crate::gesture::GestureConfig;
use crate::strip::WiringOrder;
use crate::time::TimeDuration;
use crate::types::{FlashConfig, Mode, OnSuppression};

/// Configuration validation errors.
///
/// All of these are fatal: they surface once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Strip has no pixels.
    ZeroPixelCount,

    /// Tick interval is zero.
    ZeroTickInterval,

    /// Transition length is shorter than one tick.
    TransitionShorterThanTick,

    /// Gesture window is empty (`min_gap >= max_gap`).
    EmptyGestureWindow,

    /// Gesture needs at least two on-events.
    TooFewGestureEvents,

    /// Acknowledgement flash has no flashes or a zero period.
    EmptyFlash,

    /// Acknowledgement flash does not fit the controller's flash capacity.
    FlashCapacityExceeded,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroPixelCount => write!(f, "pixel count must be non-zero"),
            ConfigError::ZeroTickInterval => write!(f, "tick interval must be non-zero"),
            ConfigError::TransitionShorterThanTick => {
                write!(f, "transition length must be at least one tick interval")
            }
            ConfigError::EmptyGestureWindow => {
                write!(f, "gesture minimum gap must be shorter than the maximum gap")
            }
            ConfigError::TooFewGestureEvents => {
                write!(f, "gesture must require at least two on-events")
            }
            ConfigError::EmptyFlash => {
                write!(f, "acknowledgement flash needs a non-zero count and period")
            }
            ConfigError::FlashCapacityExceeded => {
                write!(f, "acknowledgement flash exceeds flash sequence capacity")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated controller configuration.
///
/// Build with [`FaderConfig::builder`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaderConfig<D: TimeDuration> {
    pixel_count: usize,
    wiring_order: WiringOrder,
    tick_interval: D,
    transition_length: D,
    gesture: GestureConfig<D>,
    on_suppression: OnSuppression<D>,
    initial_mode: Mode,
    flash: FlashConfig<D>,
    primary: Color,
    secondary: Color,
}

impl<D: TimeDuration> FaderConfig<D> {
    /// Creates a builder for a strip of `pixel_count` pixels.
    pub fn builder(pixel_count: usize) -> FaderConfigBuilder<D> {
        FaderConfigBuilder::new(pixel_count)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    pub fn wiring_order(&self) -> WiringOrder {
        self.wiring_order
    }

    /// Period of the fade tick.
    pub fn tick_interval(&self) -> D {
        self.tick_interval
    }

    /// Duration of one primary-to-secondary leg.
    pub fn transition_length(&self) -> D {
        self.transition_length
    }

    pub fn gesture(&self) -> &GestureConfig<D> {
        &self.gesture
    }

    pub fn on_suppression(&self) -> OnSuppression<D> {
        self.on_suppression
    }

    pub fn initial_mode(&self) -> Mode {
        self.initial_mode
    }

    pub fn flash(&self) -> &FlashConfig<D> {
        &self.flash
    }

    /// Endpoint colors the fade starts with.
    pub fn endpoints(&self) -> (Color, Color) {
        (self.primary, self.secondary)
    }
}

/// Builder for [`FaderConfig`].
#[derive(Debug, Clone, Copy)]
pub struct FaderConfigBuilder<D: TimeDuration> {
    config: FaderConfig<D>,
}

impl<D: TimeDuration> FaderConfigBuilder<D> {
    /// Creates a builder holding the defaults.
    pub fn new(pixel_count: usize) -> Self {
        Self {
            config: FaderConfig {
                pixel_count,
                wiring_order: WiringOrder::default(),
                tick_interval: D::from_millis(1_000),
                transition_length: D::from_millis(600_000),
                gesture: GestureConfig::default(),
                on_suppression: OnSuppression::default(),
                initial_mode: Mode::default(),
                flash: FlashConfig::default(),
                primary: Color::RED,
                secondary: Color::BLUE,
            },
        }
    }

    pub fn wiring_order(mut self, order: WiringOrder) -> Self {
        self.config.wiring_order = order;
        self
    }

    pub fn tick_interval(mut self, interval: D) -> Self {
        self.config.tick_interval = interval;
        self
    }

    pub fn transition_length(mut self, length: D) -> Self {
        self.config.transition_length = length;
        self
    }

    /// Replaces all gesture thresholds.
    pub fn gesture(mut self, gesture: GestureConfig<D>) -> Self {
        self.config.gesture = gesture;
        self
    }

    /// Sets the qualifying gap between on-events to `[min_gap, max_gap)`.
    pub fn gesture_window(mut self, min_gap: D, max_gap: D) -> Self {
        self.config.gesture.min_gap = min_gap;
        self.config.gesture.max_gap = max_gap;
        self
    }

    pub fn gesture_events(mut self, required_events: u8) -> Self {
        self.config.gesture.required_events = required_events;
        self
    }

    pub fn on_suppression(mut self, suppression: OnSuppression<D>) -> Self {
        self.config.on_suppression = suppression;
        self
    }

    pub fn initial_mode(mut self, mode: Mode) -> Self {
        self.config.initial_mode = mode;
        self
    }

    pub fn flash(mut self, flash: FlashConfig<D>) -> Self {
        self.config.flash = flash;
        self
    }

    /// Sets the endpoint colors the fade starts with.
    pub fn endpoints(mut self, primary: Color, secondary: Color) -> Self {
        self.config.primary = primary;
        self.config.secondary = secondary;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<FaderConfig<D>, ConfigError> {
        let config = self.config;

        if config.pixel_count == 0 {
            return Err(ConfigError::ZeroPixelCount);
        }

        if config.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        if config.transition_length.as_millis() < config.tick_interval.as_millis() {
            return Err(ConfigError::TransitionShorterThanTick);
        }

        if config.gesture.min_gap.as_millis() >= config.gesture.max_gap.as_millis() {
            return Err(ConfigError::EmptyGestureWindow);
        }

        if config.gesture.required_events < 2 {
            return Err(ConfigError::TooFewGestureEvents);
        }

        if config.flash.count == 0 || config.flash.period.is_zero() {
            return Err(ConfigError::EmptyFlash);
        }

        Ok(config)
    }
}
