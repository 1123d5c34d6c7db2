//! Core types shared across the controller.

use crate::color::Color;
use crate::time::TimeDuration;

/// Lighting mode of the accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Hold the primary color.
    SingleColor,

    /// Continuously fade between the primary and secondary colors.
    #[default]
    AutoFade,
}

impl Mode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::SingleColor => Mode::AutoFade,
            Mode::AutoFade => Mode::SingleColor,
        }
    }
}

/// How to recognise an "On" that the host protocol re-sent around a
/// brightness edit.
///
/// The echo is a protocol quirk, not a documented contract, so the filter is
/// a tunable heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OnSuppression<D: TimeDuration> {
    /// Every on-event counts towards the mode gesture.
    Disabled,

    /// The first on-event after a brightness edit is an echo.
    NextOn,

    /// On-events arriving within this duration of a brightness edit are echoes.
    Window(D),
}

impl<D: TimeDuration> Default for OnSuppression<D> {
    fn default() -> Self {
        OnSuppression::NextOn
    }
}

/// Acknowledgement flash played when the mode gesture toggles the mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashConfig<D: TimeDuration> {
    /// Number of off/on flashes.
    pub count: u8,

    /// Duration of each half of a flash.
    pub period: D,

    /// Flash color when entering [`Mode::SingleColor`].
    pub single_color: Color,

    /// Flash color when entering [`Mode::AutoFade`].
    pub auto_fade: Color,
}

impl<D: TimeDuration> FlashConfig<D> {
    /// Returns the flash color announcing `mode`.
    pub fn color_for(&self, mode: Mode) -> Color {
        match mode {
            Mode::SingleColor => self.single_color,
            Mode::AutoFade => self.auto_fade,
        }
    }
}

impl<D: TimeDuration> Default for FlashConfig<D> {
    fn default() -> Self {
        Self {
            count: 3,
            period: D::from_millis(500),
            single_color: Color::RED,
            auto_fade: Color::GREEN,
        }
    }
}
