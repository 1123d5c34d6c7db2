#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Color`**: A color held in RGB and HSV at once, kept in sync on every edit
//! - **`FadeColorSet`**: The primary, secondary and current colors of a fade
//! - **`FadeEngine`**: Moves the current color one tick towards the target endpoint
//! - **`ModeGestureDetector`**: Toggles `Mode` when the light is switched on in a rhythm
//! - **`FlashSequence`**: Timed color steps used to acknowledge a mode change
//! - **`LightController`**: Owns all of the above and paints the strip
//! - **`StripSink`**: Trait to implement for your LED strip driver
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`LightEvent`**: Events a host feeds into the controller
//!
//! Colors use hue in degrees and saturation/brightness in percent, matching
//! what lightbulb remotes send. `Srgb<f32>` conversions are available for
//! interop with `palette`.

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod color;
pub mod command;
pub mod config;
pub mod controller;
pub mod fade;
pub mod flash;
pub mod gesture;
pub mod strip;
pub mod time;
pub mod types;

pub use color::Color;
pub use command::LightEvent;
pub use config::{ConfigError, FaderConfig, FaderConfigBuilder};
pub use controller::{FaderError, FaderState, LightController, LightController8, ServiceTiming};
pub use fade::{FadeColorSet, FadeDirection, FadeEngine, FadeTick};
pub use flash::{FlashError, FlashSequence, FlashSequenceBuilder, FlashStep};
pub use gesture::{GestureConfig, GestureOutcome, ModeGestureDetector, OnOrigin};
pub use strip::{PixelStrip, StripSink, WiringOrder};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{FlashConfig, Mode, OnSuppression};

// Fails to build with the `defmt` feature if a public value type loses its
// `defmt::Format` derive.
#[cfg(feature = "defmt")]
#[allow(dead_code)]
fn assert_defmt_format<D: TimeDuration + defmt::Format>() {
    fn format<T: defmt::Format>() {}
    format::<Color>();
    format::<Mode>();
    format::<LightEvent>();
    format::<FadeColorSet>();
    format::<FaderState>();
    format::<ServiceTiming<D>>();
    format::<OnSuppression<D>>();
    format::<GestureConfig<D>>();
    format::<FlashConfig<D>>();
    format::<FlashStep<D>>();
    format::<FaderConfig<D>>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_reexports_expose_defaults() {
        assert_eq!(Mode::default(), Mode::AutoFade);
        assert_eq!(WiringOrder::default(), WiringOrder::Grb);
        assert_eq!(FadeDirection::default().flipped(), FadeDirection::Reverse);
        assert_eq!(Color::default(), Color::BLACK);
        assert_eq!(Color::RED.to_packed_rgb(), 0xFF_0000);
        assert_eq!(Srgb::from(Color::GREEN), Srgb::new(0.0, 1.0, 0.0));
        assert_eq!(FadeColorSet::default().secondary(), &Color::BLUE);
    }
}
