//! LED strip hardware abstraction.
//!
//! Provides the [`StripSink`] trait for pixel hardware and [`PixelStrip`],
//! which paints one [`Color`] across every pixel in the configured channel
//! order.

use crate::color::Color;

/// Trait for abstracting addressable LED strip hardware.
///
/// Implement this for your driver (WS2812 over PIO, SPI, RMT, a PWM/DMA
/// library, etc.). Channel values arrive already arranged in wire order.
pub trait StripSink {
    /// Error reported when pushing pixels to the hardware fails.
    type Error;

    /// Stages the channel bytes of pixel `index`.
    fn set_pixel(&mut self, index: usize, channels: [u8; 3]);

    /// Pushes the staged pixels to the strip.
    fn show(&mut self) -> Result<(), Self::Error>;
}

/// Physical channel order of the LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WiringOrder {
    /// Red, green, blue.
    Rgb,

    /// Green, red, blue. Most WS2812 parts.
    #[default]
    Grb,
}

impl WiringOrder {
    /// Arranges logical `[r, g, b]` into wire order.
    pub fn arrange(self, [red, green, blue]: [u8; 3]) -> [u8; 3] {
        match self {
            WiringOrder::Rgb => [red, green, blue],
            WiringOrder::Grb => [green, red, blue],
        }
    }
}

/// A strip of `pixel_count` pixels painted in a single color.
pub struct PixelStrip<S: StripSink> {
    sink: S,
    pixel_count: usize,
    wiring_order: WiringOrder,
}

impl<S: StripSink> PixelStrip<S> {
    pub fn new(sink: S, pixel_count: usize, wiring_order: WiringOrder) -> Self {
        Self {
            sink,
            pixel_count,
            wiring_order,
        }
    }

    /// Paints every pixel with `color` and pushes the frame.
    pub fn paint(&mut self, color: &Color) -> Result<(), S::Error> {
        let channels = self.wiring_order.arrange(color.to_rgb8());
        for index in 0..self.pixel_count {
            self.sink.set_pixel(index, channels);
        }
        self.sink.show()
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    pub fn wiring_order(&self) -> WiringOrder {
        self.wiring_order
    }

    /// Returns a reference to the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns a mutable reference to the underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the strip, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
