//! Dual-representation color model.
//!
//! [`Color`] keeps RGB (0-255 per channel) and HSV (hue in degrees, saturation
//! and brightness in percent) side by side. Every setter recomputes the other
//! representation, so the two are never out of sync. Conversions go through
//! `palette`, which works on the normalized 0.0-1.0 scale internally.

use palette::{FromColor, Hsv, Srgb};

/// A color held in both RGB and HSV coordinates.
///
/// Inputs are sanitized on the way in: RGB clamps to 0-255, hue wraps into
/// `[0, 360)`, saturation and brightness clamp to 0-100, and non-finite values
/// become zero. Remote protocols routinely send boundary values, so nothing
/// here ever fails.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    red: f32,
    green: f32,
    blue: f32,
    hue: f32,
    saturation: f32,
    brightness: f32,
}

impl Color {
    pub const BLACK: Color = Color::preset(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::preset(255.0, 255.0, 255.0, 0.0, 0.0, 100.0);
    pub const RED: Color = Color::preset(255.0, 0.0, 0.0, 0.0, 100.0, 100.0);
    pub const GREEN: Color = Color::preset(0.0, 255.0, 0.0, 120.0, 100.0, 100.0);
    pub const BLUE: Color = Color::preset(0.0, 0.0, 255.0, 240.0, 100.0, 100.0);

    const fn preset(red: f32, green: f32, blue: f32, hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            red,
            green,
            blue,
            hue,
            saturation,
            brightness,
        }
    }

    /// Creates a color from RGB channels (0-255).
    pub fn from_rgb(red: f32, green: f32, blue: f32) -> Self {
        let mut color = Color::BLACK;
        color.set_rgb(red, green, blue);
        color
    }

    /// Creates a color from hue (degrees), saturation and brightness (percent).
    pub fn from_hsv(hue: f32, saturation: f32, brightness: f32) -> Self {
        let mut color = Color::BLACK;
        color.set_hsv(hue, saturation, brightness);
        color
    }

    /// Creates a color from a packed `0xRRGGBB` value. The top byte is ignored.
    pub fn from_packed_rgb(packed: u32) -> Self {
        let red = (packed >> 16) & 0xFF;
        let green = (packed >> 8) & 0xFF;
        let blue = packed & 0xFF;
        Self::from_rgb(red as f32, green as f32, blue as f32)
    }

    /// Creates an independent copy of another color.
    #[inline]
    pub fn from_color(other: &Color) -> Self {
        *other
    }

    /// Replaces the RGB channels and recomputes HSV.
    pub fn set_rgb(&mut self, red: f32, green: f32, blue: f32) {
        self.red = clamp_channel(red);
        self.green = clamp_channel(green);
        self.blue = clamp_channel(blue);

        let rgb = Srgb::new(self.red / 255.0, self.green / 255.0, self.blue / 255.0);
        let hsv: Hsv = Hsv::from_color(rgb);
        self.hue = wrap_hue(hsv.hue.into_positive_degrees());
        self.saturation = clamp_percent(hsv.saturation * 100.0);
        self.brightness = clamp_percent(hsv.value * 100.0);
    }

    /// Replaces the HSV triple and recomputes RGB.
    pub fn set_hsv(&mut self, hue: f32, saturation: f32, brightness: f32) {
        self.hue = wrap_hue(hue);
        self.saturation = clamp_percent(saturation);
        self.brightness = clamp_percent(brightness);
        self.update_rgb();
    }

    pub fn set_hue(&mut self, hue: f32) {
        self.hue = wrap_hue(hue);
        self.update_rgb();
    }

    pub fn set_saturation(&mut self, saturation: f32) {
        self.saturation = clamp_percent(saturation);
        self.update_rgb();
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = clamp_percent(brightness);
        self.update_rgb();
    }

    /// Shifts the hue by `delta` degrees, wrapping modulo 360.
    pub fn adjust_hue(&mut self, delta: f32) {
        self.set_hue(self.hue + finite_or_zero(delta));
    }

    /// Shifts the saturation by `delta` percent, clamping to 0-100.
    pub fn adjust_saturation(&mut self, delta: f32) {
        self.set_saturation(self.saturation + finite_or_zero(delta));
    }

    // RGB always comes from the whole HSV triple so repeated relative
    // adjustments cannot drift.
    fn update_rgb(&mut self) {
        let hsv: Hsv = Hsv::new(self.hue, self.saturation / 100.0, self.brightness / 100.0);
        let rgb: Srgb = Srgb::from_color(hsv);
        self.red = clamp_channel(rgb.red * 255.0);
        self.green = clamp_channel(rgb.green * 255.0);
        self.blue = clamp_channel(rgb.blue * 255.0);
    }

    /// Returns `(red, green, blue)` on the 0-255 scale.
    #[inline]
    pub fn rgb(&self) -> (f32, f32, f32) {
        (self.red, self.green, self.blue)
    }

    /// Returns `(hue, saturation, brightness)`.
    #[inline]
    pub fn hsv(&self) -> (f32, f32, f32) {
        (self.hue, self.saturation, self.brightness)
    }

    #[inline]
    pub fn red(&self) -> f32 {
        self.red
    }

    #[inline]
    pub fn green(&self) -> f32 {
        self.green
    }

    #[inline]
    pub fn blue(&self) -> f32 {
        self.blue
    }

    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    #[inline]
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    #[inline]
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Returns the RGB channels rounded to 8 bits.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [to_u8(self.red), to_u8(self.green), to_u8(self.blue)]
    }

    /// Returns the color packed as `0xRRGGBB`.
    pub fn to_packed_rgb(&self) -> u32 {
        let [red, green, blue] = self.to_rgb8();
        (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue)
    }

    /// Returns true when hue and saturation match after rounding to two
    /// decimal places.
    ///
    /// This is the fade engine's "endpoint reached" test. Brightness and RGB
    /// are deliberately ignored.
    pub fn is_close_to(&self, other: &Color) -> bool {
        hundredths(self.hue) % 36_000 == hundredths(other.hue) % 36_000
            && hundredths(self.saturation) == hundredths(other.saturation)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<Color> for Srgb {
    fn from(color: Color) -> Self {
        Srgb::new(color.red / 255.0, color.green / 255.0, color.blue / 255.0)
    }
}

impl From<Srgb> for Color {
    fn from(rgb: Srgb) -> Self {
        Color::from_rgb(rgb.red * 255.0, rgb.green * 255.0, rgb.blue * 255.0)
    }
}

#[inline]
fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

fn wrap_hue(hue: f32) -> f32 {
    let wrapped = libm::fmodf(finite_or_zero(hue), 360.0);
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // -1e-7 + 360.0 rounds to 360.0 in f32
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[inline]
fn clamp_percent(value: f32) -> f32 {
    finite_or_zero(value).clamp(0.0, 100.0)
}

#[inline]
fn clamp_channel(value: f32) -> f32 {
    finite_or_zero(value).clamp(0.0, 255.0)
}

#[inline]
fn to_u8(channel: f32) -> u8 {
    libm::roundf(clamp_channel(channel)) as u8
}

#[inline]
fn hundredths(value: f32) -> i32 {
    libm::roundf(value * 100.0) as i32
}
