//! Conversion properties of Color

mod common;
use common::*;

use neopixel_fader::Color;

#[test]
fn rgb_is_stored_as_given() {
    for red in (0..=255).step_by(17) {
        for green in (0..=255).step_by(51) {
            for blue in (0..=255).step_by(85) {
                let color = Color::from_rgb(red as f32, green as f32, blue as f32);
                assert_eq!(color.to_rgb8(), [red as u8, green as u8, blue as u8]);
            }
        }
    }
}

#[test]
fn rgb_survives_trip_through_hsv() {
    for red in (0..=255).step_by(15) {
        for green in (0..=255).step_by(30) {
            for blue in (0..=255).step_by(45) {
                let original = Color::from_rgb(red as f32, green as f32, blue as f32);
                let (hue, saturation, brightness) = original.hsv();
                let back = Color::from_hsv(hue, saturation, brightness);

                assert!(
                    rgb_equal_epsilon(&original, &back, 1.0),
                    "rgb({}, {}, {}) came back as {:?}",
                    red,
                    green,
                    blue,
                    back.rgb()
                );
            }
        }
    }
}

#[test]
fn hue_and_saturation_survive_trip_through_rgb() {
    for hue in (0..360).step_by(15) {
        for saturation in [5.0, 25.0, 50.0, 75.0, 100.0] {
            for brightness in [10.0, 50.0, 100.0] {
                let original = Color::from_hsv(hue as f32, saturation, brightness);
                let (red, green, blue) = original.rgb();
                let back = Color::from_rgb(red, green, blue);

                assert!(
                    hues_equal(back.hue(), hue as f32, 0.01),
                    "hue {} came back as {}",
                    hue,
                    back.hue()
                );
                assert!((back.saturation() - saturation).abs() <= 0.01);
                assert!((back.brightness() - brightness).abs() <= 0.01);
            }
        }
    }
}

#[test]
fn achromatic_colors_convert_without_surprises() {
    let grey = Color::from_rgb(128.0, 128.0, 128.0);
    assert_eq!(grey.saturation(), 0.0);
    assert!(grey.hue() >= 0.0 && grey.hue() < 360.0);

    let mut white = Color::WHITE;
    white.set_hue(75.0);
    assert_eq!(white.to_rgb8(), [255, 255, 255]);
    assert_eq!(white.hue(), 75.0);
}

#[test]
fn adjust_hue_is_additive() {
    let mut color = Color::RED;
    color.adjust_hue(370.0);
    assert!(hues_equal(color.hue(), 10.0, 1e-3));

    color.adjust_hue(20.0);
    color.adjust_hue(30.0);
    assert!(hues_equal(color.hue(), 60.0, 1e-3));
}

#[test]
fn copies_are_independent() {
    let original = Color::from_hsv(30.0, 80.0, 90.0);
    let mut copy = Color::from_color(&original);
    copy.set_hue(200.0);

    assert_eq!(original.hue(), 30.0);
    assert_eq!(copy.hue(), 200.0);
}
