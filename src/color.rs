use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous scale: value → Color32
// ---------------------------------------------------------------------------

/// Maps a numeric range onto a blue → purple → orange → yellow ramp,
/// used to shade bars by their height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    min: f64,
    max: f64,
}

const LOW_HUE: f32 = 240.0;
const HIGH_HUE: f32 = 420.0; // wraps to 60, yellow

impl ValueScale {
    pub fn new(min: f64, max: f64) -> Self {
        ValueScale { min, max }
    }

    /// Scale spanning the given values; a single point or empty input
    /// collapses to a zero-width range.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            return ValueScale::new(0.0, 0.0);
        }
        ValueScale::new(min, max)
    }

    /// Position of `value` in the range, clamped to `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return 1.0;
        }
        ((value - self.min) / range).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.normalize(value);
        let hue = (LOW_HUE + (HIGH_HUE - LOW_HUE) * t) % 360.0;
        hsl_to_color32(hue, 0.8, 0.35 + 0.25 * t)
    }
}
