//! Text color values as they map to CSS.

use crate::utils::fmt_number;

/// Epsilon for per-channel color comparison.
///
/// Half of a 1/256 quantization step, so colors that land in the same 8-bit
/// channel bucket compare equal.
pub const CHANNEL_EPSILON: f64 = 1.0 / 512.0;

/// A text color: either fully transparent (the channel is not painted under
/// the current rendering mode) or an RGB triple with channels in [0, 1].
#[derive(Debug, Clone, Copy)]
pub enum Color {
    Transparent,
    Rgb(f64, f64, f64),
}

impl Color {
    pub fn is_transparent(&self) -> bool {
        matches!(self, Color::Transparent)
    }

    /// Quantized 8-bit channels, or None for transparent.
    ///
    /// Used as an interning key. The comparison epsilon is half a
    /// quantization step, so equal colors share a bucket except exactly at
    /// bucket boundaries.
    pub fn quantize(&self) -> Option<(u8, u8, u8)> {
        match *self {
            Color::Transparent => None,
            Color::Rgb(r, g, b) => Some((channel_byte(r), channel_byte(g), channel_byte(b))),
        }
    }

    /// CSS value for this color.
    pub fn to_css(&self) -> String {
        match *self {
            Color::Transparent => "transparent".to_string(),
            Color::Rgb(r, g, b) => format!(
                "rgb({},{},{})",
                fmt_number(r * 255.0),
                fmt_number(g * 255.0),
                fmt_number(b * 255.0)
            ),
        }
    }
}

fn channel_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Color::Transparent, Color::Transparent) => true,
            (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
                (r1 - r2).abs() < CHANNEL_EPSILON
                    && (g1 - g2).abs() < CHANNEL_EPSILON
                    && (b1 - b2).abs() < CHANNEL_EPSILON
            }
            _ => false,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Transparent
    }
}
