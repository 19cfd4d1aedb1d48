use std::fmt;

use serde::{Deserialize, Serialize};

/// An RGB color with linear channels in `0.0..=1.0`.
///
/// Used for soul display colors and the lighting palettes. Channels outside
/// the unit range are clamped on construction so downstream consumers can
/// hand values straight to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel, `0.0..=1.0`.
    pub r: f32,
    /// Green channel, `0.0..=1.0`.
    pub g: f32,
    /// Blue channel, `0.0..=1.0`.
    pub b: f32,
}

impl Color {
    /// White (`#ffffff`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Black (`#000000`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Create a color from unit-range channels. Not clamped; use
    /// [`Color::new`] for untrusted input.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color, clamping each channel into `0.0..=1.0`.
    /// Non-finite channels collapse to 0.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    /// Create a color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
    }

    /// Multiply all channels by a scalar, clamping the result to unit range.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }
}
