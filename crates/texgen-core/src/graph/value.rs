//! Values flowing along graph links.

use image::Rgba;
use serde::{Deserialize, Serialize};

/// Output of a texture node for one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// No input connected; renders as transparent black.
    #[default]
    Nothing,
    /// Greyscale intensity, 0.0..=1.0 maps to black..white.
    Float(f64),
    /// 8-bit RGBA colour.
    Color([u8; 4]),
    /// RGBA channel fractions, 0.0..=1.0 each.
    Channels([f64; 4]),
}

impl Value {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Color([r, g, b, 255])
    }

    /// Converts to a pixel, rounding to the nearest level. Out-of-range channels saturate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_pixel(self) -> Rgba<u8> {
        match self {
            Self::Nothing => Rgba([0, 0, 0, 0]),
            Self::Float(v) => Self::Channels([v, v, v, 1.0]).to_pixel(),
            Self::Color(rgba) => Rgba(rgba),
            Self::Channels(channels) => Rgba(channels.map(|c| (c * 255.0).round() as u8)),
        }
    }

    /// Channel fractions of the pixel this value renders as.
    pub fn fractions(self) -> [f64; 4] {
        self.to_pixel().0.map(|c| f64::from(c) / 255.0)
    }

    /// Mean of the red, green and blue fractions.
    pub fn intensity(self) -> f64 {
        let [r, g, b, _] = self.fractions();
        (r + g + b) / 3.0
    }
}
