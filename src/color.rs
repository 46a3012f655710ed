//! Pixel colors, packed-color conversion, and the gamma/brightness correction
//! applied when a [`PixelMatrix`](crate::pixel_matrix::PixelMatrix) is flushed.
//!
//! # Example
//!
//! ```rust
//! use featherwing_kit::color::{Rgb, colors, rgb_from_packed, rgb_to_packed};
//!
//! let orange = rgb_from_packed(0xFF_80_00);
//! assert_eq!(orange, Rgb::new(255, 128, 0));
//! assert_eq!(rgb_to_packed(colors::BLUE), 0x00_00_FF);
//! ```

use embedded_graphics::prelude::RgbColor;

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// 8-bit-per-channel RGB color from `embedded_graphics`.
#[doc(inline)]
pub use embedded_graphics::pixelcolor::Rgb888;

/// RGB color type stored in pixel matrices (re-exported from `smart_leds`).
pub type Rgb = smart_leds::RGB8;

/// The "off" color written into vacated cells and by `clear`.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Unpack a `0xRRGGBB` integer into an [`Rgb`] color. Bits above 24 are ignored.
#[must_use]
#[allow(clippy::cast_possible_truncation, reason = "each channel is masked to 8 bits")]
pub const fn rgb_from_packed(packed: u32) -> Rgb {
    Rgb::new(
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    )
}

/// Pack an [`Rgb`] color into a `0xRRGGBB` integer.
#[must_use]
pub const fn rgb_to_packed(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Convert colors to [`Rgb`] for pixel matrices.
pub trait ToRgb {
    /// Convert this color to [`Rgb`].
    #[must_use]
    fn to_rgb(self) -> Rgb;
}

impl ToRgb for Rgb {
    #[inline(always)]
    fn to_rgb(self) -> Rgb {
        self
    }
}

impl ToRgb for Rgb888 {
    #[inline(always)]
    fn to_rgb(self) -> Rgb {
        Rgb::new(self.r(), self.g(), self.b())
    }
}

impl ToRgb for u32 {
    #[inline(always)]
    fn to_rgb(self) -> Rgb {
        rgb_from_packed(self)
    }
}

impl ToRgb for (u8, u8, u8) {
    #[inline(always)]
    fn to_rgb(self) -> Rgb {
        Rgb::new(self.0, self.1, self.2)
    }
}

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode applied when pixels are flushed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    #[default]
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    Gamma2_2,
}

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Generate a combined gamma correction and brightness scaling lookup table.
///
/// `combo_table[input_value]` is the gamma-corrected input scaled by
/// `brightness / 255`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::indexing_slicing,
    reason = "index < 256 and scaled <= 255"
)]
pub const fn generate_combo_table(gamma: Gamma, brightness: u8) -> [u8; 256] {
    let mut result = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        let corrected = match gamma {
            Gamma::Linear => index as u8,
            Gamma::Gamma2_2 => GAMMA_2_2_TABLE[index],
        };
        let scaled = (corrected as u16 * brightness as u16) / 255;
        result[index] = scaled as u8;
        index += 1;
    }
    result
}

/// Look up each channel of `color` in a table from [`generate_combo_table`].
#[must_use]
pub fn apply_correction(color: Rgb, combo_table: &[u8; 256]) -> Rgb {
    let lookup = |channel: u8| combo_table.get(usize::from(channel)).copied().unwrap_or(channel);
    Rgb::new(lookup(color.r), lookup(color.g), lookup(color.b))
}

/// Convert a brightness fraction in `0.0..=1.0` to an 8-bit scale, or `None`
/// if it is out of range or NaN.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is checked to be within 0.0..=1.0"
)]
pub fn brightness_scale(brightness: f32) -> Option<u8> {
    if !(0.0..=1.0).contains(&brightness) {
        return None;
    }
    Some((brightness * 255.0 + 0.5) as u8)
}
