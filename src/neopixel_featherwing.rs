//! A device abstraction for the NeoPixel FeatherWing: an 8×4 matrix of WS2812
//! RGB LEDs.
//!
//! The wing's rows are wired bottom-to-top, so [`shift_up`](PixelMatrix::shift_up)
//! moves content toward higher row indices. Everything else behaves like
//! [`PixelMatrix`], which the wing derefs to.
//!
//! # Example
//!
//! ```rust,no_run
//! # use featherwing_kit::color::Rgb;
//! # fn example<S: smart_leds::SmartLedsWrite<Color = Rgb>>(ws2812: S)
//! #     -> featherwing_kit::Result<(), S::Error> {
//! use featherwing_kit::neopixel_featherwing::NeoPixelFeatherWing;
//!
//! let mut neopixel = NeoPixelFeatherWing::new(ws2812);
//! neopixel.set(4, 1, (255, 0, 0))?;
//! neopixel.set(5, 1, (0, 255, 0))?;
//!
//! // Rotate the two pixels around the panel, one row at a time.
//! for _ in 0..neopixel.rows() {
//!     neopixel.shift_up(true)?;
//! }
//! # Ok(())
//! # }
//! ```

use core::ops::{Deref, DerefMut};

use smart_leds::SmartLedsWrite;

use crate::Result;
use crate::color::Rgb;
use crate::pixel_matrix::{PixelMatrix, RowOrder};

/// Columns on the NeoPixel FeatherWing.
pub const COLUMNS: usize = 8;
/// Rows on the NeoPixel FeatherWing.
pub const ROWS: usize = 4;
/// Pixels on the NeoPixel FeatherWing.
pub const LEN: usize = COLUMNS * ROWS;
/// Default brightness fraction for [`NeoPixelFeatherWing::new`].
pub const BRIGHTNESS_DEFAULT: f32 = 0.1;

/// The pixel matrix type behind a [`NeoPixelFeatherWing`].
pub type NeoPixelMatrix<S> = PixelMatrix<S, LEN, COLUMNS, ROWS>;

/// NeoPixel FeatherWing: 8 columns × 4 rows, row 0 at the bottom.
///
/// The WS2812 writer is expected to emit GRB order itself; colors stored here
/// are plain RGB.
pub struct NeoPixelFeatherWing<S>(NeoPixelMatrix<S>);

impl<S: SmartLedsWrite<Color = Rgb>> NeoPixelFeatherWing<S> {
    /// Create the wing over a WS2812 writer at [`BRIGHTNESS_DEFAULT`].
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self(
            PixelMatrix::new(sink)
                .with_row_order(RowOrder::BottomToTop)
                .with_brightness_clamped(BRIGHTNESS_DEFAULT),
        )
    }

    /// Create the wing with an explicit brightness fraction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BrightnessOutOfRange`](crate::Error::BrightnessOutOfRange)
    /// if `brightness` is outside `0.0..=1.0`.
    pub fn with_brightness(sink: S, brightness: f32) -> Result<Self, S::Error> {
        Ok(Self(
            PixelMatrix::new(sink)
                .with_row_order(RowOrder::BottomToTop)
                .with_brightness(brightness)?,
        ))
    }

    /// Release the WS2812 writer.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.0.into_inner()
    }
}

impl<S> Deref for NeoPixelFeatherWing<S> {
    type Target = NeoPixelMatrix<S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> DerefMut for NeoPixelFeatherWing<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
