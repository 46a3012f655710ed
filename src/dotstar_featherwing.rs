//! A device abstraction for the DotStar FeatherWing: a 12×6 matrix of APA102
//! RGB LEDs.
//!
//! The wing derefs to [`PixelMatrix`], so every matrix operation (`set`, `fill`,
//! shifts, `show`, brightness, auto-write) is available directly.
//!
//! # Example
//!
//! ```rust,no_run
//! # use featherwing_kit::color::Rgb;
//! # fn example<S: smart_leds::SmartLedsWrite<Color = Rgb>>(apa102: S)
//! #     -> featherwing_kit::Result<(), S::Error> {
//! use featherwing_kit::{color::colors, dotstar_featherwing::DotStarFeatherWing};
//!
//! // `apa102` is any smart-leds writer for the wing's clock/data pins.
//! let mut dotstar = DotStarFeatherWing::new(apa102);
//! dotstar.fill(colors::DARK_GREEN)?;
//! dotstar.set(11, 5, 0xFF_00_80)?; // packed 0xRRGGBB
//! # Ok(())
//! # }
//! ```

use core::ops::{Deref, DerefMut};

use crate::Result;
use crate::color::Rgb;
use crate::pixel_matrix::{PixelMatrix, RowOrder};
use smart_leds::SmartLedsWrite;

/// Columns on the DotStar FeatherWing.
pub const COLUMNS: usize = 12;
/// Rows on the DotStar FeatherWing.
pub const ROWS: usize = 6;
/// Pixels on the DotStar FeatherWing.
pub const LEN: usize = COLUMNS * ROWS;
/// Default brightness fraction for [`DotStarFeatherWing::new`].
pub const BRIGHTNESS_DEFAULT: f32 = 0.2;

/// The pixel matrix type behind a [`DotStarFeatherWing`].
pub type DotStarMatrix<S> = PixelMatrix<S, LEN, COLUMNS, ROWS>;

/// DotStar FeatherWing: 12 columns × 6 rows, row 0 at the top.
pub struct DotStarFeatherWing<S>(DotStarMatrix<S>);

impl<S: SmartLedsWrite<Color = Rgb>> DotStarFeatherWing<S> {
    /// Create the wing over an APA102 writer at [`BRIGHTNESS_DEFAULT`].
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self(
            PixelMatrix::new(sink)
                .with_row_order(RowOrder::TopToBottom)
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
                .with_row_order(RowOrder::TopToBottom)
                .with_brightness(brightness)?,
        ))
    }

    /// Release the APA102 writer.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.0.into_inner()
    }
}

impl<S> Deref for DotStarFeatherWing<S> {
    type Target = DotStarMatrix<S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> DerefMut for DotStarFeatherWing<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
