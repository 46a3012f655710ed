//! A device abstraction for rectangular RGB pixel matrices driven by a
//! `smart_leds` writer (DotStar/APA102, NeoPixel/WS2812).
//!
//! [`PixelMatrix`] owns the pixel buffer, maps `(x, y)` and linear indices onto it,
//! shifts it, and flushes it to the injected sink. The DotStar and NeoPixel wings
//! are thin constructors around it; see [`crate::dotstar_featherwing`] and
//! [`crate::neopixel_featherwing`].
//!
//! # Example
//!
//! ```rust
//! use core::convert::Infallible;
//! use featherwing_kit::{pixel_matrix::PixelMatrix, color::{Rgb, colors}};
//! use smart_leds::SmartLedsWrite;
//!
//! /// A sink that remembers the last frame written to it.
//! #[derive(Default)]
//! struct LastFrame(Vec<Rgb>);
//!
//! impl SmartLedsWrite for LastFrame {
//!     type Error = Infallible;
//!     type Color = Rgb;
//!
//!     fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
//!     where
//!         T: IntoIterator<Item = I>,
//!         I: Into<Self::Color>,
//!     {
//!         self.0 = iterator.into_iter().map(Into::into).collect();
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> featherwing_kit::Result<()> {
//! // A 3x2 matrix; every mutation flushes because auto-write starts enabled.
//! let mut matrix: PixelMatrix<LastFrame, 6, 3, 2> = PixelMatrix::new(LastFrame::default());
//! matrix.set(2, 1, colors::RED)?;
//! assert_eq!(matrix.get_index(5)?, colors::RED);
//!
//! // Batch several changes, then flush once.
//! matrix.set_auto_write(false);
//! matrix.fill(colors::BLUE)?;
//! matrix.shift_right(false)?;
//! matrix.show()?;
//! assert_eq!(matrix.get(0, 0)?, Rgb::default());
//! # Ok(())
//! # }
//! ```

pub mod grid;

pub use grid::Grid;

use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
};
use log::debug;
use smart_leds::SmartLedsWrite;

use crate::color::{
    BLACK, Gamma, Rgb, Rgb888, ToRgb, apply_correction, brightness_scale, generate_combo_table,
};
use crate::{Error, Result};

/// Which physical edge row 0 sits on.
///
/// [`PixelMatrix::shift_up`], [`PixelMatrix::shift_down`], and drawing depend on
/// it: "up" and embedded-graphics `y = 0` are always the physical top edge.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RowOrder {
    /// Row 0 is the top edge.
    #[default]
    TopToBottom,
    /// Row 0 is the bottom edge.
    BottomToTop,
}

/// A rectangular RGB pixel matrix backed by a `smart_leds` writer.
///
/// - `N`: total pixel count (must equal `W * H`)
/// - `W`: columns
/// - `H`: rows
///
/// When auto-write is enabled (the default) every mutating call flushes the
/// buffer to the sink. Otherwise call [`show`](Self::show) explicitly.
///
/// Brightness and gamma are applied to the flushed copy only; reads always
/// return the colors that were written.
pub struct PixelMatrix<S, const N: usize, const W: usize, const H: usize> {
    sink: S,
    grid: Grid<Rgb, N, W, H>,
    auto_write: bool,
    brightness: f32,
    gamma: Gamma,
    row_order: RowOrder,
    combo_table: [u8; 256],
}

impl<S, const N: usize, const W: usize, const H: usize> PixelMatrix<S, N, W, H>
where
    S: SmartLedsWrite<Color = Rgb>,
{
    /// Matrix width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Matrix height in pixels (rows).
    pub const HEIGHT: usize = H;
    /// Total number of pixels (WIDTH × HEIGHT).
    pub const LEN: usize = N;

    /// Create a matrix over `sink` with all pixels off, full brightness,
    /// linear gamma, row 0 at the top, and auto-write enabled.
    ///
    /// Nothing is written to the sink until the first mutation or [`show`](Self::show).
    #[must_use]
    pub fn new(sink: S) -> Self {
        debug!("PixelMatrix: {}x{} ({} pixels)", W, H, N);
        Self {
            sink,
            grid: Grid::new(),
            auto_write: true,
            brightness: 1.0,
            gamma: Gamma::Linear,
            row_order: RowOrder::TopToBottom,
            combo_table: generate_combo_table(Gamma::Linear, u8::MAX),
        }
    }

    /// Set the initial brightness (`0.0..=1.0`) without flushing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BrightnessOutOfRange`] if `brightness` is outside
    /// `0.0..=1.0` or NaN.
    pub fn with_brightness(mut self, brightness: f32) -> Result<Self, S::Error> {
        self.store_brightness(brightness)?;
        Ok(self)
    }

    /// Set the initial brightness without flushing, clamping it into
    /// `0.0..=1.0`. NaN keeps the current brightness.
    #[must_use]
    pub fn with_brightness_clamped(mut self, brightness: f32) -> Self {
        if !brightness.is_nan() {
            self.brightness = brightness.clamp(0.0, 1.0);
            self.rebuild_combo_table();
        }
        self
    }

    /// Set the gamma curve applied at flush time.
    #[must_use]
    pub fn with_gamma(mut self, gamma: Gamma) -> Self {
        self.gamma = gamma;
        self.rebuild_combo_table();
        self
    }

    /// Set which physical edge row 0 sits on.
    #[must_use]
    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    /// Set the initial auto-write mode.
    #[must_use]
    pub fn with_auto_write(mut self, auto_write: bool) -> Self {
        self.auto_write = auto_write;
        self
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        W
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        H
    }

    /// Number of pixels.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Always false; a matrix has at least one pixel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Row-major view of the stored (uncorrected) colors.
    #[must_use]
    pub const fn pixels(&self) -> &[Rgb; N] {
        self.grid.cells()
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfBounds`] if the coordinate is outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> Result<Rgb, S::Error> {
        self.grid.get(x, y).map_err(Error::into_driver_error)
    }

    /// Read the pixel at a row-major linear index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= N`.
    pub fn get_index(&self, index: usize) -> Result<Rgb, S::Error> {
        self.grid.get_index(index).map_err(Error::into_driver_error)
    }

    /// Write the pixel at `(x, y)`.
    ///
    /// Accepts [`Rgb`], [`Rgb888`], `(r, g, b)` tuples, and packed `0xRRGGBB` integers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfBounds`] if the coordinate is outside the
    /// matrix, or [`Error::Bus`] if an automatic flush fails.
    pub fn set(&mut self, x: usize, y: usize, color: impl ToRgb) -> Result<(), S::Error> {
        self.grid
            .set(x, y, color.to_rgb())
            .map_err(Error::into_driver_error)?;
        self.update()
    }

    /// Write the pixel at a row-major linear index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= N`, or [`Error::Bus`]
    /// if an automatic flush fails.
    pub fn set_index(&mut self, index: usize, color: impl ToRgb) -> Result<(), S::Error> {
        self.grid
            .set_index(index, color.to_rgb())
            .map_err(Error::into_driver_error)?;
        self.update()
    }

    /// Set every pixel to `color`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn fill(&mut self, color: impl ToRgb) -> Result<(), S::Error> {
        self.grid.fill(color.to_rgb());
        self.update()
    }

    /// Turn every pixel off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.fill(BLACK)
    }

    /// Shift all pixels one column right; see [`Grid::shift_right`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn shift_right(&mut self, rotate: bool) -> Result<(), S::Error> {
        self.grid.shift_right(rotate);
        self.update()
    }

    /// Shift all pixels one column left; see [`Grid::shift_left`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn shift_left(&mut self, rotate: bool) -> Result<(), S::Error> {
        self.grid.shift_left(rotate);
        self.update()
    }

    /// Shift all pixels one row toward the physical top edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn shift_up(&mut self, rotate: bool) -> Result<(), S::Error> {
        match self.row_order {
            RowOrder::TopToBottom => self.grid.shift_up(rotate),
            RowOrder::BottomToTop => self.grid.shift_down(rotate),
        }
        self.update()
    }

    /// Shift all pixels one row toward the physical bottom edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn shift_down(&mut self, rotate: bool) -> Result<(), S::Error> {
        match self.row_order {
            RowOrder::TopToBottom => self.grid.shift_down(rotate),
            RowOrder::BottomToTop => self.grid.shift_up(rotate),
        }
        self.update()
    }

    /// Flush the buffer to the sink with brightness and gamma applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] with the sink's error if the write fails.
    pub fn show(&mut self) -> Result<(), S::Error> {
        let combo_table = &self.combo_table;
        self.sink
            .write(
                self.grid
                    .cells()
                    .iter()
                    .map(|&color| apply_correction(color, combo_table)),
            )
            .map_err(Error::Bus)
    }

    /// Whether every mutation flushes immediately.
    #[must_use]
    pub const fn auto_write(&self) -> bool {
        self.auto_write
    }

    /// Enable or disable flushing on every mutation.
    ///
    /// When disabled, call [`show`](Self::show) after a batch of changes.
    pub const fn set_auto_write(&mut self, auto_write: bool) {
        self.auto_write = auto_write;
    }

    /// Current brightness fraction (`0.0..=1.0`).
    #[must_use]
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Set the brightness fraction and, with auto-write on, flush.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BrightnessOutOfRange`] if `brightness` is outside
    /// `0.0..=1.0` or NaN (the previous brightness is kept), or
    /// [`Error::Bus`] if the automatic flush fails.
    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), S::Error> {
        self.store_brightness(brightness)?;
        self.update()
    }

    /// Current gamma curve.
    #[must_use]
    pub const fn gamma(&self) -> Gamma {
        self.gamma
    }

    /// Current row order.
    #[must_use]
    pub const fn row_order(&self) -> RowOrder {
        self.row_order
    }

    /// Borrow the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Release the sink.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn update(&mut self) -> Result<(), S::Error> {
        if self.auto_write {
            self.show()
        } else {
            Ok(())
        }
    }

    fn store_brightness(&mut self, brightness: f32) -> Result<(), S::Error> {
        if brightness_scale(brightness).is_none() {
            return Err(Error::BrightnessOutOfRange);
        }
        self.brightness = brightness;
        self.rebuild_combo_table();
        Ok(())
    }

    fn rebuild_combo_table(&mut self) {
        let scale = brightness_scale(self.brightness).unwrap_or(u8::MAX);
        self.combo_table = generate_combo_table(self.gamma, scale);
    }
}

impl<S, const N: usize, const W: usize, const H: usize> OriginDimensions
    for PixelMatrix<S, N, W, H>
{
    #[allow(clippy::cast_possible_truncation, reason = "matrix dimensions are small")]
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

/// Draw with [`embedded-graphics`](https://docs.rs/embedded-graphics).
///
/// Pixels outside the matrix are clipped. With auto-write on, a whole draw
/// call flushes once at the end.
impl<S, const N: usize, const W: usize, const H: usize> DrawTarget for PixelMatrix<S, N, W, H>
where
    S: SmartLedsWrite<Color = Rgb>,
{
    type Color = Rgb888;
    type Error = Error<S::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x_index), Ok(y_screen)) = (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            // embedded-graphics rows count down from the top edge.
            let y_index = match self.row_order {
                RowOrder::TopToBottom => Some(y_screen),
                RowOrder::BottomToTop => H
                    .checked_sub(1)
                    .and_then(|top| top.checked_sub(y_screen)),
            };
            let Some(y_index) = y_index else {
                continue;
            };
            // Out-of-bounds pixels are clipped.
            let _ = self.grid.set(x_index, y_index, color.to_rgb());
        }
        self.update()
    }
}
