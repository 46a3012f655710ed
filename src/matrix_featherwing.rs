//! A device abstraction for the 16×8 LED Matrix FeatherWing (HT16K33).
//!
//! See [`MatrixFeatherWing`] for usage.

use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};
use log::debug;

use crate::ht16k33::{self, BlinkRate, Ht16k33Matrix};
use crate::pixel_matrix::Grid;
use crate::{Error, Result};

/// Columns on the LED Matrix FeatherWing.
pub const COLUMNS: usize = 16;
/// Rows on the LED Matrix FeatherWing.
pub const ROWS: usize = 8;
/// Pixels on the LED Matrix FeatherWing.
pub const LEN: usize = COLUMNS * ROWS;

/// 16×8 monochrome LED matrix.
///
/// Like [`PixelMatrix`](crate::pixel_matrix::PixelMatrix), every mutation
/// flushes to the chip while auto-write is on (the default).
///
/// # Example
///
/// ```rust,no_run
/// # use featherwing_kit::ht16k33::Ht16k33Matrix;
/// # fn example<D: Ht16k33Matrix>(ht16k33: D) -> featherwing_kit::Result<(), D::Error> {
/// use featherwing_kit::{ht16k33::BlinkRate, matrix_featherwing::MatrixFeatherWing};
///
/// let mut matrix = MatrixFeatherWing::new(ht16k33);
/// matrix.set_auto_write(false);
/// for x in 0..matrix.columns() {
///     matrix.set_pixel(x, x % 8, true)?;
/// }
/// matrix.show()?;
///
/// matrix.set_brightness(8)?;
/// matrix.set_blink_rate(BlinkRate::OneHz)?;
/// matrix.shift_left(true)?;
/// # Ok(())
/// # }
/// ```
pub struct MatrixFeatherWing<D> {
    display: D,
    grid: Grid<bool, LEN, COLUMNS, ROWS>,
    auto_write: bool,
}

impl<D: Ht16k33Matrix> MatrixFeatherWing<D> {
    /// Create the wing over an HT16K33 matrix driver with all pixels off and
    /// auto-write enabled.
    #[must_use]
    pub fn new(display: D) -> Self {
        debug!("MatrixFeatherWing: {}x{}", COLUMNS, ROWS);
        Self {
            display,
            grid: Grid::new(),
            auto_write: true,
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        COLUMNS
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        ROWS
    }

    /// Row-major view of every pixel.
    #[must_use]
    pub const fn pixels(&self) -> &[bool; LEN] {
        self.grid.cells()
    }

    /// Whether the pixel at `(x, y)` is on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfBounds`] if the coordinate is outside the matrix.
    pub fn pixel(&self, x: usize, y: usize) -> Result<bool, D::Error> {
        self.grid.get(x, y).map_err(Error::into_driver_error)
    }

    /// Turn the pixel at `(x, y)` on or off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfBounds`] if the coordinate is outside the
    /// matrix, or [`Error::Bus`] if an automatic flush fails.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> Result<(), D::Error> {
        self.grid.set(x, y, on).map_err(Error::into_driver_error)?;
        self.update()
    }

    /// Turn every pixel on or off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn fill(&mut self, on: bool) -> Result<(), D::Error> {
        self.grid.fill(on);
        self.update()
    }

    /// Shift all pixels one column right; the right edge wraps when `rotate` is true.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn shift_right(&mut self, rotate: bool) -> Result<(), D::Error> {
        self.grid.shift_right(rotate);
        self.update()
    }

    /// Shift all pixels one column left; the left edge wraps when `rotate` is true.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn shift_left(&mut self, rotate: bool) -> Result<(), D::Error> {
        self.grid.shift_left(rotate);
        self.update()
    }

    /// Shift all pixels one row up; the top row wraps when `rotate` is true.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn shift_up(&mut self, rotate: bool) -> Result<(), D::Error> {
        self.grid.shift_up(rotate);
        self.update()
    }

    /// Shift all pixels one row down; the bottom row wraps when `rotate` is true.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if an automatic flush fails.
    pub fn shift_down(&mut self, rotate: bool) -> Result<(), D::Error> {
        self.grid.shift_down(rotate);
        self.update()
    }

    /// Send the pixels to the chip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the driver fails.
    pub fn show(&mut self) -> Result<(), D::Error> {
        self.display
            .write_pixels(self.grid.cells())
            .map_err(Error::Bus)?;
        self.display.show().map_err(Error::Bus)
    }

    /// Whether every mutation flushes immediately.
    #[must_use]
    pub const fn auto_write(&self) -> bool {
        self.auto_write
    }

    /// Enable or disable flushing on every mutation.
    pub const fn set_auto_write(&mut self, auto_write: bool) {
        self.auto_write = auto_write;
    }

    /// Current blink rate.
    #[must_use]
    pub fn blink_rate(&self) -> BlinkRate {
        self.display.blink_rate()
    }

    /// Change the blink rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the driver fails.
    pub fn set_blink_rate(&mut self, rate: BlinkRate) -> Result<(), D::Error> {
        self.display.set_blink_rate(rate).map_err(Error::Bus)
    }

    /// Brightness level, 0 (dimmest) to 15 (brightest).
    #[must_use]
    pub fn brightness(&self) -> u8 {
        ht16k33::brightness_level(&self.display)
    }

    /// Set the brightness level, 0 (dimmest) to 15 (brightest).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BrightnessOutOfRange`] if `level > 15`, or
    /// [`Error::Bus`] if the driver fails.
    pub fn set_brightness(&mut self, level: u8) -> Result<(), D::Error> {
        ht16k33::set_brightness_level(&mut self.display, level)
    }

    /// Release the HT16K33 driver.
    #[must_use]
    pub fn into_inner(self) -> D {
        self.display
    }

    fn update(&mut self) -> Result<(), D::Error> {
        if self.auto_write {
            self.show()
        } else {
            Ok(())
        }
    }
}

impl<D> OriginDimensions for MatrixFeatherWing<D> {
    #[allow(clippy::cast_possible_truncation, reason = "matrix dimensions are small")]
    fn size(&self) -> Size {
        Size::new(COLUMNS as u32, ROWS as u32)
    }
}

/// Draw with [`embedded-graphics`](https://docs.rs/embedded-graphics) using
/// [`BinaryColor`]. Out-of-bounds pixels are clipped; with auto-write on, a
/// draw call flushes once at the end.
impl<D: Ht16k33Matrix> DrawTarget for MatrixFeatherWing<D> {
    type Color = BinaryColor;
    type Error = Error<D::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x_index), Ok(y_index)) = (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            let _ = self.grid.set(x_index, y_index, color.is_on());
        }
        self.update()
    }
}
