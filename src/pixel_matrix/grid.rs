//! Fixed-size row-major cell buffer with bounds-checked addressing and
//! one-step shifts.
//!
//! See [`Grid`] for examples.

use crate::{Error, Result};

/// Fixed-size, row-major buffer of `W × H` cells with `(x, y)` and linear
/// addressing plus single-step shifts with optional wraparound.
///
/// `N` must equal `W * H`; this is checked at compile time when the grid is
/// constructed. Coordinates use a screen-style convention: `(0, 0)` is the
/// top-left corner, `x` increases to the right, and `y` increases downward.
/// "Up" moves content toward row 0.
///
/// The cell type is generic so the same engine backs RGB pixel matrices and
/// on/off LED matrices.
///
/// # Example
///
/// ```rust
/// use featherwing_kit::pixel_matrix::Grid;
///
/// let mut grid: Grid<u8, 3, 3, 1> = Grid::from_cells([1, 2, 3]);
/// grid.shift_right(true);
/// assert_eq!(grid.cells(), &[3, 1, 2]);
/// grid.shift_left(false);
/// assert_eq!(grid.cells(), &[1, 2, 0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid<C, const N: usize, const W: usize, const H: usize> {
    cells: [C; N],
}

impl<C: Copy + Default, const N: usize, const W: usize, const H: usize> Grid<C, N, W, H> {
    /// Grid width in cells (columns).
    pub const WIDTH: usize = W;
    /// Grid height in cells (rows).
    pub const HEIGHT: usize = H;
    /// Total number of cells (WIDTH × HEIGHT).
    pub const LEN: usize = N;

    /// Create a grid with every cell set to `C::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::from_cells([C::default(); N])
    }

    /// Create a grid from row-major cells.
    #[must_use]
    pub const fn from_cells(cells: [C; N]) -> Self {
        const {
            assert!(W > 0 && H > 0, "W and H must be positive");
            assert!(W * H == N, "W*H must equal N");
        }
        Self { cells }
    }

    /// Row-major view of every cell.
    #[must_use]
    pub const fn cells(&self) -> &[C; N] {
        &self.cells
    }

    /// Map `(x, y)` to a linear index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfBounds`] if `x >= W` or `y >= H`.
    pub const fn xy_to_index(x: usize, y: usize) -> Result<usize> {
        if x >= W || y >= H {
            return Err(Error::CoordinateOutOfBounds {
                x,
                y,
                columns: W,
                rows: H,
            });
        }
        Ok(y * W + x)
    }

    /// Read the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfBounds`] if the coordinate is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Result<C> {
        self.get_index(Self::xy_to_index(x, y)?)
    }

    /// Write the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfBounds`] if the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: C) -> Result<()> {
        self.set_index(Self::xy_to_index(x, y)?, value)
    }

    /// Read the cell at a row-major linear index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= N`.
    pub fn get_index(&self, index: usize) -> Result<C> {
        self.cells
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds { index, len: N })
    }

    /// Write the cell at a row-major linear index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= N`.
    pub fn set_index(&mut self, index: usize, value: C) -> Result<()> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len: N })?;
        *cell = value;
        Ok(())
    }

    /// Overwrite every cell with `value`.
    pub fn fill(&mut self, value: C) {
        self.cells.fill(value);
    }

    /// Shift every row one cell right. The rightmost cell wraps to the left
    /// edge when `rotate` is true; otherwise the left edge is cleared.
    pub fn shift_right(&mut self, rotate: bool) {
        for row in self.cells.chunks_exact_mut(W) {
            row.rotate_right(1);
            if !rotate {
                if let Some(first) = row.first_mut() {
                    *first = C::default();
                }
            }
        }
    }

    /// Shift every row one cell left. The leftmost cell wraps to the right
    /// edge when `rotate` is true; otherwise the right edge is cleared.
    pub fn shift_left(&mut self, rotate: bool) {
        for row in self.cells.chunks_exact_mut(W) {
            row.rotate_left(1);
            if !rotate {
                if let Some(last) = row.last_mut() {
                    *last = C::default();
                }
            }
        }
    }

    /// Shift every column one cell toward row 0. The top cell wraps to the
    /// bottom row when `rotate` is true; otherwise the bottom row is cleared.
    pub fn shift_up(&mut self, rotate: bool) {
        // Rows are contiguous, so a vertical shift is a whole-buffer rotation by one row.
        self.cells.rotate_left(W);
        if !rotate {
            if let Some(bottom) = self.cells.get_mut(N.saturating_sub(W)..) {
                bottom.fill(C::default());
            }
        }
    }

    /// Shift every column one cell away from row 0. The bottom cell wraps to
    /// the top row when `rotate` is true; otherwise the top row is cleared.
    pub fn shift_down(&mut self, rotate: bool) {
        self.cells.rotate_right(W);
        if !rotate {
            if let Some(top) = self.cells.get_mut(..W) {
                top.fill(C::default());
            }
        }
    }
}

impl<C: Copy + Default, const N: usize, const W: usize, const H: usize> Default
    for Grid<C, N, W, H>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, const N: usize, const W: usize, const H: usize> From<Grid<C, N, W, H>> for [C; N] {
    fn from(grid: Grid<C, N, W, H>) -> Self {
        grid.cells
    }
}
