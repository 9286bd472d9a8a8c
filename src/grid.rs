//! Binary pixel grid holding one animation frame.

use crate::EditError;

/// Width of one Braille cell in pixels.
pub const CELL_WIDTH: usize = 2;
/// Height of one Braille cell in pixels.
pub const CELL_HEIGHT: usize = 4;

/// A fixed-size 1-bit bitmap made of whole Braille cells.
///
/// The pixel width is always `2 * cell_cols` and the pixel height
/// `4 * cell_rows`, so every pixel belongs to exactly one Braille cell.
///
/// ## Example
///
/// ```rust
/// use cascii_core_edit::Grid;
///
/// let mut grid = Grid::new(2, 1).unwrap();
/// assert_eq!((grid.width(), grid.height()), (4, 4));
///
/// grid.set_pixel(3, 1, true).unwrap();
/// assert!(grid.is_set(3, 1));
/// assert!(grid.set_pixel(4, 0, true).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Width in pixels
    width: usize,
    /// Height in pixels
    height: usize,
    /// Row-major pixel bits (width * height)
    cells: Vec<bool>,
}

impl Grid {
    /// Create an empty grid of `cell_cols` x `cell_rows` Braille cells.
    pub fn new(cell_cols: usize, cell_rows: usize) -> Result<Self, EditError> {
        let invalid = EditError::InvalidDimension {
            cols: cell_cols,
            rows: cell_rows,
        };
        if cell_cols == 0 || cell_rows == 0 {
            return Err(invalid);
        }
        let (Some(width), Some(height)) = (
            cell_cols.checked_mul(CELL_WIDTH),
            cell_rows.checked_mul(CELL_HEIGHT),
        ) else {
            return Err(invalid);
        };
        let Some(len) = width.checked_mul(height) else {
            return Err(invalid);
        };
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Create an all-off grid with the same dimensions as this one.
    pub fn blank_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: vec![false; self.cells.len()],
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of Braille cell columns.
    #[inline]
    pub fn cell_cols(&self) -> usize {
        self.width / CELL_WIDTH
    }

    /// Number of Braille cell rows.
    #[inline]
    pub fn cell_rows(&self) -> usize {
        self.height / CELL_HEIGHT
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.cells.len()
    }

    /// Get the pixel at the given position.
    ///
    /// Returns None if position is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Whether the pixel is lit. Out-of-bounds pixels read as off.
    #[inline]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    /// Set a single pixel.
    pub fn set_pixel(&mut self, row: usize, col: usize, value: bool) -> Result<(), EditError> {
        if row >= self.height || col >= self.width {
            return Err(EditError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        self.cells[row * self.width + col] = value;
        Ok(())
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Turn every pixel on.
    pub fn fill(&mut self) {
        self.cells.fill(true);
    }

    /// Flip every pixel.
    pub fn invert(&mut self) {
        for cell in &mut self.cells {
            *cell = !*cell;
        }
    }

    /// Build a grid of new cell dimensions that keeps the overlapping pixels.
    ///
    /// Pixels outside the old bounds start off; pixels outside the new
    /// bounds are dropped.
    pub fn resized(&self, cell_cols: usize, cell_rows: usize) -> Result<Self, EditError> {
        let mut out = Self::new(cell_cols, cell_rows)?;
        let rows = self.height.min(out.height);
        let cols = self.width.min(out.width);
        for row in 0..rows {
            let src = row * self.width;
            let dst = row * out.width;
            out.cells[dst..dst + cols].copy_from_slice(&self.cells[src..src + cols]);
        }
        Ok(out)
    }

    /// Iterate over the pixel rows.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Nested 0/1 rows, as dumped by the grid export.
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|&on| u8::from(on)).collect())
            .collect()
    }
}
