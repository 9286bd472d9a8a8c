//! Textual encodings of a grid.
//!
//! Every function here is pure and treats the grid as
//! `cell_cols = width / 2` by `cell_rows = height / 4` Braille cells.

use crate::grid::{CELL_HEIGHT, CELL_WIDTH};
use crate::Grid;

/// Code point of the blank Braille pattern.
pub const BRAILLE_BASE: u32 = 0x2800;

/// Bit weight of each dot, indexed `[dot_row][dot_col]`.
///
/// Dots 1-2-3 run down the left column and 4-5-6 down the right column,
/// with dots 7 and 8 on the extra bottom row.
pub const DOT_BITS: [[u8; CELL_WIDTH]; CELL_HEIGHT] = [
    [0x01, 0x08],
    [0x02, 0x10],
    [0x04, 0x20],
    [0x40, 0x80],
];

/// Compute the 8-bit dot mask of one Braille cell.
pub fn cell_mask(grid: &Grid, cell_row: usize, cell_col: usize) -> u8 {
    let mut mask = 0;
    for (dr, bits) in DOT_BITS.iter().enumerate() {
        for (dc, bit) in bits.iter().enumerate() {
            if grid.is_set(cell_row * CELL_HEIGHT + dr, cell_col * CELL_WIDTH + dc) {
                mask |= bit;
            }
        }
    }
    mask
}

/// The Braille glyph for a dot mask.
#[inline]
pub fn glyph(mask: u8) -> char {
    // U+2800..=U+28FF are all assigned scalar values
    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or('\u{2800}')
}

/// Encode a grid as Braille text, one string per cell row.
///
/// ## Example
///
/// ```rust
/// use cascii_core_edit::{encode, Grid};
///
/// let mut grid = Grid::new(1, 1).unwrap();
/// grid.set_pixel(0, 0, true).unwrap();
/// grid.set_pixel(3, 1, true).unwrap();
///
/// assert_eq!(encode::braille_lines(&grid), vec!["\u{2881}".to_string()]);
/// ```
pub fn braille_lines(grid: &Grid) -> Vec<String> {
    (0..grid.cell_rows())
        .map(|cr| {
            (0..grid.cell_cols())
                .map(|cc| glyph(cell_mask(grid, cr, cc)))
                .collect()
        })
        .collect()
}

/// List each glyph of each line as `U+XXXX`, space separated.
pub fn codepoints<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            line.as_ref()
                .chars()
                .map(|ch| format!("U+{:04X}", ch as u32))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Block art, one string per pixel row, two characters per pixel.
pub fn ascii_lines(grid: &Grid) -> Vec<String> {
    grid.rows()
        .map(|row| {
            row.iter()
                .map(|&on| if on { "##" } else { ".." })
                .collect()
        })
        .collect()
}

/// Flatten the grid row-major into one `*` or `.` per pixel.
pub fn termdot(grid: &Grid) -> String {
    grid.rows()
        .flat_map(|row| row.iter())
        .map(|&on| if on { '*' } else { '.' })
        .collect()
}

/// Source-literal form of Braille lines: `'a'` or `'a' + '\n' +` chains.
pub fn js_literal<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| format!("'{}'", line.as_ref()))
        .collect::<Vec<_>>()
        .join(" + '\\n' +\n")
}

/// All single-frame text surfaces shown next to the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    /// Braille lines joined with newlines
    pub braille: String,
    /// Code point listing, one line per Braille line
    pub unicode: String,
    /// Block art lines joined with newlines
    pub ascii: String,
    /// Dot string wrapped in double quotes
    pub termdot: String,
    /// Source-literal snippet
    pub js: String,
}

impl Preview {
    /// Render every surface for a grid.
    pub fn of(grid: &Grid) -> Self {
        let lines = braille_lines(grid);
        Self {
            braille: lines.join("\n"),
            unicode: codepoints(&lines).join("\n"),
            ascii: ascii_lines(grid).join("\n"),
            termdot: format!("\"{}\"", termdot(grid)),
            js: js_literal(&lines),
        }
    }
}
