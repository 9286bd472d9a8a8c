//! Display model for the pixel grid.
//!
//! This is pure data for a UI layer to draw: which dots are lit, which are
//! onion-skin ghosts from the previous frame, and where Braille cell borders
//! fall.

use crate::grid::{CELL_HEIGHT, CELL_WIDTH};
use crate::Grid;

/// How a single dot should be shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotState {
    /// Off, with no ghost
    Off,
    /// Lit in the current frame
    On,
    /// Off here but lit in the previous frame
    Ghost,
}

/// One dot of the editable grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DotView {
    /// Whether the dot is lit, off, or a ghost of the previous frame
    pub state: DotState,
    /// Last column of a Braille cell that is not the last grid column
    pub cell_right_edge: bool,
    /// Last row of a Braille cell that is not the last grid row
    pub cell_bottom_edge: bool,
}

/// Classify one dot given the optional onion-skin frame.
#[inline]
pub fn dot_state(current: &Grid, ghost: Option<&Grid>, row: usize, col: usize) -> DotState {
    if current.is_set(row, col) {
        DotState::On
    } else if ghost.is_some_and(|g| g.is_set(row, col)) {
        DotState::Ghost
    } else {
        DotState::Off
    }
}

/// Build the dot views for every pixel, row by row.
///
/// `ghost` is the previous frame when onion skinning is on, else None.
pub fn grid_view(current: &Grid, ghost: Option<&Grid>) -> Vec<Vec<DotView>> {
    let (width, height) = (current.width(), current.height());
    (0..height)
        .map(|row| {
            (0..width)
                .map(|col| DotView {
                    state: dot_state(current, ghost, row, col),
                    cell_right_edge: col % CELL_WIDTH == CELL_WIDTH - 1 && col + 1 < width,
                    cell_bottom_edge: row % CELL_HEIGHT == CELL_HEIGHT - 1 && row + 1 < height,
                })
                .collect()
        })
        .collect()
}

/// Caption such as `"4 × 4 pixels — 2 chars"`.
pub fn grid_label(grid: &Grid) -> String {
    let chars = grid.cell_cols() * grid.cell_rows();
    let plural = if chars > 1 { "s" } else { "" };
    format!(
        "{} \u{d7} {} pixels \u{2014} {} char{}",
        grid.width(),
        grid.height(),
        chars,
        plural
    )
}
