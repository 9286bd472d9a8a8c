//! Ordered frame list with a current-frame cursor.

use tracing::debug;

use crate::{encode, EditError, Grid};

/// An ordered, never-empty sequence of same-sized grids.
///
/// The cursor always points at an existing frame. Every frame shares the
/// dimensions of the others; [`FrameStore::resize`] changes all of them at once.
///
/// ## Example
///
/// ```rust
/// use cascii_core_edit::FrameStore;
///
/// let mut store = FrameStore::new(2, 1).unwrap();
/// store.add_frame();
/// store.duplicate_frame();
/// assert_eq!(store.len(), 3);
/// assert_eq!(store.cursor(), 2);
///
/// store.delete_frame().unwrap();
/// assert_eq!(store.cursor(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct FrameStore {
    /// Frames in playback order
    frames: Vec<Grid>,
    /// Index of the current frame
    cursor: usize,
    /// Cached Braille text per frame for the timeline
    thumbnails: Vec<Option<String>>,
}

impl FrameStore {
    /// Create a store holding one empty frame.
    pub fn new(cell_cols: usize, cell_rows: usize) -> Result<Self, EditError> {
        Ok(Self::from_grid(Grid::new(cell_cols, cell_rows)?))
    }

    /// Create a store holding the given grid as its only frame.
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            frames: vec![grid],
            cursor: 0,
            thumbnails: vec![None],
        }
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the current frame.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All frames in order.
    #[inline]
    pub fn frames(&self) -> &[Grid] {
        &self.frames
    }

    /// Get a frame by index.
    pub fn get(&self, index: usize) -> Option<&Grid> {
        self.frames.get(index)
    }

    /// The current frame.
    pub fn current(&self) -> &Grid {
        &self.frames[self.cursor]
    }

    /// Mutable access to the current frame.
    ///
    /// Drops the cached thumbnail of that frame.
    pub fn current_mut(&mut self) -> &mut Grid {
        self.thumbnails[self.cursor] = None;
        &mut self.frames[self.cursor]
    }

    /// The frame just before the cursor, if any.
    pub fn previous(&self) -> Option<&Grid> {
        self.cursor.checked_sub(1).map(|i| &self.frames[i])
    }

    /// Braille cell columns shared by every frame.
    pub fn cell_cols(&self) -> usize {
        self.current().cell_cols()
    }

    /// Braille cell rows shared by every frame.
    pub fn cell_rows(&self) -> usize {
        self.current().cell_rows()
    }

    /// Insert an empty frame after the cursor and move onto it.
    pub fn add_frame(&mut self) {
        let blank = self.current().blank_like();
        self.insert_after_cursor(blank);
        debug!(cursor = self.cursor, len = self.len(), "added frame");
    }

    /// Insert a copy of the current frame after the cursor and move onto it.
    pub fn duplicate_frame(&mut self) {
        let copy = self.current().clone();
        self.insert_after_cursor(copy);
        debug!(cursor = self.cursor, len = self.len(), "duplicated frame");
    }

    fn insert_after_cursor(&mut self, grid: Grid) {
        let at = self.cursor + 1;
        self.frames.insert(at, grid);
        self.thumbnails.insert(at, None);
        self.cursor = at;
    }

    /// Remove the current frame.
    ///
    /// The last remaining frame is never removed; that case returns
    /// [`EditError::LastFrame`] and leaves the store untouched.
    pub fn delete_frame(&mut self) -> Result<(), EditError> {
        if self.frames.len() <= 1 {
            return Err(EditError::LastFrame);
        }
        self.frames.remove(self.cursor);
        self.thumbnails.remove(self.cursor);
        self.cursor = self.cursor.min(self.frames.len() - 1);
        debug!(cursor = self.cursor, len = self.len(), "deleted frame");
        Ok(())
    }

    /// Swap the current frame with its left neighbour, following it.
    ///
    /// Returns false when already at the first frame.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.frames.swap(self.cursor - 1, self.cursor);
        self.thumbnails.swap(self.cursor - 1, self.cursor);
        self.cursor -= 1;
        debug!(cursor = self.cursor, "moved frame left");
        true
    }

    /// Swap the current frame with its right neighbour, following it.
    ///
    /// Returns false when already at the last frame.
    pub fn move_right(&mut self) -> bool {
        if self.cursor + 1 >= self.frames.len() {
            return false;
        }
        self.frames.swap(self.cursor, self.cursor + 1);
        self.thumbnails.swap(self.cursor, self.cursor + 1);
        self.cursor += 1;
        debug!(cursor = self.cursor, "moved frame right");
        true
    }

    /// Make `index` the current frame.
    pub fn switch_to(&mut self, index: usize) -> Result<(), EditError> {
        if index >= self.frames.len() {
            return Err(EditError::FrameIndex {
                index,
                len: self.frames.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    /// Move the cursor to an index the caller knows is in range.
    pub(crate) fn set_cursor(&mut self, index: usize) {
        debug_assert!(index < self.frames.len(), "cursor {index} out of range");
        self.cursor = index;
    }

    /// Resize every frame to new cell dimensions, keeping overlapping pixels.
    ///
    /// Either every frame is resized or, on invalid dimensions, none is.
    pub fn resize(&mut self, cell_cols: usize, cell_rows: usize) -> Result<(), EditError> {
        let resized = self
            .frames
            .iter()
            .map(|grid| grid.resized(cell_cols, cell_rows))
            .collect::<Result<Vec<_>, _>>()?;
        self.frames = resized;
        for entry in &mut self.thumbnails {
            *entry = None;
        }
        debug!(cell_cols, cell_rows, frames = self.len(), "resized frames");
        Ok(())
    }

    /// Braille text of a frame for the timeline strip, computed on demand.
    pub fn thumbnail(&mut self, index: usize) -> Option<&str> {
        let grid = self.frames.get(index)?;
        let entry = &mut self.thumbnails[index];
        if entry.is_none() {
            *entry = Some(encode::braille_lines(grid).join("\n"));
        }
        entry.as_deref()
    }

    /// Returns `true` when a frame's thumbnail is cached.
    pub fn has_thumbnail(&self, index: usize) -> bool {
        self.thumbnails
            .get(index)
            .map(|t| t.is_some())
            .unwrap_or(false)
    }

    /// Position text such as `"2 / 5"`.
    pub fn counter_label(&self) -> String {
        format!("{} / {}", self.cursor + 1, self.frames.len())
    }
}
