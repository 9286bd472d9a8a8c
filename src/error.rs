//! Error type shared by the editing operations.

/// Error type for grid, frame and export operations.
///
/// Every operation that returns one of these leaves the editor state
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Pixel coordinates outside the current grid
    #[error("Pixel ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    /// Cell counts must both be positive
    #[error("Invalid dimensions: {cols}x{rows} cells")]
    InvalidDimension { cols: usize, rows: usize },
    /// The frame store always keeps at least one frame
    #[error("Cannot delete the last remaining frame")]
    LastFrame,
    /// Frame index outside the frame list
    #[error("Frame index {index} out of range for {len} frames")]
    FrameIndex { index: usize, len: usize },
    /// Export format name not recognized
    #[error("Unknown export format: {0}")]
    UnknownExportFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EditError::OutOfBounds {
            row: 4,
            col: 1,
            width: 2,
            height: 4,
        };
        assert_eq!(err.to_string(), "Pixel (4, 1) is outside the 2x4 grid");
        assert_eq!(
            EditError::InvalidDimension { cols: 0, rows: 3 }.to_string(),
            "Invalid dimensions: 0x3 cells"
        );
        assert_eq!(
            EditError::UnknownExportFormat("gif".into()).to_string(),
            "Unknown export format: gif"
        );
    }
}
