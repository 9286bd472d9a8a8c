//! Editor session defaults.

use serde::{Deserialize, Serialize};

use crate::{EditError, ExportFormat};

/// Starting settings for an editor session.
///
/// Every field has a default, so a partial `editor.toml` (or none) works.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Braille cell columns
    pub cols: usize,
    /// Braille cell rows
    pub rows: usize,
    /// Playback frames per second
    pub fps: u32,
    /// Wrap playback at the last frame
    pub loop_playback: bool,
    /// Show the previous frame as ghost dots
    pub onion_skin: bool,
    /// Format produced by the animation export
    pub export_format: ExportFormat,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cols: 2,
            rows: 1,
            fps: 4,
            loop_playback: true,
            onion_skin: false,
            export_format: ExportFormat::JsBraille,
        }
    }
}

impl EditorConfig {
    /// Parse an `editor.toml` string into `EditorConfig`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Check that the grid dimensions are usable.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(EditError::InvalidDimension {
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EditorConfig::default();
        assert_eq!((config.cols, config.rows), (2, 1));
        assert_eq!(config.fps, 4);
        assert!(config.loop_playback);
        assert!(!config.onion_skin);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_cells_rejected() {
        let config = EditorConfig {
            rows: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(EditError::InvalidDimension { cols: 2, rows: 0 })
        );
    }

    #[test]
    fn partial_json() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"cols": 8, "export_format": "json"}"#).unwrap();
        assert_eq!(config.cols, 8);
        assert_eq!(config.rows, 1);
        assert_eq!(config.export_format, ExportFormat::Json);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn from_toml() {
        let config = EditorConfig::from_toml_str(
            "cols = 4\nrows = 3\nfps = 10\nloop_playback = false\nexport_format = \"js-grid\"\n",
        )
        .unwrap();
        assert_eq!((config.cols, config.rows, config.fps), (4, 3, 10));
        assert!(!config.loop_playback);
        assert_eq!(config.export_format, ExportFormat::JsGrid);
        assert!(!config.onion_skin);
    }
}
