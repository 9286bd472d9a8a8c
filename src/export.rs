//! Animation export in several textual formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{encode, EditError, FrameStore};

/// Serialized shape of an animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Array of Braille strings, one per frame
    #[default]
    #[serde(rename = "js-braille")]
    JsBraille,
    /// Array of flattened dot strings, one per frame
    #[serde(rename = "js-termdot")]
    JsTermdot,
    /// Array of nested 0/1 rows, one per frame
    #[serde(rename = "js-grid")]
    JsGrid,
    /// Single JSON document with dimensions, fps and Braille lines
    #[serde(rename = "json")]
    Json,
}

impl ExportFormat {
    /// All formats, in menu order.
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::JsBraille,
        ExportFormat::JsTermdot,
        ExportFormat::JsGrid,
        ExportFormat::Json,
    ];

    /// The format's name, as accepted by `from_str`.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::JsBraille => "js-braille",
            ExportFormat::JsTermdot => "js-termdot",
            ExportFormat::JsGrid => "js-grid",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| EditError::UnknownExportFormat(s.to_string()))
    }
}

#[derive(Serialize)]
struct JsonAnimation {
    cols: usize,
    rows: usize,
    fps: u32,
    frames: Vec<Vec<String>>,
}

/// Serialize every frame of the store in the given format.
///
/// ## Example
///
/// ```rust
/// use cascii_core_edit::{export, ExportFormat, FrameStore};
///
/// let store = FrameStore::new(1, 1).unwrap();
/// let out = export::generate(&store, 4, ExportFormat::JsBraille);
/// assert_eq!(out, "const frames = [\n  \"\u{2800}\",\n];");
/// ```
pub fn generate(store: &FrameStore, fps: u32, format: ExportFormat) -> String {
    match format {
        ExportFormat::JsBraille => array_listing(
            store
                .frames()
                .iter()
                .map(|grid| quote(&encode::braille_lines(grid).join("\n"))),
        ),
        ExportFormat::JsTermdot => array_listing(
            store
                .frames()
                .iter()
                .map(|grid| quote(&encode::termdot(grid))),
        ),
        ExportFormat::JsGrid => array_listing(
            store
                .frames()
                .iter()
                .map(|grid| serde_json::to_string(&grid.to_bits()).unwrap_or_default()),
        ),
        ExportFormat::Json => {
            let doc = JsonAnimation {
                cols: store.cell_cols(),
                rows: store.cell_rows(),
                fps,
                frames: store.frames().iter().map(encode::braille_lines).collect(),
            };
            serde_json::to_string_pretty(&doc).unwrap_or_default()
        }
    }
}

/// Serialize by format name. Unknown names produce an empty string.
pub fn generate_named(store: &FrameStore, fps: u32, format: &str) -> String {
    match format.parse() {
        Ok(format) => generate(store, fps, format),
        Err(_) => String::new(),
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_default()
}

fn array_listing<I: Iterator<Item = String>>(items: I) -> String {
    let body: Vec<String> = items.map(|item| format!("  {item},")).collect();
    format!("const frames = [\n{}\n];", body.join("\n"))
}
