//! # cascii-core-edit
//!
//! Core pixel-grid editing and animation library for Braille art editors.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Editing 1-bit pixel grids made of 2x4 Braille cells
//! - Encoding grids as Braille text, code points, block art and dot strings
//! - Managing an ordered list of animation frames
//! - Controlling timer-driven playback (speed, loop, stepping)
//! - Exporting animations as source listings or JSON
//!
//! ## Features
//!
//! - `toml` - Load [`EditorConfig`] from TOML
//! - `web` - Browser `setTimeout` scheduler for playback
//!
//! ## Example
//!
//! ```rust
//! use cascii_core_edit::{encode, export, ExportFormat, FrameStore};
//!
//! let mut store = FrameStore::new(1, 1).unwrap();
//! store.current_mut().set_pixel(0, 0, true).unwrap();
//! store.current_mut().set_pixel(3, 1, true).unwrap();
//! assert_eq!(encode::braille_lines(store.current()), vec!["\u{2881}"]);
//!
//! store.duplicate_frame();
//! store.current_mut().invert();
//! let json = export::generate(&store, 4, ExportFormat::Json);
//! assert!(json.contains("\"cols\": 1"));
//! ```

mod command;
mod config;
mod editor;
pub mod encode;
mod error;
pub mod export;
mod frames;
mod grid;
mod playback;
pub mod scheduler;
pub mod view;

pub use command::Command;
pub use config::EditorConfig;
pub use editor::{DrawMode, Editor};
pub use encode::Preview;
pub use error::EditError;
pub use export::ExportFormat;
pub use frames::FrameStore;
pub use grid::{Grid, CELL_HEIGHT, CELL_WIDTH};
pub use playback::{Playback, PlaybackState, TickOutcome};
pub use scheduler::{ManualScheduler, Scheduler, TimerId};
pub use view::{DotState, DotView};

#[cfg(feature = "web")]
pub use scheduler::web::WebScheduler;
