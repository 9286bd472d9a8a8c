//! Application state tying the grid, frames, playback and export together.

use std::time::Duration;

use tracing::{debug, warn};

use crate::encode::Preview;
use crate::scheduler::{ManualScheduler, Scheduler, TimerId};
use crate::view::{self, DotView};
use crate::{
    export, Command, EditError, EditorConfig, ExportFormat, FrameStore, Grid, Playback,
    TickOutcome,
};

/// What a pointer stroke paints when it starts on an off pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// Toggle the first touched pixel and paint that value
    #[default]
    Draw,
    /// Always paint off
    Erase,
}

/// Editor session state, owned by the UI layer.
///
/// All editing goes through this struct; the UI reads back pure data
/// ([`Preview`], [`DotView`]s, labels, export text) after each call and redraws.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use cascii_core_edit::{Editor, EditorConfig, ManualScheduler};
///
/// let mut editor = Editor::new(EditorConfig::default(), ManualScheduler::new()).unwrap();
/// editor.begin_stroke(0, 0, false).unwrap();
/// editor.extend_stroke(3, 1).unwrap();
/// editor.end_stroke();
/// assert_eq!(editor.preview().braille, "\u{2881}\u{2800}");
///
/// editor.duplicate_frame();
/// editor.invert();
/// editor.toggle_play();
/// assert_eq!(editor.store().cursor(), 0);
/// editor.advance(Duration::from_millis(250));
/// assert_eq!(editor.store().cursor(), 1);
/// ```
#[derive(Debug)]
pub struct Editor<S: Scheduler> {
    store: FrameStore,
    playback: Playback,
    scheduler: S,
    mode: DrawMode,
    /// Value painted by the stroke in progress
    stroke: Option<bool>,
    onion_skin: bool,
    /// None until a known format is selected
    export_format: Option<ExportFormat>,
}

impl<S: Scheduler> Editor<S> {
    /// Create an editor with one empty frame.
    pub fn new(config: EditorConfig, scheduler: S) -> Result<Self, EditError> {
        config.validate()?;
        let mut playback = Playback::new(config.fps);
        playback.set_loop(config.loop_playback);
        Ok(Self {
            store: FrameStore::new(config.cols, config.rows)?,
            playback,
            scheduler,
            mode: DrawMode::Draw,
            stroke: None,
            onion_skin: config.onion_skin,
            export_format: Some(config.export_format),
        })
    }

    /// The frames and cursor.
    #[inline]
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// The playback controller.
    #[inline]
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// The scheduler ticks are drawn from.
    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler, for hosts that drive it directly.
    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The frame being edited.
    #[inline]
    pub fn current(&self) -> &Grid {
        self.store.current()
    }

    /// Current draw mode.
    #[inline]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Whether the previous frame shows as ghost dots.
    #[inline]
    pub fn onion_skin(&self) -> bool {
        self.onion_skin
    }

    /// The selected export format, if any.
    #[inline]
    pub fn export_format(&self) -> Option<ExportFormat> {
        self.export_format
    }

    /// Change the cell dimensions of every frame.
    ///
    /// Invalid dimensions are rejected and the previous ones kept.
    pub fn set_dimensions(&mut self, cols: usize, rows: usize) -> Result<(), EditError> {
        if cols == 0 || rows == 0 {
            warn!(cols, rows, "rejecting grid dimensions");
            return Err(EditError::InvalidDimension { cols, rows });
        }
        self.stop_playback();
        self.store.resize(cols, rows)
    }

    /// Set one pixel of the current frame.
    pub fn set_pixel(&mut self, row: usize, col: usize, value: bool) -> Result<(), EditError> {
        self.store.current_mut().set_pixel(row, col, value)
    }

    /// Start a paint stroke on a pixel.
    ///
    /// The value for the whole stroke is decided here: off in erase mode or
    /// when `erase_modifier` is held, otherwise the opposite of the touched
    /// pixel. Stops playback. Returns the painted value.
    pub fn begin_stroke(
        &mut self,
        row: usize,
        col: usize,
        erase_modifier: bool,
    ) -> Result<bool, EditError> {
        let touched = self.current().get(row, col).ok_or(EditError::OutOfBounds {
            row,
            col,
            width: self.current().width(),
            height: self.current().height(),
        })?;
        self.stop_playback();
        let value = !(erase_modifier || self.mode == DrawMode::Erase || touched);
        self.set_pixel(row, col, value)?;
        self.stroke = Some(value);
        Ok(value)
    }

    /// Paint the stroke's value onto another pixel. No-op outside a stroke.
    pub fn extend_stroke(&mut self, row: usize, col: usize) -> Result<(), EditError> {
        match self.stroke {
            Some(value) => self.set_pixel(row, col, value),
            None => Ok(()),
        }
    }

    /// Finish the stroke in progress.
    pub fn end_stroke(&mut self) {
        self.stroke = None;
    }

    /// Whether a stroke is in progress.
    #[inline]
    pub fn is_painting(&self) -> bool {
        self.stroke.is_some()
    }

    /// Switch between drawing and erasing.
    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    /// Turn every pixel of the current frame off.
    pub fn clear(&mut self) {
        self.store.current_mut().clear();
    }

    /// Turn every pixel of the current frame on.
    pub fn fill(&mut self) {
        self.store.current_mut().fill();
    }

    /// Flip every pixel of the current frame.
    pub fn invert(&mut self) {
        self.store.current_mut().invert();
    }

    /// Insert a blank frame after the current one and select it. Stops playback.
    pub fn add_frame(&mut self) {
        self.stop_playback();
        self.store.add_frame();
    }

    /// Insert a copy of the current frame after it and select it. Stops playback.
    pub fn duplicate_frame(&mut self) {
        self.stop_playback();
        self.store.duplicate_frame();
    }

    /// Delete the current frame. The only frame is never deleted.
    pub fn delete_frame(&mut self) -> Result<(), EditError> {
        if self.store.len() <= 1 {
            return Err(EditError::LastFrame);
        }
        self.stop_playback();
        self.store.delete_frame()
    }

    /// Swap the current frame with its left neighbour. Stops playback if it moved.
    pub fn move_frame_left(&mut self) -> bool {
        if self.store.cursor() == 0 {
            return false;
        }
        self.stop_playback();
        self.store.move_left()
    }

    /// Swap the current frame with its right neighbour. Stops playback if it moved.
    pub fn move_frame_right(&mut self) -> bool {
        if self.store.cursor() + 1 >= self.store.len() {
            return false;
        }
        self.stop_playback();
        self.store.move_right()
    }

    /// Select a frame from the timeline. Stops playback.
    pub fn switch_to(&mut self, index: usize) -> Result<(), EditError> {
        if index >= self.store.len() {
            return Err(EditError::FrameIndex {
                index,
                len: self.store.len(),
            });
        }
        self.stop_playback();
        self.store.switch_to(index)
    }

    /// Start playback, advancing one frame at once. Returns whether it is running.
    pub fn start_playback(&mut self) -> bool {
        self.playback.start(&mut self.store, &mut self.scheduler)
    }

    /// Stop playback and cancel the pending tick.
    pub fn stop_playback(&mut self) {
        self.playback.stop(&mut self.scheduler);
    }

    /// Start or stop playback.
    pub fn toggle_play(&mut self) {
        self.playback.toggle(&mut self.store, &mut self.scheduler);
    }

    /// Stop, then show the next frame, wrapping at the end.
    pub fn step_forward(&mut self) {
        self.playback.step_forward(&mut self.store, &mut self.scheduler);
    }

    /// Stop, then show the previous frame, wrapping at the start.
    pub fn step_backward(&mut self) {
        self.playback.step_backward(&mut self.store, &mut self.scheduler);
    }

    /// Change the playback rate; a pending tick is rescheduled.
    pub fn set_fps(&mut self, fps: u32) {
        self.playback.set_fps(fps, &mut self.scheduler);
    }

    /// Set whether playback wraps at the last frame.
    pub fn set_loop(&mut self, looping: bool) {
        self.playback.set_loop(looping);
    }

    /// Flip the loop flag.
    pub fn toggle_loop(&mut self) {
        self.playback.set_loop(!self.playback.looping());
    }

    /// Show or hide the previous frame as ghost dots.
    pub fn toggle_onion_skin(&mut self) {
        self.onion_skin = !self.onion_skin;
    }

    /// Deliver a fired timer to the playback engine.
    pub fn on_timer(&mut self, id: TimerId) -> TickOutcome {
        self.playback.tick(id, &mut self.store, &mut self.scheduler)
    }

    /// Run a keyboard command.
    pub fn dispatch(&mut self, command: Command) {
        debug!(?command, "dispatch");
        match command {
            Command::Clear => self.clear(),
            Command::Fill => self.fill(),
            Command::Invert => self.invert(),
            Command::DrawMode => self.set_mode(DrawMode::Draw),
            Command::EraseMode => self.set_mode(DrawMode::Erase),
            Command::StepBackward => self.step_backward(),
            Command::StepForward => self.step_forward(),
            Command::TogglePlay => self.toggle_play(),
            Command::AddFrame => self.add_frame(),
        }
    }

    /// Select the export format.
    pub fn set_export_format(&mut self, format: ExportFormat) {
        self.export_format = Some(format);
    }

    /// Select the export format by name.
    ///
    /// An unknown name clears the selection, so the export becomes empty.
    pub fn select_export_format(&mut self, name: &str) -> Result<(), EditError> {
        let parsed = name.parse::<ExportFormat>();
        self.export_format = parsed.as_ref().ok().copied();
        parsed.map(|_| ())
    }

    /// The whole animation in the selected format, or "" when none is selected.
    pub fn export(&self) -> String {
        match self.export_format {
            Some(format) => export::generate(&self.store, self.playback.fps(), format),
            None => String::new(),
        }
    }

    /// Text surfaces for the current frame.
    pub fn preview(&self) -> Preview {
        Preview::of(self.current())
    }

    /// Dot views of the current frame, with ghosts when onion skinning.
    pub fn grid_view(&self) -> Vec<Vec<DotView>> {
        let ghost = if self.onion_skin {
            self.store.previous()
        } else {
            None
        };
        view::grid_view(self.current(), ghost)
    }

    /// Pixel size and character count of the current frame.
    pub fn grid_label(&self) -> String {
        view::grid_label(self.current())
    }

    /// Position label such as `2 / 5`.
    pub fn counter_label(&self) -> String {
        self.store.counter_label()
    }

    /// Timeline thumbnail text of a frame.
    pub fn thumbnail(&mut self, index: usize) -> Option<&str> {
        self.store.thumbnail(index)
    }
}

impl Editor<ManualScheduler> {
    /// Move the manual clock forward, delivering every tick that falls due.
    pub fn advance(&mut self, by: Duration) -> Vec<TickOutcome> {
        let until = self.scheduler.now() + by;
        let mut outcomes = Vec::new();
        while let Some(id) = self.scheduler.pop_due(until) {
            outcomes.push(self.on_timer(id));
        }
        self.scheduler.set_now(until);
        outcomes
    }
}
