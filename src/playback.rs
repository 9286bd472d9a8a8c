//! Playback state machine for frame animation.

use std::time::Duration;

use tracing::{debug, trace};

use crate::scheduler::{Scheduler, TimerId};
use crate::FrameStore;

/// Current state of playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Playback is stopped
    #[default]
    Stopped,
    /// Playback is running with one tick scheduled
    Playing,
}

/// What a delivered tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick was stale or playback was not running
    Ignored,
    /// The cursor moved to this frame and another tick was scheduled
    Advanced(usize),
    /// The end was reached without looping; playback stopped
    Stopped,
}

/// Timer-driven playback controller.
///
/// The controller advances a [`FrameStore`]'s cursor on scheduled ticks.
/// At most one tick is outstanding at any time: starting, stopping and
/// changing the rate all cancel the pending tick before scheduling a new one,
/// and a tick whose id is not the pending one is ignored.
///
/// ## Example
///
/// ```rust
/// use cascii_core_edit::{FrameStore, ManualScheduler, Playback, PlaybackState, TickOutcome};
///
/// let mut store = FrameStore::new(1, 1).unwrap();
/// store.add_frame();
/// store.switch_to(0).unwrap();
///
/// let mut sched = ManualScheduler::new();
/// let mut playback = Playback::new(4);
/// assert!(playback.start(&mut store, &mut sched));
/// assert_eq!(store.cursor(), 1);
///
/// let id = sched.pop_due(playback.interval()).unwrap();
/// assert_eq!(playback.tick(id, &mut store, &mut sched), TickOutcome::Advanced(0));
///
/// playback.stop(&mut sched);
/// assert_eq!(playback.state(), PlaybackState::Stopped);
/// assert_eq!(sched.pending_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Playback {
    /// Frames per second
    fps: u32,
    /// Wrap to the first frame at the end
    looping: bool,
    /// Current playback state
    state: PlaybackState,
    /// The single outstanding tick, if any
    pending: Option<TimerId>,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Playback {
    /// Create a stopped, looping controller at the given FPS.
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            looping: true,
            state: PlaybackState::Stopped,
            pending: None,
        }
    }

    /// Get the current FPS.
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Time between ticks.
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Get the interval in whole milliseconds between ticks.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        (1000 / self.fps).max(1)
    }

    /// Whether playback wraps around at the last frame.
    #[inline]
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Get the current playback state.
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Check if playback is running.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// The outstanding tick, if one is scheduled.
    #[inline]
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Set the playback FPS (clamped to at least 1).
    ///
    /// While playing, the pending tick is replaced by one at the new interval.
    pub fn set_fps<S: Scheduler>(&mut self, fps: u32, sched: &mut S) {
        self.fps = fps.max(1);
        if self.is_playing() {
            self.reschedule(sched);
        }
        debug!(fps = self.fps, "set playback fps");
    }

    /// Set whether playback loops. Takes effect at the next end-of-frames tick.
    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Start playback.
    ///
    /// The first advance happens immediately, exactly as a tick would; the
    /// next one is scheduled an interval later. Without looping, starting on
    /// the last frame stops again at once. Does nothing with fewer than two
    /// frames. Already playing is left as is.
    /// Returns whether playback is running afterwards.
    pub fn start<S: Scheduler>(&mut self, store: &mut FrameStore, sched: &mut S) -> bool {
        if self.is_playing() {
            return true;
        }
        if store.len() <= 1 {
            debug!("not starting playback with a single frame");
            return false;
        }
        self.state = PlaybackState::Playing;
        debug!(fps = self.fps, cursor = store.cursor(), "playback started");
        self.advance(store, sched) != TickOutcome::Stopped
    }

    /// Stop playback and cancel the pending tick.
    pub fn stop<S: Scheduler>(&mut self, sched: &mut S) {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
        if self.is_playing() {
            debug!("playback stopped");
        }
        self.state = PlaybackState::Stopped;
    }

    /// Toggle between playing and stopped.
    pub fn toggle<S: Scheduler>(&mut self, store: &mut FrameStore, sched: &mut S) {
        if self.is_playing() {
            self.stop(sched);
        } else {
            self.start(store, sched);
        }
    }

    /// Handle a fired tick.
    ///
    /// Moves the cursor one frame forward, wrapping or stopping at the end
    /// according to the loop flag, and schedules the next tick.
    pub fn tick<S: Scheduler>(
        &mut self,
        id: TimerId,
        store: &mut FrameStore,
        sched: &mut S,
    ) -> TickOutcome {
        if !self.is_playing() || self.pending != Some(id) {
            trace!(?id, "ignoring stale tick");
            return TickOutcome::Ignored;
        }
        self.pending = None;
        self.advance(store, sched)
    }

    /// Move one frame forward and schedule the next tick, or stop at the end.
    fn advance<S: Scheduler>(&mut self, store: &mut FrameStore, sched: &mut S) -> TickOutcome {
        if store.len() <= 1 {
            self.stop(sched);
            return TickOutcome::Stopped;
        }

        let mut next = store.cursor() + 1;
        if next >= store.len() {
            if !self.looping {
                self.stop(sched);
                return TickOutcome::Stopped;
            }
            next = 0;
        }

        store.set_cursor(next);
        self.reschedule(sched);
        trace!(cursor = next, "playback advance");
        TickOutcome::Advanced(next)
    }

    /// Stop, then move one frame forward, wrapping at the end.
    pub fn step_forward<S: Scheduler>(&mut self, store: &mut FrameStore, sched: &mut S) {
        self.stop(sched);
        store.set_cursor((store.cursor() + 1) % store.len());
    }

    /// Stop, then move one frame backward, wrapping at the start.
    pub fn step_backward<S: Scheduler>(&mut self, store: &mut FrameStore, sched: &mut S) {
        self.stop(sched);
        let len = store.len();
        store.set_cursor((store.cursor() + len - 1) % len);
    }

    fn reschedule<S: Scheduler>(&mut self, sched: &mut S) {
        if let Some(old) = self.pending.take() {
            sched.cancel(old);
        }
        self.pending = Some(sched.schedule(self.interval()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;

    fn store(frames: usize) -> FrameStore {
        let mut store = FrameStore::new(1, 1).unwrap();
        for _ in 1..frames {
            store.add_frame();
        }
        store.switch_to(0).unwrap();
        store
    }

    /// Fire every tick due by `until`, returning the outcomes.
    fn run_until(
        playback: &mut Playback,
        store: &mut FrameStore,
        sched: &mut ManualScheduler,
        until: Duration,
    ) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while let Some(id) = sched.pop_due(until) {
            outcomes.push(playback.tick(id, store, sched));
        }
        sched.set_now(until);
        outcomes
    }

    fn fire_next(playback: &mut Playback, store: &mut FrameStore, sched: &mut ManualScheduler) -> TickOutcome {
        let id = playback.pending().unwrap();
        sched.cancel(id);
        playback.tick(id, store, sched)
    }

    #[test_log::test]
    fn test_single_frame_does_not_start() {
        let mut store = store(1);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);

        assert!(!playback.start(&mut store, &mut sched));
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test_log::test]
    fn test_start_advances_at_once() {
        let mut store = store(3);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);

        assert!(playback.start(&mut store, &mut sched));
        assert_eq!(store.cursor(), 1);
        assert_eq!(sched.pending_count(), 1);
        assert_eq!(sched.pop_due(Duration::from_millis(249)), None);
    }

    #[test_log::test]
    fn test_once_start_on_last_frame_stops() {
        let mut store = store(3);
        store.switch_to(2).unwrap();
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);
        playback.set_loop(false);

        assert!(!playback.start(&mut store, &mut sched));
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(store.cursor(), 2);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test_log::test]
    fn test_once_stops_on_last_frame() {
        let mut store = store(3);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);
        playback.set_loop(false);
        playback.start(&mut store, &mut sched);
        assert_eq!(store.cursor(), 1);

        assert_eq!(fire_next(&mut playback, &mut store, &mut sched), TickOutcome::Advanced(2));
        assert_eq!(fire_next(&mut playback, &mut store, &mut sched), TickOutcome::Stopped);

        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(store.cursor(), 2);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test_log::test]
    fn test_loop_wraps() {
        let mut store = store(3);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);
        playback.start(&mut store, &mut sched);

        assert_eq!(fire_next(&mut playback, &mut store, &mut sched), TickOutcome::Advanced(2));
        assert_eq!(fire_next(&mut playback, &mut store, &mut sched), TickOutcome::Advanced(0));
        assert_eq!(store.cursor(), 0);
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert!(playback.pending().is_some());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut store = store(2);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);

        playback.start(&mut store, &mut sched);
        let first = playback.pending();
        playback.start(&mut store, &mut sched);
        assert_eq!(playback.pending(), first);
        assert_eq!(store.cursor(), 1);
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut store = store(2);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);

        playback.start(&mut store, &mut sched);
        playback.stop(&mut sched);
        playback.stop(&mut sched);
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn test_stale_tick_ignored() {
        let mut store = store(3);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);

        playback.start(&mut store, &mut sched);
        let stale = playback.pending().unwrap();
        playback.set_fps(8, &mut sched);

        assert_eq!(playback.tick(stale, &mut store, &mut sched), TickOutcome::Ignored);
        assert_eq!(store.cursor(), 1);

        playback.stop(&mut sched);
        assert_eq!(playback.tick(TimerId(99), &mut store, &mut sched), TickOutcome::Ignored);
    }

    #[test_log::test]
    fn test_fps_change_single_timer() {
        let mut store = store(10);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);
        let ms = Duration::from_millis;

        playback.start(&mut store, &mut sched);
        assert_eq!(run_until(&mut playback, &mut store, &mut sched, ms(250)).len(), 1);
        assert_eq!(store.cursor(), 2);

        // Half-way to the next tick, slow down to 2 fps
        sched.set_now(ms(350));
        playback.set_fps(2, &mut sched);
        assert_eq!(sched.pending_count(), 1);

        assert!(run_until(&mut playback, &mut store, &mut sched, ms(849)).is_empty());
        assert_eq!(
            run_until(&mut playback, &mut store, &mut sched, ms(850)),
            vec![TickOutcome::Advanced(3)]
        );
        assert_eq!(run_until(&mut playback, &mut store, &mut sched, ms(1850)).len(), 2);
        assert_eq!(store.cursor(), 5);
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn test_settings_while_stopped() {
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);

        playback.set_fps(0, &mut sched);
        assert_eq!(playback.fps(), 1);
        playback.set_fps(12, &mut sched);
        playback.set_loop(false);
        assert_eq!(playback.fps(), 12);
        assert!(!playback.looping());
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn test_step_wraps_and_stops() {
        let mut store = store(3);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);
        playback.set_loop(false);

        playback.start(&mut store, &mut sched);
        playback.step_backward(&mut store, &mut sched);
        assert_eq!(store.cursor(), 0);
        assert!(!playback.is_playing());
        assert_eq!(sched.pending_count(), 0);

        playback.step_backward(&mut store, &mut sched);
        assert_eq!(store.cursor(), 2);
        playback.step_forward(&mut store, &mut sched);
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_tick_after_frames_deleted() {
        let mut store = store(3);
        let mut sched = ManualScheduler::new();
        let mut playback = Playback::new(4);

        playback.start(&mut store, &mut sched);
        store.switch_to(2).unwrap();
        store.delete_frame().unwrap();
        store.delete_frame().unwrap();

        assert_eq!(fire_next(&mut playback, &mut store, &mut sched), TickOutcome::Stopped);
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_interval() {
        assert_eq!(Playback::new(4).interval(), Duration::from_millis(250));
        assert_eq!(Playback::new(24).interval_ms(), 41);
        assert_eq!(Playback::new(60).interval_ms(), 16);
    }
}
