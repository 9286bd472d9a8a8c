//! Deferred tick scheduling for playback.
//!
//! The playback engine never sleeps or spawns anything. It asks a
//! [`Scheduler`] for one deferred wake-up at a time and cancels it
//! explicitly before asking for another.

use std::time::Duration;

/// Identifies one scheduled wake-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Source of deferred wake-ups.
///
/// When a scheduled timer fires, the host hands its id back to the
/// editor (see `Editor::on_timer`). Ids that were cancelled must not be
/// delivered; ids that are delivered anyway are ignored by the engine.
pub trait Scheduler {
    /// Arrange a wake-up after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending wake-up. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Deterministic scheduler driven by an explicit clock.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use cascii_core_edit::{ManualScheduler, Scheduler};
///
/// let mut sched = ManualScheduler::new();
/// let id = sched.schedule(Duration::from_millis(250));
///
/// assert_eq!(sched.pop_due(Duration::from_millis(200)), None);
/// assert_eq!(sched.pop_due(Duration::from_millis(250)), Some(id));
/// assert_eq!(sched.now(), Duration::from_millis(250));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    /// Current clock time
    now: Duration,
    /// Next id to hand out
    next_id: u64,
    /// Pending wake-ups as (id, due time)
    pending: Vec<(TimerId, Duration)>,
}

impl ManualScheduler {
    /// Create a scheduler with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of wake-ups still pending.
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return the earliest wake-up due at or before `until`.
    ///
    /// The clock moves to that wake-up's due time. Returns None (and leaves
    /// the clock alone) when nothing is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (pos, &(id, due)) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, due))| *due <= until)
            .min_by_key(|(_, (id, due))| (*due, *id))?;
        self.pending.remove(pos);
        self.now = self.now.max(due);
        Some(id)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, self.now + delay));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|(pending, _)| *pending != id);
    }
}

/// Move fired entries out of `armed` into `retired`, then drop every retired
/// callback except the one still running.
///
/// `C` is whatever keeps a timeout's callback alive.
#[cfg(any(feature = "web", test))]
fn retire_fired<H, C>(
    armed: &mut Vec<(TimerId, H, C)>,
    retired: &mut Vec<(TimerId, C)>,
    fired: &[TimerId],
    running: Option<TimerId>,
) {
    if !fired.is_empty() {
        let (done, still_armed): (Vec<_>, Vec<_>) = std::mem::take(armed)
            .into_iter()
            .partition(|(id, _, _)| fired.contains(id));
        *armed = still_armed;
        retired.extend(done.into_iter().map(|(id, _, callback)| (id, callback)));
    }
    retired.retain(|(id, _)| Some(*id) == running);
}

/// Browser timers backed by `setTimeout`.
#[cfg(feature = "web")]
pub mod web {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use super::{Scheduler, TimerId};

    /// Scheduler that arms `window.setTimeout` for each wake-up.
    ///
    /// Fired ids are passed to the `wake` callback given at construction.
    /// The scheduler owns each timeout's closure: cancelling drops it right
    /// away, and a fired one is dropped by the first `schedule` or `cancel`
    /// made after it has returned.
    /// A typical host keeps its editor in an `Rc<RefCell<_>>` and calls
    /// `on_timer` from that callback.
    ///
    /// ```rust,ignore
    /// let editor = Rc::new(RefCell::new(None));
    /// let target = Rc::clone(&editor);
    /// let sched = WebScheduler::new(move |id| {
    ///     if let Some(ed) = target.borrow_mut().as_mut() {
    ///         ed.on_timer(id);
    ///         redraw(ed);
    ///     }
    /// })?;
    /// *editor.borrow_mut() = Some(Editor::new(EditorConfig::default(), sched)?);
    /// ```
    pub struct WebScheduler {
        window: web_sys::Window,
        wake: Rc<dyn Fn(TimerId)>,
        next_id: u64,
        /// Armed timeouts with their browser handle and callback
        handles: Vec<(TimerId, i32, Closure<dyn FnMut()>)>,
        /// Callbacks of fired timeouts, kept while they may still be running
        retired: Vec<(TimerId, Closure<dyn FnMut()>)>,
        /// Ids whose timeouts have run since the last prune
        fired: Rc<RefCell<Vec<TimerId>>>,
        /// Timeout whose callback is on the stack
        running: Rc<Cell<Option<TimerId>>>,
    }

    impl WebScheduler {
        /// Create a scheduler bound to the current window.
        pub fn new(wake: impl Fn(TimerId) + 'static) -> Result<Self, String> {
            let window = web_sys::window().ok_or("No window available")?;
            Ok(Self {
                window,
                wake: Rc::new(wake),
                next_id: 0,
                handles: Vec::new(),
                retired: Vec::new(),
                fired: Rc::new(RefCell::new(Vec::new())),
                running: Rc::new(Cell::new(None)),
            })
        }

        fn prune_fired(&mut self) {
            let fired: Vec<TimerId> = self.fired.borrow_mut().drain(..).collect();
            super::retire_fired(
                &mut self.handles,
                &mut self.retired,
                &fired,
                self.running.get(),
            );
        }
    }

    impl Scheduler for WebScheduler {
        fn schedule(&mut self, delay: Duration) -> TimerId {
            self.prune_fired();
            let id = TimerId(self.next_id);
            self.next_id += 1;

            let wake = Rc::clone(&self.wake);
            let fired = Rc::clone(&self.fired);
            let running = Rc::clone(&self.running);
            let callback = Closure::wrap(Box::new(move || {
                fired.borrow_mut().push(id);
                running.set(Some(id));
                wake(id);
                running.set(None);
            }) as Box<dyn FnMut()>);
            let timeout = delay.as_millis().min(i32::MAX as u128) as i32;
            match self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref::<js_sys::Function>(),
                    timeout,
                ) {
                Ok(handle) => self.handles.push((id, handle, callback)),
                Err(_) => tracing::error!(?id, "setTimeout failed"),
            }
            id
        }

        fn cancel(&mut self, id: TimerId) {
            self.prune_fired();
            if let Some(pos) = self.handles.iter().position(|(pending, _, _)| *pending == id) {
                let (_, handle, _callback) = self.handles.remove(pos);
                self.window.clear_timeout_with_handle(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut sched = ManualScheduler::new();
        let late = sched.schedule(Duration::from_millis(300));
        let early = sched.schedule(Duration::from_millis(100));

        let until = Duration::from_millis(1000);
        assert_eq!(sched.pop_due(until), Some(early));
        assert_eq!(sched.now(), Duration::from_millis(100));
        assert_eq!(sched.pop_due(until), Some(late));
        assert_eq!(sched.pop_due(until), None);
        assert_eq!(sched.now(), Duration::from_millis(300));
    }

    #[test]
    fn test_cancel() {
        let mut sched = ManualScheduler::new();
        let id = sched.schedule(Duration::from_millis(10));
        assert_eq!(sched.pending_count(), 1);

        sched.cancel(id);
        sched.cancel(id);
        assert_eq!(sched.pending_count(), 0);
        assert_eq!(sched.pop_due(Duration::from_secs(1)), None);
    }

    #[test]
    fn test_fired_callbacks_freed_once_returned() {
        let mut armed = vec![
            (TimerId(0), 10, "first"),
            (TimerId(1), 11, "second"),
            (TimerId(2), 12, "third"),
        ];
        let mut retired = Vec::new();

        // Timer 1 fired and is still on the stack; timer 0 fired and returned
        retire_fired(&mut armed, &mut retired, &[TimerId(0), TimerId(1)], Some(TimerId(1)));
        assert_eq!(armed, vec![(TimerId(2), 12, "third")]);
        assert_eq!(retired, vec![(TimerId(1), "second")]);

        // A second prune inside the same callback keeps it alive
        retire_fired(&mut armed, &mut retired, &[], Some(TimerId(1)));
        assert_eq!(retired.len(), 1);

        retire_fired(&mut armed, &mut retired, &[], None);
        assert!(retired.is_empty());
        assert_eq!(armed.len(), 1);
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let mut sched = ManualScheduler::new();
        sched.set_now(Duration::from_millis(500));
        sched.schedule(Duration::from_millis(100));
        assert_eq!(sched.pop_due(Duration::from_millis(599)), None);
        assert!(sched.pop_due(Duration::from_millis(600)).is_some());
    }
}
