/*
 * Window-owned timers.
 *
 * Callers hold a `TimerHandle`; the callback itself lives in the `TimerWheel`
 * on the UI thread and always runs there, isolated. The handle's running flag
 * flips synchronously so `is_running` answers immediately, while arming and
 * disarming the wheel is queued like any other UI mutation.
 *
 * The wheel also carries single-shot internal tasks (highlight reversion),
 * which receive the UI context when they fire.
 */
use crate::callbacks::isolate;
use crate::options::{TimerFn, TimerOptions};
use crate::ui_thread::{Task, UiContext, UiQueue};
use crate::window_factory::Window;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_timer_id() -> u64 {
    NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Caller-side handle to a window timer.
#[derive(Clone)]
pub struct TimerHandle {
    id: u64,
    window_id: String,
    running: Arc<AtomicBool>,
    /// Set once the owning window is disposed or the timer removed.
    released: Arc<AtomicBool>,
    queue: UiQueue,
}

impl TimerHandle {
    pub(crate) fn new(id: u64, window_id: String, running: bool, queue: UiQueue) -> Self {
        Self {
            id,
            window_id,
            running: Arc::new(AtomicBool::new(running)),
            released: Arc::new(AtomicBool::new(false)),
            queue,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn window_id(&self) -> &str {
        &self.window_id
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /*
     * Stops the timer for good; `start` is ignored afterwards. The wheel
     * entry is dropped by whoever released the handle. Returns whether the
     * timer was running.
     */
    pub(crate) fn release(&self) -> bool {
        self.released.store(true, Ordering::SeqCst);
        self.running.swap(false, Ordering::SeqCst)
    }

    /// Starts the timer; a running timer keeps its schedule.
    pub fn start(&self) {
        if self.is_released() {
            log::debug!(
                "TimerManager: timer {} of '{}' is released; start ignored",
                self.id,
                self.window_id
            );
            return;
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let id = self.id;
        self.queue.post("timer start", move |ctx| {
            ctx.timers.arm(id, Instant::now());
        });
    }

    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        let id = self.id;
        self.queue.post("timer stop", move |ctx| ctx.timers.disarm(id));
    }
}

impl PartialEq for TimerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("id", &self.id)
            .field("window_id", &self.window_id)
            .field("running", &self.is_running())
            .field("released", &self.is_released())
            .finish()
    }
}

struct RecurringTimer {
    window_id: String,
    interval: Duration,
    repeats: bool,
    running: Arc<AtomicBool>,
    callback: TimerFn,
    due: Option<Instant>,
}

struct OnceTimer {
    due: Instant,
    label: &'static str,
    task: Task,
}

#[derive(Default)]
pub(crate) struct TimerWheel {
    recurring: BTreeMap<u64, RecurringTimer>,
    once: Vec<OnceTimer>,
}

pub(crate) struct TimerRegistration {
    pub id: u64,
    pub window_id: String,
    pub interval: Duration,
    pub repeats: bool,
    pub running: Arc<AtomicBool>,
    pub callback: TimerFn,
}

impl TimerWheel {
    pub(crate) fn register(&mut self, reg: TimerRegistration, now: Instant) {
        let interval = reg.interval.max(Duration::from_millis(1));
        let due = reg.running.load(Ordering::SeqCst).then(|| now + interval);
        log::debug!(
            "TimerManager: registered timer {} for '{}' every {interval:?} (running: {})",
            reg.id,
            reg.window_id,
            due.is_some()
        );
        self.recurring.insert(
            reg.id,
            RecurringTimer {
                window_id: reg.window_id,
                interval,
                repeats: reg.repeats,
                running: reg.running,
                callback: reg.callback,
                due,
            },
        );
    }

    pub(crate) fn arm(&mut self, id: u64, now: Instant) {
        match self.recurring.get_mut(&id) {
            Some(timer) if timer.running.load(Ordering::SeqCst) && timer.due.is_none() => {
                timer.due = Some(now + timer.interval);
            }
            Some(_) => {}
            None => log::debug!("TimerManager: timer {id} is gone; start ignored"),
        }
    }

    pub(crate) fn disarm(&mut self, id: u64) {
        if let Some(timer) = self.recurring.get_mut(&id) {
            timer.due = None;
        }
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        self.recurring.remove(&id).is_some()
    }

    /// Drops every timer of `window_id`; returns how many were removed.
    pub(crate) fn remove_window(&mut self, window_id: &str) -> usize {
        let before = self.recurring.len();
        self.recurring.retain(|_, timer| {
            if timer.window_id == window_id {
                timer.running.store(false, Ordering::SeqCst);
                false
            } else {
                true
            }
        });
        before - self.recurring.len()
    }

    pub(crate) fn schedule_once(&mut self, due: Instant, label: &'static str, task: Task) {
        self.once.push(OnceTimer { due, label, task });
    }

    pub(crate) fn next_due(&self) -> Option<Instant> {
        let recurring = self.recurring.values().filter_map(|t| t.due).min();
        let once = self.once.iter().map(|t| t.due).min();
        match (recurring, once) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub(crate) fn armed_count(&self) -> usize {
        self.recurring.values().filter(|t| t.due.is_some()).count()
    }

    fn take_due_once(&mut self, now: Instant) -> Vec<OnceTimer> {
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.once).into_iter().partition(|t| t.due <= now);
        self.once = pending;
        due
    }

    /*
     * Runs every recurring callback that is due. A timer whose handle was
     * stopped after it was armed is skipped and disarmed. Repeating timers
     * reschedule from their previous due time, or from `now` when they fell
     * more than one interval behind.
     */
    pub(crate) fn fire_recurring(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        for (id, timer) in self.recurring.iter_mut() {
            let Some(due) = timer.due.filter(|due| *due <= now) else {
                continue;
            };
            if !timer.running.load(Ordering::SeqCst) {
                timer.due = None;
                continue;
            }
            let subject = format!("{}#{id}", timer.window_id);
            let callback = &mut timer.callback;
            isolate("timer callback", &subject, || callback());
            fired += 1;
            if timer.repeats {
                let next = due + timer.interval;
                timer.due = Some(if next <= now { now + timer.interval } else { next });
            } else {
                timer.due = None;
                timer.running.store(false, Ordering::SeqCst);
            }
        }
        fired
    }
}

impl Window {
    /*
     * Creates a timer owned by this window. With `auto_start` it first fires
     * one interval from now. The returned handle starts and stops it from any
     * thread; disposing the window stops it for good.
     */
    pub fn create_timer(&self, opts: TimerOptions) -> TimerHandle {
        let id = next_timer_id();
        let window_id = self.id().to_string();
        let disposed = self.is_disposed();
        let handle = TimerHandle::new(
            id,
            window_id.clone(),
            opts.auto_start && !disposed,
            self.inner.queue.clone(),
        );
        if disposed {
            log::debug!("TimerManager: '{window_id}' is disposed; timer {id} never runs");
            handle.release();
            return handle;
        }
        let registration = TimerRegistration {
            id,
            window_id,
            interval: opts.interval,
            repeats: opts.repeats,
            running: handle.running_flag(),
            callback: opts.callback,
        };
        self.inner.timers.lock().push(handle.clone());
        self.post("create timer", move |ctx| {
            ctx.timers.register(registration, Instant::now())
        });
        handle
    }

    /// Stops and forgets a timer of this window. Returns false for foreign handles.
    pub fn remove_timer(&self, handle: &TimerHandle) -> bool {
        let removed = {
            let mut timers = self.inner.timers.lock();
            let before = timers.len();
            timers.retain(|timer| timer != handle);
            timers.len() != before
        };
        if !removed {
            log::debug!("TimerManager: timer {} is not owned by '{}'", handle.id(), self.id());
            return false;
        }
        handle.release();
        let id = handle.id();
        self.post("remove timer", move |ctx| {
            ctx.timers.remove(id);
        });
        true
    }

    pub fn running_timer_count(&self) -> usize {
        self.inner
            .timers
            .lock()
            .iter()
            .filter(|timer| timer.is_running())
            .count()
    }

    pub fn timers(&self) -> Vec<TimerHandle> {
        self.inner.timers.lock().clone()
    }
}

/// Fires everything due at `now`: recurring callbacks first, then internal tasks.
pub(crate) fn fire_due(ctx: &mut UiContext, now: Instant) {
    ctx.timers.fire_recurring(now);
    for once in ctx.timers.take_due_once(now) {
        let task = once.task;
        isolate("scheduled task", once.label, || task(&mut *ctx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn registration(id: u64, window: &str, repeats: bool, hits: &Arc<AtomicUsize>) -> TimerRegistration {
        let counter = Arc::clone(hits);
        TimerRegistration {
            id,
            window_id: window.into(),
            interval: Duration::from_millis(100),
            repeats,
            running: Arc::new(AtomicBool::new(true)),
            callback: Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        }
    }

    #[test]
    fn repeating_timer_fires_each_interval() {
        // Arrange
        let hits = Arc::new(AtomicUsize::new(0));
        let mut wheel = TimerWheel::default();
        let start = Instant::now();
        wheel.register(registration(1, "w", true, &hits), start);

        // Act
        wheel.fire_recurring(start + Duration::from_millis(50));
        wheel.fire_recurring(start + Duration::from_millis(100));
        wheel.fire_recurring(start + Duration::from_millis(200));

        // Assert
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(wheel.next_due(), Some(start + Duration::from_millis(300)));
    }

    #[test]
    fn single_shot_timer_stops_itself() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut wheel = TimerWheel::default();
        let start = Instant::now();
        let reg = registration(2, "w", false, &hits);
        let running = Arc::clone(&reg.running);
        wheel.register(reg, start);
        wheel.fire_recurring(start + Duration::from_secs(1));
        wheel.fire_recurring(start + Duration::from_secs(2));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!running.load(Ordering::SeqCst));
        assert_eq!(wheel.armed_count(), 0);
    }

    #[test]
    fn stopped_flag_skips_an_armed_timer() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut wheel = TimerWheel::default();
        let start = Instant::now();
        let reg = registration(3, "w", true, &hits);
        let running = Arc::clone(&reg.running);
        wheel.register(reg, start);
        running.store(false, Ordering::SeqCst);
        wheel.fire_recurring(start + Duration::from_secs(1));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(wheel.next_due(), None);
    }

    #[test]
    fn panicking_callback_keeps_its_schedule() {
        let mut wheel = TimerWheel::default();
        let start = Instant::now();
        wheel.register(
            TimerRegistration {
                id: 4,
                window_id: "w".into(),
                interval: Duration::from_millis(10),
                repeats: true,
                running: Arc::new(AtomicBool::new(true)),
                callback: Box::new(|| panic!("timer failure")),
            },
            start,
        );
        assert_eq!(wheel.fire_recurring(start + Duration::from_millis(10)), 1);
        assert_eq!(wheel.armed_count(), 1);
    }

    #[test]
    fn remove_window_drops_only_that_windows_timers() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut wheel = TimerWheel::default();
        let now = Instant::now();
        wheel.register(registration(5, "a", true, &hits), now);
        wheel.register(registration(6, "a", true, &hits), now);
        wheel.register(registration(7, "b", true, &hits), now);
        assert_eq!(wheel.remove_window("a"), 2);
        assert_eq!(wheel.armed_count(), 1);
        assert!(wheel.remove(7));
        assert!(!wheel.remove(7));
    }

    #[test]
    fn stopped_registration_waits_for_arm() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut wheel = TimerWheel::default();
        let now = Instant::now();
        let reg = registration(8, "w", true, &hits);
        reg.running.store(false, Ordering::SeqCst);
        let running = Arc::clone(&reg.running);
        wheel.register(reg, now);
        assert_eq!(wheel.next_due(), None);
        running.store(true, Ordering::SeqCst);
        wheel.arm(8, now);
        assert_eq!(wheel.next_due(), Some(now + Duration::from_millis(100)));
    }
}
