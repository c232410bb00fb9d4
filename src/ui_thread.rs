/*
 * The UI-owning thread.
 *
 * One named thread owns the frame host, every window's retained state and the
 * timer wheel. Any thread may post work through a `UiQueue`; tasks run in FIFO
 * order. Each loop iteration waits until the next timer is due (or the host
 * wants polling), pumps native input, runs queued tasks, fires due timers and
 * finally presents the windows that changed.
 *
 * Every task, timer callback and listener runs isolated: a panic is logged
 * and the loop carries on with the next item.
 */
use crate::callbacks::isolate;
use crate::command_executor;
use crate::error::{OverlayError, Result};
use crate::host::{FrameHandle, FrameHost, HostFactory};
use crate::timer_manager::{self, TimerWheel};
use crate::window_common::{WindowData, WindowRole};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

pub(crate) type Task = Box<dyn FnOnce(&mut UiContext) + Send>;

const MAX_SETTLE_ROUNDS: usize = 32;

enum Message {
    Run { label: &'static str, task: Task },
    Shutdown,
}

/// Cloneable producer side of the UI thread's queue.
#[derive(Clone)]
pub(crate) struct UiQueue {
    sender: Sender<Message>,
    ui_thread: Arc<OnceLock<ThreadId>>,
}

impl UiQueue {
    /// Queues `task`. Returns false once the UI thread has shut down.
    pub(crate) fn post(
        &self,
        label: &'static str,
        task: impl FnOnce(&mut UiContext) + Send + 'static,
    ) -> bool {
        let message = Message::Run {
            label,
            task: Box::new(task),
        };
        if self.sender.send(message).is_err() {
            log::debug!("UiThread: '{label}' dropped; UI thread is gone");
            return false;
        }
        true
    }

    pub(crate) fn is_ui_thread(&self) -> bool {
        self.ui_thread.get() == Some(&thread::current().id())
    }

    /*
     * Runs `f` on the UI thread and waits for its result. Meant for
     * diagnostics only. Called from the UI thread itself it returns `None`
     * instead of deadlocking.
     */
    pub(crate) fn call<R, F>(&self, label: &'static str, timeout: Duration, f: F) -> Option<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut UiContext) -> R + Send + 'static,
    {
        if self.is_ui_thread() {
            log::warn!("UiThread: '{label}' queried from the UI thread; no answer");
            return None;
        }
        let (reply, answer) = crossbeam_channel::bounded(1);
        let posted = self.post(label, move |ctx| {
            let _ = reply.send(f(ctx));
        });
        if !posted {
            return None;
        }
        match answer.recv_timeout(timeout) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("UiThread: '{label}' got no answer: {err}");
                None
            }
        }
    }

    /*
     * Waits until the queue is empty, including tasks queued by the tasks it
     * waited for, and the host has been handed every dirty scene. Returns
     * false on timeout or when the UI thread is gone.
     */
    pub(crate) fn flush(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        for _ in 0..MAX_SETTLE_ROUNDS {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let settled = self.call("flush", remaining, |ctx| {
                let idle = ctx.pending_tasks() == 0;
                if idle {
                    ctx.present_dirty();
                }
                idle
            });
            match settled {
                Some(true) => return true,
                Some(false) => continue,
                None => return false,
            }
        }
        false
    }
}

/// State owned by the UI thread, handed to every task.
pub(crate) struct UiContext {
    pub(crate) host: Box<dyn FrameHost>,
    pub(crate) windows: HashMap<String, WindowData>,
    pub(crate) timers: TimerWheel,
    pub(crate) queue: UiQueue,
    inbox: Receiver<Message>,
    show_seq: u64,
    highlight_seq: u64,
}

impl UiContext {
    fn new(host: Box<dyn FrameHost>, queue: UiQueue, inbox: Receiver<Message>) -> Self {
        Self {
            host,
            windows: HashMap::new(),
            timers: TimerWheel::default(),
            queue,
            inbox,
            show_seq: 0,
            highlight_seq: 0,
        }
    }

    /// A context with no thread behind it, for driving executors directly.
    #[cfg(test)]
    pub(crate) fn detached(host: Box<dyn FrameHost>) -> Self {
        let (sender, inbox) = crossbeam_channel::unbounded();
        let queue = UiQueue {
            sender,
            ui_thread: Arc::new(OnceLock::new()),
        };
        Self::new(host, queue, inbox)
    }

    /// Runs `f` against the window's state; `None` if the window is gone.
    pub(crate) fn with_window<R>(
        &mut self,
        window_id: &str,
        f: impl FnOnce(&mut WindowData) -> R,
    ) -> Option<R> {
        match self.windows.get_mut(window_id) {
            Some(window) => Some(f(window)),
            None => {
                log::debug!("UiThread: window '{window_id}' not found; task skipped");
                None
            }
        }
    }

    pub(crate) fn next_show_seq(&mut self) -> u64 {
        self.show_seq += 1;
        self.show_seq
    }

    pub(crate) fn next_highlight_generation(&mut self) -> u64 {
        self.highlight_seq += 1;
        self.highlight_seq
    }

    /// The visible modal dialog blocking input to `window_id`, if any.
    pub(crate) fn blocking_modal(&self, window_id: &str) -> Option<&str> {
        self.windows
            .values()
            .find(|w| w.visible && w.modal_owner() == Some(window_id))
            .map(|w| w.id.as_str())
    }

    pub(crate) fn window_for_frame(&self, frame: FrameHandle) -> Option<String> {
        self.windows
            .values()
            .find(|w| w.frame == Some(frame))
            .map(|w| w.id.clone())
    }

    pub(crate) fn pending_tasks(&self) -> usize {
        self.inbox.len()
    }

    fn run(&mut self, label: &'static str, task: Task) {
        isolate("UI task", label, || task(&mut *self));
    }

    /// Returns false when the loop should stop.
    fn handle(&mut self, message: Message) -> bool {
        match message {
            Message::Run { label, task } => {
                self.run(label, task);
                true
            }
            Message::Shutdown => false,
        }
    }

    fn next_wakeup(&self) -> Option<Instant> {
        let poll = self.host.poll_interval().map(|every| Instant::now() + every);
        match (self.timers.next_due(), poll) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn pump_host(&mut self) {
        let mut events = Vec::new();
        let name = self.host.name();
        isolate("host event poll", name, || events = self.host.poll_events());
        for event in events {
            isolate("host event", name, || {
                command_executor::route_host_event(&mut *self, event)
            });
        }
    }

    fn present_dirty(&mut self) {
        let host = &mut self.host;
        for window in self.windows.values_mut().filter(|w| w.dirty) {
            window.dirty = false;
            if let Some(frame) = window.frame {
                isolate("frame present", &window.id, || {
                    let scene = window.build_scene();
                    host.present(frame, &scene);
                });
            }
        }
    }

    fn teardown(&mut self) {
        let windows: Vec<WindowData> = self.windows.drain().map(|(_, w)| w).collect();
        log::debug!("UiThread: tearing down {} window(s)", windows.len());
        for window in windows {
            if let Some(frame) = window.frame {
                self.host.destroy_frame(frame);
            }
            if let WindowRole::Dialog {
                synthetic_owner: Some(owner),
                ..
            } = window.role
            {
                self.host.destroy_frame(owner);
            }
            self.timers.remove_window(&window.id);
        }
    }
}

fn run_loop(mut ctx: UiContext) {
    log::debug!("UiThread: loop started with '{}' host", ctx.host.name());
    let inbox = ctx.inbox.clone();
    let mut running = true;
    while running {
        let first = match ctx.next_wakeup() {
            Some(at) => inbox.recv_deadline(at),
            None => inbox.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        ctx.pump_host();
        match first {
            Ok(message) => running = ctx.handle(message),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => running = false,
        }
        while running {
            match inbox.try_recv() {
                Ok(message) => running = ctx.handle(message),
                Err(_) => break,
            }
        }
        isolate("timer wheel", "due timers", || {
            timer_manager::fire_due(&mut ctx, Instant::now())
        });
        ctx.present_dirty();
    }

    while let Ok(message) = inbox.try_recv() {
        if let Message::Run { label, task } = message {
            ctx.run(label, task);
        }
    }
    ctx.teardown();
    log::debug!("UiThread: loop finished");
}

/// Owner of the UI thread's join handle.
pub(crate) struct UiThread {
    queue: UiQueue,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl UiThread {
    /// Starts the thread and builds the host on it.
    pub(crate) fn spawn(name: &str, factory: HostFactory) -> Result<Self> {
        let (sender, inbox) = crossbeam_channel::unbounded();
        let ui_thread = Arc::new(OnceLock::new());
        let queue = UiQueue {
            sender,
            ui_thread: Arc::clone(&ui_thread),
        };
        let (ready_tx, ready_rx) = crossbeam_channel::bounded::<std::result::Result<(), String>>(1);
        let loop_queue = queue.clone();

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let _ = ui_thread.set(thread::current().id());
                let host = match factory() {
                    Ok(host) => host,
                    Err(err) => {
                        let _ = ready_tx.send(Err(err.to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                run_loop(UiContext::new(host, loop_queue, inbox));
            })
            .map_err(|err| OverlayError::UiThreadGone(err.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                log::debug!("UiThread: '{name}' started");
                Ok(Self {
                    queue,
                    handle: Mutex::new(Some(handle)),
                })
            }
            Ok(Err(message)) => {
                let _ = handle.join();
                Err(OverlayError::UiThreadGone(message))
            }
            Err(_) => {
                let _ = handle.join();
                Err(OverlayError::UiThreadGone(
                    "UI thread exited during startup".into(),
                ))
            }
        }
    }

    pub(crate) fn queue(&self) -> &UiQueue {
        &self.queue
    }

    pub(crate) fn is_running(&self) -> bool {
        self.handle.lock().is_some()
    }

    /*
     * Stops the loop after the tasks already queued, then joins. From the UI
     * thread itself the join is skipped; the loop still stops.
     */
    pub(crate) fn shutdown(&self) {
        let Some(handle) = self.handle.lock().take() else {
            return;
        };
        let _ = self.queue.sender.send(Message::Shutdown);
        if self.queue.is_ui_thread() {
            log::warn!("UiThread: shutdown requested from the UI thread; not joining");
            return;
        }
        if handle.join().is_err() {
            log::error!("UiThread: UI thread panicked while shutting down");
        }
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn spawn() -> UiThread {
        UiThread::spawn(
            "overlay-ui-test",
            Box::new(|| Ok(Box::new(HeadlessHost::new()) as Box<dyn FrameHost>)),
        )
        .expect("UI thread should start")
    }

    #[test]
    fn tasks_run_in_fifo_order() {
        // Arrange
        let ui = spawn();
        let seen = Arc::new(Mutex::new(Vec::new()));

        // Act
        for i in 0..5 {
            let sink = Arc::clone(&seen);
            ui.queue().post("push", move |_| sink.lock().push(i));
        }
        assert!(ui.queue().flush(Duration::from_secs(2)));

        // Assert
        assert_eq!(*seen.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn panicking_task_does_not_stop_the_loop() {
        let ui = spawn();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        ui.queue().post("boom", |_| panic!("task failure"));
        ui.queue().post("after", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(ui.queue().flush(Duration::from_secs(2)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn call_from_the_ui_thread_returns_none() {
        let ui = spawn();
        let inner = ui.queue().clone();
        let answer = ui.queue().call("outer", Duration::from_secs(2), move |_| {
            inner.call("inner", Duration::from_millis(10), |_| 1)
        });
        assert_eq!(answer, Some(None));
    }

    #[test]
    fn flush_waits_for_follow_up_tasks() {
        let ui = spawn();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        ui.queue().post("first", move |ctx| {
            ctx.queue.post("second", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        });
        assert!(ui.queue().flush(Duration::from_secs(2)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn posting_after_shutdown_reports_failure() {
        let ui = spawn();
        let queue = ui.queue().clone();
        ui.shutdown();
        assert!(!ui.is_running());
        assert!(!queue.post("late", |_| {}));
        assert!(!queue.flush(Duration::from_millis(50)));
    }

    #[test]
    fn failing_host_factory_reports_ui_thread_gone() {
        let result = UiThread::spawn(
            "overlay-ui-fail",
            Box::new(|| Err(OverlayError::Host("no display".into()))),
        );
        assert!(matches!(result, Err(OverlayError::UiThreadGone(_))));
    }
}
