/*
 * The process-scoped object that ties the window registry, the UI thread and
 * the frame host together.
 *
 * Embedders and tests create explicit runtimes; the crate-level free
 * functions (`overlayui::create_window` and friends) use one global runtime
 * created lazily on first use.
 */
use crate::dialog_factory::{Dialog, dialog_init};
use crate::error::Result;
use crate::headless::{HeadlessHost, HeadlessProbe};
use crate::host::{FrameHost, HostFactory};
use crate::options::{DialogConfig, HostChoice, RuntimeConfig, WindowConfig};
use crate::styling_primitives::ColorScheme;
use crate::ui_thread::UiThread;
use crate::window_common::WindowInit;
use crate::window_factory::{Window, WindowSetup, overlay_init};
use crate::window_registry::WindowRegistry;

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

static GLOBAL: OnceLock<OverlayRuntime> = OnceLock::new();
static GLOBAL_INIT: Mutex<()> = parking_lot::const_mutex(());

pub struct OverlayRuntime {
    config: RuntimeConfig,
    ui: UiThread,
    registry: WindowRegistry,
    probe: HeadlessProbe,
    headless: Arc<AtomicBool>,
}

impl OverlayRuntime {
    /// Starts a runtime with the host named by `config.host`.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let probe = HeadlessProbe::default();
        let headless = Arc::new(AtomicBool::new(false));
        let factory = host_factory(config.host, probe.clone(), Arc::clone(&headless));
        Self::start(config, factory, probe, headless)
    }

    /// Starts a runtime on the headless host; see `probe`.
    pub fn headless() -> Result<Self> {
        Self::new(RuntimeConfig::headless())
    }

    /// Starts a runtime whose host is built by `factory` on the UI thread.
    pub fn with_host_factory(config: RuntimeConfig, factory: HostFactory) -> Result<Self> {
        Self::start(
            config,
            factory,
            HeadlessProbe::default(),
            Arc::new(AtomicBool::new(false)),
        )
    }

    fn start(
        config: RuntimeConfig,
        factory: HostFactory,
        probe: HeadlessProbe,
        headless: Arc<AtomicBool>,
    ) -> Result<Self> {
        let ui = UiThread::spawn(&config.thread_name, factory)?;
        log::debug!(
            "OverlayRuntime: started '{}' (headless: {})",
            config.thread_name,
            headless.load(Ordering::SeqCst)
        );
        Ok(Self {
            config,
            ui,
            registry: WindowRegistry::new(),
            probe,
            headless,
        })
    }

    /*
     * The global runtime, created with `RuntimeConfig::default()` on first
     * use. Concurrent first callers serialize on an init lock so only one UI
     * thread is ever started.
     */
    pub fn global() -> Result<&'static OverlayRuntime> {
        if let Some(runtime) = GLOBAL.get() {
            return Ok(runtime);
        }
        let _guard = GLOBAL_INIT.lock();
        if let Some(runtime) = GLOBAL.get() {
            return Ok(runtime);
        }
        let runtime = OverlayRuntime::new(RuntimeConfig::default())?;
        Ok(GLOBAL.get_or_init(|| runtime))
    }

    /// The global runtime if something already started it.
    pub fn global_if_started() -> Option<&'static OverlayRuntime> {
        GLOBAL.get()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn default_scheme(&self) -> &ColorScheme {
        &self.config.default_scheme
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    /// Observer of the headless host; `None` when a native host is running.
    pub fn probe(&self) -> Option<HeadlessProbe> {
        self.headless
            .load(Ordering::SeqCst)
            .then(|| self.probe.clone())
    }

    fn open(&self, init: WindowInit) -> Window {
        let id = init.id.clone();
        self.registry.create_or_get(&id, || {
            Window::spawn(
                init,
                WindowSetup {
                    queue: self.ui.queue().clone(),
                    registry: self.registry.downgrade(),
                    query_timeout: self.config.query_timeout,
                },
            )
        })
    }

    /*
     * Returns the window registered under the config's id, creating it if
     * needed. An existing window is returned unchanged and the rest of the
     * config is ignored.
     */
    pub fn create_window(&self, config: WindowConfig) -> Result<Window> {
        let init = overlay_init(config, &self.config.default_scheme)?;
        Ok(self.open(init))
    }

    pub fn create_dialog(&self, config: DialogConfig) -> Result<Dialog> {
        let init = dialog_init(config, &self.config.default_scheme)?;
        Ok(Dialog::new(self.open(init)))
    }

    pub fn get_window(&self, id: &str) -> Option<Window> {
        self.registry.get(id)
    }

    pub fn window_ids(&self) -> Vec<String> {
        self.registry.ids()
    }

    /// Disposes every window of this runtime.
    pub fn close_all(&self) {
        self.registry.close_all();
    }

    /// Waits until every task queued so far (and the tasks they queue) has run.
    pub fn flush(&self) -> bool {
        self.flush_within(self.config.query_timeout)
    }

    pub fn flush_within(&self, timeout: Duration) -> bool {
        self.ui.queue().flush(timeout)
    }

    pub fn is_running(&self) -> bool {
        self.ui.is_running()
    }

    /// Closes every window, then stops and joins the UI thread.
    pub fn shutdown(&self) {
        if !self.ui.is_running() {
            return;
        }
        self.close_all();
        self.ui.shutdown();
        log::debug!("OverlayRuntime: '{}' shut down", self.config.thread_name);
    }
}

impl Drop for OverlayRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/*
 * Native hosts exist only on Windows; elsewhere, or when the native host
 * cannot start, the runtime runs headless and says so.
 */
fn host_factory(choice: HostChoice, probe: HeadlessProbe, headless: Arc<AtomicBool>) -> HostFactory {
    Box::new(move || {
        let fallback = move |probe: HeadlessProbe| -> Result<Box<dyn FrameHost>> {
            headless.store(true, Ordering::SeqCst);
            Ok(Box::new(HeadlessHost::with_probe(probe)))
        };
        match choice {
            HostChoice::Headless => fallback(probe),
            HostChoice::Native => native_host(probe, fallback),
        }
    })
}

#[cfg(target_os = "windows")]
fn native_host(
    probe: HeadlessProbe,
    fallback: impl FnOnce(HeadlessProbe) -> Result<Box<dyn FrameHost>>,
) -> Result<Box<dyn FrameHost>> {
    match crate::win32_host::Win32Host::new() {
        Ok(host) => Ok(Box::new(host)),
        Err(err) => {
            log::warn!("OverlayRuntime: Win32 host unavailable ({err}); running headless");
            fallback(probe)
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn native_host(
    probe: HeadlessProbe,
    fallback: impl FnOnce(HeadlessProbe) -> Result<Box<dyn FrameHost>>,
) -> Result<Box<dyn FrameHost>> {
    log::warn!("OverlayRuntime: no native frame host on this platform; running headless");
    fallback(probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverlayError;

    #[test]
    fn headless_runtime_exposes_its_probe() {
        let runtime = OverlayRuntime::headless().expect("runtime");
        assert!(runtime.probe().is_some());
        assert!(runtime.is_running());
        runtime.shutdown();
        assert!(!runtime.is_running());
    }

    #[test]
    fn create_window_is_idempotent_per_id() {
        // Arrange
        let runtime = OverlayRuntime::headless().expect("runtime");

        // Act
        let first = runtime
            .create_window(WindowConfig::new("stats").title("First"))
            .expect("first");
        let second = runtime
            .create_window(WindowConfig::new("stats").title("Second"))
            .expect("second");

        // Assert
        assert_eq!(first, second);
        assert_eq!(runtime.window_ids(), vec!["stats".to_string()]);
        assert!(runtime.flush());
        let probe = runtime.probe().expect("headless");
        assert_eq!(probe.frame("stats").map(|f| f.title), Some("First".into()));
    }

    #[test]
    fn missing_ids_fail_immediately() {
        let runtime = OverlayRuntime::headless().expect("runtime");
        assert!(matches!(
            runtime.create_window(WindowConfig::new("")),
            Err(OverlayError::MissingId { scope: "window" })
        ));
        assert!(runtime.registry().is_empty());
    }

    #[test]
    fn custom_host_factories_are_not_headless() {
        let runtime = OverlayRuntime::with_host_factory(
            RuntimeConfig::headless().thread_name("custom-host"),
            Box::new(|| Ok(Box::new(HeadlessHost::new()) as Box<dyn FrameHost>)),
        )
        .expect("runtime");
        assert!(runtime.probe().is_none());
    }
}
