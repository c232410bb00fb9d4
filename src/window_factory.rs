/*
 * The caller-side `Window` handle.
 *
 * A `Window` is a cheap, cloneable, thread-safe handle. It never touches
 * widget state itself: every operation is queued onto the UI thread and
 * returns immediately. The handle keeps only what callers need to answer
 * synchronously (its id and scheme, the ids it has declared, its timers and
 * the disposed flag).
 *
 * Builder, update and timer operations live in `panel_builder`,
 * `component_factory`, `update_dispatcher` and `timer_manager`.
 */
use crate::callbacks::Listener;
use crate::command_executor::{self, Visibility};
use crate::controls::ComponentKind;
use crate::error::{OverlayError, Result};
use crate::options::WindowConfig;
use crate::styling_primitives::ColorScheme;
use crate::timer_manager::TimerHandle;
use crate::types::{ChromeTarget, ComponentInput, PointerEvent, Rect};
use crate::ui_thread::{UiContext, UiQueue};
use crate::window_common::{ChromeFlags, WindowInit, WindowRole};
use crate::window_registry::WindowMap;

use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

pub(crate) struct WindowInner {
    pub(crate) id: String,
    pub(crate) scheme: ColorScheme,
    pub(crate) is_dialog: bool,
    pub(crate) queue: UiQueue,
    registry: Weak<WindowMap>,
    pub(crate) panels: RwLock<HashSet<String>>,
    pub(crate) components: RwLock<HashMap<String, ComponentKind>>,
    pub(crate) timers: Mutex<Vec<TimerHandle>>,
    disposed: AtomicBool,
    pub(crate) query_timeout: Duration,
}

/// Handle to an overlay window (or, through `Dialog`, a dialog).
#[derive(Clone)]
pub struct Window {
    pub(crate) inner: Arc<WindowInner>,
}

/// Everything besides the init record that a new window handle needs.
pub(crate) struct WindowSetup {
    pub queue: UiQueue,
    pub registry: Weak<WindowMap>,
    pub query_timeout: Duration,
}

impl Window {
    /*
     * Creates the handle and queues creation of the UI-side state and native
     * frame. The frame exists by the time any later task for this window runs.
     */
    pub(crate) fn spawn(init: WindowInit, setup: WindowSetup) -> Window {
        let window = Window {
            inner: Arc::new(WindowInner {
                id: init.id.clone(),
                scheme: init.scheme.clone(),
                is_dialog: matches!(init.role, WindowRole::Dialog { .. }),
                queue: setup.queue,
                registry: setup.registry,
                panels: RwLock::new(HashSet::new()),
                components: RwLock::new(HashMap::new()),
                timers: Mutex::new(Vec::new()),
                disposed: AtomicBool::new(false),
                query_timeout: setup.query_timeout,
            }),
        };
        log::debug!("WindowFactory: creating '{}' ('{}')", init.id, init.title);
        window
            .inner
            .queue
            .post("create window", move |ctx| command_executor::execute_create_window(ctx, init));
        window
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.inner.scheme
    }

    pub fn is_dialog(&self) -> bool {
        self.inner.is_dialog
    }

    /// Queues `task` unless the window was disposed. Returns whether it was queued.
    pub(crate) fn post(
        &self,
        label: &'static str,
        task: impl FnOnce(&mut UiContext) + Send + 'static,
    ) -> bool {
        if self.is_disposed() {
            log::debug!("WindowFactory: '{label}' on disposed window '{}' ignored", self.id());
            return false;
        }
        self.inner.queue.post(label, task)
    }

    fn set_visibility(&self, change: Visibility) {
        let id = self.inner.id.clone();
        self.post("window visibility", move |ctx| {
            command_executor::execute_set_visibility(ctx, &id, change)
        });
    }

    pub fn show(&self) {
        self.set_visibility(Visibility::Show);
    }

    pub fn hide(&self) {
        self.set_visibility(Visibility::Hide);
    }

    pub fn toggle(&self) {
        self.set_visibility(Visibility::Toggle);
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let id = self.inner.id.clone();
        let title = title.into();
        self.post("window title", move |ctx| {
            command_executor::execute_set_title(ctx, &id, title)
        });
    }

    /*
     * Stops every running timer, removes the window from the registry and
     * queues release of its UI state and native frame. Idempotent.
     */
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::SeqCst) {
            log::trace!("WindowFactory: '{}' already disposed", self.id());
            return;
        }
        let timers: Vec<TimerHandle> = self.inner.timers.lock().drain(..).collect();
        let stopped = timers.iter().filter(|timer| timer.release()).count();
        if let Some(registry) = self.inner.registry.upgrade() {
            let mut windows = registry.write();
            if windows.get(self.id()).is_some_and(|w| w == self) {
                windows.remove(self.id());
            }
        }
        log::debug!("WindowFactory: disposing '{}' ({stopped} running timer(s) stopped)", self.id());
        let id = self.inner.id.clone();
        self.inner
            .queue
            .post("dispose window", move |ctx| command_executor::execute_dispose(ctx, &id));
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// Delivers chrome pointer input as if the frame host had reported it.
    pub fn dispatch_pointer(&self, target: ChromeTarget, event: PointerEvent) {
        let id = self.inner.id.clone();
        self.post("pointer input", move |ctx| {
            command_executor::execute_pointer(ctx, &id, target, event)
        });
    }

    /// Delivers user input to a component as if the frame host had reported it.
    pub fn activate(&self, component_id: impl Into<String>, input: ComponentInput) {
        let id = self.inner.id.clone();
        let component_id = component_id.into();
        self.post("component input", move |ctx| {
            command_executor::execute_activate(ctx, &id, &component_id, input)
        });
    }

    /// Attaches (or replaces) the listener of an existing component.
    pub fn set_listener(&self, component_id: impl Into<String>, listener: Listener) {
        let id = self.inner.id.clone();
        let component_id = component_id.into();
        self.post("set listener", move |ctx| {
            command_executor::execute_set_listener(ctx, &id, &component_id, listener)
        });
    }

    /// Ids of the panels declared through this handle, sorted.
    pub fn panel_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.panels.read().iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Ids of the components declared through this handle, sorted.
    pub fn component_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.components.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn component_kind(&self, component_id: &str) -> Option<ComponentKind> {
        self.inner.components.read().get(component_id).copied()
    }
}

impl PartialEq for Window {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.inner.id)
            .field("dialog", &self.inner.is_dialog)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

/// Turns an overlay configuration into the UI-side init record.
pub(crate) fn overlay_init(config: WindowConfig, default_scheme: &ColorScheme) -> Result<WindowInit> {
    if config.id.is_empty() {
        return Err(OverlayError::MissingId { scope: "window" });
    }
    Ok(WindowInit {
        id: config.id,
        title: config.title,
        scheme: config.scheme.unwrap_or_else(|| default_scheme.clone()),
        bounds: Rect::new(config.x, config.y, config.width, config.height),
        chrome: ChromeFlags {
            closable: config.closable,
            resizable: config.resizable,
            draggable: config.draggable,
        },
        role: WindowRole::Overlay,
        on_close: config.on_close,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_init_requires_an_id() {
        let result = overlay_init(WindowConfig::new(""), &ColorScheme::dark());
        assert!(matches!(
            result,
            Err(OverlayError::MissingId { scope: "window" })
        ));
    }

    #[test]
    fn overlay_init_applies_defaults() {
        // Arrange
        let config = WindowConfig::new("w").title("Stats").resizable(true);
        // Act
        let init = overlay_init(config, &ColorScheme::light()).expect("valid config");
        // Assert
        assert_eq!(init.scheme.name, "light");
        assert_eq!(init.bounds, Rect::new(50, 50, 300, 200));
        assert!(init.chrome.resizable && init.chrome.closable && init.chrome.draggable);
        assert_eq!(init.role, WindowRole::Overlay);
    }
}
