/*
 * Process-wide map of window id to `Window` handle.
 *
 * The registry only stores caller-side handles; it never touches widget
 * state. Creation is check-then-insert under the write lock so racing
 * creators of the same id both receive the one handle that won.
 */
use crate::callbacks::panic_message;
use crate::window_factory::Window;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

pub(crate) type WindowMap = RwLock<HashMap<String, Window>>;

#[derive(Clone, Default)]
pub struct WindowRegistry {
    windows: Arc<WindowMap>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the window registered under `id`, or registers `build()`.
    pub fn create_or_get(&self, id: &str, build: impl FnOnce() -> Window) -> Window {
        let mut windows = self.windows.write();
        if let Some(existing) = windows.get(id) {
            log::debug!("WindowRegistry: '{id}' already exists; returning the existing window");
            return existing.clone();
        }
        let window = build();
        windows.insert(id.to_string(), window.clone());
        log::debug!("WindowRegistry: registered '{id}' ({} window(s))", windows.len());
        window
    }

    pub fn get(&self, id: &str) -> Option<Window> {
        self.windows.read().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<Window> {
        self.windows.write().remove(id)
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.windows.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.windows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.read().is_empty()
    }

    pub(crate) fn downgrade(&self) -> Weak<WindowMap> {
        Arc::downgrade(&self.windows)
    }

    /// Disposes every registered window.
    pub fn close_all(&self) {
        close_each(self.snapshot(), |window| window.dispose());
    }

    fn snapshot(&self) -> Vec<(String, Window)> {
        self.windows
            .read()
            .iter()
            .map(|(id, window)| (id.clone(), window.clone()))
            .collect()
    }
}

/*
 * Runs `dispose` on every entry. A panic while disposing one window is logged
 * and the remaining windows are still disposed. Returns how many completed.
 */
pub(crate) fn close_each<T>(entries: Vec<(String, T)>, mut dispose: impl FnMut(&T)) -> usize {
    log::debug!("WindowRegistry: closing {} window(s)", entries.len());
    let mut closed = 0;
    for (id, entry) in &entries {
        match panic::catch_unwind(AssertUnwindSafe(|| dispose(entry))) {
            Ok(()) => closed += 1,
            Err(payload) => log::error!(
                "WindowRegistry: error closing window '{id}': {}",
                panic_message(payload.as_ref())
            ),
        }
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn close_each_continues_past_a_panicking_disposal() {
        // Arrange
        let entries = vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3),
        ];
        let seen = RefCell::new(Vec::new());

        // Act
        let closed = close_each(entries, |n| {
            if *n == 2 {
                panic!("dispose failed");
            }
            seen.borrow_mut().push(*n);
        });

        // Assert
        assert_eq!(closed, 2);
        assert_eq!(seen.into_inner(), vec![1, 3]);
    }

    #[test]
    fn empty_registry_reports_nothing() {
        let registry = WindowRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("missing").is_none());
        registry.close_all();
    }
}
