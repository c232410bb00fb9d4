/*
 * Event listeners and the single dispatch helper every user callback runs
 * through.
 *
 * Each interactive component kind stores one typed `Listener`. Whatever the
 * listener kind, the call goes through `isolate`, which catches a panic,
 * logs it and lets the UI thread carry on with its queue.
 */
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

pub type ClickFn = Box<dyn FnMut() + Send>;
pub type ToggleFn = Box<dyn FnMut(bool) + Send>;
pub type SelectFn = Box<dyn FnMut(Option<&str>, usize) + Send>;
pub type ValueFn = Box<dyn FnMut(i32) + Send>;
pub type TextFn = Box<dyn FnMut(&str) + Send>;
pub type TabFn = Box<dyn FnMut(usize) + Send>;
pub type CellFn = Box<dyn FnMut(usize, usize, &str) + Send>;
pub type CloseFn = Box<dyn FnMut() + Send>;

/// Typed event listener attached to a component.
pub enum Listener {
    /// Button activation.
    Click(ClickFn),
    /// Checkbox toggled; receives the new selected state.
    Toggle(ToggleFn),
    /// Combo box selection; receives the selected item and its index.
    Select(SelectFn),
    /// Slider moved; receives the new value.
    Value(ValueFn),
    /// Text field committed; receives the new text.
    Text(TextFn),
    /// Tabbed pane switched; receives the selected tab index.
    Tab(TabFn),
    /// Table cell edited; receives row, column and the new value.
    Cell(CellFn),
}

impl Listener {
    pub fn on_click(f: impl FnMut() + Send + 'static) -> Self {
        Listener::Click(Box::new(f))
    }

    pub fn on_toggle(f: impl FnMut(bool) + Send + 'static) -> Self {
        Listener::Toggle(Box::new(f))
    }

    pub fn on_select(f: impl FnMut(Option<&str>, usize) + Send + 'static) -> Self {
        Listener::Select(Box::new(f))
    }

    pub fn on_value(f: impl FnMut(i32) + Send + 'static) -> Self {
        Listener::Value(Box::new(f))
    }

    pub fn on_text(f: impl FnMut(&str) + Send + 'static) -> Self {
        Listener::Text(Box::new(f))
    }

    pub fn on_tab(f: impl FnMut(usize) + Send + 'static) -> Self {
        Listener::Tab(Box::new(f))
    }

    pub fn on_cell(f: impl FnMut(usize, usize, &str) + Send + 'static) -> Self {
        Listener::Cell(Box::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Listener::Click(_) => "click",
            Listener::Toggle(_) => "toggle",
            Listener::Select(_) => "select",
            Listener::Value(_) => "value",
            Listener::Text(_) => "text",
            Listener::Tab(_) => "tab",
            Listener::Cell(_) => "cell",
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener::{}", self.name())
    }
}

/// What happened to a component, handed to its listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fired {
    Clicked,
    Toggled(bool),
    Selected(Option<String>, usize),
    ValueChanged(i32),
    TextCommitted(String),
    TabSelected(usize),
    CellEdited(usize, usize, String),
}

/*
 * Invokes `listener` for `fired` if the two match. A mismatched pair (e.g. a
 * toggle listener receiving a click) is skipped at trace level; it can only
 * happen when `set_listener` attached the wrong kind.
 */
pub(crate) fn dispatch(component_id: &str, listener: &mut Listener, fired: &Fired) -> bool {
    match (listener, fired) {
        (Listener::Click(f), Fired::Clicked) => isolate("click handler", component_id, || f()),
        (Listener::Toggle(f), Fired::Toggled(on)) => {
            isolate("checkbox change handler", component_id, || f(*on))
        }
        (Listener::Select(f), Fired::Selected(item, index)) => {
            isolate("combo box change handler", component_id, || {
                f(item.as_deref(), *index)
            })
        }
        (Listener::Value(f), Fired::ValueChanged(value)) => {
            isolate("slider change handler", component_id, || f(*value))
        }
        (Listener::Text(f), Fired::TextCommitted(text)) => {
            isolate("text change handler", component_id, || f(text.as_str()))
        }
        (Listener::Tab(f), Fired::TabSelected(index)) => {
            isolate("tab change handler", component_id, || f(*index))
        }
        (Listener::Cell(f), Fired::CellEdited(row, column, value)) => {
            isolate("cell edit handler", component_id, || {
                f(*row, *column, value.as_str())
            })
        }
        (listener, fired) => {
            log::trace!(
                "Callbacks: {} listener on '{component_id}' ignores {fired:?}",
                listener.name()
            );
            false
        }
    }
}

/*
 * Runs `f`, catching any panic. Returns `true` when the callback completed.
 * This is the only place user code is entered from the UI thread.
 */
pub(crate) fn isolate<F: FnOnce()>(context: &str, subject: &str, f: F) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => true,
        Err(payload) => {
            log::error!(
                "Error in {context} for '{subject}': {}",
                panic_message(payload.as_ref())
            );
            false
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn isolate_contains_panics() {
        let completed = isolate("test", "subject", || panic!("boom"));
        assert!(!completed);
        assert!(isolate("test", "subject", || {}));
    }

    #[test]
    fn panic_message_reads_both_string_kinds() {
        let payload = panic::catch_unwind(|| panic!("static text")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "static text");
        let payload = panic::catch_unwind(|| panic!("{}", String::from("owned"))).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "owned");
    }

    #[test]
    fn dispatch_routes_matching_events_only() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut listener = Listener::on_toggle(move |on| {
            if on {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        assert!(dispatch("cb", &mut listener, &Fired::Toggled(true)));
        assert!(!dispatch("cb", &mut listener, &Fired::Clicked));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn select_listener_receives_item_and_index() {
        let seen = Arc::new(parking_lot::Mutex::new(None));
        let sink = Arc::clone(&seen);
        let mut listener = Listener::on_select(move |item, index| {
            *sink.lock() = Some((item.map(str::to_string), index));
        });
        dispatch(
            "combo",
            &mut listener,
            &Fired::Selected(Some("Magic".into()), 2),
        );
        assert_eq!(*seen.lock(), Some((Some("Magic".to_string()), 2)));
    }
}
