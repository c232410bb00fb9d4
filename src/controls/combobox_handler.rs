/*
 * Drop-down selection over a fixed item list.
 *
 * The selection is an index into `items`; an empty list has no selection.
 * Text updates select the first item equal to the text, value updates select
 * by index, and out-of-range or unknown requests leave the selection alone.
 */
use super::{TextCapable, ValueCapable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ComboBoxState {
    pub items: Vec<String>,
    pub selected: Option<usize>,
}

impl ComboBoxState {
    pub(crate) fn new(items: Vec<String>, selected: usize) -> Self {
        let selected = (selected < items.len()).then_some(selected);
        Self { items, selected }
    }

    pub(crate) fn selected_item(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.items.get(index))
            .map(String::as_str)
    }

    /// Selects `index` if it is in range. Returns whether the selection changed.
    pub(crate) fn select_index(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            log::debug!(
                "ComboBoxHandler: index {index} out of range ({} items)",
                self.items.len()
            );
            return false;
        }
        let changed = self.selected != Some(index);
        self.selected = Some(index);
        changed
    }
}

impl TextCapable for ComboBoxState {
    fn text(&self) -> &str {
        self.selected_item().unwrap_or("")
    }

    fn set_text(&mut self, text: &str) {
        match self.items.iter().position(|item| item == text) {
            Some(index) => self.selected = Some(index),
            None => log::trace!("ComboBoxHandler: no item '{text}' to select"),
        }
    }
}

impl ValueCapable for ComboBoxState {
    /// Selected index, or -1 when nothing is selected.
    fn value(&self) -> i32 {
        self.selected
            .and_then(|index| i32::try_from(index).ok())
            .unwrap_or(-1)
    }

    fn set_value(&mut self, value: i32) {
        if let Ok(index) = usize::try_from(value) {
            self.select_index(index);
        }
    }
}
