/*
 * Check boxes: a caption plus a selected flag. Programmatic `set_selected`
 * never reaches the listener; only user toggles do.
 */
use super::{SelectCapable, TextCapable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckBoxState {
    pub text: String,
    pub selected: bool,
}

impl CheckBoxState {
    pub(crate) fn new(text: impl Into<String>, selected: bool) -> Self {
        Self {
            text: text.into(),
            selected,
        }
    }

    /// Flips the flag and returns the new state.
    pub(crate) fn toggle(&mut self) -> bool {
        self.selected = !self.selected;
        self.selected
    }
}

impl TextCapable for CheckBoxState {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

impl SelectCapable for CheckBoxState {
    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
