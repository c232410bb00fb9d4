/*
 * Push buttons. The only state is the caption; activation is reported to the
 * click listener by the widget dispatch in `controls::Widget::apply_input`.
 */
use super::TextCapable;

pub(crate) const DEFAULT_BUTTON_TEXT: &str = "Button";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ButtonState {
    pub text: String,
}

impl ButtonState {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new(DEFAULT_BUTTON_TEXT)
    }
}

impl TextCapable for ButtonState {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}
