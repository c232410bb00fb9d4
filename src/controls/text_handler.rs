/*
 * Text-bearing leaf widgets: static labels, single-line text fields and
 * multi-line text areas.
 *
 * Text areas keep a caret offset so the debug log can follow appended output
 * (auto-scroll) or stay where the reader left it.
 */
use super::TextCapable;
use crate::styling_primitives::FontDescription;
use crate::types::Alignment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LabelState {
    pub text: String,
    pub align: Alignment,
    pub font: FontDescription,
}

impl LabelState {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Alignment::Left,
            font: FontDescription::default(),
        }
    }
}

impl TextCapable for LabelState {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextFieldState {
    pub text: String,
    pub columns: u16,
    pub editable: bool,
}

impl TextFieldState {
    pub(crate) fn new(text: impl Into<String>, columns: u16, editable: bool) -> Self {
        Self {
            text: text.into(),
            columns: columns.max(1),
            editable,
        }
    }
}

impl TextCapable for TextFieldState {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextAreaState {
    pub text: String,
    pub rows: u16,
    pub cols: u16,
    pub editable: bool,
    pub scrollable: bool,
    /// Byte offset of the caret; always on a char boundary.
    pub caret: usize,
}

impl TextAreaState {
    pub(crate) fn new(
        text: impl Into<String>,
        rows: u16,
        cols: u16,
        editable: bool,
        scrollable: bool,
    ) -> Self {
        Self {
            text: text.into(),
            rows: rows.max(1),
            cols: cols.max(1),
            editable,
            scrollable,
            caret: 0,
        }
    }

    /*
     * Appends `more` to the end of the text. With `follow` the caret moves to
     * the new end, otherwise it keeps its position.
     */
    pub(crate) fn append(&mut self, more: &str, follow: bool) {
        self.text.push_str(more);
        if follow {
            self.caret = self.text.len();
        }
    }

    /// The lines a viewport of `rows` lines shows when scrolled to the caret.
    pub(crate) fn visible_lines(&self) -> Vec<&str> {
        let before_caret = &self.text[..self.caret.min(self.text.len())];
        let caret_line = before_caret.lines().count().saturating_sub(1);
        let rows = self.rows as usize;
        let first = (caret_line + 1).saturating_sub(rows);
        self.text.lines().skip(first).take(rows).collect()
    }
}

impl TextCapable for TextAreaState {
    fn text(&self) -> &str {
        &self.text
    }

    /* Replacing the whole text resets the caret to the start. */
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.caret = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_with_follow_moves_caret_to_end() {
        // Arrange
        let mut area = TextAreaState::new("", 2, 20, false, true);
        // Act
        area.append("one\n", true);
        area.append("two\n", true);
        area.append("three\n", true);
        // Assert
        assert_eq!(area.caret, area.text.len());
        assert_eq!(area.text.lines().count(), 3);
        assert_eq!(area.visible_lines(), vec!["two", "three"]);
    }

    #[test]
    fn append_without_follow_keeps_caret() {
        let mut area = TextAreaState::new("", 2, 20, false, true);
        area.append("one\n", true);
        let caret = area.caret;
        area.append("two\nthree\n", false);
        assert_eq!(area.caret, caret);
        assert_eq!(area.visible_lines(), vec!["one", "two"]);
    }

    #[test]
    fn set_text_resets_caret() {
        let mut area = TextAreaState::new("abc", 5, 20, true, true);
        area.append("def", true);
        area.set_text("");
        assert_eq!(area.caret, 0);
        assert_eq!(area.text(), "");
    }

    #[test]
    fn field_columns_never_drop_below_one() {
        assert_eq!(TextFieldState::new("", 0, true).columns, 1);
    }
}
