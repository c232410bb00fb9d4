/*
 * Tabbed panes. Each tab pairs a title with the id of the panel holding its
 * content; only the selected tab's panel is part of the presented scene. The
 * first tab added becomes selected.
 */
use super::ValueCapable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TabEntry {
    pub title: String,
    pub panel_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TabbedPaneState {
    pub tabs: Vec<TabEntry>,
    pub selected: Option<usize>,
}

impl TabbedPaneState {
    /// Appends a tab and returns its index.
    pub(crate) fn add(&mut self, title: impl Into<String>, panel_id: impl Into<String>) -> usize {
        self.tabs.push(TabEntry {
            title: title.into(),
            panel_id: panel_id.into(),
        });
        let index = self.tabs.len() - 1;
        if self.selected.is_none() {
            self.selected = Some(index);
        }
        index
    }

    /// Selects `index` if in range. Returns whether the selection changed.
    pub(crate) fn select(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            log::debug!(
                "TabbedPaneHandler: tab {index} out of range ({} tabs)",
                self.tabs.len()
            );
            return false;
        }
        let changed = self.selected != Some(index);
        self.selected = Some(index);
        changed
    }

    pub(crate) fn selected_panel(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.tabs.get(index))
            .map(|tab| tab.panel_id.as_str())
    }

    pub(crate) fn index_of_panel(&self, panel_id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.panel_id == panel_id)
    }

    /* Drops the tab for `panel_id`, keeping the selection on a valid tab. */
    pub(crate) fn remove_panel(&mut self, panel_id: &str) {
        let Some(index) = self.index_of_panel(panel_id) else {
            return;
        };
        self.tabs.remove(index);
        self.selected = match self.selected {
            _ if self.tabs.is_empty() => None,
            Some(sel) if sel > index => Some(sel - 1),
            Some(sel) if sel == index => Some(sel.min(self.tabs.len() - 1)),
            other => other,
        };
    }
}

impl ValueCapable for TabbedPaneState {
    fn value(&self) -> i32 {
        self.selected
            .and_then(|index| i32::try_from(index).ok())
            .unwrap_or(-1)
    }

    fn set_value(&mut self, value: i32) {
        if let Ok(index) = usize::try_from(value) {
            self.select(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tab_is_selected_by_default() {
        // Arrange
        let mut pane = TabbedPaneState::default();
        // Act
        pane.add("Stats", "stats-panel");
        pane.add("Loot", "loot-panel");
        // Assert
        assert_eq!(pane.selected_panel(), Some("stats-panel"));
        assert_eq!(pane.value(), 0);
    }

    #[test]
    fn select_reports_change_and_ignores_out_of_range() {
        let mut pane = TabbedPaneState::default();
        pane.add("A", "a");
        pane.add("B", "b");
        assert!(pane.select(1));
        assert!(!pane.select(1));
        assert!(!pane.select(7));
        assert_eq!(pane.selected_panel(), Some("b"));
    }

    #[test]
    fn removing_tabs_keeps_selection_valid() {
        let mut pane = TabbedPaneState::default();
        pane.add("A", "a");
        pane.add("B", "b");
        pane.add("C", "c");
        pane.select(2);
        pane.remove_panel("a");
        assert_eq!(pane.selected_panel(), Some("c"));
        pane.remove_panel("c");
        assert_eq!(pane.selected_panel(), Some("b"));
        pane.remove_panel("b");
        assert_eq!(pane.selected, None);
    }
}
