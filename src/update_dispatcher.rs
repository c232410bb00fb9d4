/*
 * Marshals widget mutations onto the UI thread.
 *
 * Every update is fire-and-forget: the call captures owned arguments, queues
 * a task and returns. Tasks run in the order they were queued, so an update
 * queued after a `create_*` call always finds its component. Updates never
 * invoke listeners; only user input does.
 *
 * `component_state` and `panel_state` are the one exception to "never wait":
 * they block on a snapshot taken on the UI thread and exist for diagnostics
 * and tests.
 */
use crate::command_executor::{self, PanelChange};
use crate::controls::ComponentKind;
use crate::controls::table_handler::TableModel;
use crate::styling_primitives::Color;
use crate::types::{Layout, Properties};
use crate::window_factory::Window;

use std::time::Duration;

/// Snapshot of one component, read on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentState {
    pub id: String,
    pub kind: ComponentKind,
    pub parent: Option<String>,
    /// Whether the component is reachable from the window's content root.
    pub attached: bool,
    pub text: Option<String>,
    pub value: Option<i32>,
    pub selected: Option<bool>,
    pub enabled: bool,
    pub visible: bool,
    pub foreground: Color,
    pub background: Option<Color>,
    pub highlighted: bool,
    pub has_listener: bool,
    pub table: Option<TableModel>,
}

/// Snapshot of one panel, read on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub id: String,
    pub layout: Layout,
    pub title: Option<String>,
    pub visible: bool,
    pub background: Color,
    /// Parent panel, or the tabbed pane holding this panel as tab content.
    pub parent: Option<String>,
    pub attached: bool,
    pub children: Vec<String>,
    pub shown_card: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TableOp {
    SetRows(Vec<Vec<String>>),
    SetCell {
        row: usize,
        column: usize,
        value: String,
    },
    AppendRow(Vec<String>),
    Clear,
}

/// Where a text area's caret goes after `append_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaretFollow {
    Always,
    Never,
    /// Follow while the checkbox with this id is selected.
    WhenChecked(String),
}

impl Window {
    /*
     * Applies each present property the component's kind supports. Unknown
     * ids and unsupported properties are ignored.
     */
    pub fn update_component(&self, component_id: &str, props: Properties) {
        if props.is_empty() {
            return;
        }
        let window_id = self.id().to_string();
        let component_id = component_id.to_string();
        self.post("update component", move |ctx| {
            command_executor::execute_update_component(ctx, &window_id, &component_id, props)
        });
    }

    /// Flashes the background; defaults to the scheme accent for one second.
    pub fn highlight_component(
        &self,
        component_id: &str,
        color: Option<Color>,
        duration: Option<Duration>,
    ) {
        let color = color.unwrap_or(self.scheme().accent);
        let duration = duration.unwrap_or(crate::options::DEFAULT_HIGHLIGHT);
        let window_id = self.id().to_string();
        let component_id = component_id.to_string();
        self.post("highlight component", move |ctx| {
            command_executor::execute_highlight(ctx, &window_id, &component_id, color, duration)
        });
    }

    pub fn update_panel_color(&self, panel_id: &str, color: Color) {
        self.post_panel_change(panel_id, PanelChange::Background(color));
    }

    /// Retitles a panel's titled border; panels created without a title ignore it.
    pub fn update_panel_title(&self, panel_id: &str, title: impl Into<String>) {
        self.post_panel_change(panel_id, PanelChange::Title(title.into()));
    }

    pub fn set_panel_visible(&self, panel_id: &str, visible: bool) {
        self.post_panel_change(panel_id, PanelChange::Visible(visible));
    }

    /// Brings `child_id` to the front of a card-layout panel.
    pub fn show_card(&self, panel_id: &str, child_id: impl Into<String>) {
        self.post_panel_change(panel_id, PanelChange::ShowCard(child_id.into()));
    }

    fn post_table(&self, table_id: &str, op: TableOp) {
        let window_id = self.id().to_string();
        let table_id = table_id.to_string();
        self.post("table update", move |ctx| {
            command_executor::execute_table(ctx, &window_id, &table_id, op)
        });
    }

    pub fn set_table_rows(&self, table_id: &str, rows: Vec<Vec<String>>) {
        self.post_table(table_id, TableOp::SetRows(rows));
    }

    pub fn set_table_cell(&self, table_id: &str, row: usize, column: usize, value: impl Into<String>) {
        self.post_table(
            table_id,
            TableOp::SetCell {
                row,
                column,
                value: value.into(),
            },
        );
    }

    pub fn append_table_row(&self, table_id: &str, row: Vec<String>) {
        self.post_table(table_id, TableOp::AppendRow(row));
    }

    pub fn clear_table(&self, table_id: &str) {
        self.post_table(table_id, TableOp::Clear);
    }

    /// Appends to a text area and moves the caret to the end.
    pub fn append_text(&self, area_id: &str, text: impl Into<String>) {
        self.append_text_with(area_id, text, CaretFollow::Always);
    }

    pub fn append_text_with(&self, area_id: &str, text: impl Into<String>, follow: CaretFollow) {
        let window_id = self.id().to_string();
        let area_id = area_id.to_string();
        let text = text.into();
        self.post("append text", move |ctx| {
            command_executor::execute_append_text(ctx, &window_id, &area_id, text, follow)
        });
    }

    /// Snapshot of a component once all earlier queued work has run.
    pub fn component_state(&self, component_id: &str) -> Option<ComponentState> {
        let window_id = self.id().to_string();
        let component_id = component_id.to_string();
        self.inner
            .queue
            .call("component state", self.inner.query_timeout, move |ctx| {
                ctx.windows
                    .get(&window_id)
                    .and_then(|window| window.component_state(&component_id))
            })
            .flatten()
    }

    pub fn panel_state(&self, panel_id: &str) -> Option<PanelState> {
        let window_id = self.id().to_string();
        let panel_id = panel_id.to_string();
        self.inner
            .queue
            .call("panel state", self.inner.query_timeout, move |ctx| {
                ctx.windows
                    .get(&window_id)
                    .and_then(|window| window.panel_state(&panel_id))
            })
            .flatten()
    }
}
