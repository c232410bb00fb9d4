/*
 * Ready-made windows: a debug log console and a grid of live data cells.
 * Both are ordinary windows built with the public builder API and are shown
 * on creation.
 */
use crate::error::Result;
use crate::options::{
    ButtonOptions, CheckBoxOptions, LabelOptions, PanelOptions, TextAreaOptions, TimerOptions,
    WindowConfig,
};
use crate::runtime::OverlayRuntime;
use crate::styling_primitives::{ColorScheme, FontDescription};
use crate::timer_manager::TimerHandle;
use crate::types::{Layout, Properties, Region};
use crate::update_dispatcher::CaretFollow;
use crate::window_factory::Window;

use chrono::Local;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

pub const DEBUG_WINDOW_ID: &str = "debug-window";
pub const DATA_WINDOW_ID: &str = "data-window";

const LOG_AREA: &str = "log-area";
const AUTO_SCROLL: &str = "auto-scroll";
const STATUS_LABEL: &str = "status-label";
const MIN_DATA_ROWS: usize = 10;
const DEFAULT_COLUMN_WIDTH: i32 = 100;

#[derive(Debug, Clone)]
pub struct DebugWindowOptions {
    pub id: String,
    pub title: String,
    pub scheme: ColorScheme,
}

impl Default for DebugWindowOptions {
    fn default() -> Self {
        Self {
            id: DEBUG_WINDOW_ID.into(),
            title: "Debug Info".into(),
            scheme: ColorScheme::debug(),
        }
    }
}

/// A log console: Clear/Auto-scroll controls, a read-only log and a status line.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugWindow {
    window: Window,
}

impl DebugWindow {
    /// Appends `[HH:MM:SS] [LEVEL] message` and stamps the status line.
    pub fn log(&self, message: impl AsRef<str>, level: log::Level) -> &Self {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.window.append_text_with(
            LOG_AREA,
            format!("[{timestamp}] [{level}] {}\n", message.as_ref()),
            CaretFollow::WhenChecked(AUTO_SCROLL.into()),
        );
        self.window.update_component(
            STATUS_LABEL,
            Properties::new().text(format!("Last entry: {timestamp}")),
        );
        self
    }

    pub fn clear(&self) {
        self.window
            .update_component(LOG_AREA, Properties::new().text(""));
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Deref for DebugWindow {
    type Target = Window;

    fn deref(&self) -> &Window {
        &self.window
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataColumn {
    pub id: String,
    pub name: Option<String>,
    pub width: Option<i32>,
}

impl DataColumn {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            width: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }
}

/// One row of cell values keyed by column id.
pub type DataRow = HashMap<String, String>;
pub type DataSource = Box<dyn FnMut() -> Vec<DataRow> + Send>;

pub struct DataWindowOptions {
    pub id: String,
    pub title: String,
    pub scheme: ColorScheme,
    pub columns: Vec<DataColumn>,
    pub rows: Vec<DataRow>,
    /// Polled once a second; its rows overwrite the cells.
    pub update: Option<DataSource>,
}

impl DataWindowOptions {
    pub fn columns(mut self, columns: Vec<DataColumn>) -> Self {
        self.columns = columns;
        self
    }

    pub fn rows(mut self, rows: Vec<DataRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn update(mut self, source: impl FnMut() -> Vec<DataRow> + Send + 'static) -> Self {
        self.update = Some(Box::new(source));
        self
    }
}

impl Default for DataWindowOptions {
    fn default() -> Self {
        Self {
            id: DATA_WINDOW_ID.into(),
            title: "Data Display".into(),
            scheme: ColorScheme::dark(),
            columns: vec![DataColumn::new("col1").name("Column 1").width(DEFAULT_COLUMN_WIDTH)],
            rows: Vec::new(),
            update: None,
        }
    }
}

/// A grid of labels refreshed from a data source every second.
#[derive(Debug, Clone)]
pub struct DataWindow {
    window: Window,
    columns: Arc<Vec<DataColumn>>,
    row_count: usize,
    timer: TimerHandle,
}

impl DataWindow {
    /// Overwrites the cells with `rows`; rows past the grid are dropped.
    pub fn write_rows(&self, rows: &[DataRow]) {
        write_rows(&self.window, &self.columns, self.row_count, rows);
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn timer(&self) -> &TimerHandle {
        &self.timer
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Deref for DataWindow {
    type Target = Window;

    fn deref(&self) -> &Window {
        &self.window
    }
}

pub fn cell_id(row: usize, column_id: &str) -> String {
    format!("cell-{row}-{column_id}")
}

fn write_rows(window: &Window, columns: &[DataColumn], row_count: usize, rows: &[DataRow]) {
    for (row_index, row) in rows.iter().enumerate().take(row_count) {
        for column in columns {
            let value = row.get(&column.id).cloned().unwrap_or_default();
            window.update_component(&cell_id(row_index, &column.id), Properties::new().text(value));
        }
    }
}

/// Width that fits every column plus the frame padding, never below 300.
pub fn data_window_width(columns: &[DataColumn]) -> i32 {
    let total: i32 = columns
        .iter()
        .map(|c| c.width.unwrap_or(DEFAULT_COLUMN_WIDTH))
        .sum();
    (total + 40).max(300)
}

impl OverlayRuntime {
    pub fn create_debug_window(&self, opts: DebugWindowOptions) -> Result<DebugWindow> {
        let window = self.create_window(
            WindowConfig::new(opts.id)
                .title(opts.title)
                .scheme(opts.scheme)
                .size(500, 400)
                .closable(true)
                .draggable(true)
                .resizable(true),
        )?;

        window.create_panel(
            PanelOptions::new("controls")
                .layout(Layout::flow())
                .region(Region::North),
        )?;
        let target = window.clone();
        window.create_button(
            ButtonOptions::new("clear-btn", "controls")
                .text("Clear Log")
                .on_click(move || target.update_component(LOG_AREA, Properties::new().text(""))),
        )?;
        window.create_checkbox(
            CheckBoxOptions::new(AUTO_SCROLL, "controls")
                .text("Auto-scroll")
                .selected(true),
        )?;

        window.create_panel(
            PanelOptions::new("log-panel")
                .title("Log Output")
                .layout(Layout::border())
                .region(Region::Center),
        )?;
        window.create_text_area(
            TextAreaOptions::new(LOG_AREA, "log-panel")
                .rows(20)
                .cols(50)
                .editable(false)
                .scrollable(true),
        )?;

        window.create_panel(
            PanelOptions::new("status-panel")
                .layout(Layout::flow())
                .region(Region::South),
        )?;
        window.create_label(LabelOptions::new(STATUS_LABEL, "status-panel").text("Ready"))?;

        window.show();
        log::debug!("Presets: debug window '{}' ready", window.id());
        Ok(DebugWindow { window })
    }

    pub fn create_data_window(&self, opts: DataWindowOptions) -> Result<DataWindow> {
        let DataWindowOptions {
            id,
            title,
            scheme,
            columns,
            rows,
            update,
        } = opts;
        let window = self.create_window(
            WindowConfig::new(id)
                .title(title)
                .scheme(scheme)
                .size(data_window_width(&columns), 300)
                .closable(true)
                .draggable(true)
                .resizable(true),
        )?;
        let cols = u16::try_from(columns.len().max(1)).unwrap_or(u16::MAX);
        let row_count = rows.len().max(MIN_DATA_ROWS);

        window.create_panel(
            PanelOptions::new("header-panel")
                .layout(Layout::grid(1, cols))
                .region(Region::North),
        )?;
        for (index, column) in columns.iter().enumerate() {
            let name = column
                .name
                .clone()
                .unwrap_or_else(|| format!("Column {}", index + 1));
            window.create_label(
                LabelOptions::new(format!("header-{}", column.id), "header-panel")
                    .text(name)
                    .font(FontDescription::bold(12)),
            )?;
        }

        window.create_panel(
            PanelOptions::new("data-panel")
                .layout(Layout::Grid {
                    rows: u16::try_from(row_count).unwrap_or(u16::MAX),
                    cols,
                    hgap: 2,
                    vgap: 1,
                })
                .region(Region::Center),
        )?;
        for row_index in 0..row_count {
            let row = rows.get(row_index);
            for column in &columns {
                let value = row
                    .and_then(|r| r.get(&column.id))
                    .cloned()
                    .unwrap_or_default();
                window.create_label(
                    LabelOptions::new(cell_id(row_index, &column.id), "data-panel").text(value),
                )?;
            }
        }

        let columns = Arc::new(columns);
        let mut source: DataSource = match update {
            Some(source) => source,
            None => Box::new(Vec::new),
        };
        let target = window.clone();
        let timer_columns = Arc::clone(&columns);
        let timer = window.create_timer(TimerOptions::new(move || {
            let rows = source();
            write_rows(&target, &timer_columns, row_count, &rows);
        }));

        window.show();
        log::debug!(
            "Presets: data window '{}' ready ({row_count} x {} cells)",
            window.id(),
            columns.len()
        );
        Ok(DataWindow {
            window,
            columns,
            row_count,
            timer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_window_width_has_a_floor() {
        assert_eq!(data_window_width(&[DataColumn::new("a")]), 300);
        let wide = [
            DataColumn::new("a").width(200),
            DataColumn::new("b").width(150),
            DataColumn::new("c"),
        ];
        assert_eq!(data_window_width(&wide), 490);
    }

    #[test]
    fn preset_defaults_match_their_ids() {
        let debug = DebugWindowOptions::default();
        assert_eq!(debug.id, "debug-window");
        assert_eq!(debug.scheme.name, "debug");
        let data = DataWindowOptions::default();
        assert_eq!(data.id, "data-window");
        assert_eq!(data.scheme.name, "dark");
        assert_eq!(data.columns.len(), 1);
        assert_eq!(cell_id(3, "hp"), "cell-3-hp");
    }
}
