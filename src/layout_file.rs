/*
 * Declarative layout documents in TOML.
 *
 *     [[window]]
 *     id = "stats"
 *     title = "Stats"
 *     scheme = "dark"
 *
 *     [[window.panel]]
 *     id = "main"
 *     layout = { kind = "grid", rows = 2, cols = 2 }
 *
 *     [[window.component]]
 *     kind = "label"
 *     id = "hp"
 *     panel = "main"
 *     text = "HP: 0"
 *
 * Panels are declared before components, each in document order. Listeners
 * cannot be written in a file; attach them afterwards with `set_listener`.
 */
use crate::error::Result;
use crate::options::{
    ButtonOptions, CheckBoxOptions, ComboBoxOptions, LabelOptions, PanelOptions,
    ProgressBarOptions, SeparatorOptions, SliderOptions, TabbedPaneOptions, TableOptions,
    TextAreaOptions, TextFieldOptions, WindowConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_X,
    DEFAULT_Y,
};
use crate::runtime::OverlayRuntime;
use crate::styling_primitives::{Color, ColorScheme, FontDescription};
use crate::types::{Alignment, Layout, Region};
use crate::window_factory::Window;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutDocument {
    #[serde(default, rename = "window")]
    pub windows: Vec<WindowDecl>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindowDecl {
    pub id: String,
    #[serde(default = "untitled")]
    pub title: String,
    /// Palette name; unknown names fall back to `dark`.
    pub scheme: Option<String>,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_x")]
    pub x: i32,
    #[serde(default = "default_y")]
    pub y: i32,
    #[serde(default = "yes")]
    pub closable: bool,
    #[serde(default)]
    pub resizable: bool,
    #[serde(default = "yes")]
    pub draggable: bool,
    /// Show the window once everything in it is declared.
    #[serde(default)]
    pub show: bool,
    #[serde(default, rename = "panel")]
    pub panels: Vec<PanelDecl>,
    #[serde(default, rename = "component")]
    pub components: Vec<ComponentDecl>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PanelDecl {
    pub id: String,
    #[serde(default)]
    pub layout: Layout,
    pub title: Option<String>,
    #[serde(default)]
    pub region: Region,
    pub parent: Option<String>,
    #[serde(default = "yes")]
    pub visible: bool,
    pub background: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentDecl {
    pub id: String,
    pub panel: String,
    #[serde(default)]
    pub region: Region,
    #[serde(flatten)]
    pub spec: ComponentSpecDecl,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ComponentSpecDecl {
    Label {
        #[serde(default)]
        text: String,
        #[serde(default)]
        align: Alignment,
        font: Option<FontDescription>,
        color: Option<Color>,
    },
    Button {
        #[serde(default = "button_text")]
        text: String,
    },
    CheckBox {
        #[serde(default)]
        text: String,
        #[serde(default)]
        selected: bool,
    },
    Combo {
        #[serde(default)]
        items: Vec<String>,
        #[serde(default)]
        selected: usize,
    },
    Slider {
        #[serde(default)]
        min: i32,
        #[serde(default = "hundred")]
        max: i32,
        #[serde(default)]
        value: i32,
    },
    TextField {
        #[serde(default)]
        text: String,
        #[serde(default = "ten")]
        columns: u16,
        #[serde(default = "yes")]
        editable: bool,
    },
    TextArea {
        #[serde(default)]
        text: String,
        #[serde(default = "five")]
        rows: u16,
        #[serde(default = "twenty")]
        cols: u16,
        #[serde(default = "yes")]
        editable: bool,
        #[serde(default = "yes")]
        scrollable: bool,
    },
    Separator {
        #[serde(default = "yes")]
        horizontal: bool,
    },
    ProgressBar {
        #[serde(default)]
        min: i32,
        #[serde(default = "hundred")]
        max: i32,
        #[serde(default)]
        value: i32,
        #[serde(default = "yes")]
        show_text: bool,
    },
    Table {
        #[serde(default)]
        columns: Vec<String>,
        #[serde(default)]
        rows: Vec<Vec<String>>,
        #[serde(default)]
        editable: bool,
    },
    TabbedPane {},
}

fn untitled() -> String {
    "Untitled".into()
}
fn button_text() -> String {
    "Button".into()
}
fn default_width() -> i32 {
    DEFAULT_WIDTH
}
fn default_height() -> i32 {
    DEFAULT_HEIGHT
}
fn default_x() -> i32 {
    DEFAULT_X
}
fn default_y() -> i32 {
    DEFAULT_Y
}
fn yes() -> bool {
    true
}
fn hundred() -> i32 {
    100
}
fn ten() -> u16 {
    10
}
fn five() -> u16 {
    5
}
fn twenty() -> u16 {
    20
}

impl LayoutDocument {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let document: LayoutDocument = toml::from_str(text)?;
        log::debug!(
            "LayoutFile: parsed {} window declaration(s)",
            document.windows.len()
        );
        Ok(document)
    }

    /// Creates every declared window on `runtime`, in document order.
    pub fn apply(&self, runtime: &OverlayRuntime) -> Result<Vec<Window>> {
        self.windows
            .iter()
            .map(|decl| decl.apply(runtime))
            .collect()
    }
}

impl WindowDecl {
    fn config(&self, runtime: &OverlayRuntime) -> WindowConfig {
        let scheme = self
            .scheme
            .as_deref()
            .map(ColorScheme::by_name)
            .unwrap_or_else(|| runtime.default_scheme().clone());
        WindowConfig::new(self.id.clone())
            .title(self.title.clone())
            .scheme(scheme)
            .size(self.width, self.height)
            .position(self.x, self.y)
            .closable(self.closable)
            .resizable(self.resizable)
            .draggable(self.draggable)
    }

    pub fn apply(&self, runtime: &OverlayRuntime) -> Result<Window> {
        let window = runtime.create_window(self.config(runtime))?;
        for panel in &self.panels {
            window.create_panel(panel.options())?;
        }
        for component in &self.components {
            component.apply(&window)?;
        }
        if self.show {
            window.show();
        }
        Ok(window)
    }
}

impl PanelDecl {
    fn options(&self) -> PanelOptions {
        PanelOptions {
            id: self.id.clone(),
            layout: self.layout,
            title: self.title.clone(),
            region: self.region,
            parent: self.parent.clone(),
            visible: self.visible,
            background: self.background,
        }
    }
}

impl ComponentDecl {
    fn apply(&self, window: &Window) -> Result<()> {
        let (id, panel) = (self.id.clone(), self.panel.clone());
        match self.spec.clone() {
            ComponentSpecDecl::Label {
                text,
                align,
                font,
                color,
            } => {
                let mut opts = LabelOptions::new(id, panel)
                    .region(self.region)
                    .text(text)
                    .align(align)
                    .font(font.unwrap_or_default());
                opts.spec.color = color;
                window.create_label(opts)?;
            }
            ComponentSpecDecl::Button { text } => {
                window.create_button(ButtonOptions::new(id, panel).region(self.region).text(text))?;
            }
            ComponentSpecDecl::CheckBox { text, selected } => {
                window.create_checkbox(
                    CheckBoxOptions::new(id, panel)
                        .region(self.region)
                        .text(text)
                        .selected(selected),
                )?;
            }
            ComponentSpecDecl::Combo { items, selected } => {
                window.create_combo_box(
                    ComboBoxOptions::new(id, panel)
                        .region(self.region)
                        .items(items)
                        .selected(selected),
                )?;
            }
            ComponentSpecDecl::Slider { min, max, value } => {
                window.create_slider(
                    SliderOptions::new(id, panel)
                        .region(self.region)
                        .range(min, max)
                        .value(value),
                )?;
            }
            ComponentSpecDecl::TextField {
                text,
                columns,
                editable,
            } => {
                window.create_text_field(
                    TextFieldOptions::new(id, panel)
                        .region(self.region)
                        .text(text)
                        .columns(columns)
                        .editable(editable),
                )?;
            }
            ComponentSpecDecl::TextArea {
                text,
                rows,
                cols,
                editable,
                scrollable,
            } => {
                window.create_text_area(
                    TextAreaOptions::new(id, panel)
                        .region(self.region)
                        .text(text)
                        .rows(rows)
                        .cols(cols)
                        .editable(editable)
                        .scrollable(scrollable),
                )?;
            }
            ComponentSpecDecl::Separator { horizontal } => {
                let opts = SeparatorOptions::new(id, panel).region(self.region);
                window.create_separator(if horizontal { opts } else { opts.vertical() })?;
            }
            ComponentSpecDecl::ProgressBar {
                min,
                max,
                value,
                show_text,
            } => {
                window.create_progress_bar(
                    ProgressBarOptions::new(id, panel)
                        .region(self.region)
                        .range(min, max)
                        .value(value)
                        .show_text(show_text),
                )?;
            }
            ComponentSpecDecl::Table {
                columns,
                rows,
                editable,
            } => {
                window.create_table(
                    TableOptions::new(id, panel)
                        .region(self.region)
                        .columns(columns)
                        .rows(rows)
                        .editable(editable),
                )?;
            }
            ComponentSpecDecl::TabbedPane {} => {
                window.create_tabbed_pane(TabbedPaneOptions::new(id, panel).region(self.region))?;
            }
        }
        Ok(())
    }
}
