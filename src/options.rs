/*
 * Declarative options records for windows, dialogs, panels, components and
 * timers. Every record starts from the defaults the overlays have always used
 * and is refined with consuming builder methods:
 *
 *     WindowConfig::new("stats").title("Stats").size(320, 240).resizable(true)
 */
use crate::callbacks::{CloseFn, Listener};
use crate::styling_primitives::{Color, ColorScheme, FontDescription};
use crate::types::{Alignment, Layout, Region};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_WIDTH: i32 = 300;
pub const DEFAULT_HEIGHT: i32 = 200;
pub const DEFAULT_X: i32 = 50;
pub const DEFAULT_Y: i32 = 50;
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(1000);
pub const DEFAULT_TIMER_INTERVAL: Duration = Duration::from_millis(1000);

/// Configuration of a top-level overlay window.
pub struct WindowConfig {
    pub id: String,
    pub title: String,
    /// `None` uses the runtime's default scheme.
    pub scheme: Option<ColorScheme>,
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
    pub closable: bool,
    pub resizable: bool,
    pub draggable: bool,
    pub on_close: Option<CloseFn>,
}

impl WindowConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: "Untitled".into(),
            scheme: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: DEFAULT_X,
            y: DEFAULT_Y,
            closable: true,
            resizable: false,
            draggable: true,
            on_close: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn on_close(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for WindowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowConfig")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("scheme", &self.scheme.as_ref().map(|s| s.name.as_str()))
            .field("bounds", &(self.x, self.y, self.width, self.height))
            .field("closable", &self.closable)
            .field("resizable", &self.resizable)
            .field("draggable", &self.draggable)
            .finish_non_exhaustive()
    }
}

/// Configuration of a secondary window. Dialogs never drag or resize.
pub struct DialogConfig {
    pub id: String,
    pub title: String,
    pub scheme: Option<ColorScheme>,
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
    pub modal: bool,
    pub closable: bool,
    pub on_close: Option<CloseFn>,
}

impl DialogConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: "Dialog".into(),
            scheme: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: DEFAULT_X,
            y: DEFAULT_Y,
            modal: false,
            closable: true,
            on_close: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn on_close(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for DialogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogConfig")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("modal", &self.modal)
            .field("bounds", &(self.x, self.y, self.width, self.height))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOptions {
    pub id: String,
    pub layout: Layout,
    pub title: Option<String>,
    pub region: Region,
    /// Parent panel id; `None` or an unknown id mounts on the content root.
    pub parent: Option<String>,
    pub visible: bool,
    pub background: Option<Color>,
}

impl PanelOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layout: Layout::default(),
            title: None,
            region: Region::Center,
            parent: None,
            visible: true,
            background: None,
        }
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

/// A new tab whose content is a freshly registered panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTab {
    pub title: String,
    pub panel: PanelOptions,
    pub select: bool,
}

impl AddTab {
    pub fn new(title: impl Into<String>, panel: PanelOptions) -> Self {
        Self {
            title: title.into(),
            panel,
            select: false,
        }
    }

    pub fn select(mut self, select: bool) -> Self {
        self.select = select;
        self
    }
}

/*
 * Options shared by every component kind (id, parent panel, border region and
 * listener) around the kind-specific part `S`.
 */
#[derive(Debug)]
pub struct ComponentOptions<S> {
    pub id: String,
    pub panel: String,
    pub region: Region,
    pub listener: Option<Listener>,
    pub spec: S,
}

impl<S: Default> ComponentOptions<S> {
    pub fn new(id: impl Into<String>, panel: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            panel: panel.into(),
            region: Region::Center,
            listener: None,
            spec: S::default(),
        }
    }
}

impl<S> ComponentOptions<S> {
    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelSpec {
    pub text: String,
    pub align: Alignment,
    pub font: FontDescription,
    /// `None` uses the scheme's text color.
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub text: String,
}

impl Default for ButtonSpec {
    fn default() -> Self {
        Self {
            text: "Button".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckBoxSpec {
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComboBoxSpec {
    pub items: Vec<String>,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderSpec {
    pub min: i32,
    pub max: i32,
    pub value: i32,
}

impl Default for SliderSpec {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            value: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFieldSpec {
    pub text: String,
    pub columns: u16,
    pub editable: bool,
}

impl Default for TextFieldSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            columns: 10,
            editable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaSpec {
    pub text: String,
    pub rows: u16,
    pub cols: u16,
    pub editable: bool,
    pub scrollable: bool,
}

impl Default for TextAreaSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            rows: 5,
            cols: 20,
            editable: true,
            scrollable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorSpec {
    pub horizontal: bool,
}

impl Default for SeparatorSpec {
    fn default() -> Self {
        Self { horizontal: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBarSpec {
    pub min: i32,
    pub max: i32,
    pub value: i32,
    pub show_text: bool,
}

impl Default for ProgressBarSpec {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            value: 0,
            show_text: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSpec {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabbedPaneSpec;

pub type LabelOptions = ComponentOptions<LabelSpec>;
pub type ButtonOptions = ComponentOptions<ButtonSpec>;
pub type CheckBoxOptions = ComponentOptions<CheckBoxSpec>;
pub type ComboBoxOptions = ComponentOptions<ComboBoxSpec>;
pub type SliderOptions = ComponentOptions<SliderSpec>;
pub type TextFieldOptions = ComponentOptions<TextFieldSpec>;
pub type TextAreaOptions = ComponentOptions<TextAreaSpec>;
pub type SeparatorOptions = ComponentOptions<SeparatorSpec>;
pub type ProgressBarOptions = ComponentOptions<ProgressBarSpec>;
pub type TableOptions = ComponentOptions<TableSpec>;
pub type TabbedPaneOptions = ComponentOptions<TabbedPaneSpec>;

impl LabelOptions {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spec.text = text.into();
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.spec.align = align;
        self
    }

    pub fn font(mut self, font: FontDescription) -> Self {
        self.spec.font = font;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.spec.color = Some(color);
        self
    }
}

impl ButtonOptions {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spec.text = text.into();
        self
    }

    pub fn on_click(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.listener = Some(Listener::on_click(f));
        self
    }
}

impl CheckBoxOptions {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spec.text = text.into();
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.spec.selected = selected;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.listener = Some(Listener::on_toggle(f));
        self
    }
}

impl ComboBoxOptions {
    pub fn items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.spec.items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.spec.selected = index;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(Option<&str>, usize) + Send + 'static) -> Self {
        self.listener = Some(Listener::on_select(f));
        self
    }
}

impl SliderOptions {
    pub fn range(mut self, min: i32, max: i32) -> Self {
        self.spec.min = min;
        self.spec.max = max;
        self
    }

    pub fn value(mut self, value: i32) -> Self {
        self.spec.value = value;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(i32) + Send + 'static) -> Self {
        self.listener = Some(Listener::on_value(f));
        self
    }
}

impl TextFieldOptions {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spec.text = text.into();
        self
    }

    pub fn columns(mut self, columns: u16) -> Self {
        self.spec.columns = columns;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.spec.editable = editable;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.listener = Some(Listener::on_text(f));
        self
    }
}

impl TextAreaOptions {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spec.text = text.into();
        self
    }

    pub fn rows(mut self, rows: u16) -> Self {
        self.spec.rows = rows;
        self
    }

    pub fn cols(mut self, cols: u16) -> Self {
        self.spec.cols = cols;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.spec.editable = editable;
        self
    }

    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.spec.scrollable = scrollable;
        self
    }
}

impl SeparatorOptions {
    pub fn vertical(mut self) -> Self {
        self.spec.horizontal = false;
        self
    }
}

impl ProgressBarOptions {
    pub fn range(mut self, min: i32, max: i32) -> Self {
        self.spec.min = min;
        self.spec.max = max;
        self
    }

    pub fn value(mut self, value: i32) -> Self {
        self.spec.value = value;
        self
    }

    pub fn show_text(mut self, show: bool) -> Self {
        self.spec.show_text = show;
        self
    }
}

impl TableOptions {
    pub fn columns<I, T>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.spec.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.spec.rows = rows;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.spec.editable = editable;
        self
    }

    pub fn on_cell_edit(mut self, f: impl FnMut(usize, usize, &str) + Send + 'static) -> Self {
        self.listener = Some(Listener::on_cell(f));
        self
    }
}

impl TabbedPaneOptions {
    pub fn on_change(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.listener = Some(Listener::on_tab(f));
        self
    }
}

pub type TimerFn = Box<dyn FnMut() + Send>;

/// A recurring (or single-shot) callback owned by one window.
pub struct TimerOptions {
    pub interval: Duration,
    pub callback: TimerFn,
    pub auto_start: bool,
    pub repeats: bool,
}

impl TimerOptions {
    pub fn new(callback: impl FnMut() + Send + 'static) -> Self {
        Self {
            interval: DEFAULT_TIMER_INTERVAL,
            callback: Box::new(callback),
            auto_start: true,
            repeats: true,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval_ms(self, millis: u64) -> Self {
        self.interval(Duration::from_millis(millis))
    }

    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    pub fn repeats(mut self, repeats: bool) -> Self {
        self.repeats = repeats;
        self
    }
}

impl fmt::Debug for TimerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerOptions")
            .field("interval", &self.interval)
            .field("auto_start", &self.auto_start)
            .field("repeats", &self.repeats)
            .finish_non_exhaustive()
    }
}

/// Which frame host the runtime builds on its UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostChoice {
    Headless,
    /// The platform's native host; headless where none exists.
    Native,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub thread_name: String,
    pub default_scheme: ColorScheme,
    pub host: HostChoice,
    /// Upper bound on how long snapshot queries wait for the UI thread.
    pub query_timeout: Duration,
}

impl RuntimeConfig {
    pub fn headless() -> Self {
        Self {
            host: HostChoice::Headless,
            ..Self::default()
        }
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn default_scheme(mut self, scheme: ColorScheme) -> Self {
        self.default_scheme = scheme;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            thread_name: "overlay-ui".into(),
            default_scheme: ColorScheme::dark(),
            host: HostChoice::Native,
            query_timeout: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_match_overlay_conventions() {
        let config = WindowConfig::new("w");
        assert_eq!(config.title, "Untitled");
        assert_eq!((config.x, config.y), (50, 50));
        assert_eq!((config.width, config.height), (300, 200));
        assert!(config.closable && config.draggable && !config.resizable);
        assert!(config.scheme.is_none());
    }

    #[test]
    fn component_options_carry_kind_defaults() {
        let button = ButtonOptions::new("b", "p");
        assert_eq!(button.spec.text, "Button");
        assert_eq!(button.region, Region::Center);
        let area = TextAreaOptions::new("t", "p");
        assert_eq!((area.spec.rows, area.spec.cols), (5, 20));
        let field = TextFieldOptions::new("f", "p");
        assert_eq!(field.spec.columns, 10);
        assert!(ProgressBarOptions::new("pb", "p").spec.show_text);
    }

    #[test]
    fn listener_builders_store_the_matching_listener() {
        let combo = ComboBoxOptions::new("c", "p")
            .items(["a", "b"])
            .on_change(|_, _| {});
        assert_eq!(combo.listener.as_ref().map(Listener::name), Some("select"));
        assert_eq!(combo.spec.items, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn timer_defaults_to_one_second_auto_start() {
        let timer = TimerOptions::new(|| {});
        assert_eq!(timer.interval, Duration::from_millis(1000));
        assert!(timer.auto_start && timer.repeats);
    }
}
