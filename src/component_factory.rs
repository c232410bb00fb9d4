/*
 * Declaring leaf components.
 *
 * Every `create_*` call validates the ids, turns the kind-specific options
 * into the widget's initial state, and queues registration on the UI thread.
 * The widget is bound into its parent panel there: by region under a
 * border-layout parent, appended otherwise. A component whose parent panel is
 * unknown is still registered (updates reach it) but is never shown.
 */
use crate::callbacks::Listener;
use crate::command_executor;
use crate::controls::button_handler::ButtonState;
use crate::controls::checkbox_handler::CheckBoxState;
use crate::controls::combobox_handler::ComboBoxState;
use crate::controls::progress_handler::{ProgressBarState, SliderState};
use crate::controls::tabbed_pane_handler::TabbedPaneState;
use crate::controls::table_handler::{TableModel, TableState};
use crate::controls::text_handler::{LabelState, TextAreaState, TextFieldState};
use crate::controls::{ComponentKind, SeparatorState, Widget, WidgetKind};
use crate::error::{OverlayError, Result};
use crate::options::{
    ButtonOptions, CheckBoxOptions, ComboBoxOptions, ComponentOptions, LabelOptions,
    ProgressBarOptions, SeparatorOptions, SliderOptions, TabbedPaneOptions, TableOptions,
    TextAreaOptions, TextFieldOptions,
};
use crate::styling_primitives::Color;
use crate::types::Properties;
use crate::update_dispatcher::ComponentState;
use crate::window_factory::Window;

use std::time::Duration;

/// Handle to a declared component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentHandle {
    window: Window,
    id: String,
    kind: ComponentKind,
}

impl ComponentHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn update(&self, props: Properties) {
        self.window.update_component(&self.id, props);
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.update(Properties::new().text(text));
    }

    pub fn set_value(&self, value: i32) {
        self.update(Properties::new().value(value));
    }

    pub fn highlight(&self, color: Option<Color>, duration: Option<Duration>) {
        self.window.highlight_component(&self.id, color, duration);
    }

    pub fn set_listener(&self, listener: Listener) {
        self.window.set_listener(&self.id, listener);
    }

    pub fn state(&self) -> Option<ComponentState> {
        self.window.component_state(&self.id)
    }
}

/// Initial UI-side state built from a component's options.
struct Built {
    kind: WidgetKind,
    foreground: Option<Color>,
    table: Option<TableModel>,
}

impl From<WidgetKind> for Built {
    fn from(kind: WidgetKind) -> Self {
        Self {
            kind,
            foreground: None,
            table: None,
        }
    }
}

impl Window {
    fn build<S>(
        &self,
        opts: ComponentOptions<S>,
        make: impl FnOnce(S) -> Built,
    ) -> Result<ComponentHandle> {
        if opts.id.is_empty() {
            return Err(OverlayError::MissingId { scope: "component" });
        }
        if opts.panel.is_empty() {
            return Err(OverlayError::MissingId {
                scope: "parent panel",
            });
        }
        let ComponentOptions {
            id,
            panel,
            region,
            listener,
            spec,
        } = opts;
        let built = make(spec);
        let kind = built.kind.kind();
        let mut widget = Widget::new(
            id.clone(),
            Some(panel),
            built.foreground.unwrap_or(self.scheme().text),
            built.kind,
        );
        widget.listener = listener;
        self.inner.components.write().insert(id.clone(), kind);

        let window_id = self.id().to_string();
        let table = built.table;
        self.post("create component", move |ctx| {
            command_executor::execute_create_component(ctx, &window_id, widget, region, table)
        });
        Ok(ComponentHandle {
            window: self.clone(),
            id,
            kind,
        })
    }

    pub fn create_label(&self, opts: LabelOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| {
            let mut label = LabelState::new(spec.text);
            label.align = spec.align;
            label.font = spec.font;
            Built {
                kind: WidgetKind::Label(label),
                foreground: spec.color,
                table: None,
            }
        })
    }

    pub fn create_button(&self, opts: ButtonOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| WidgetKind::Button(ButtonState::new(spec.text)).into())
    }

    pub fn create_checkbox(&self, opts: CheckBoxOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| {
            WidgetKind::CheckBox(CheckBoxState::new(spec.text, spec.selected)).into()
        })
    }

    pub fn create_combo_box(&self, opts: ComboBoxOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| {
            WidgetKind::ComboBox(ComboBoxState::new(spec.items, spec.selected)).into()
        })
    }

    pub fn create_slider(&self, opts: SliderOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| {
            WidgetKind::Slider(SliderState::new(spec.min, spec.max, spec.value)).into()
        })
    }

    pub fn create_text_field(&self, opts: TextFieldOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| {
            WidgetKind::TextField(TextFieldState::new(spec.text, spec.columns, spec.editable)).into()
        })
    }

    pub fn create_text_area(&self, opts: TextAreaOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| {
            WidgetKind::TextArea(TextAreaState::new(
                spec.text,
                spec.rows,
                spec.cols,
                spec.editable,
                spec.scrollable,
            ))
            .into()
        })
    }

    pub fn create_separator(&self, opts: SeparatorOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| {
            WidgetKind::Separator(SeparatorState {
                horizontal: spec.horizontal,
            })
            .into()
        })
    }

    pub fn create_progress_bar(&self, opts: ProgressBarOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| {
            WidgetKind::ProgressBar(ProgressBarState::new(
                spec.min,
                spec.max,
                spec.value,
                spec.show_text,
            ))
            .into()
        })
    }

    pub fn create_table(&self, opts: TableOptions) -> Result<ComponentHandle> {
        self.build(opts, |spec| Built {
            kind: WidgetKind::Table(TableState::default()),
            foreground: None,
            table: Some(TableModel::new(spec.columns, spec.rows, spec.editable)),
        })
    }

    pub fn create_tabbed_pane(&self, opts: TabbedPaneOptions) -> Result<ComponentHandle> {
        self.build(opts, |_| WidgetKind::TabbedPane(TabbedPaneState::default()).into())
    }
}
