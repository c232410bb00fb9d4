/*
 * Retained widget model owned by the UI thread.
 *
 * Every component is a `Widget`: common state (enabled, visibility, colors),
 * a tagged `WidgetKind` carrying the kind-specific state, and an optional
 * typed listener. The generic property update never asks "what type is this
 * widget"; it asks the variant for a capability (`as_text`, `as_value`,
 * `as_selectable`) and applies the property only when the capability exists.
 */
pub(crate) mod button_handler;
pub(crate) mod checkbox_handler;
pub(crate) mod combobox_handler;
pub(crate) mod panel_handler;
pub(crate) mod progress_handler;
#[cfg(target_os = "windows")]
pub(crate) mod styling_handler;
pub(crate) mod tabbed_pane_handler;
pub(crate) mod table_handler;
pub(crate) mod text_handler;

use crate::callbacks::{Fired, Listener, dispatch};
use crate::styling_primitives::Color;
use crate::types::{ComponentInput, Properties, Property};

use button_handler::ButtonState;
use checkbox_handler::CheckBoxState;
use combobox_handler::ComboBoxState;
use progress_handler::{ProgressBarState, SliderState};
use tabbed_pane_handler::TabbedPaneState;
use table_handler::TableState;
use text_handler::{LabelState, TextAreaState, TextFieldState};

/// Kind of a leaf component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Label,
    Button,
    CheckBox,
    ComboBox,
    Slider,
    TextField,
    TextArea,
    Separator,
    ProgressBar,
    Table,
    TabbedPane,
}

impl ComponentKind {
    /// Whether `update_component` applies `property` to this kind.
    pub fn supports(self, property: Property) -> bool {
        use ComponentKind::*;
        match property {
            Property::Text => matches!(
                self,
                Label | Button | CheckBox | ComboBox | TextField | TextArea | ProgressBar
            ),
            Property::Value => matches!(self, ComboBox | Slider | ProgressBar | TabbedPane),
            Property::Selected => matches!(self, CheckBox),
            Property::Enabled => !matches!(self, Separator),
            Property::Visible | Property::Foreground | Property::Background => true,
        }
    }

    pub fn is_interactive(self) -> bool {
        use ComponentKind::*;
        matches!(
            self,
            Button | CheckBox | ComboBox | Slider | TextField | Table | TabbedPane
        )
    }

    pub fn name(self) -> &'static str {
        use ComponentKind::*;
        match self {
            Label => "label",
            Button => "button",
            CheckBox => "checkbox",
            ComboBox => "combo",
            Slider => "slider",
            TextField => "textfield",
            TextArea => "textarea",
            Separator => "separator",
            ProgressBar => "progressbar",
            Table => "table",
            TabbedPane => "tabbedpane",
        }
    }
}

pub(crate) trait TextCapable {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: &str);
}

pub(crate) trait ValueCapable {
    fn value(&self) -> i32;
    fn set_value(&mut self, value: i32);
}

pub(crate) trait SelectCapable {
    fn is_selected(&self) -> bool;
    fn set_selected(&mut self, selected: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeparatorState {
    pub horizontal: bool,
}

#[derive(Debug)]
pub(crate) enum WidgetKind {
    Label(LabelState),
    Button(ButtonState),
    CheckBox(CheckBoxState),
    ComboBox(ComboBoxState),
    Slider(SliderState),
    TextField(TextFieldState),
    TextArea(TextAreaState),
    Separator(SeparatorState),
    ProgressBar(ProgressBarState),
    Table(TableState),
    TabbedPane(TabbedPaneState),
}

impl WidgetKind {
    pub(crate) fn kind(&self) -> ComponentKind {
        match self {
            WidgetKind::Label(_) => ComponentKind::Label,
            WidgetKind::Button(_) => ComponentKind::Button,
            WidgetKind::CheckBox(_) => ComponentKind::CheckBox,
            WidgetKind::ComboBox(_) => ComponentKind::ComboBox,
            WidgetKind::Slider(_) => ComponentKind::Slider,
            WidgetKind::TextField(_) => ComponentKind::TextField,
            WidgetKind::TextArea(_) => ComponentKind::TextArea,
            WidgetKind::Separator(_) => ComponentKind::Separator,
            WidgetKind::ProgressBar(_) => ComponentKind::ProgressBar,
            WidgetKind::Table(_) => ComponentKind::Table,
            WidgetKind::TabbedPane(_) => ComponentKind::TabbedPane,
        }
    }

    pub(crate) fn as_text(&mut self) -> Option<&mut dyn TextCapable> {
        match self {
            WidgetKind::Label(s) => Some(s),
            WidgetKind::Button(s) => Some(s),
            WidgetKind::CheckBox(s) => Some(s),
            WidgetKind::ComboBox(s) => Some(s),
            WidgetKind::TextField(s) => Some(s),
            WidgetKind::TextArea(s) => Some(s),
            WidgetKind::ProgressBar(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_value(&mut self) -> Option<&mut dyn ValueCapable> {
        match self {
            WidgetKind::ComboBox(s) => Some(s),
            WidgetKind::Slider(s) => Some(s),
            WidgetKind::ProgressBar(s) => Some(s),
            WidgetKind::TabbedPane(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_selectable(&mut self) -> Option<&mut dyn SelectCapable> {
        match self {
            WidgetKind::CheckBox(s) => Some(s),
            _ => None,
        }
    }

    /// Read-only text, used for snapshots and painting.
    pub(crate) fn text(&self) -> Option<String> {
        match self {
            WidgetKind::Label(s) => Some(s.text().to_string()),
            WidgetKind::Button(s) => Some(s.text().to_string()),
            WidgetKind::CheckBox(s) => Some(s.text().to_string()),
            WidgetKind::ComboBox(s) => s.selected_item().map(str::to_string),
            WidgetKind::TextField(s) => Some(s.text().to_string()),
            WidgetKind::TextArea(s) => Some(s.text().to_string()),
            WidgetKind::ProgressBar(s) => s.display_text(),
            _ => None,
        }
    }

    pub(crate) fn value(&self) -> Option<i32> {
        match self {
            WidgetKind::ComboBox(s) => Some(s.value()),
            WidgetKind::Slider(s) => Some(s.value()),
            WidgetKind::ProgressBar(s) => Some(s.value()),
            WidgetKind::TabbedPane(s) => Some(s.value()),
            _ => None,
        }
    }

    pub(crate) fn selected(&self) -> Option<bool> {
        match self {
            WidgetKind::CheckBox(s) => Some(s.is_selected()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommonState {
    pub enabled: bool,
    pub visible: bool,
    pub foreground: Color,
    pub background: Option<Color>,
}

impl CommonState {
    pub(crate) fn new(foreground: Color) -> Self {
        Self {
            enabled: true,
            visible: true,
            foreground,
            background: None,
        }
    }
}

/// Background swap in progress for `highlight_component`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Highlight {
    pub restore: Option<Color>,
    pub generation: u64,
}

#[derive(Debug)]
pub(crate) struct Widget {
    pub id: String,
    pub parent: Option<String>,
    pub common: CommonState,
    pub kind: WidgetKind,
    pub listener: Option<Listener>,
    pub highlight: Option<Highlight>,
}

impl Widget {
    pub(crate) fn new(id: String, parent: Option<String>, foreground: Color, kind: WidgetKind) -> Self {
        Self {
            id,
            parent,
            common: CommonState::new(foreground),
            kind,
            listener: None,
            highlight: None,
        }
    }

    pub(crate) fn component_kind(&self) -> ComponentKind {
        self.kind.kind()
    }

    /*
     * Applies every present property the kind supports and returns the ones
     * that were applied. Unsupported keys are skipped silently (trace only) so
     * one property set can target heterogeneous components.
     */
    pub(crate) fn apply_properties(&mut self, props: &Properties) -> Vec<Property> {
        let kind = self.component_kind();
        let mut applied = Vec::new();
        for property in props.present() {
            if !kind.supports(property) {
                log::trace!(
                    "Controls: '{}' ({}) ignores property {property:?}",
                    self.id,
                    kind.name()
                );
                continue;
            }
            let done = match property {
                Property::Text => match (self.kind.as_text(), props.text.as_deref()) {
                    (Some(target), Some(text)) => {
                        target.set_text(text);
                        true
                    }
                    _ => false,
                },
                Property::Value => match (self.kind.as_value(), props.value) {
                    (Some(target), Some(value)) => {
                        target.set_value(value);
                        true
                    }
                    _ => false,
                },
                Property::Selected => match (self.kind.as_selectable(), props.selected) {
                    (Some(target), Some(selected)) => {
                        target.set_selected(selected);
                        true
                    }
                    _ => false,
                },
                Property::Enabled => props.enabled.map(|v| self.common.enabled = v).is_some(),
                Property::Visible => props.visible.map(|v| self.common.visible = v).is_some(),
                Property::Foreground => props
                    .foreground
                    .map(|c| self.common.foreground = c)
                    .is_some(),
                Property::Background => match props.background {
                    Some(color) => {
                        self.set_background(Some(color));
                        true
                    }
                    None => false,
                },
            };
            if done {
                applied.push(property);
            }
        }
        applied
    }

    /*
     * Sets the background. While a highlight is showing, the new color becomes
     * the color restored when the highlight ends rather than being overwritten
     * by the reversion.
     */
    pub(crate) fn set_background(&mut self, color: Option<Color>) {
        match self.highlight.as_mut() {
            Some(highlight) => highlight.restore = color,
            None => self.common.background = color,
        }
    }

    /*
     * Applies user input to the widget state and reports what fired. Disabled
     * widgets ignore input. Returns `None` when the input does not apply to
     * this kind.
     */
    pub(crate) fn apply_input(&mut self, input: &ComponentInput) -> Option<Fired> {
        if !self.common.enabled {
            log::debug!("Controls: '{}' is disabled; dropping {input:?}", self.id);
            return None;
        }
        match (&mut self.kind, input) {
            (WidgetKind::Button(_), ComponentInput::Click) => Some(Fired::Clicked),
            (WidgetKind::CheckBox(state), ComponentInput::Toggle | ComponentInput::Click) => {
                Some(Fired::Toggled(state.toggle()))
            }
            (WidgetKind::ComboBox(state), ComponentInput::SelectIndex(index)) => state
                .select_index(*index)
                .then(|| Fired::Selected(state.selected_item().map(str::to_string), *index)),
            (WidgetKind::Slider(state), ComponentInput::Slide(value)) => {
                state.set_value(*value);
                Some(Fired::ValueChanged(state.value()))
            }
            (WidgetKind::TextField(state), ComponentInput::Commit(text)) if state.editable => {
                state.set_text(text);
                Some(Fired::TextCommitted(text.clone()))
            }
            (WidgetKind::TextArea(state), ComponentInput::Commit(text)) if state.editable => {
                state.set_text(text);
                Some(Fired::TextCommitted(text.clone()))
            }
            (WidgetKind::TabbedPane(state), ComponentInput::SelectTab(index)) => {
                state.select(*index).then_some(Fired::TabSelected(*index))
            }
            (_, input) => {
                log::debug!(
                    "Controls: {input:?} does not apply to '{}' ({})",
                    self.id,
                    self.component_kind().name()
                );
                None
            }
        }
    }

    /// Hands `fired` to the stored listener, isolated.
    pub(crate) fn fire(&mut self, fired: &Fired) {
        if let Some(listener) = self.listener.as_mut() {
            dispatch(&self.id, listener, fired);
        }
    }
}
