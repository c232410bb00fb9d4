/*
 * Per-window state owned by the UI thread.
 *
 * `WindowData` is the retained model of one overlay or dialog: frame handle
 * and bounds, chrome flags, the content root, and the id-keyed maps of panels,
 * widgets and table models. Caller threads never see it; every access happens
 * inside a task running on the UI thread via `UiContext::with_window`.
 *
 * The visible hierarchy is whatever is reachable from the content root
 * through container slots. Nodes that were displaced from a border region, or
 * components whose parent panel was unknown at creation time, stay registered
 * (they can still be updated) but are never part of the presented scene.
 */
use crate::callbacks::CloseFn;
use crate::chrome::{DragTracker, ResizeTracker};
use crate::controls::panel_handler::{self, ChildSlot, ContainerRef, NodeRef, PanelData};
use crate::controls::table_handler::TableModel;
use crate::controls::{Widget, WidgetKind};
use crate::host::FrameHandle;
use crate::options::PanelOptions;
use crate::scene::{ComponentDetail, ComponentView, PanelView, Scene, SceneNode, SceneSlot};
use crate::styling_primitives::ColorScheme;
use crate::types::{Layout, Rect, Region};
use crate::update_dispatcher::{ComponentState, PanelState};

use std::collections::HashMap;

/* Guards recursive walks against cycles created by re-registering an ancestor. */
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WindowRole {
    Overlay,
    Dialog {
        modal: bool,
        /// Window whose input is blocked while this modal dialog is visible.
        owner: Option<String>,
        /// Hidden frame created to own the dialog when no window was visible.
        synthetic_owner: Option<FrameHandle>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChromeFlags {
    pub closable: bool,
    pub resizable: bool,
    pub draggable: bool,
}

/// Everything the UI thread needs to set up a window's state.
pub(crate) struct WindowInit {
    pub id: String,
    pub title: String,
    pub scheme: ColorScheme,
    pub bounds: Rect,
    pub chrome: ChromeFlags,
    pub role: WindowRole,
    pub on_close: Option<CloseFn>,
}

pub(crate) struct WindowData {
    pub id: String,
    pub title: String,
    pub scheme: ColorScheme,
    pub role: WindowRole,
    pub frame: Option<FrameHandle>,
    pub bounds: Rect,
    pub visible: bool,
    /// Order of the last `show`; higher is more recent.
    pub shown_seq: u64,
    pub chrome: ChromeFlags,
    pub on_close: Option<CloseFn>,
    pub content: Vec<ChildSlot>,
    pub panels: HashMap<String, PanelData>,
    pub widgets: HashMap<String, Widget>,
    pub tables: HashMap<String, TableModel>,
    pub drag: DragTracker,
    pub resize: ResizeTracker,
    pub dirty: bool,
}

impl WindowData {
    pub(crate) fn new(init: WindowInit) -> Self {
        Self {
            id: init.id,
            title: init.title,
            scheme: init.scheme,
            role: init.role,
            frame: None,
            bounds: init.bounds,
            visible: false,
            shown_seq: 0,
            chrome: init.chrome,
            on_close: init.on_close,
            content: Vec::new(),
            panels: HashMap::new(),
            widgets: HashMap::new(),
            tables: HashMap::new(),
            drag: DragTracker::default(),
            resize: ResizeTracker::default(),
            dirty: true,
        }
    }

    pub(crate) fn is_modal_dialog(&self) -> bool {
        matches!(self.role, WindowRole::Dialog { modal: true, .. })
    }

    pub(crate) fn modal_owner(&self) -> Option<&str> {
        match &self.role {
            WindowRole::Dialog {
                modal: true,
                owner: Some(owner),
                ..
            } => Some(owner),
            _ => None,
        }
    }

    fn detach_from(&mut self, container: &ContainerRef, node: &NodeRef) {
        match container {
            ContainerRef::Content => {
                panel_handler::detach(&mut self.content, node);
            }
            ContainerRef::Panel(parent) => {
                if let Some(panel) = self.panels.get_mut(parent) {
                    panel_handler::detach(&mut panel.children, node);
                }
            }
            ContainerRef::Tab { pane } => {
                if let Some(WidgetKind::TabbedPane(tabs)) =
                    self.widgets.get_mut(pane).map(|w| &mut w.kind)
                {
                    tabs.remove_panel(node.id());
                }
            }
        }
    }

    /*
     * Registers a panel, replacing any panel with the same id (the old one is
     * detached first). `mount` overrides the parent resolution; tabs use it.
     * Returns where the panel was mounted.
     */
    pub(crate) fn register_panel(
        &mut self,
        opts: PanelOptions,
        mount: Option<ContainerRef>,
    ) -> ContainerRef {
        let id = opts.id.clone();
        let node = NodeRef::Panel(id.clone());
        if let Some(old) = self.panels.remove(&id) {
            log::debug!(
                "WindowData: panel '{id}' re-registered in '{}'; replacing",
                self.id
            );
            if let Some(container) = old.container.as_ref() {
                self.detach_from(container, &node);
            }
        }

        let container = mount.unwrap_or_else(|| match opts.parent.as_deref() {
            Some(parent) if parent != id && self.panels.contains_key(parent) => {
                ContainerRef::Panel(parent.to_string())
            }
            Some(parent) => {
                log::debug!(
                    "WindowData: parent panel '{parent}' not found in '{}'; '{id}' goes to the content root",
                    self.id
                );
                ContainerRef::Content
            }
            None => ContainerRef::Content,
        });

        let mut panel = PanelData::new(
            id.clone(),
            opts.layout,
            opts.background.unwrap_or(self.scheme.panel_background),
        );
        panel.title = opts.title;
        panel.visible = opts.visible;
        panel.border_color = self.scheme.border;
        panel.title_color = self.scheme.text;
        panel.container = Some(container.clone());

        match &container {
            ContainerRef::Content => {
                panel_handler::attach(&mut self.content, &Layout::border(), node, opts.region);
            }
            ContainerRef::Panel(parent) => {
                if let Some(parent_panel) = self.panels.get_mut(parent) {
                    parent_panel.attach(node, opts.region);
                }
            }
            ContainerRef::Tab { .. } => {}
        }
        self.panels.insert(id, panel);
        self.dirty = true;
        container
    }

    /*
     * Registers a widget under its parent panel. An unknown parent still
     * registers the widget so it can be updated, but leaves it detached.
     */
    pub(crate) fn register_widget(
        &mut self,
        widget: Widget,
        region: Region,
        table: Option<TableModel>,
    ) {
        let id = widget.id.clone();
        let node = NodeRef::Component(id.clone());
        if let Some(old) = self.widgets.remove(&id) {
            log::debug!(
                "WindowData: component '{id}' re-registered in '{}'; replacing",
                self.id
            );
            if let Some(parent) = old.parent {
                self.detach_from(&ContainerRef::Panel(parent), &node);
            }
            self.tables.remove(&id);
        }

        match widget.parent.as_deref().map(|p| (p, self.panels.get_mut(p))) {
            Some((_, Some(panel))) => {
                panel.attach(node, region);
            }
            Some((parent, None)) => log::debug!(
                "WindowData: parent panel '{parent}' not found in '{}'; '{id}' is registered but detached",
                self.id
            ),
            None => log::debug!("WindowData: '{id}' has no parent panel; registered detached"),
        }
        if let Some(model) = table {
            self.tables.insert(id.clone(), model);
        }
        self.widgets.insert(id, widget);
        self.dirty = true;
    }

    fn container_contains(&self, container: &ContainerRef, node: &NodeRef) -> bool {
        match container {
            ContainerRef::Content => self.content.iter().any(|slot| &slot.node == node),
            ContainerRef::Panel(parent) => self
                .panels
                .get(parent)
                .is_some_and(|p| p.children.iter().any(|slot| &slot.node == node)),
            ContainerRef::Tab { pane } => match self.widgets.get(pane).map(|w| &w.kind) {
                Some(WidgetKind::TabbedPane(tabs)) => tabs.index_of_panel(node.id()).is_some(),
                _ => false,
            },
        }
    }

    /// Whether `node` is reachable from the content root, ignoring visibility.
    pub(crate) fn is_attached(&self, node: &NodeRef) -> bool {
        let mut current = node.clone();
        for _ in 0..MAX_DEPTH {
            let container = match &current {
                NodeRef::Panel(id) => match self.panels.get(id).and_then(|p| p.container.clone()) {
                    Some(container) => container,
                    None => return false,
                },
                NodeRef::Component(id) => match self.widgets.get(id).and_then(|w| w.parent.clone()) {
                    Some(parent) => ContainerRef::Panel(parent),
                    None => return false,
                },
            };
            if !self.container_contains(&container, &current) {
                return false;
            }
            current = match container {
                ContainerRef::Content => return true,
                ContainerRef::Panel(parent) => NodeRef::Panel(parent),
                ContainerRef::Tab { pane } => NodeRef::Component(pane),
            };
        }
        false
    }

    pub(crate) fn build_scene(&self) -> Scene {
        Scene {
            window_id: self.id.clone(),
            title: self.title.clone(),
            bounds: self.bounds,
            background: self.scheme.background,
            header_background: self.scheme.header_background,
            content_background: self.scheme.panel_background,
            text: self.scheme.text,
            border: self.scheme.border,
            closable: self.chrome.closable,
            resizable: self.chrome.resizable,
            root: self.scene_slots(&self.content, 0),
        }
    }

    fn scene_slots(&self, slots: &[ChildSlot], depth: usize) -> Vec<SceneSlot> {
        slots
            .iter()
            .filter_map(|slot| {
                self.scene_node(&slot.node, depth).map(|node| SceneSlot {
                    region: slot.region,
                    node,
                })
            })
            .collect()
    }

    fn scene_node(&self, node: &NodeRef, depth: usize) -> Option<SceneNode> {
        if depth >= MAX_DEPTH {
            log::warn!("WindowData: '{}' nests deeper than {MAX_DEPTH}; truncating", self.id);
            return None;
        }
        match node {
            NodeRef::Panel(id) => self.panel_view(id, depth).map(SceneNode::Panel),
            NodeRef::Component(id) => self.component_view(id, depth).map(SceneNode::Component),
        }
    }

    fn panel_view(&self, id: &str, depth: usize) -> Option<PanelView> {
        let panel = self.panels.get(id).filter(|p| p.visible)?;
        let painted: Vec<ChildSlot> = panel.painted_children().into_iter().cloned().collect();
        Some(PanelView {
            id: panel.id.clone(),
            layout: panel.layout,
            title: panel.title.clone(),
            background: panel.background,
            border_color: panel.border_color,
            title_color: panel.title_color,
            children: self.scene_slots(&painted, depth + 1),
        })
    }

    fn component_view(&self, id: &str, depth: usize) -> Option<ComponentView> {
        let widget = self.widgets.get(id).filter(|w| w.common.visible)?;
        let detail = match &widget.kind {
            WidgetKind::Label(label) => ComponentDetail::Label {
                align: label.align,
                font: label.font.clone(),
            },
            WidgetKind::ComboBox(combo) => ComponentDetail::Items {
                items: combo.items.clone(),
            },
            WidgetKind::Slider(slider) => ComponentDetail::Range {
                min: slider.range.min,
                max: slider.range.max,
            },
            WidgetKind::ProgressBar(bar) => ComponentDetail::Range {
                min: bar.range.min,
                max: bar.range.max,
            },
            WidgetKind::TextField(field) => ComponentDetail::TextField {
                columns: field.columns,
            },
            WidgetKind::TextArea(area) => ComponentDetail::Lines {
                lines: area.visible_lines().into_iter().map(str::to_string).collect(),
                rows: area.rows,
                cols: area.cols,
            },
            WidgetKind::Separator(sep) => ComponentDetail::Separator {
                horizontal: sep.horizontal,
            },
            WidgetKind::Table(_) => {
                let model = self.tables.get(id);
                ComponentDetail::Table {
                    columns: model.map(|m| m.columns().to_vec()).unwrap_or_default(),
                    rows: model.map(|m| m.rows().to_vec()).unwrap_or_default(),
                }
            }
            WidgetKind::TabbedPane(tabs) => ComponentDetail::Tabs {
                titles: tabs.tabs.iter().map(|t| t.title.clone()).collect(),
                content: tabs
                    .selected_panel()
                    .and_then(|panel| self.scene_node(&NodeRef::Panel(panel.to_string()), depth + 1))
                    .map(Box::new),
            },
            WidgetKind::Button(_) | WidgetKind::CheckBox(_) => ComponentDetail::Plain,
        };
        Some(ComponentView {
            id: widget.id.clone(),
            kind: widget.component_kind(),
            text: widget.kind.text(),
            value: widget.kind.value(),
            selected: widget.kind.selected(),
            enabled: widget.common.enabled,
            foreground: widget.common.foreground,
            background: widget.common.background,
            detail,
        })
    }

    pub(crate) fn component_state(&self, id: &str) -> Option<ComponentState> {
        let widget = self.widgets.get(id)?;
        Some(ComponentState {
            id: widget.id.clone(),
            kind: widget.component_kind(),
            parent: widget.parent.clone(),
            attached: self.is_attached(&NodeRef::Component(widget.id.clone())),
            text: widget.kind.text(),
            value: widget.kind.value(),
            selected: widget.kind.selected(),
            enabled: widget.common.enabled,
            visible: widget.common.visible,
            foreground: widget.common.foreground,
            background: widget.common.background,
            highlighted: widget.highlight.is_some(),
            has_listener: widget.listener.is_some(),
            table: self.tables.get(id).cloned(),
        })
    }

    pub(crate) fn panel_state(&self, id: &str) -> Option<PanelState> {
        let panel = self.panels.get(id)?;
        let parent = match &panel.container {
            Some(ContainerRef::Panel(parent)) => Some(parent.clone()),
            Some(ContainerRef::Tab { pane }) => Some(pane.clone()),
            _ => None,
        };
        Some(PanelState {
            id: panel.id.clone(),
            layout: panel.layout,
            title: panel.title.clone(),
            visible: panel.visible,
            background: panel.background,
            parent,
            attached: self.is_attached(&NodeRef::Panel(panel.id.clone())),
            children: panel
                .children
                .iter()
                .map(|slot| slot.node.id().to_string())
                .collect(),
            shown_card: panel
                .painted_children()
                .first()
                .filter(|_| panel.layout.is_card())
                .map(|slot| slot.node.id().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::text_handler::LabelState;
    use crate::styling_primitives::Color;
    use pretty_assertions::assert_eq;

    fn window() -> WindowData {
        WindowData::new(WindowInit {
            id: "w".into(),
            title: "Test".into(),
            scheme: ColorScheme::dark(),
            bounds: Rect::new(50, 50, 300, 200),
            chrome: ChromeFlags {
                closable: true,
                resizable: false,
                draggable: true,
            },
            role: WindowRole::Overlay,
            on_close: None,
        })
    }

    fn label(id: &str, parent: &str) -> Widget {
        Widget::new(
            id.into(),
            Some(parent.into()),
            Color::WHITE,
            WidgetKind::Label(LabelState::new(id)),
        )
    }

    #[test]
    fn unknown_parent_panel_mounts_on_content_root() {
        // Arrange
        let mut data = window();
        // Act
        let mounted = data.register_panel(PanelOptions::new("p").parent("nope"), None);
        // Assert
        assert_eq!(mounted, ContainerRef::Content);
        assert!(data.is_attached(&NodeRef::Panel("p".into())));
    }

    #[test]
    fn component_with_unknown_parent_is_registered_but_absent_from_scene() {
        let mut data = window();
        data.register_panel(PanelOptions::new("main"), None);
        data.register_widget(label("ok", "main"), Region::Center, None);
        data.register_widget(label("orphan", "ghost"), Region::Center, None);

        let scene = data.build_scene();
        assert!(scene.contains("ok"));
        assert!(!scene.contains("orphan"));
        let orphan = data.component_state("orphan");
        assert_eq!(orphan.as_ref().map(|s| s.attached), Some(false));
    }

    #[test]
    fn panel_re_registration_detaches_the_old_node() {
        let mut data = window();
        data.register_panel(PanelOptions::new("a").layout(Layout::flow()), None);
        data.register_panel(PanelOptions::new("child").parent("a"), None);
        data.register_panel(PanelOptions::new("child").region(Region::South), None);

        assert_eq!(data.panel_state("a").map(|s| s.children), Some(vec![]));
        assert_eq!(
            data.panel_state("child").map(|s| (s.parent, s.attached)),
            Some((None, true))
        );
    }

    #[test]
    fn displaced_region_child_leaves_the_scene() {
        let mut data = window();
        data.register_panel(PanelOptions::new("first").region(Region::North), None);
        data.register_panel(PanelOptions::new("second").region(Region::North), None);
        let scene = data.build_scene();
        assert_eq!(scene.ids(), vec!["second"]);
        assert!(data.panels.contains_key("first"));
        assert!(!data.is_attached(&NodeRef::Panel("first".into())));
    }

    #[test]
    fn hidden_panels_drop_their_subtree_from_the_scene() {
        let mut data = window();
        data.register_panel(PanelOptions::new("main").visible(false), None);
        data.register_widget(label("inside", "main"), Region::Center, None);
        assert!(data.build_scene().root.is_empty());
        assert_eq!(data.component_state("inside").map(|s| s.attached), Some(true));
    }

    #[test]
    fn scene_uses_the_scheme_palette() {
        let data = window();
        let scene = data.build_scene();
        assert_eq!(scene.background, ColorScheme::dark().background);
        assert_eq!(scene.title, "Test");
    }
}
