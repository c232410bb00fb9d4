/*
 * The rendered snapshot of one window, handed to the frame host on every
 * present. A scene contains only what is visible: hidden panels and
 * components, components that never attached to a parent, and non-selected
 * tab contents are left out.
 */
use crate::controls::ComponentKind;
use crate::styling_primitives::{Color, FontDescription};
use crate::types::{Alignment, Layout, Rect, Region};

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub window_id: String,
    pub title: String,
    pub bounds: Rect,
    pub background: Color,
    pub header_background: Color,
    pub content_background: Color,
    pub text: Color,
    pub border: Color,
    pub closable: bool,
    pub resizable: bool,
    /// Children of the content root, which uses a border layout.
    pub root: Vec<SceneSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneSlot {
    pub region: Option<Region>,
    pub node: SceneNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Panel(PanelView),
    Component(ComponentView),
}

impl SceneNode {
    pub fn id(&self) -> &str {
        match self {
            SceneNode::Panel(panel) => &panel.id,
            SceneNode::Component(component) => &component.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub id: String,
    pub layout: Layout,
    pub title: Option<String>,
    pub background: Color,
    pub border_color: Color,
    pub title_color: Color,
    pub children: Vec<SceneSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentView {
    pub id: String,
    pub kind: ComponentKind,
    pub text: Option<String>,
    pub value: Option<i32>,
    pub selected: Option<bool>,
    pub enabled: bool,
    pub foreground: Color,
    pub background: Option<Color>,
    pub detail: ComponentDetail,
}

/// Kind-specific data a host needs to paint a component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentDetail {
    Plain,
    Label {
        align: Alignment,
        font: FontDescription,
    },
    Items {
        items: Vec<String>,
    },
    Range {
        min: i32,
        max: i32,
    },
    TextField {
        columns: u16,
    },
    Lines {
        lines: Vec<String>,
        rows: u16,
        cols: u16,
    },
    Separator {
        horizontal: bool,
    },
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Tabs {
        titles: Vec<String>,
        content: Option<Box<SceneNode>>,
    },
}

impl Scene {
    /// Depth-first search for a visible node by id.
    pub fn find(&self, id: &str) -> Option<&SceneNode> {
        find_in(&self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn component(&self, id: &str) -> Option<&ComponentView> {
        match self.find(id)? {
            SceneNode::Component(component) => Some(component),
            SceneNode::Panel(_) => None,
        }
    }

    pub fn panel(&self, id: &str) -> Option<&PanelView> {
        match self.find(id)? {
            SceneNode::Panel(panel) => Some(panel),
            SceneNode::Component(_) => None,
        }
    }

    /// Ids of every visible node in paint order.
    pub fn ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        collect_ids(&self.root, &mut ids);
        ids
    }
}

fn find_in<'a>(slots: &'a [SceneSlot], id: &str) -> Option<&'a SceneNode> {
    slots.iter().find_map(|slot| find_node(&slot.node, id))
}

fn find_node<'a>(node: &'a SceneNode, id: &str) -> Option<&'a SceneNode> {
    if node.id() == id {
        return Some(node);
    }
    match node {
        SceneNode::Panel(panel) => find_in(&panel.children, id),
        SceneNode::Component(ComponentView {
            detail: ComponentDetail::Tabs {
                content: Some(content),
                ..
            },
            ..
        }) => find_node(content, id),
        SceneNode::Component(_) => None,
    }
}

fn collect_ids(slots: &[SceneSlot], out: &mut Vec<String>) {
    for slot in slots {
        collect_node_ids(&slot.node, out);
    }
}

fn collect_node_ids(node: &SceneNode, out: &mut Vec<String>) {
    out.push(node.id().to_string());
    match node {
        SceneNode::Panel(panel) => collect_ids(&panel.children, out),
        SceneNode::Component(ComponentView {
            detail: ComponentDetail::Tabs {
                content: Some(content),
                ..
            },
            ..
        }) => collect_node_ids(content, out),
        SceneNode::Component(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(id: &str) -> SceneNode {
        SceneNode::Component(ComponentView {
            id: id.into(),
            kind: ComponentKind::Label,
            text: Some(id.into()),
            value: None,
            selected: None,
            enabled: true,
            foreground: Color::WHITE,
            background: None,
            detail: ComponentDetail::Plain,
        })
    }

    fn panel(id: &str, children: Vec<SceneNode>) -> SceneNode {
        SceneNode::Panel(PanelView {
            id: id.into(),
            layout: Layout::flow(),
            title: None,
            background: Color::BLACK,
            border_color: Color::BLACK,
            title_color: Color::WHITE,
            children: children
                .into_iter()
                .map(|node| SceneSlot { region: None, node })
                .collect(),
        })
    }

    #[test]
    fn find_descends_into_panels_and_tab_content() {
        // Arrange
        let tabs = SceneNode::Component(ComponentView {
            id: "tabs".into(),
            kind: ComponentKind::TabbedPane,
            text: None,
            value: Some(0),
            selected: None,
            enabled: true,
            foreground: Color::WHITE,
            background: None,
            detail: ComponentDetail::Tabs {
                titles: vec!["One".into()],
                content: Some(Box::new(panel("tab-one", vec![label("inside")]))),
            },
        });
        let scene = Scene {
            window_id: "w".into(),
            title: "t".into(),
            bounds: Rect::new(0, 0, 300, 200),
            background: Color::BLACK,
            header_background: Color::BLACK,
            content_background: Color::BLACK,
            text: Color::WHITE,
            border: Color::BLACK,
            closable: true,
            resizable: false,
            root: vec![SceneSlot {
                region: Some(Region::Center),
                node: panel("main", vec![label("a"), tabs]),
            }],
        };

        // Act / Assert
        assert!(scene.component("inside").is_some());
        assert!(scene.panel("main").is_some());
        assert!(scene.panel("a").is_none());
        assert!(!scene.contains("missing"));
        assert_eq!(scene.ids(), vec!["main", "a", "tabs", "tab-one", "inside"]);
    }
}
