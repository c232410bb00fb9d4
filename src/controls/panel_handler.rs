/*
 * Panel containers and the placement rules that bind children into them.
 *
 * A container holds an ordered list of child slots. Under a border layout a
 * slot carries a region, and a region holds at most one child: attaching into
 * an occupied region displaces the earlier child, which stays registered but
 * drops out of the visible hierarchy. Every other layout appends in order and
 * ignores regions. Card layouts show one child at a time (the first by
 * default).
 */
use crate::styling_primitives::Color;
use crate::types::{Layout, Region};

/// A registered node that can sit in a container slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum NodeRef {
    Panel(String),
    Component(String),
}

impl NodeRef {
    pub(crate) fn id(&self) -> &str {
        match self {
            NodeRef::Panel(id) | NodeRef::Component(id) => id,
        }
    }
}

/// Where a panel is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContainerRef {
    /// The window's content root (a border layout).
    Content,
    Panel(String),
    /// Content panel of a tab in a tabbed pane.
    Tab { pane: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChildSlot {
    pub node: NodeRef,
    pub region: Option<Region>,
}

/*
 * Binds `node` into `children` according to `layout`. Returns the node that
 * was displaced from its border region, if any.
 */
pub(crate) fn attach(
    children: &mut Vec<ChildSlot>,
    layout: &Layout,
    node: NodeRef,
    region: Region,
) -> Option<NodeRef> {
    detach(children, &node);
    if !layout.is_border() {
        children.push(ChildSlot { node, region: None });
        return None;
    }
    let displaced = children
        .iter()
        .position(|slot| slot.region == Some(region))
        .map(|index| children.remove(index).node);
    if let Some(old) = displaced.as_ref() {
        log::debug!(
            "PanelHandler: '{}' replaces '{}' in region {region:?}",
            node.id(),
            old.id()
        );
    }
    children.push(ChildSlot {
        node,
        region: Some(region),
    });
    displaced
}

/// Removes `node` from `children`. Returns whether it was present.
pub(crate) fn detach(children: &mut Vec<ChildSlot>, node: &NodeRef) -> bool {
    let before = children.len();
    children.retain(|slot| &slot.node != node);
    children.len() != before
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PanelData {
    pub id: String,
    pub layout: Layout,
    pub title: Option<String>,
    pub visible: bool,
    pub background: Color,
    pub border_color: Color,
    pub title_color: Color,
    pub container: Option<ContainerRef>,
    pub children: Vec<ChildSlot>,
    /// Card layouts: id of the child on top; `None` means the first child.
    pub shown_card: Option<String>,
}

impl PanelData {
    pub(crate) fn new(id: String, layout: Layout, background: Color) -> Self {
        Self {
            id,
            layout,
            title: None,
            visible: true,
            background,
            border_color: background,
            title_color: Color::WHITE,
            container: None,
            children: Vec::new(),
            shown_card: None,
        }
    }

    pub(crate) fn attach(&mut self, node: NodeRef, region: Region) -> Option<NodeRef> {
        attach(&mut self.children, &self.layout, node, region)
    }

    /* Untitled panels keep no title; updating one is ignored. */
    pub(crate) fn set_title(&mut self, title: &str) -> bool {
        match self.title.as_mut() {
            Some(current) => {
                *current = title.to_string();
                true
            }
            None => {
                log::debug!("PanelHandler: '{}' has no titled border; title ignored", self.id);
                false
            }
        }
    }

    pub(crate) fn show_card(&mut self, child_id: &str) -> bool {
        if !self.layout.is_card() {
            log::debug!("PanelHandler: '{}' is not a card layout", self.id);
            return false;
        }
        if !self.children.iter().any(|slot| slot.node.id() == child_id) {
            log::debug!("PanelHandler: '{}' has no card '{child_id}'", self.id);
            return false;
        }
        self.shown_card = Some(child_id.to_string());
        true
    }

    /// The slots that take part in painting, honoring card selection.
    pub(crate) fn painted_children(&self) -> Vec<&ChildSlot> {
        if !self.layout.is_card() {
            return self.children.iter().collect();
        }
        let shown = self
            .shown_card
            .as_deref()
            .and_then(|id| self.children.iter().find(|slot| slot.node.id() == id))
            .or_else(|| self.children.first());
        shown.into_iter().collect()
    }
}
