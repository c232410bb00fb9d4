/*
 * Box arrangement of a scene inside its frame. This is plain geometry for
 * painting and hit testing: every component gets an estimated preferred size
 * from its text and options, and each layout places its children the way the
 * classic border, flow, grid and card managers do. There is no constraint
 * solving; a grid-bag panel simply centers its children in one row.
 */
use crate::chrome::ChromeLayout;
use crate::controls::ComponentKind;
use crate::scene::{ComponentDetail, ComponentView, PanelView, Scene, SceneNode, SceneSlot};
use crate::types::{Alignment, Layout, Point, Rect, Region, Size};

pub const CHAR_WIDTH: i32 = 7;
pub const LINE_HEIGHT: i32 = 16;
pub const TAB_STRIP: i32 = 24;
const PANEL_PADDING: i32 = 5;
const TITLE_BAND: i32 = 16;
const TABLE_COLUMN: i32 = 80;
const TABLE_ROW: i32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacedKind {
    Panel,
    Component(ComponentKind),
}

/// A node positioned in frame-relative coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placed {
    pub id: String,
    pub rect: Rect,
    pub kind: PlacedKind,
    pub depth: usize,
}

/// Places every visible node of `scene`, in paint order (parents first).
pub fn arrange(scene: &Scene) -> Vec<Placed> {
    let chrome = ChromeLayout::for_frame(scene.bounds.size(), scene.closable, scene.resizable);
    let mut out = Vec::new();
    place_slots(&scene.root, &Layout::border(), chrome.content, 0, &mut out);
    out
}

/// Topmost component under `point`.
pub fn component_at(placed: &[Placed], point: Point) -> Option<&Placed> {
    placed
        .iter()
        .rev()
        .find(|p| matches!(p.kind, PlacedKind::Component(_)) && p.rect.contains(point))
}

fn text_width(text: Option<&str>) -> i32 {
    text.map_or(0, |t| t.chars().count() as i32 * CHAR_WIDTH)
}

pub fn preferred_size(node: &SceneNode) -> Size {
    match node {
        SceneNode::Panel(panel) => panel_size(panel),
        SceneNode::Component(component) => component_size(component),
    }
}

fn component_size(c: &ComponentView) -> Size {
    let text = text_width(c.text.as_deref());
    match (&c.kind, &c.detail) {
        (ComponentKind::Label, _) => Size::new(text + 4, 18),
        (ComponentKind::Button, _) => Size::new(text + 24, 24),
        (ComponentKind::CheckBox, _) => Size::new(text + 22, 20),
        (ComponentKind::ComboBox, ComponentDetail::Items { items }) => {
            let widest = items
                .iter()
                .map(|item| text_width(Some(item)))
                .max()
                .unwrap_or(0);
            Size::new(widest + 30, 22)
        }
        (ComponentKind::ComboBox, _) => Size::new(text + 30, 22),
        (ComponentKind::Slider, _) => Size::new(120, 22),
        (ComponentKind::TextField, ComponentDetail::TextField { columns }) => {
            Size::new(*columns as i32 * 8, 22)
        }
        (ComponentKind::TextField, _) => Size::new(80, 22),
        (ComponentKind::TextArea, ComponentDetail::Lines { rows, cols, .. }) => {
            Size::new(*cols as i32 * 8, *rows as i32 * LINE_HEIGHT)
        }
        (ComponentKind::TextArea, _) => Size::new(160, 80),
        (ComponentKind::Separator, _) => Size::new(2, 2),
        (ComponentKind::ProgressBar, _) => Size::new(120, 18),
        (ComponentKind::Table, ComponentDetail::Table { columns, rows }) => Size::new(
            (columns.len() as i32 * TABLE_COLUMN).max(TABLE_COLUMN),
            (rows.len() as i32 + 1) * TABLE_ROW,
        ),
        (ComponentKind::Table, _) => Size::new(TABLE_COLUMN, TABLE_ROW),
        (ComponentKind::TabbedPane, ComponentDetail::Tabs { titles, content }) => {
            let strip: i32 = titles.iter().map(|t| text_width(Some(t)) + 16).sum();
            let body = content
                .as_deref()
                .map_or(Size::default(), preferred_size);
            Size::new(strip.max(body.width), body.height + TAB_STRIP)
        }
        (ComponentKind::TabbedPane, _) => Size::new(100, TAB_STRIP),
    }
}

fn panel_insets(panel: &PanelView) -> (i32, i32) {
    let top = PANEL_PADDING + if panel.title.is_some() { TITLE_BAND } else { 0 };
    (top, PANEL_PADDING)
}

fn panel_size(panel: &PanelView) -> Size {
    let (top, side) = panel_insets(panel);
    let children: Vec<(Option<Region>, Size)> = panel
        .children
        .iter()
        .map(|slot| (slot.region, preferred_size(&slot.node)))
        .collect();
    let inner = layout_size(&panel.layout, &children);
    Size::new(inner.width + 2 * side, inner.height + top + side)
}

/// Rows and columns a grid uses for `count` children.
pub fn grid_dimensions(rows: u16, cols: u16, count: usize) -> (i32, i32) {
    let count = count.max(1) as i32;
    if rows > 0 {
        let rows = rows as i32;
        (rows, ((count + rows - 1) / rows).max(1))
    } else {
        let cols = cols.max(1) as i32;
        (((count + cols - 1) / cols).max(1), cols)
    }
}

fn region_size(children: &[(Option<Region>, Size)], region: Region) -> Option<Size> {
    children
        .iter()
        .find(|(r, _)| *r == Some(region))
        .map(|(_, size)| *size)
}

fn layout_size(layout: &Layout, children: &[(Option<Region>, Size)]) -> Size {
    let widest = children.iter().map(|(_, s)| s.width).max().unwrap_or(0);
    let tallest = children.iter().map(|(_, s)| s.height).max().unwrap_or(0);
    match *layout {
        Layout::Border { hgap, vgap } => {
            let get = |r| region_size(children, r);
            let middle: Vec<Size> = [Region::West, Region::Center, Region::East]
                .into_iter()
                .filter_map(get)
                .collect();
            let middle_width: i32 = middle.iter().map(|s| s.width).sum::<i32>()
                + hgap * (middle.len() as i32 - 1).max(0);
            let middle_height = middle.iter().map(|s| s.height).max().unwrap_or(0);
            let north = get(Region::North).unwrap_or_default();
            let south = get(Region::South).unwrap_or_default();
            let bands = [north.height, middle_height, south.height]
                .iter()
                .filter(|h| **h > 0)
                .count() as i32;
            Size::new(
                north.width.max(south.width).max(middle_width),
                north.height + middle_height + south.height + vgap * (bands - 1).max(0),
            )
        }
        Layout::Flow { hgap, vgap, .. } => {
            let total: i32 = children.iter().map(|(_, s)| s.width).sum();
            Size::new(
                total + hgap * (children.len() as i32 + 1),
                tallest + 2 * vgap,
            )
        }
        Layout::Grid {
            rows,
            cols,
            hgap,
            vgap,
        } => {
            if children.is_empty() {
                return Size::default();
            }
            let (r, c) = grid_dimensions(rows, cols, children.len());
            Size::new(
                c * widest + (c - 1) * hgap,
                r * tallest + (r - 1) * vgap,
            )
        }
        Layout::GridBag => Size::new(children.iter().map(|(_, s)| s.width).sum(), tallest),
        Layout::Card { hgap, vgap } => Size::new(widest + 2 * hgap, tallest + 2 * vgap),
    }
}

fn place_node(node: &SceneNode, rect: Rect, depth: usize, out: &mut Vec<Placed>) {
    match node {
        SceneNode::Panel(panel) => {
            out.push(Placed {
                id: panel.id.clone(),
                rect,
                kind: PlacedKind::Panel,
                depth,
            });
            let (top, side) = panel_insets(panel);
            let inner = Rect::new(
                rect.x + side,
                rect.y + top,
                (rect.width - 2 * side).max(0),
                (rect.height - top - side).max(0),
            );
            place_slots(&panel.children, &panel.layout, inner, depth + 1, out);
        }
        SceneNode::Component(component) => {
            out.push(Placed {
                id: component.id.clone(),
                rect,
                kind: PlacedKind::Component(component.kind),
                depth,
            });
            if let ComponentDetail::Tabs {
                content: Some(content),
                ..
            } = &component.detail
            {
                let body = Rect::new(
                    rect.x,
                    rect.y + TAB_STRIP,
                    rect.width,
                    (rect.height - TAB_STRIP).max(0),
                );
                place_node(content, body, depth + 1, out);
            }
        }
    }
}

fn place_slots(slots: &[SceneSlot], layout: &Layout, rect: Rect, depth: usize, out: &mut Vec<Placed>) {
    match *layout {
        Layout::Border { hgap, vgap } => place_border(slots, hgap, vgap, rect, depth, out),
        Layout::Flow { align, hgap, vgap } => place_flow(slots, align, hgap, vgap, rect, depth, out),
        Layout::Grid {
            rows,
            cols,
            hgap,
            vgap,
        } => {
            if slots.is_empty() {
                return;
            }
            let (r, c) = grid_dimensions(rows, cols, slots.len());
            let cell_w = ((rect.width - (c - 1) * hgap) / c).max(0);
            let cell_h = ((rect.height - (r - 1) * vgap) / r).max(0);
            for (index, slot) in slots.iter().enumerate() {
                let (row, col) = (index as i32 / c, index as i32 % c);
                let cell = Rect::new(
                    rect.x + col * (cell_w + hgap),
                    rect.y + row * (cell_h + vgap),
                    cell_w,
                    cell_h,
                );
                place_node(&slot.node, cell, depth, out);
            }
        }
        Layout::GridBag => {
            let sizes: Vec<Size> = slots.iter().map(|s| preferred_size(&s.node)).collect();
            let total: i32 = sizes.iter().map(|s| s.width).sum();
            let mut x = rect.x + (rect.width - total) / 2;
            for (slot, size) in slots.iter().zip(sizes) {
                let y = rect.y + (rect.height - size.height) / 2;
                place_node(&slot.node, Rect::new(x, y, size.width, size.height), depth, out);
                x += size.width;
            }
        }
        Layout::Card { hgap, vgap } => {
            let inner = Rect::new(
                rect.x + hgap,
                rect.y + vgap,
                (rect.width - 2 * hgap).max(0),
                (rect.height - 2 * vgap).max(0),
            );
            for slot in slots {
                place_node(&slot.node, inner, depth, out);
            }
        }
    }
}

fn place_border(
    slots: &[SceneSlot],
    hgap: i32,
    vgap: i32,
    rect: Rect,
    depth: usize,
    out: &mut Vec<Placed>,
) {
    let find = |region: Region| slots.iter().find(|s| s.region.unwrap_or_default() == region);
    let (mut top, mut bottom) = (rect.y, rect.bottom());
    let (mut left, mut right) = (rect.x, rect.right());

    if let Some(slot) = find(Region::North) {
        let h = preferred_size(&slot.node).height.min(bottom - top);
        place_node(&slot.node, Rect::new(left, top, rect.width, h), depth, out);
        top += h + vgap;
    }
    if let Some(slot) = find(Region::South) {
        let h = preferred_size(&slot.node).height.min((bottom - top).max(0));
        place_node(&slot.node, Rect::new(left, bottom - h, rect.width, h), depth, out);
        bottom -= h + vgap;
    }
    let band = (bottom - top).max(0);
    if let Some(slot) = find(Region::West) {
        let w = preferred_size(&slot.node).width.min(rect.width);
        place_node(&slot.node, Rect::new(left, top, w, band), depth, out);
        left += w + hgap;
    }
    if let Some(slot) = find(Region::East) {
        let w = preferred_size(&slot.node).width.min((right - left).max(0));
        place_node(&slot.node, Rect::new(right - w, top, w, band), depth, out);
        right -= w + hgap;
    }
    if let Some(slot) = find(Region::Center) {
        place_node(
            &slot.node,
            Rect::new(left, top, (right - left).max(0), band),
            depth,
            out,
        );
    }
}

fn place_flow(
    slots: &[SceneSlot],
    align: Alignment,
    hgap: i32,
    vgap: i32,
    rect: Rect,
    depth: usize,
    out: &mut Vec<Placed>,
) {
    let mut lines: Vec<Vec<(&SceneSlot, Size)>> = Vec::new();
    let mut current: Vec<(&SceneSlot, Size)> = Vec::new();
    let mut used = hgap;
    for slot in slots {
        let size = preferred_size(&slot.node);
        if !current.is_empty() && used + size.width + hgap > rect.width {
            lines.push(std::mem::take(&mut current));
            used = hgap;
        }
        used += size.width + hgap;
        current.push((slot, size));
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let mut y = rect.y + vgap;
    for line in lines {
        let line_width: i32 =
            line.iter().map(|(_, s)| s.width).sum::<i32>() + hgap * (line.len() as i32 - 1);
        let line_height = line.iter().map(|(_, s)| s.height).max().unwrap_or(0);
        let mut x = match align {
            Alignment::Left => rect.x + hgap,
            Alignment::Center => rect.x + (rect.width - line_width) / 2,
            Alignment::Right => rect.right() - hgap - line_width,
        };
        for (slot, size) in line {
            let cell = Rect::new(x, y + (line_height - size.height) / 2, size.width, size.height);
            place_node(&slot.node, cell, depth, out);
            x += size.width + hgap;
        }
        y += line_height + vgap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styling_primitives::Color;

    fn button(id: &str, text: &str) -> SceneNode {
        SceneNode::Component(ComponentView {
            id: id.into(),
            kind: ComponentKind::Button,
            text: Some(text.into()),
            value: None,
            selected: None,
            enabled: true,
            foreground: Color::WHITE,
            background: None,
            detail: ComponentDetail::Plain,
        })
    }

    fn panel(id: &str, layout: Layout, children: Vec<(Option<Region>, SceneNode)>) -> SceneNode {
        SceneNode::Panel(PanelView {
            id: id.into(),
            layout,
            title: None,
            background: Color::BLACK,
            border_color: Color::BLACK,
            title_color: Color::WHITE,
            children: children
                .into_iter()
                .map(|(region, node)| SceneSlot { region, node })
                .collect(),
        })
    }

    fn scene(root: Vec<SceneSlot>) -> Scene {
        Scene {
            window_id: "w".into(),
            title: "t".into(),
            bounds: Rect::new(50, 50, 300, 200),
            background: Color::BLACK,
            header_background: Color::BLACK,
            content_background: Color::BLACK,
            text: Color::WHITE,
            border: Color::BLACK,
            closable: true,
            resizable: false,
            root,
        }
    }

    #[test]
    fn grid_dimensions_prefer_rows_when_set() {
        assert_eq!(grid_dimensions(1, 1, 4), (1, 4));
        assert_eq!(grid_dimensions(10, 3, 30), (10, 3));
        assert_eq!(grid_dimensions(0, 3, 7), (3, 3));
        assert_eq!(grid_dimensions(0, 0, 0), (1, 1));
    }

    #[test]
    fn center_panel_fills_the_content_rect() {
        // Arrange
        let scene = scene(vec![SceneSlot {
            region: Some(Region::Center),
            node: panel("main", Layout::flow(), vec![]),
        }]);
        // Act
        let placed = arrange(&scene);
        // Assert
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].rect, Rect::new(11, 37, 278, 152));
    }

    #[test]
    fn border_north_takes_preferred_height_and_center_the_rest() {
        let scene = scene(vec![
            SceneSlot {
                region: Some(Region::North),
                node: button("top", "Go"),
            },
            SceneSlot {
                region: Some(Region::Center),
                node: button("body", "Body"),
            },
        ]);
        let placed = arrange(&scene);
        assert_eq!(placed[0].rect, Rect::new(11, 37, 278, 24));
        assert_eq!(placed[1].rect, Rect::new(11, 61, 278, 128));
    }

    #[test]
    fn grid_cells_are_equal_and_hit_testable() {
        let grid = panel(
            "g",
            Layout::Grid {
                rows: 1,
                cols: 2,
                hgap: 0,
                vgap: 0,
            },
            vec![(None, button("a", "A")), (None, button("b", "B"))],
        );
        let scene = scene(vec![SceneSlot {
            region: Some(Region::Center),
            node: grid,
        }]);
        let placed = arrange(&scene);
        let a = placed.iter().find(|p| p.id == "a").map(|p| p.rect);
        let b = placed.iter().find(|p| p.id == "b").map(|p| p.rect);
        assert_eq!(a, Some(Rect::new(16, 42, 134, 142)));
        assert_eq!(b, Some(Rect::new(150, 42, 134, 142)));
        assert_eq!(
            component_at(&placed, Point::new(200, 100)).map(|p| p.id.as_str()),
            Some("b")
        );
        assert_eq!(component_at(&placed, Point::new(12, 38)), None);
    }

    #[test]
    fn flow_wraps_when_the_row_is_full() {
        let slots: Vec<(Option<Region>, SceneNode)> = (0..5)
            .map(|i| (None, button(&format!("b{i}"), "Wide button")))
            .collect();
        let scene = scene(vec![SceneSlot {
            region: Some(Region::Center),
            node: panel("f", Layout::flow(), slots),
        }]);
        let placed = arrange(&scene);
        let rows: std::collections::BTreeSet<i32> = placed
            .iter()
            .filter(|p| p.id.starts_with('b'))
            .map(|p| p.rect.y)
            .collect();
        assert!(rows.len() > 1);
    }
}
