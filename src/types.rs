/*
 * Platform-agnostic value types shared by the builders, the UI thread and the
 * frame hosts: geometry, layout descriptors, the generic property set used by
 * `update_component`, and the input events hosts deliver back into windows.
 */
use crate::styling_primitives::Color;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrinks the rectangle by `amount` on every side, never below zero size.
    pub fn inset(&self, amount: i32) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - 2 * amount).max(0),
            height: (self.height - 2 * amount).max(0),
        }
    }
}

/// Slot of a border-layout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    South,
    East,
    West,
    #[default]
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/*
 * Layout strategy of a panel. The defaults of each variant match the gaps and
 * dimensions the overlay has always used: border 0/0, flow centered with 5px
 * gaps, grid 1x1 with 2px gaps, card 0/0.
 *
 * Grid semantics: when `rows` is non-zero it wins and the column count is
 * derived from the number of children; `rows == 0` means "as many rows as
 * needed" with a fixed column count.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Layout {
    Border {
        #[serde(default)]
        hgap: i32,
        #[serde(default)]
        vgap: i32,
    },
    Flow {
        #[serde(default = "centered")]
        align: Alignment,
        #[serde(default = "flow_gap")]
        hgap: i32,
        #[serde(default = "flow_gap")]
        vgap: i32,
    },
    Grid {
        #[serde(default = "one")]
        rows: u16,
        #[serde(default = "one")]
        cols: u16,
        #[serde(default = "grid_gap")]
        hgap: i32,
        #[serde(default = "grid_gap")]
        vgap: i32,
    },
    #[serde(rename = "gridbag")]
    GridBag,
    Card {
        #[serde(default)]
        hgap: i32,
        #[serde(default)]
        vgap: i32,
    },
}

fn centered() -> Alignment {
    Alignment::Center
}
fn flow_gap() -> i32 {
    5
}
fn grid_gap() -> i32 {
    2
}
fn one() -> u16 {
    1
}

impl Layout {
    pub fn border() -> Self {
        Layout::Border { hgap: 0, vgap: 0 }
    }

    pub fn flow() -> Self {
        Layout::Flow {
            align: Alignment::Center,
            hgap: flow_gap(),
            vgap: flow_gap(),
        }
    }

    pub fn grid(rows: u16, cols: u16) -> Self {
        Layout::Grid {
            rows,
            cols,
            hgap: grid_gap(),
            vgap: grid_gap(),
        }
    }

    /// Grid with a fixed column count and as many rows as the children need.
    pub fn columns(cols: u16) -> Self {
        Layout::grid(0, cols.max(1))
    }

    pub fn card() -> Self {
        Layout::Card { hgap: 0, vgap: 0 }
    }

    pub fn is_border(&self) -> bool {
        matches!(self, Layout::Border { .. })
    }

    pub fn is_card(&self) -> bool {
        matches!(self, Layout::Card { .. })
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::grid(1, 1)
    }
}

/// A component property addressable through `update_component`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Text,
    Value,
    Selected,
    Enabled,
    Visible,
    Foreground,
    Background,
}

/*
 * Partial property set for the generic component update. Only the fields that
 * are `Some` are applied, and each only if the target component kind supports
 * it.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    pub text: Option<String>,
    pub value: Option<i32>,
    pub selected: Option<bool>,
    pub enabled: Option<bool>,
    pub visible: Option<bool>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// The properties that carry a value, in application order.
    pub fn present(&self) -> Vec<Property> {
        let mut present = Vec::new();
        if self.text.is_some() {
            present.push(Property::Text);
        }
        if self.value.is_some() {
            present.push(Property::Value);
        }
        if self.selected.is_some() {
            present.push(Property::Selected);
        }
        if self.enabled.is_some() {
            present.push(Property::Enabled);
        }
        if self.visible.is_some() {
            present.push(Property::Visible);
        }
        if self.foreground.is_some() {
            present.push(Property::Foreground);
        }
        if self.background.is_some() {
            present.push(Property::Background);
        }
        present
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}

/// Window chrome that reacts to pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeTarget {
    Header,
    CloseButton,
    ResizeCorner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Press,
    Drag,
    Release,
}

/*
 * A pointer sample as the host reports it: `local` is relative to the chrome
 * element that received it, `screen` is in desktop coordinates.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub local: Point,
    pub screen: Point,
}

impl PointerEvent {
    pub fn press(local: Point, screen: Point) -> Self {
        Self {
            phase: PointerPhase::Press,
            local,
            screen,
        }
    }

    pub fn drag(local: Point, screen: Point) -> Self {
        Self {
            phase: PointerPhase::Drag,
            local,
            screen,
        }
    }

    pub fn release(local: Point, screen: Point) -> Self {
        Self {
            phase: PointerPhase::Release,
            local,
            screen,
        }
    }
}

/// User input addressed to a component, delivered by a host or an embedder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentInput {
    Click,
    Toggle,
    SelectIndex(usize),
    Slide(i32),
    Commit(String),
    SelectTab(usize),
    EditCell {
        row: usize,
        column: usize,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn properties_report_present_keys_in_order() {
        let props = Properties::new()
            .background(Color::BLACK)
            .text("hi")
            .selected(true);
        assert_eq!(
            props.present(),
            vec![Property::Text, Property::Selected, Property::Background]
        );
        assert!(Properties::new().is_empty());
    }

    #[test]
    fn columns_shorthand_builds_an_open_ended_grid() {
        assert_eq!(
            Layout::columns(3),
            Layout::Grid {
                rows: 0,
                cols: 3,
                hgap: 2,
                vgap: 2
            }
        );
        assert_eq!(Layout::default(), Layout::grid(1, 1));
    }

    #[test]
    fn layouts_deserialize_with_per_kind_defaults() {
        #[derive(Deserialize)]
        struct Doc {
            a: Layout,
            b: Layout,
            c: Layout,
        }
        let doc: Doc = toml::from_str(
            "a = { kind = \"flow\" }\nb = { kind = \"grid\", cols = 4 }\nc = { kind = \"gridbag\" }",
        )
        .expect("layouts should parse");
        assert_eq!(doc.a, Layout::flow());
        assert_eq!(
            doc.b,
            Layout::Grid {
                rows: 1,
                cols: 4,
                hgap: 2,
                vgap: 2
            }
        );
        assert_eq!(doc.c, Layout::GridBag);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(14, 14)));
        assert!(!rect.contains(Point::new(15, 14)));
        assert_eq!(rect.inset(3), Rect::new(13, 13, 0, 0));
    }
}
