/*
 * Window chrome geometry and the pointer trackers behind header dragging and
 * corner resizing.
 *
 * Drag: the press records where inside the header the pointer went down; each
 * drag sample moves the frame by (pointer - anchor) in header-local
 * coordinates. Since the header moves with the frame, this keeps the grab
 * point under the pointer. No clamping to the desktop.
 *
 * Resize: samples are in screen coordinates; each sample grows the frame by
 * the delta since the previous sample and advances the anchor. Width and
 * height never drop below `MIN_FRAME_EXTENT`.
 */
use crate::types::{ChromeTarget, Point, Rect, Size};

pub const MIN_FRAME_EXTENT: i32 = 100;
pub const RESIZE_CORNER: i32 = 15;
pub const HEADER_HEIGHT: i32 = 26;
pub const FRAME_BORDER: i32 = 1;
pub const CONTENT_PADDING: i32 = 10;
const CLOSE_WIDTH: i32 = 22;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DragTracker {
    anchor: Option<Point>,
}

impl DragTracker {
    pub(crate) fn press(&mut self, local: Point) {
        self.anchor = Some(local);
    }

    /// New frame origin for a drag sample, or `None` without a press.
    pub(crate) fn drag(&self, local: Point, origin: Point) -> Option<Point> {
        let anchor = self.anchor?;
        Some(Point::new(
            origin.x + local.x - anchor.x,
            origin.y + local.y - anchor.y,
        ))
    }

    pub(crate) fn release(&mut self) {
        self.anchor = None;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResizeTracker {
    anchor: Option<Point>,
}

impl ResizeTracker {
    pub(crate) fn press(&mut self, screen: Point) {
        self.anchor = Some(screen);
    }

    /// New frame size for a drag sample; advances the anchor.
    pub(crate) fn drag(&mut self, screen: Point, size: Size) -> Option<Size> {
        let anchor = self.anchor.replace(screen)?;
        Some(Size::new(
            (size.width + screen.x - anchor.x).max(MIN_FRAME_EXTENT),
            (size.height + screen.y - anchor.y).max(MIN_FRAME_EXTENT),
        ))
    }

    pub(crate) fn release(&mut self) {
        self.anchor = None;
    }
}

/// Frame-relative rectangles of the chrome for a frame of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeLayout {
    pub header: Rect,
    pub title: Rect,
    pub close: Option<Rect>,
    pub resize: Option<Rect>,
    pub content: Rect,
}

impl ChromeLayout {
    pub fn for_frame(size: Size, closable: bool, resizable: bool) -> Self {
        let inner = Rect::new(0, 0, size.width, size.height).inset(FRAME_BORDER);
        let header = Rect::new(inner.x, inner.y, inner.width, HEADER_HEIGHT.min(inner.height));
        let close = closable.then(|| {
            Rect::new(
                header.right() - CLOSE_WIDTH,
                header.y,
                CLOSE_WIDTH.min(header.width),
                header.height,
            )
        });
        let title_right = close.map_or(header.right(), |c| c.x);
        let title = Rect::new(
            header.x + CONTENT_PADDING,
            header.y,
            (title_right - header.x - CONTENT_PADDING).max(0),
            header.height,
        );
        let body = Rect::new(
            inner.x,
            header.bottom(),
            inner.width,
            (inner.bottom() - header.bottom()).max(0),
        );
        let resize = resizable.then(|| {
            Rect::new(
                inner.right() - RESIZE_CORNER,
                inner.bottom() - RESIZE_CORNER,
                RESIZE_CORNER,
                RESIZE_CORNER,
            )
        });
        Self {
            header,
            title,
            close,
            resize,
            content: body.inset(CONTENT_PADDING),
        }
    }

    /*
     * Maps a frame-relative point to the chrome element under it. The close
     * box and the resize corner take precedence over the header they overlap.
     */
    pub fn hit(&self, point: Point) -> Option<ChromeTarget> {
        if self.close.is_some_and(|r| r.contains(point)) {
            Some(ChromeTarget::CloseButton)
        } else if self.resize.is_some_and(|r| r.contains(point)) {
            Some(ChromeTarget::ResizeCorner)
        } else if self.header.contains(point) {
            Some(ChromeTarget::Header)
        } else {
            None
        }
    }

    /// Converts a frame-relative point into the local space of `target`.
    pub fn to_local(&self, target: ChromeTarget, point: Point) -> Point {
        let origin = match target {
            ChromeTarget::Header => self.header.origin(),
            ChromeTarget::CloseButton => self.close.map_or(self.header.origin(), |r| r.origin()),
            ChromeTarget::ResizeCorner => self.resize.map_or(Point::default(), |r| r.origin()),
        };
        Point::new(point.x - origin.x, point.y - origin.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_keeps_grab_point_under_pointer() {
        // Arrange
        let mut drag = DragTracker::default();
        drag.press(Point::new(10, 5));
        // Act
        let moved = drag.drag(Point::new(40, 25), Point::new(50, 50));
        // Assert
        assert_eq!(moved, Some(Point::new(80, 70)));
    }

    #[test]
    fn drag_without_press_does_nothing() {
        let drag = DragTracker::default();
        assert_eq!(drag.drag(Point::new(1, 1), Point::new(0, 0)), None);
    }

    #[test]
    fn drag_allows_negative_origins() {
        let mut drag = DragTracker::default();
        drag.press(Point::new(100, 10));
        assert_eq!(
            drag.drag(Point::new(0, 0), Point::new(20, 5)),
            Some(Point::new(-80, -5))
        );
    }

    #[test]
    fn resize_floors_at_minimum_and_advances_anchor() {
        // Arrange
        let mut resize = ResizeTracker::default();
        resize.press(Point::new(500, 500));
        // Act
        let shrunk = resize.drag(Point::new(200, 450), Size::new(300, 200));
        let grown = resize.drag(Point::new(260, 470), Size::new(100, 150));
        // Assert
        assert_eq!(shrunk, Some(Size::new(100, 150)));
        assert_eq!(grown, Some(Size::new(160, 170)));
    }

    #[test]
    fn chrome_hit_testing_prefers_close_over_header() {
        let chrome = ChromeLayout::for_frame(Size::new(300, 200), true, true);
        assert_eq!(chrome.hit(Point::new(290, 10)), Some(ChromeTarget::CloseButton));
        assert_eq!(chrome.hit(Point::new(100, 10)), Some(ChromeTarget::Header));
        assert_eq!(chrome.hit(Point::new(292, 192)), Some(ChromeTarget::ResizeCorner));
        assert_eq!(chrome.hit(Point::new(100, 100)), None);
    }

    #[test]
    fn content_sits_below_header_inside_padding() {
        let chrome = ChromeLayout::for_frame(Size::new(300, 200), false, false);
        assert_eq!(chrome.close, None);
        assert_eq!(chrome.content, Rect::new(11, 37, 278, 152));
    }
}
