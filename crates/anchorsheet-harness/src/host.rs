#![forbid(unsafe_code)]

//! A scripted [`SheetHost`] with a header strip and a scrollable list.
//!
//! ```text
//! top ──────────────┐
//! │ header           │  header_height (drag handle, not scrollable)
//! ├──────────────────┤
//! │ list             │  scroll child, content_extent px of scrollable content
//! │                  │
//! └──────────────────┘  top + child_height
//! ```

use anchorsheet_behavior::{ScrollChild, SheetHost};
use anchorsheet_core::event::{Bounds, ViewId};
use anchorsheet_core::geometry::LayoutInput;

/// The sheet view.
pub const SHEET_VIEW: ViewId = ViewId(1);
/// The scrollable list inside the sheet.
pub const LIST_VIEW: ViewId = ViewId(2);
/// The header strip above the list.
pub const HEADER_VIEW: ViewId = ViewId(3);
/// A view elsewhere in the container.
pub const FOREIGN_VIEW: ViewId = ViewId(99);

/// In-memory host whose sheet moves wherever the coordinator puts it.
#[derive(Debug, Clone)]
pub struct ScriptedHost {
    layout: LayoutInput,
    header_height: i32,
    has_list: bool,
    attached: bool,
    layout_pending: bool,
    top: i32,
    content_offset: i32,
    content_extent: i32,
    moves: Vec<i32>,
}

impl ScriptedHost {
    /// A sheet as tall as the container with a 100 px header.
    #[must_use]
    pub fn new(container_width: i32, container_height: i32) -> Self {
        Self {
            layout: LayoutInput::new(container_width, container_height, container_height),
            header_height: 100,
            has_list: true,
            attached: true,
            layout_pending: false,
            top: container_height,
            content_offset: 0,
            content_extent: 2000,
            moves: Vec::new(),
        }
    }

    /// The 400 x 1000 phone used across the test suite.
    #[must_use]
    pub fn phone() -> Self {
        Self::new(400, 1000)
    }

    #[must_use]
    pub fn with_child_height(mut self, child_height: i32) -> Self {
        self.layout.child_height = child_height;
        self
    }

    #[must_use]
    pub fn with_header_height(mut self, header_height: i32) -> Self {
        self.header_height = header_height;
        self
    }

    /// Drop the scrollable list; the sheet is then a plain panel.
    #[must_use]
    pub fn without_list(mut self) -> Self {
        self.has_list = false;
        self
    }

    #[must_use]
    pub fn with_content_extent(mut self, extent: i32) -> Self {
        self.content_extent = extent.max(0);
        self
    }

    /// Layout snapshot for the next layout pass.
    #[must_use]
    pub fn layout(&self) -> LayoutInput {
        self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutInput) {
        self.layout = layout;
    }

    #[must_use]
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Every top the coordinator has requested, in order.
    #[must_use]
    pub fn moves(&self) -> &[i32] {
        &self.moves
    }

    pub fn clear_moves(&mut self) {
        self.moves.clear();
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn set_layout_pending(&mut self, pending: bool) {
        self.layout_pending = pending;
    }

    /// How far the list content is scrolled away from its first line.
    #[must_use]
    pub fn content_offset(&self) -> i32 {
        self.content_offset
    }

    pub fn set_content_offset(&mut self, offset: i32) {
        self.content_offset = offset.clamp(0, self.content_extent);
    }

    /// Scroll the list content by `dy` (positive = content moves up) and
    /// return how much it actually scrolled.
    pub fn scroll_content(&mut self, dy: i32) -> i32 {
        let next = (self.content_offset + dy).clamp(0, self.content_extent);
        let scrolled = next - self.content_offset;
        self.content_offset = next;
        scrolled
    }

    /// A point on the header strip, `dy` below the sheet top.
    #[must_use]
    pub fn header_point(&self, dy: i32) -> (f32, f32) {
        let x = self.layout.container_width as f32 / 2.0;
        (x, (self.top + dy.clamp(0, self.header_height - 1)) as f32)
    }

    /// A point on the list, `dy` below the list top.
    #[must_use]
    pub fn list_point(&self, dy: i32) -> (f32, f32) {
        let x = self.layout.container_width as f32 / 2.0;
        (x, (self.top + self.header_height + dy.max(0)) as f32)
    }
}

impl SheetHost for ScriptedHost {
    fn sheet_shown(&self) -> bool {
        self.attached
    }

    fn sheet_bounds(&self) -> Option<Bounds> {
        self.attached.then(|| {
            Bounds::new(
                0,
                self.top,
                self.layout.container_width,
                self.top + self.layout.child_height,
            )
        })
    }

    fn scroll_child(&self) -> Option<ScrollChild> {
        if !self.attached || !self.has_list {
            return None;
        }
        Some(ScrollChild {
            id: LIST_VIEW,
            bounds: Bounds::new(
                0,
                self.top + self.header_height,
                self.layout.container_width,
                self.top + self.layout.child_height,
            ),
        })
    }

    fn content_can_scroll_up(&self, view: ViewId) -> bool {
        view == LIST_VIEW && self.content_offset > 0
    }

    fn is_layout_pending(&self) -> bool {
        self.layout_pending
    }

    fn view_belongs_to_sheet(&self, view: ViewId) -> bool {
        matches!(view, SHEET_VIEW | LIST_VIEW | HEADER_VIEW)
    }

    fn move_sheet_to(&mut self, top: i32) {
        self.top = top;
        self.moves.push(top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_sits_below_header() {
        let mut host = ScriptedHost::phone();
        host.move_sheet_to(700);
        let list = host.scroll_child().unwrap();
        assert_eq!(list.bounds.top, 800);
        assert!(host.sheet_bounds().unwrap().contains(200.0, 750.0));
        assert!(!list.bounds.contains(200.0, 750.0));
    }

    #[test]
    fn content_scroll_clamps() {
        let mut host = ScriptedHost::phone().with_content_extent(100);
        assert_eq!(host.scroll_content(-30), 0);
        assert_eq!(host.scroll_content(60), 60);
        assert!(host.content_can_scroll_up(LIST_VIEW));
        assert_eq!(host.scroll_content(60), 40);
        assert_eq!(host.scroll_content(-500), -100);
        assert!(!host.content_can_scroll_up(LIST_VIEW));
    }

    #[test]
    fn detached_host_reports_no_views() {
        let mut host = ScriptedHost::phone();
        host.detach();
        assert!(!host.sheet_shown());
        assert!(host.sheet_bounds().is_none());
        assert!(host.scroll_child().is_none());
    }
}
