#![forbid(unsafe_code)]

//! The host view system as seen by the coordinator.
//!
//! The coordinator never owns views. Everything it needs to know about the
//! sheet and its scrolling content it asks through [`SheetHost`], and the only
//! thing it ever tells the host is where to put the sheet.
//!
//! # Failure Modes
//!
//! Views can be torn down at any time. A `None` from [`SheetHost::sheet_bounds`]
//! or [`SheetHost::scroll_child`] means the view is gone, and the operation
//! that asked becomes a no-op.

use anchorsheet_core::event::{Bounds, ViewId};

/// The scrollable view inside the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollChild {
    pub id: ViewId,
    /// Current bounds in container coordinates.
    pub bounds: Bounds,
}

/// Collaborator interface implemented by the host.
pub trait SheetHost {
    /// Whether the sheet view is attached and visible.
    fn sheet_shown(&self) -> bool;

    /// Current sheet bounds, or `None` if the sheet is detached.
    fn sheet_bounds(&self) -> Option<Bounds>;

    /// The sheet's scrolling content, or `None` if there is none.
    fn scroll_child(&self) -> Option<ScrollChild>;

    /// Whether `view` can still scroll its content toward the content top.
    ///
    /// `false` means the content is already showing its first line, so a
    /// downward finger motion should move the sheet instead.
    fn content_can_scroll_up(&self, view: ViewId) -> bool;

    /// Whether a layout pass is scheduled but has not run yet.
    fn is_layout_pending(&self) -> bool {
        false
    }

    /// Whether `view` is the sheet or one of its descendants.
    fn view_belongs_to_sheet(&self, view: ViewId) -> bool;

    /// Place the sheet's top edge at `top`.
    fn move_sheet_to(&mut self, top: i32);
}
