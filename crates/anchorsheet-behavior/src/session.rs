#![forbid(unsafe_code)]

//! Per-touch-sequence bookkeeping.
//!
//! Pointer fields live from pointer-down to pointer-up/cancel. Nested-scroll
//! fields live from nested-scroll start to stop. The velocity tracker is
//! cleared on pointer-down only, because a nested-scroll stop arrives after
//! the pointer-up and still needs the release velocity.

use anchorsheet_core::event::{PointerEvent, PointerId};
use anchorsheet_core::velocity::VelocityTracker;

/// The sheet is following a pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragCapture {
    pub pointer: PointerId,
    /// Pointer y when the capture started.
    pub grab_y: f32,
    /// Sheet top when the capture started.
    pub grab_top: i32,
}

/// A pointer-down that may still turn out to be a tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TapCandidate {
    pub pointer: PointerId,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

/// Mutable record of the current gesture.
#[derive(Debug, Clone, Default)]
pub struct GestureSession {
    pub(crate) active_pointer: Option<PointerId>,
    pub(crate) initial_y: f32,
    pub(crate) touching_scroll_child: bool,
    pub(crate) ignore_events: bool,
    pub(crate) last_nested_dy: i32,
    pub(crate) nested_scroll_in_progress: bool,
    pub(crate) nested_scrolled: bool,
    pub(crate) velocity: VelocityTracker,
    pub(crate) drag: Option<DragCapture>,
    pub(crate) tap: Option<TapCandidate>,
}

impl GestureSession {
    /// Pointer the sheet tracks while the scroll child owns the touch.
    #[must_use]
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    #[must_use]
    pub fn initial_y(&self) -> f32 {
        self.initial_y
    }

    #[must_use]
    pub fn touching_scroll_child(&self) -> bool {
        self.touching_scroll_child
    }

    #[must_use]
    pub fn ignore_events(&self) -> bool {
        self.ignore_events
    }

    /// Last nested-scroll delta the sheet consumed (positive = upward).
    #[must_use]
    pub fn last_nested_dy(&self) -> i32 {
        self.last_nested_dy
    }

    #[must_use]
    pub fn nested_scroll_in_progress(&self) -> bool {
        self.nested_scroll_in_progress
    }

    /// Whether the sheet is following a pointer directly.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn velocity(&self) -> &VelocityTracker {
        &self.velocity
    }

    /// Start a new pointer sequence.
    pub(crate) fn begin_pointer(&mut self, event: &PointerEvent) {
        self.active_pointer = None;
        self.touching_scroll_child = false;
        self.drag = None;
        self.velocity.clear();
        self.initial_y = event.y;
    }

    /// End the pointer sequence. The velocity samples survive.
    pub(crate) fn end_pointer(&mut self) {
        self.active_pointer = None;
        self.touching_scroll_child = false;
        self.drag = None;
    }

    pub(crate) fn begin_nested(&mut self) {
        self.last_nested_dy = 0;
        self.nested_scrolled = false;
        self.nested_scroll_in_progress = true;
    }

    pub(crate) fn end_nested(&mut self) {
        self.last_nested_dy = 0;
        self.nested_scrolled = false;
        self.nested_scroll_in_progress = false;
    }

    /// Record a delta the sheet consumed.
    pub(crate) fn record_nested(&mut self, dy: i32) {
        self.last_nested_dy = dy;
        self.nested_scrolled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_pointer_keeps_velocity() {
        let mut session = GestureSession::default();
        session.begin_pointer(&PointerEvent::down(0.0, 500.0, 0));
        session.velocity.add(0, 500.0);
        session.velocity.add(10, 450.0);
        session.touching_scroll_child = true;
        session.end_pointer();
        assert!(!session.touching_scroll_child());
        assert!(!session.velocity().is_empty());
        assert!(session.velocity().velocity() < 0.0);
    }

    #[test]
    fn begin_pointer_clears_velocity_and_drag() {
        let mut session = GestureSession::default();
        session.velocity.add(0, 1.0);
        session.drag = Some(DragCapture {
            pointer: PointerId(0),
            grab_y: 1.0,
            grab_top: 900,
        });
        session.begin_pointer(&PointerEvent::down(0.0, 42.0, 100));
        assert!(session.velocity().is_empty());
        assert!(!session.is_dragging());
        assert_eq!(session.initial_y(), 42.0);
    }

    #[test]
    fn nested_lifecycle() {
        let mut session = GestureSession::default();
        session.begin_nested();
        assert!(session.nested_scroll_in_progress());
        session.record_nested(50);
        assert_eq!(session.last_nested_dy(), 50);
        assert!(session.nested_scrolled);
        session.end_nested();
        assert_eq!(session.last_nested_dy(), 0);
        assert!(!session.nested_scrolled);
        assert!(!session.nested_scroll_in_progress());
    }
}
