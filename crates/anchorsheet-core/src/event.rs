#![forbid(unsafe_code)]

//! Input vocabulary fed in by the host view system.
//!
//! Every value here is a plain snapshot. View identities are opaque
//! [`ViewId`] handles; the core never owns or dereferences a view.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Identifier of a single pointer within a touch stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub u32);

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The host took the stream away. Handled exactly like `Up`.
    Cancel,
}

/// One pointer sample in container coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    /// Host timestamp in milliseconds. Only differences matter.
    pub time_ms: u64,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(pointer_id: PointerId, kind: PointerKind, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            pointer_id,
            kind,
            x,
            y,
            time_ms,
        }
    }

    /// Pointer-down for pointer 0.
    #[must_use]
    pub const fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerId(0), PointerKind::Down, x, y, time_ms)
    }

    /// Pointer-move for pointer 0.
    #[must_use]
    pub const fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerId(0), PointerKind::Move, x, y, time_ms)
    }

    /// Pointer-up for pointer 0.
    #[must_use]
    pub const fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerId(0), PointerKind::Up, x, y, time_ms)
    }

    /// Pointer-cancel for pointer 0.
    #[must_use]
    pub const fn cancel(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerId(0), PointerKind::Cancel, x, y, time_ms)
    }

    /// Whether this event ends the touch sequence.
    #[inline]
    #[must_use]
    pub const fn ends_sequence(&self) -> bool {
        matches!(self.kind, PointerKind::Up | PointerKind::Cancel)
    }
}

/// Non-owning handle to a host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub u64);

bitflags! {
    /// Scroll axes announced when a nested scroll starts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScrollAxes: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL   = 0b10;
    }
}

impl ScrollAxes {
    /// Only the vertical axis is set.
    #[inline]
    #[must_use]
    pub fn is_vertical_only(self) -> bool {
        self == Self::VERTICAL
    }
}

/// Integer rectangle in container coordinates.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    #[inline]
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left as f32 && x < self.right as f32 && y >= self.top as f32 && y < self.bottom as f32
    }

    /// The same rectangle moved vertically so its top edge sits at `top`.
    #[inline]
    #[must_use]
    pub const fn offset_to_top(&self, top: i32) -> Self {
        let dy = top - self.top;
        Self::new(self.left, top, self.right, self.bottom + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contains_is_half_open() {
        let b = Bounds::new(0, 100, 50, 200);
        assert!(b.contains(0.0, 100.0));
        assert!(b.contains(49.9, 199.9));
        assert!(!b.contains(50.0, 150.0));
        assert!(!b.contains(10.0, 200.0));
        assert!(!b.contains(-1.0, 150.0));
    }

    #[test]
    fn offset_to_top_keeps_size() {
        let b = Bounds::new(0, 900, 400, 1900).offset_to_top(700);
        assert_eq!(b, Bounds::new(0, 700, 400, 1700));
        assert_eq!(b.height(), 1000);
        assert_eq!(b.width(), 400);
    }

    #[test]
    fn vertical_only_axes() {
        assert!(ScrollAxes::VERTICAL.is_vertical_only());
        assert!(!ScrollAxes::HORIZONTAL.is_vertical_only());
        assert!(!(ScrollAxes::VERTICAL | ScrollAxes::HORIZONTAL).is_vertical_only());
        assert!(!ScrollAxes::empty().is_vertical_only());
    }

    #[test]
    fn cancel_and_up_end_the_sequence() {
        assert!(PointerEvent::up(0.0, 0.0, 0).ends_sequence());
        assert!(PointerEvent::cancel(0.0, 0.0, 0).ends_sequence());
        assert!(!PointerEvent::moved(0.0, 0.0, 0).ends_sequence());
        assert!(!PointerEvent::down(0.0, 0.0, 0).ends_sequence());
    }
}
