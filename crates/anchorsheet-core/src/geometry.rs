#![forbid(unsafe_code)]

//! Geometry resolver: maps stable states to vertical offsets.
//!
//! Offsets are measured from the container's top edge, so a *smaller* top
//! means a *taller* sheet. For a layout snapshot the resolver produces:
//!
//! ```text
//! min_offset    = max(0, container_height - child_height)      Expanded
//! anchor_offset = anchor point                                 AnchorPoint
//! max_offset    = max(container_height - peek, min_offset)     Collapsed
//! hidden_offset = container_height                             Hidden
//! ```
//!
//! # Invariants
//!
//! 1. A resolved [`SheetOffsets`] always satisfies
//!    `min_offset <= anchor_offset <= max_offset <= hidden_offset`.
//! 2. `top_for` is a pure function of the resolved offsets.
//! 3. `slide_progress` is in `[-1, 1]`: positive between Collapsed and
//!    Expanded, negative between Collapsed and Hidden.
//!
//! # Failure Modes
//!
//! - Negative dimensions or a non-positive peek height: [`GeometryError`].
//! - An explicit anchor outside `[min_offset, max_offset]`:
//!   [`GeometryError::AnchorOutOfRange`]. The automatic anchor is clamped
//!   instead, since it is a fixed constant unrelated to the container.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, SheetError};
use crate::state::{SheetState, StableState, StateOrder};

/// Anchor offset used when none is configured.
pub const ANCHOR_POINT_AUTO: i32 = 700;

/// Lower bound for the automatic peek height.
pub const DEFAULT_PEEK_HEIGHT_MIN: i32 = 64;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Dimensions captured during one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInput {
    pub container_width: i32,
    pub container_height: i32,
    pub child_height: i32,
}

impl LayoutInput {
    #[must_use]
    pub const fn new(container_width: i32, container_height: i32, child_height: i32) -> Self {
        Self {
            container_width,
            container_height,
            child_height,
        }
    }
}

/// Visible height of the collapsed sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeekHeight {
    /// `max(peek_height_min, container_height - container_width * 9 / 16)`.
    #[default]
    Auto,
    Pixels(i32),
}

/// Offset of the anchor point from the container top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorSpec {
    /// [`ANCHOR_POINT_AUTO`], clamped into the offset range.
    #[default]
    Auto,
    Pixels(i32),
}

/// Geometry section of the sheet configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub peek_height: PeekHeight,
    pub peek_height_min: i32,
    pub anchor_point: AnchorSpec,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            peek_height: PeekHeight::Auto,
            peek_height_min: DEFAULT_PEEK_HEIGHT_MIN,
            anchor_point: AnchorSpec::Auto,
        }
    }
}

impl GeometryConfig {
    /// Set a fixed peek height (builder pattern).
    #[must_use]
    pub fn with_peek_height(mut self, px: i32) -> Self {
        self.peek_height = PeekHeight::Pixels(px);
        self
    }

    /// Set a fixed anchor offset (builder pattern).
    #[must_use]
    pub fn with_anchor_point(mut self, px: i32) -> Self {
        self.anchor_point = AnchorSpec::Pixels(px);
        self
    }

    /// Peek height for a given layout.
    #[must_use]
    pub fn resolve_peek(&self, layout: &LayoutInput) -> i32 {
        match self.peek_height {
            PeekHeight::Pixels(px) => px,
            PeekHeight::Auto => self
                .peek_height_min
                .max(layout.container_height - layout.container_width * 9 / 16),
        }
    }
}

// ---------------------------------------------------------------------------
// SheetOffsets
// ---------------------------------------------------------------------------

/// Offsets resolved for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetOffsets {
    min_offset: i32,
    anchor_offset: i32,
    max_offset: i32,
    hidden_offset: i32,
    peek_height: i32,
    container_height: i32,
}

impl SheetOffsets {
    /// Resolve offsets from configuration and a layout snapshot.
    pub fn resolve(config: &GeometryConfig, layout: &LayoutInput) -> Result<Self, GeometryError> {
        for (field, value) in [
            ("container_width", layout.container_width),
            ("container_height", layout.container_height),
            ("child_height", layout.child_height),
        ] {
            if value < 0 {
                return Err(GeometryError::NegativeDimension { field, value });
            }
        }

        let peek_height = config.resolve_peek(layout);
        if peek_height <= 0 {
            return Err(GeometryError::NonPositivePeek { peek_height });
        }

        let container_height = layout.container_height;
        let min_offset = (container_height - layout.child_height).max(0);
        let max_offset = (container_height - peek_height).max(min_offset);

        let anchor_offset = match config.anchor_point {
            AnchorSpec::Pixels(anchor) => {
                if anchor < min_offset || anchor > max_offset {
                    return Err(GeometryError::AnchorOutOfRange {
                        anchor,
                        min: min_offset,
                        max: max_offset,
                    });
                }
                anchor
            }
            AnchorSpec::Auto => ANCHOR_POINT_AUTO.clamp(min_offset, max_offset),
        };

        Ok(Self {
            min_offset,
            anchor_offset,
            max_offset,
            hidden_offset: container_height,
            peek_height,
            container_height,
        })
    }

    /// Top when `Expanded`.
    #[inline]
    #[must_use]
    pub const fn min_offset(&self) -> i32 {
        self.min_offset
    }

    /// Top when at the anchor point.
    #[inline]
    #[must_use]
    pub const fn anchor_offset(&self) -> i32 {
        self.anchor_offset
    }

    /// Top when `Collapsed`.
    #[inline]
    #[must_use]
    pub const fn max_offset(&self) -> i32 {
        self.max_offset
    }

    /// Top when `Hidden`.
    #[inline]
    #[must_use]
    pub const fn hidden_offset(&self) -> i32 {
        self.hidden_offset
    }

    #[inline]
    #[must_use]
    pub const fn peek_height(&self) -> i32 {
        self.peek_height
    }

    #[inline]
    #[must_use]
    pub const fn container_height(&self) -> i32 {
        self.container_height
    }

    /// Tops strictly above this line count as "activated".
    #[inline]
    #[must_use]
    pub const fn activation_line(&self) -> i32 {
        self.container_height - self.peek_height
    }

    /// Rest offset for a stable state.
    #[must_use]
    pub const fn top_for(&self, state: StableState) -> i32 {
        match state {
            StableState::Hidden => self.hidden_offset,
            StableState::Collapsed => self.max_offset,
            StableState::AnchorPoint => self.anchor_offset,
            StableState::Expanded => self.min_offset,
        }
    }

    /// Rest offset for any state. Transient states are rejected.
    pub fn top_for_state(&self, state: SheetState) -> Result<i32, SheetError> {
        state
            .as_stable()
            .map(|s| self.top_for(s))
            .ok_or(SheetError::InvalidState(state))
    }

    /// Clamp a dragged top into the allowed range.
    #[inline]
    #[must_use]
    pub fn clamp_drag(&self, top: i32, hideable: bool) -> i32 {
        let lower_bound = if hideable {
            self.hidden_offset
        } else {
            self.max_offset
        };
        top.clamp(self.min_offset, lower_bound)
    }

    /// Slide progress for a top offset, in `[-1, 1]`.
    #[must_use]
    pub fn slide_progress(&self, top: i32) -> f32 {
        let span = if top > self.max_offset {
            self.hidden_offset - self.max_offset
        } else {
            self.max_offset - self.min_offset
        };
        if span == 0 {
            return 0.0;
        }
        ((self.max_offset - top) as f32 / span as f32).clamp(-1.0, 1.0)
    }

    /// Reachable state whose rest offset is nearest `top`.
    ///
    /// Ties go to the lower-ranked state.
    #[must_use]
    pub fn closest_state(&self, top: i32, order: &StateOrder) -> StableState {
        let mut best = order.lowest();
        let mut best_distance = (top - self.top_for(best)).abs();
        for &state in &order.states()[1..] {
            let distance = (top - self.top_for(state)).abs();
            if distance < best_distance {
                best = state;
                best_distance = distance;
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> SheetOffsets {
        SheetOffsets::resolve(
            &GeometryConfig::default()
                .with_peek_height(100)
                .with_anchor_point(700),
            &LayoutInput::new(400, 1000, 1000),
        )
        .unwrap()
    }

    #[test]
    fn resolves_reference_layout() {
        let o = phone();
        assert_eq!(o.min_offset(), 0);
        assert_eq!(o.anchor_offset(), 700);
        assert_eq!(o.max_offset(), 900);
        assert_eq!(o.hidden_offset(), 1000);
        assert_eq!(o.activation_line(), 900);
    }

    #[test]
    fn top_for_each_state() {
        let o = phone();
        assert_eq!(o.top_for(StableState::Hidden), 1000);
        assert_eq!(o.top_for(StableState::Collapsed), 900);
        assert_eq!(o.top_for(StableState::AnchorPoint), 700);
        assert_eq!(o.top_for(StableState::Expanded), 0);
    }

    #[test]
    fn transient_state_has_no_offset() {
        let o = phone();
        assert!(matches!(
            o.top_for_state(SheetState::Dragging),
            Err(SheetError::InvalidState(SheetState::Dragging))
        ));
        assert_eq!(o.top_for_state(SheetState::Collapsed).unwrap(), 900);
    }

    #[test]
    fn short_child_raises_min_offset() {
        let o = SheetOffsets::resolve(
            &GeometryConfig::default().with_peek_height(100),
            &LayoutInput::new(400, 1000, 600),
        )
        .unwrap();
        assert_eq!(o.min_offset(), 400);
        assert_eq!(o.anchor_offset(), 700);
    }

    #[test]
    fn child_shorter_than_peek_pins_collapsed_to_expanded() {
        let o = SheetOffsets::resolve(
            &GeometryConfig::default().with_peek_height(300),
            &LayoutInput::new(400, 1000, 200),
        )
        .unwrap();
        assert_eq!(o.min_offset(), 800);
        assert_eq!(o.max_offset(), 800);
        assert_eq!(o.anchor_offset(), 800, "auto anchor clamps");
    }

    #[test]
    fn auto_peek_uses_sixteen_by_nine() {
        let layout = LayoutInput::new(1600, 1000, 1000);
        let o = SheetOffsets::resolve(&GeometryConfig::default(), &layout).unwrap();
        // 1000 - 1600 * 9 / 16 = 100
        assert_eq!(o.peek_height(), 100);

        let wide = LayoutInput::new(2000, 1000, 1000);
        let o = SheetOffsets::resolve(&GeometryConfig::default(), &wide).unwrap();
        assert_eq!(o.peek_height(), DEFAULT_PEEK_HEIGHT_MIN);
    }

    #[test]
    fn explicit_anchor_out_of_range_fails() {
        let err = SheetOffsets::resolve(
            &GeometryConfig::default()
                .with_peek_height(100)
                .with_anchor_point(950),
            &LayoutInput::new(400, 1000, 1000),
        )
        .unwrap_err();
        assert_eq!(
            err,
            GeometryError::AnchorOutOfRange {
                anchor: 950,
                min: 0,
                max: 900
            }
        );
    }

    #[test]
    fn negative_dimension_and_bad_peek_fail() {
        let err = SheetOffsets::resolve(&GeometryConfig::default(), &LayoutInput::new(400, -1, 10))
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::NegativeDimension {
                field: "container_height",
                ..
            }
        ));

        let err = SheetOffsets::resolve(
            &GeometryConfig::default().with_peek_height(0),
            &LayoutInput::new(400, 1000, 1000),
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::NonPositivePeek { peek_height: 0 });
    }

    #[test]
    fn slide_progress_signs() {
        let o = phone();
        assert_eq!(o.slide_progress(900), 0.0);
        assert_eq!(o.slide_progress(0), 1.0);
        assert_eq!(o.slide_progress(450), 0.5);
        assert_eq!(o.slide_progress(1000), -1.0);
        assert_eq!(o.slide_progress(950), -0.5);
    }

    #[test]
    fn slide_progress_zero_span_is_zero() {
        let o = SheetOffsets::resolve(
            &GeometryConfig::default().with_peek_height(300),
            &LayoutInput::new(400, 1000, 200),
        )
        .unwrap();
        assert_eq!(o.slide_progress(800), 0.0);
    }

    #[test]
    fn clamp_drag_respects_hideable() {
        let o = phone();
        assert_eq!(o.clamp_drag(-50, false), 0);
        assert_eq!(o.clamp_drag(980, false), 900);
        assert_eq!(o.clamp_drag(980, true), 980);
        assert_eq!(o.clamp_drag(1200, true), 1000);
    }

    #[test]
    fn closest_state_prefers_lower_rank_on_tie() {
        let o = phone();
        let order = StateOrder::standard();
        assert_eq!(o.closest_state(820, &order), StableState::Collapsed);
        assert_eq!(o.closest_state(760, &order), StableState::AnchorPoint);
        // Equidistant from Collapsed (900) and Hidden (1000).
        assert_eq!(o.closest_state(950, &order), StableState::Hidden);
        assert_eq!(o.closest_state(10, &StateOrder::tablet()), StableState::Expanded);
    }
}
