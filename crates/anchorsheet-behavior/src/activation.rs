#![forbid(unsafe_code)]

//! Edge-triggered "is the sheet meaningfully open" flag.

use anchorsheet_core::config::ActivationPolicy;
use anchorsheet_core::geometry::SheetOffsets;
use anchorsheet_core::state::SheetState;

/// Tracks the activation flag and reports only its changes.
///
/// The flag starts `false`: a sheet begins hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationTracker {
    policy: ActivationPolicy,
    activated: bool,
}

impl ActivationTracker {
    #[must_use]
    pub const fn new(policy: ActivationPolicy) -> Self {
        Self {
            policy,
            activated: false,
        }
    }

    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Evaluate the policy for a position and state.
    #[must_use]
    pub fn evaluate(&self, offsets: &SheetOffsets, top: i32, state: SheetState) -> bool {
        let raised = top < offsets.activation_line();
        match self.policy {
            ActivationPolicy::TopOnly => raised,
            ActivationPolicy::TopOrNotCollapsed => raised || state != SheetState::Collapsed,
        }
    }

    /// Take a new reading. Returns the new value only when it changed.
    pub fn update(&mut self, offsets: &SheetOffsets, top: i32, state: SheetState) -> Option<bool> {
        let next = self.evaluate(offsets, top, state);
        if next == self.activated {
            return None;
        }
        self.activated = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchorsheet_core::geometry::{GeometryConfig, LayoutInput};

    fn offsets() -> SheetOffsets {
        SheetOffsets::resolve(
            &GeometryConfig::default().with_peek_height(100),
            &LayoutInput::new(400, 1000, 1000),
        )
        .unwrap()
    }

    #[test]
    fn fires_once_when_crossing_the_peek_line() {
        let o = offsets();
        let mut tracker = ActivationTracker::new(ActivationPolicy::TopOnly);
        let fired: Vec<bool> = (850..=950)
            .rev()
            .filter_map(|top| tracker.update(&o, top, SheetState::Dragging))
            .collect();
        assert_eq!(fired, [true]);
        assert!(tracker.is_activated());
    }

    #[test]
    fn line_itself_is_not_activated() {
        let o = offsets();
        let tracker = ActivationTracker::new(ActivationPolicy::TopOnly);
        assert!(!tracker.evaluate(&o, 900, SheetState::Collapsed));
        assert!(tracker.evaluate(&o, 899, SheetState::Collapsed));
    }

    #[test]
    fn falling_edge_reported() {
        let o = offsets();
        let mut tracker = ActivationTracker::new(ActivationPolicy::TopOnly);
        assert_eq!(tracker.update(&o, 700, SheetState::AnchorPoint), Some(true));
        assert_eq!(tracker.update(&o, 650, SheetState::Dragging), None);
        assert_eq!(tracker.update(&o, 900, SheetState::Collapsed), Some(false));
    }

    #[test]
    fn state_aware_policy() {
        let o = offsets();
        let mut tracker = ActivationTracker::new(ActivationPolicy::TopOrNotCollapsed);
        assert_eq!(tracker.update(&o, 900, SheetState::Settling), Some(true));
        assert_eq!(tracker.update(&o, 900, SheetState::Collapsed), Some(false));
    }
}
