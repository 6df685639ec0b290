#![forbid(unsafe_code)]

//! Persisted sheet state: a single integer tag.

use serde::{Deserialize, Serialize};

use anchorsheet_core::state::{SheetState, StableState, StateOrder};

/// State saved across process recreation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub state: i32,
}

impl SavedState {
    #[must_use]
    pub const fn new(state: SheetState) -> Self {
        Self { state: state.tag() }
    }

    /// The stable state to restore into.
    ///
    /// Transient tags become `Collapsed`, unknown tags `Hidden`, and the
    /// result is mapped onto the order (a tablet order turns `Collapsed`
    /// into `AnchorPoint`).
    #[must_use]
    pub fn restored(&self, order: &StateOrder) -> StableState {
        let stable = SheetState::from_tag(self.state)
            .as_stable()
            .unwrap_or(StableState::Collapsed);
        order.normalize(stable)
    }
}
