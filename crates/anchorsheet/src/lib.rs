#![forbid(unsafe_code)]

//! Anchor-point bottom sheet behavior.
//!
//! This crate is the stable surface for users. It re-exports the vocabulary
//! from `anchorsheet-core` and the state machine from `anchorsheet-behavior`,
//! and offers a prelude for day-to-day use.
//!
//! ```
//! use anchorsheet::prelude::*;
//!
//! let config = SheetConfig::default().with_geometry(
//!     GeometryConfig::default().with_peek_height(100).with_anchor_point(700),
//! );
//! let sheet = SheetBehavior::new(config).unwrap();
//! assert_eq!(sheet.state(), SheetState::Hidden);
//! assert!(sheet.offsets().is_none());
//! ```

// --- Core re-exports -------------------------------------------------------

pub use anchorsheet_core::animation::{
    Animation, SettleConfig, SettleDriver, SettleStep, Spring, SpringParams,
};
pub use anchorsheet_core::config::{
    ActivationPolicy, ConfigError, GestureConfig, ReleaseConfig, ScrollStopFallback, SheetConfig,
    SheetFlags,
};
pub use anchorsheet_core::error::{GeometryError, SheetError};
pub use anchorsheet_core::event::{Bounds, PointerEvent, PointerId, PointerKind, ViewId};
pub use anchorsheet_core::geometry::{
    AnchorSpec, GeometryConfig, LayoutInput, PeekHeight, SheetOffsets,
};
pub use anchorsheet_core::listener::Subscription;
pub use anchorsheet_core::state::{SheetState, StableState, StateOrder, StateOrderError};
pub use anchorsheet_core::velocity::VelocityTracker;

// --- Behavior re-exports ---------------------------------------------------

pub use anchorsheet_behavior::{
    ReleaseDecision, ReleaseReason, SavedState, ScrollChild, SheetBehavior, SheetHost,
};

/// Standard result type for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        GeometryConfig, LayoutInput, PointerEvent, Result, SavedState, ScrollChild, SheetBehavior,
        SheetConfig, SheetError, SheetFlags, SheetHost, SheetState, StableState, StateOrder,
        Subscription, ViewId,
    };

    pub use crate::{behavior, core};
}

pub use anchorsheet_behavior as behavior;
pub use anchorsheet_core as core;
