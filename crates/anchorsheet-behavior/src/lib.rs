#![forbid(unsafe_code)]

//! Behavior: the drag/settle coordinator for anchor-point bottom sheets.
//!
//! # Role in anchorsheet
//! `anchorsheet-behavior` turns raw input into sheet motion. It sits between
//! the host view system (reached through [`SheetHost`]) and the pure types
//! of `anchorsheet-core`.
//!
//! # Primary responsibilities
//! - **Coordinator**: [`SheetBehavior`] runs the state machine over pointer
//!   events, nested-scroll callbacks, programmatic requests, and frames.
//! - **Release resolution**: [`release`] picks a target state when a drag
//!   ends or a nested scroll stops.
//! - **Activation**: [`ActivationTracker`] reports when the sheet rises past
//!   its peek line.
//! - **Persistence**: [`SavedState`] is the single integer that survives
//!   process recreation.
//!
//! # How it fits in the system
//! A host implements [`SheetHost`], forwards layout passes, input, and frame
//! ticks to a [`SheetBehavior`], and subscribes to state, slide, and
//! activation changes. `anchorsheet-harness` provides a scripted host for
//! tests and benchmarks.

pub mod activation;
pub mod coordinator;
pub mod host;
pub mod release;
pub mod saved_state;
pub mod session;

pub use activation::ActivationTracker;
pub use coordinator::SheetBehavior;
pub use host::{ScrollChild, SheetHost};
pub use release::{ReleaseDecision, ReleaseReason, ScrollStop};
pub use saved_state::SavedState;
pub use session::GestureSession;
