#![forbid(unsafe_code)]

//! Core: sheet states, geometry, input vocabulary, and settle motion.
//!
//! # Role in anchorsheet
//! `anchorsheet-core` is the leaf layer. It owns the stable/transient state
//! vocabulary and the ordering policy between stable states, the geometry
//! resolver that maps states to vertical offsets, the pointer and nested-scroll
//! event types the host feeds in, and the motion primitives (velocity tracking,
//! spring-driven settling) the coordinator uses.
//!
//! # Primary responsibilities
//! - **State**: [`state::StableState`], [`state::SheetState`], [`state::StateOrder`].
//! - **Geometry**: [`geometry::SheetOffsets`] resolved from a layout snapshot.
//! - **Events**: pointer events, view handles, scroll axes, bounds.
//! - **Motion**: [`velocity::VelocityTracker`], [`animation::SettleDriver`].
//! - **Listeners**: snapshot-dispatched multi-subscriber registries.
//! - **Config**: [`config::SheetConfig`], loadable from TOML/JSON.
//!
//! # How it fits in the system
//! `anchorsheet-behavior` consumes these types to run the drag/settle state
//! machine. Nothing in this crate talks to a view system; every input is a
//! plain value snapshot.

pub mod animation;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod listener;
pub mod state;
pub mod velocity;

pub use error::SheetError;
