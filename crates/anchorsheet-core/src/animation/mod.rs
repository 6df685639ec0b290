#![forbid(unsafe_code)]

//! Motion primitives for settling the sheet.
//!
//! The host drives everything: it calls `tick` once per display frame with
//! the elapsed time, and nothing here schedules itself.

use std::time::Duration;

pub mod settle;
pub mod spring;

pub use settle::{SettleConfig, SettleDriver, SettleStep};
pub use spring::{Spring, SpringParams};

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}
