#![forbid(unsafe_code)]

//! Settle driver: moves the sheet top from where it was released to the
//! rest offset of a target state.
//!
//! # Invariants
//!
//! 1. Every reported `top` lies between the start and target offsets.
//! 2. The step that reports `finished` reports exactly the target offset.
//! 3. A driver whose start equals its target finishes on the first advance.
//! 4. After `max_duration` of accumulated time the driver finishes even if
//!    the spring has not come to rest.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Animation;
use super::spring::{Spring, SpringParams};
use crate::state::StableState;

/// Settle section of the sheet configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleConfig {
    pub stiffness: f64,
    /// `None` selects critical damping for the configured stiffness.
    pub damping: Option<f64>,
    /// Distance from the target (px) at which the settle may finish.
    pub rest_threshold: f64,
    /// Speed (px/s) below which the settle may finish.
    pub velocity_threshold: f64,
    /// Hard upper bound on a single settle, in milliseconds.
    pub max_duration_ms: u64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            stiffness: 400.0,
            damping: None,
            rest_threshold: 0.5,
            velocity_threshold: 5.0,
            max_duration_ms: 1000,
        }
    }
}

impl SettleConfig {
    #[must_use]
    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms)
    }

    fn spring(&self, start: f64, target: f64) -> Spring {
        let params = SpringParams::critical(self.stiffness)
            .with_thresholds(self.rest_threshold, self.velocity_threshold);
        let params = match self.damping {
            Some(c) => params.with_damping(c),
            None => params,
        };
        Spring::new(start, target, params)
    }
}

/// Result of advancing a settle by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleStep {
    pub top: i32,
    pub finished: bool,
}

/// In-flight settle toward a stable state.
#[derive(Debug, Clone)]
pub struct SettleDriver {
    spring: Spring,
    start_top: i32,
    target_top: i32,
    target: StableState,
    elapsed: Duration,
    max_duration: Duration,
    finished: bool,
}

impl SettleDriver {
    /// Start a settle from `start_top` toward `target` resting at `target_top`.
    #[must_use]
    pub fn new(start_top: i32, target: StableState, target_top: i32, config: &SettleConfig) -> Self {
        Self {
            spring: config.spring(f64::from(start_top), f64::from(target_top)),
            start_top,
            target_top,
            target,
            elapsed: Duration::ZERO,
            max_duration: config.max_duration(),
            finished: false,
        }
    }

    /// State the settle ends in.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> StableState {
        self.target
    }

    #[inline]
    #[must_use]
    pub const fn target_top(&self) -> i32 {
        self.target_top
    }

    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by one frame.
    pub fn advance(&mut self, dt: Duration) -> SettleStep {
        if self.finished || self.start_top == self.target_top {
            self.finished = true;
            return self.finish();
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        self.spring.tick(dt);

        if self.spring.is_complete() || self.elapsed >= self.max_duration {
            self.finished = true;
            return self.finish();
        }

        let lo = self.start_top.min(self.target_top);
        let hi = self.start_top.max(self.target_top);
        let top = (self.spring.position().round() as i32).clamp(lo, hi);
        SettleStep {
            top,
            finished: false,
        }
    }

    fn finish(&self) -> SettleStep {
        SettleStep {
            top: self.target_top,
            finished: true,
        }
    }
}
