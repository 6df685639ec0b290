#![forbid(unsafe_code)]

//! Damped spring on one pixel axis.
//!
//! Acceleration is `-k (x - target) - c v`. With `c = 2√k` the spring is
//! critically damped and reaches the target without overshooting.
//!
//! Integration is semi-implicit Euler in slices of at most 4 ms, so a dropped
//! frame (or a test ticking a whole second at once) stays stable.
//!
//! # Invariants
//!
//! 1. At rest, `position == target` and `velocity == 0`.
//! 2. Once at rest, `tick` is a no-op until the target changes.
//! 3. `stiffness >= 0.1`, `damping >= 0`.
//!
//! # Failure Modes
//!
//! - With zero damping the spring oscillates forever. [`SettleDriver`]
//!   bounds every settle with a maximum duration.
//!
//! [`SettleDriver`]: super::SettleDriver

use std::time::Duration;

use super::Animation;

const SLICE_SECS: f64 = 0.004;
const MIN_STIFFNESS: f64 = 0.1;

/// Physical parameters of a [`Spring`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    /// Distance (px) under which the spring may rest.
    pub rest_threshold: f64,
    /// Speed (px/s) under which the spring may rest.
    pub velocity_threshold: f64,
}

impl SpringParams {
    /// Critically damped parameters for `stiffness`.
    #[must_use]
    pub fn critical(stiffness: f64) -> Self {
        let stiffness = stiffness.max(MIN_STIFFNESS);
        Self {
            stiffness,
            damping: 2.0 * stiffness.sqrt(),
            rest_threshold: 0.5,
            velocity_threshold: 5.0,
        }
    }

    /// Replace the damping coefficient. Negative values clamp to zero.
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping.max(0.0);
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, rest: f64, velocity: f64) -> Self {
        self.rest_threshold = rest.abs();
        self.velocity_threshold = velocity.abs();
        self
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::critical(400.0)
    }
}

/// A spring pulling a pixel position toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    params: SpringParams,
    origin: f64,
    position: f64,
    velocity: f64,
    target: f64,
    resting: bool,
}

impl Spring {
    #[must_use]
    pub fn new(origin: f64, target: f64, params: SpringParams) -> Self {
        Self {
            params,
            origin,
            position: origin,
            velocity: 0.0,
            target,
            resting: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    /// Move the target, keeping position and velocity.
    pub fn retarget(&mut self, target: f64) {
        if target != self.target {
            self.target = target;
            self.resting = false;
        }
    }

    fn settled(&self) -> bool {
        (self.position - self.target).abs() < self.params.rest_threshold
            && self.velocity.abs() < self.params.velocity_threshold
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        if self.resting {
            return;
        }
        let mut left = dt.as_secs_f64();
        while left > 0.0 {
            let h = left.min(SLICE_SECS);
            let accel = -self.params.stiffness * (self.position - self.target)
                - self.params.damping * self.velocity;
            self.velocity += accel * h;
            self.position += self.velocity * h;
            left -= h;
        }
        if self.settled() {
            self.position = self.target;
            self.velocity = 0.0;
            self.resting = true;
        }
    }

    fn is_complete(&self) -> bool {
        self.resting
    }

    /// Fraction of the way from origin to target, clamped to `[0, 1]`.
    fn value(&self) -> f32 {
        let travel = self.target - self.origin;
        if travel == 0.0 {
            return 1.0;
        }
        (((self.position - self.origin) / travel) as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.origin;
        self.velocity = 0.0;
        self.resting = false;
    }
}
