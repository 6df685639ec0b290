#![forbid(unsafe_code)]

//! One-dimensional velocity tracking for release and scroll-stop decisions.
//!
//! Uses the impulse strategy: each pair of consecutive samples contributes
//! kinetic energy, and the accumulated energy is converted back into a
//! velocity. Only samples inside a short horizon count, and a gap longer than
//! [`ASSUME_STOPPED_MS`] between samples cuts the history off (the pointer
//! paused, so older motion is stale).
//!
//! # Invariants
//!
//! 1. Fewer than two usable samples yield a velocity of exactly `0.0`.
//! 2. Velocity is in px/s; positive means the pointer moved down.
//! 3. `velocity_capped(max)` is always in `[-max, max]`.

/// Ring buffer size.
const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: u64 = 100;

/// A gap this long between consecutive samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Debug, Clone, Copy)]
struct Sample {
    time_ms: u64,
    position: f32,
}

/// Velocity tracker over absolute pointer positions.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Record a position at `time_ms`.
    pub fn add(&mut self, time_ms: u64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Whether any sample has been recorded since the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples[self.index].is_none()
    }

    /// Current velocity in px/s.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        // Newest first: positions and ages (negated, in ms).
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let mut cursor = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            let gap = previous.time_ms.abs_diff(sample.time_ms);
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            positions[count] = sample.position;
            times[count] = -(age as f32);
            previous = sample;
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            cursor = if cursor == 0 { HISTORY_SIZE - 1 } else { cursor - 1 };
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Velocity clamped to `[-max, max]`. A non-positive cap yields zero.
    #[must_use]
    pub fn velocity_capped(&self, max: f32) -> f32 {
        if !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        let v = self.velocity();
        if v.is_nan() {
            return 0.0;
        }
        v.clamp(-max, max)
    }

    /// Release velocity: capped at `max`, and zero when slower than `min`.
    #[must_use]
    pub fn fling_velocity(&self, min: f32, max: f32) -> f32 {
        let v = self.velocity_capped(max);
        if v.abs() < min { 0.0 } else { v }
    }
}

/// Impulse velocity in px/ms over newest-first samples.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let start = positions.len() - 1;
    let mut work = 0.0f32;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }
        let v_curr = (positions[i - 1] - positions[i]) / (next_time - current_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// `E = v^2 / 2` with unit mass.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
