#![forbid(unsafe_code)]

//! Target selection when a drag is released or a nested scroll stops.
//!
//! Both resolvers are pure functions of the configuration, the resolved
//! offsets, and a few numbers captured from the gesture. They return the
//! chosen state together with the rule that chose it, so callers can log and
//! test the decision path.
//!
//! # Direct-drag release
//!
//! Velocity is positive downward.
//!
//! ```text
//! yvel < 0                      -> Expanded
//! hideable && should_hide       -> Hidden
//! yvel == 0                     -> nearer of Expanded / Collapsed (tie: Collapsed)
//! otherwise                     -> Collapsed
//! ```
//!
//! # Nested-scroll stop
//!
//! ```text
//! velocity < -threshold         -> next(last stable)      (locked: Collapsed)
//! velocity >  threshold         -> previous(last stable)
//! dy / height > fraction        -> next(last stable)      (locked: Collapsed)
//! dy / height < -fraction       -> previous(last stable)
//! otherwise                     -> fallback policy
//! ```
//!
//! # Invariants
//!
//! 1. Every resolved target is reachable under the configured order.
//! 2. A non-hideable sheet never resolves a scroll stop to `Hidden` unless the
//!    order reaches nothing else.

use serde::{Deserialize, Serialize};

use anchorsheet_core::config::{ScrollStopFallback, SheetConfig};
use anchorsheet_core::geometry::SheetOffsets;
use anchorsheet_core::state::StableState;

/// Which rule picked the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseReason {
    MovingUp,
    Hide,
    NearestAtRest,
    MovingDown,
    VelocityUp,
    VelocityDown,
    DistanceUp,
    DistanceDown,
    LastStable,
    Closest,
    LockedToCollapsed,
}

/// A resolved target and the rule behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDecision {
    pub target: StableState,
    pub reason: ReleaseReason,
}

impl ReleaseDecision {
    const fn new(target: StableState, reason: ReleaseReason) -> Self {
        Self { target, reason }
    }
}

/// Whether a downward release at `top` with velocity `yvel` should hide.
#[must_use]
pub fn should_hide(config: &SheetConfig, offsets: &SheetOffsets, top: i32, yvel: f32) -> bool {
    if config.flags.skip_collapsed {
        return true;
    }
    if top < offsets.max_offset() {
        return false;
    }
    let projected = top as f32 + yvel * config.release.hide_friction;
    let overshoot = (projected - offsets.max_offset() as f32).abs();
    overshoot / offsets.peek_height() as f32 > config.release.hide_threshold
}

/// Resolve the target for a direct-drag release.
#[must_use]
pub fn resolve_release(
    config: &SheetConfig,
    offsets: &SheetOffsets,
    top: i32,
    yvel: f32,
) -> ReleaseDecision {
    let decision = if yvel < 0.0 {
        ReleaseDecision::new(StableState::Expanded, ReleaseReason::MovingUp)
    } else if config.flags.hideable && should_hide(config, offsets, top, yvel) {
        ReleaseDecision::new(StableState::Hidden, ReleaseReason::Hide)
    } else if yvel == 0.0 {
        let to_expanded = (top - offsets.min_offset()).abs();
        let to_collapsed = (top - offsets.max_offset()).abs();
        let target = if to_expanded < to_collapsed {
            StableState::Expanded
        } else {
            StableState::Collapsed
        };
        ReleaseDecision::new(target, ReleaseReason::NearestAtRest)
    } else {
        ReleaseDecision::new(StableState::Collapsed, ReleaseReason::MovingDown)
    };
    ReleaseDecision {
        target: config.order.normalize(decision.target),
        ..decision
    }
}

/// Gesture numbers captured when a nested scroll stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollStop {
    pub last_stable: StableState,
    /// Last consumed delta, positive = upward.
    pub last_dy: i32,
    /// Pointer velocity in px/s, positive = downward.
    pub velocity: f32,
    pub top: i32,
}

/// Resolve the target for a nested-scroll stop.
#[must_use]
pub fn resolve_scroll_stop(
    config: &SheetConfig,
    offsets: &SheetOffsets,
    stop: &ScrollStop,
) -> ReleaseDecision {
    let order = &config.order;
    let release = &config.release;
    let locked = config.flags.locked_to_collapsed;

    let upward = |reason| {
        if locked {
            ReleaseDecision::new(StableState::Collapsed, ReleaseReason::LockedToCollapsed)
        } else {
            ReleaseDecision::new(order.next(stop.last_stable), reason)
        }
    };

    let decision = if stop.velocity < -release.stop_velocity_threshold {
        upward(ReleaseReason::VelocityUp)
    } else if stop.velocity > release.stop_velocity_threshold {
        ReleaseDecision::new(order.previous(stop.last_stable), ReleaseReason::VelocityDown)
    } else {
        let height = offsets.container_height();
        let fraction = if height > 0 {
            stop.last_dy as f32 / height as f32
        } else {
            0.0
        };
        if fraction > release.stop_fraction {
            upward(ReleaseReason::DistanceUp)
        } else if fraction < -release.stop_fraction {
            ReleaseDecision::new(order.previous(stop.last_stable), ReleaseReason::DistanceDown)
        } else {
            match release.scroll_stop_fallback {
                ScrollStopFallback::LastStable => {
                    ReleaseDecision::new(order.normalize(stop.last_stable), ReleaseReason::LastStable)
                }
                ScrollStopFallback::Closest => {
                    ReleaseDecision::new(offsets.closest_state(stop.top, order), ReleaseReason::Closest)
                }
            }
        }
    };

    let mut target = order.normalize(decision.target);
    if target == StableState::Hidden && !config.flags.hideable {
        target = order
            .states()
            .iter()
            .copied()
            .find(|s| *s != StableState::Hidden)
            .unwrap_or(StableState::Hidden);
    }
    ReleaseDecision { target, ..decision }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
