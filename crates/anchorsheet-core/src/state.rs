#![forbid(unsafe_code)]

//! Sheet states and the ordering policy between stable states.
//!
//! A sheet is always in exactly one [`SheetState`]. Four of them are *stable*
//! (the sheet may rest there); `Dragging` and `Settling` are transient overlays
//! that exist only while a gesture or settle animation is in flight.
//!
//! # Ordering
//!
//! Stable states are ranked bottom to top:
//!
//! ```text
//! Hidden < Collapsed < AnchorPoint < Expanded
//! ```
//!
//! A [`StateOrder`] selects which of them a sheet may actually reach. The
//! three presets cover the phone, tablet, and landscape layouts; anything else
//! can be expressed as a custom order.
//!
//! # Invariants
//!
//! 1. A `StateOrder` is non-empty and strictly ascending by rank.
//! 2. `next`/`previous` clamp at the ends; they never wrap.
//! 3. Every state returned by `next`, `previous`, or `normalize` is reachable.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// A position the sheet may rest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StableState {
    /// Entirely below the container.
    Hidden,
    /// Only the peek strip is visible.
    Collapsed,
    /// Resting at the configured intermediate offset.
    AnchorPoint,
    /// Fully raised.
    Expanded,
}

impl StableState {
    /// All stable states, lowest rank first.
    pub const ALL: [StableState; 4] = [
        StableState::Hidden,
        StableState::Collapsed,
        StableState::AnchorPoint,
        StableState::Expanded,
    ];

    /// Position in the fixed ordering table (`Hidden = 0`).
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Hidden => 0,
            Self::Collapsed => 1,
            Self::AnchorPoint => 2,
            Self::Expanded => 3,
        }
    }
}

impl fmt::Display for StableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        SheetState::from(*self).fmt(f)
    }
}

/// Current state of the sheet, stable or transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetState {
    Hidden,
    Collapsed,
    AnchorPoint,
    Expanded,
    /// A pointer or nested scroll is moving the sheet.
    Dragging,
    /// The settle driver is moving the sheet toward a stable state.
    Settling,
}

impl SheetState {
    /// The stable state this value names, or `None` for transient states.
    #[inline]
    #[must_use]
    pub const fn as_stable(self) -> Option<StableState> {
        match self {
            Self::Hidden => Some(StableState::Hidden),
            Self::Collapsed => Some(StableState::Collapsed),
            Self::AnchorPoint => Some(StableState::AnchorPoint),
            Self::Expanded => Some(StableState::Expanded),
            Self::Dragging | Self::Settling => None,
        }
    }

    /// Whether the sheet may rest in this state.
    #[inline]
    #[must_use]
    pub const fn is_stable(self) -> bool {
        self.as_stable().is_some()
    }

    /// Integer tag used by the persisted state surface.
    #[must_use]
    pub const fn tag(self) -> i32 {
        match self {
            Self::Dragging => 1,
            Self::Settling => 2,
            Self::Expanded => 3,
            Self::Collapsed => 4,
            Self::Hidden => 5,
            Self::AnchorPoint => 6,
        }
    }

    /// Decode a persisted tag. Unknown tags decode to `Hidden`.
    #[must_use]
    pub const fn from_tag(tag: i32) -> Self {
        match tag {
            1 => Self::Dragging,
            2 => Self::Settling,
            3 => Self::Expanded,
            4 => Self::Collapsed,
            6 => Self::AnchorPoint,
            _ => Self::Hidden,
        }
    }
}

impl From<StableState> for SheetState {
    fn from(state: StableState) -> Self {
        match state {
            StableState::Hidden => Self::Hidden,
            StableState::Collapsed => Self::Collapsed,
            StableState::AnchorPoint => Self::AnchorPoint,
            StableState::Expanded => Self::Expanded,
        }
    }
}

impl fmt::Display for SheetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hidden => "hidden",
            Self::Collapsed => "collapsed",
            Self::AnchorPoint => "anchor_point",
            Self::Expanded => "expanded",
            Self::Dragging => "dragging",
            Self::Settling => "settling",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// StateOrder
// ---------------------------------------------------------------------------

/// Reachable stable states, lowest rank first.
///
/// Replaces per-layout subclassing: the tablet and landscape variants are
/// just different orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StableState>", into = "Vec<StableState>")]
pub struct StateOrder {
    states: Vec<StableState>,
}

impl Default for StateOrder {
    fn default() -> Self {
        Self::standard()
    }
}

impl StateOrder {
    /// `Hidden < Collapsed < AnchorPoint < Expanded`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            states: StableState::ALL.to_vec(),
        }
    }

    /// Tablet layouts never collapse: `Hidden < AnchorPoint < Expanded`.
    #[must_use]
    pub fn tablet() -> Self {
        Self {
            states: vec![
                StableState::Hidden,
                StableState::AnchorPoint,
                StableState::Expanded,
            ],
        }
    }

    /// Landscape layouts only ever hide.
    #[must_use]
    pub fn landscape() -> Self {
        Self {
            states: vec![StableState::Hidden],
        }
    }

    /// Build a custom order. States must be strictly ascending by rank.
    pub fn custom(states: Vec<StableState>) -> Result<Self, StateOrderError> {
        if states.is_empty() {
            return Err(StateOrderError::Empty);
        }
        for pair in states.windows(2) {
            if pair[0].rank() >= pair[1].rank() {
                return Err(StateOrderError::NotAscending {
                    lower: pair[0],
                    upper: pair[1],
                });
            }
        }
        Ok(Self { states })
    }

    /// Reachable states, lowest rank first.
    #[inline]
    #[must_use]
    pub fn states(&self) -> &[StableState] {
        &self.states
    }

    /// Whether `state` is reachable under this order.
    #[inline]
    #[must_use]
    pub fn contains(&self, state: StableState) -> bool {
        self.states.contains(&state)
    }

    /// Lowest reachable state.
    #[must_use]
    pub fn lowest(&self) -> StableState {
        self.states[0]
    }

    /// Highest reachable state.
    #[must_use]
    pub fn highest(&self) -> StableState {
        self.states[self.states.len() - 1]
    }

    /// Map any stable state onto a reachable one.
    ///
    /// Prefers the first reachable state ranked at or above `state`, falling
    /// back to the highest reachable state below it.
    #[must_use]
    pub fn normalize(&self, state: StableState) -> StableState {
        self.states
            .iter()
            .copied()
            .find(|s| s.rank() >= state.rank())
            .unwrap_or_else(|| self.highest())
    }

    /// The next state as the sheet expands. Clamped at the top.
    #[must_use]
    pub fn next(&self, state: StableState) -> StableState {
        let next = self
            .states
            .iter()
            .copied()
            .find(|s| s.rank() > state.rank())
            .unwrap_or(state);
        self.normalize(next)
    }

    /// The previous state as the sheet contracts. Clamped at the bottom.
    #[must_use]
    pub fn previous(&self, state: StableState) -> StableState {
        let previous = self
            .states
            .iter()
            .rev()
            .copied()
            .find(|s| s.rank() < state.rank())
            .unwrap_or(state);
        self.normalize(previous)
    }
}

impl TryFrom<Vec<StableState>> for StateOrder {
    type Error = StateOrderError;

    fn try_from(states: Vec<StableState>) -> Result<Self, Self::Error> {
        Self::custom(states)
    }
}

impl From<StateOrder> for Vec<StableState> {
    fn from(order: StateOrder) -> Self {
        order.states
    }
}

/// Invalid custom state order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOrderError {
    Empty,
    NotAscending {
        lower: StableState,
        upper: StableState,
    },
}

impl fmt::Display for StateOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "state order must contain at least one state"),
            Self::NotAscending { lower, upper } => {
                write!(f, "state order must be strictly ascending ({lower} before {upper})")
            }
        }
    }
}

impl std::error::Error for StateOrderError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
