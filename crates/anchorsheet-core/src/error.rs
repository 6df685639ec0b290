#![forbid(unsafe_code)]

//! Error types shared across the sheet crates.
//!
//! Configuration problems ([`GeometryError`], [`StateOrderError`],
//! [`ConfigError`]) fail fast at construction or layout time. Bad state
//! arguments surface as [`SheetError::InvalidState`]. Detached host views are
//! not errors at all; the coordinator treats them as no-ops.

use std::fmt;

use crate::config::ConfigError;
use crate::state::{SheetState, StateOrderError};

/// Geometry that cannot produce an ordered set of offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A layout dimension was negative.
    NegativeDimension { field: &'static str, value: i32 },
    /// The resolved peek height was zero or negative.
    NonPositivePeek { peek_height: i32 },
    /// An explicit anchor fell outside `[min_offset, max_offset]`.
    AnchorOutOfRange { anchor: i32, min: i32, max: i32 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDimension { field, value } => {
                write!(f, "{field} must be non-negative (got {value})")
            }
            Self::NonPositivePeek { peek_height } => {
                write!(f, "peek height must be positive (got {peek_height})")
            }
            Self::AnchorOutOfRange { anchor, min, max } => {
                write!(f, "anchor point {anchor} outside offset range [{min}, {max}]")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Umbrella error for sheet operations.
#[derive(Debug)]
pub enum SheetError {
    /// A transient state was passed where a stable one is required.
    InvalidState(SheetState),
    /// `Hidden` was requested on a sheet that is not hideable.
    NotHideable,
    Geometry(GeometryError),
    Order(StateOrderError),
    Config(ConfigError),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState(state) => {
                write!(f, "invalid state argument: {state} is not a stable state")
            }
            Self::NotHideable => write!(f, "sheet is not hideable"),
            Self::Geometry(e) => write!(f, "geometry error: {e}"),
            Self::Order(e) => write!(f, "state order error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
        }
    }
}

impl std::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidState(_) | Self::NotHideable => None,
            Self::Geometry(e) => Some(e),
            Self::Order(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<GeometryError> for SheetError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}

impl From<StateOrderError> for SheetError {
    fn from(e: StateOrderError) -> Self {
        Self::Order(e)
    }
}

impl From<ConfigError> for SheetError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_names_the_offending_values() {
        let e = GeometryError::AnchorOutOfRange {
            anchor: 950,
            min: 0,
            max: 900,
        };
        assert_eq!(e.to_string(), "anchor point 950 outside offset range [0, 900]");

        let e = SheetError::InvalidState(SheetState::Settling);
        assert!(e.to_string().contains("settling"));
    }

    #[test]
    fn source_chains_to_inner_error() {
        let e = SheetError::from(GeometryError::NonPositivePeek { peek_height: 0 });
        let source = e.source().expect("geometry source");
        assert!(source.to_string().contains("peek height"));
        assert!(SheetError::NotHideable.source().is_none());
    }
}
