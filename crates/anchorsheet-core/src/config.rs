#![forbid(unsafe_code)]

//! Policy-as-data configuration for a sheet.
//!
//! Every tunable of the drag/settle machine lives in one [`SheetConfig`] that
//! can be built in code or loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! # sheet.toml
//! order = ["hidden", "anchor_point", "expanded"]
//!
//! [geometry]
//! peek_height = { pixels = 120 }
//! anchor_point = "auto"
//!
//! [flags]
//! hideable = true
//! ```
//!
//! ```rust,ignore
//! let config = SheetConfig::from_toml_file("sheet.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! `SheetConfig::default()` is a phone layout: automatic peek and anchor,
//! the standard four-state order, not hideable, activation measured from the
//! top offset only.

use std::fmt;
#[cfg(feature = "config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::SettleConfig;
use crate::geometry::{AnchorSpec, GeometryConfig, PeekHeight};
use crate::state::{StableState, StateOrder};

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Pointer handling thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Movement (px) before a pointer sequence counts as a drag.
    pub touch_slop: f32,
    /// Release velocities below this magnitude (px/s) count as zero.
    pub min_fling_velocity: f32,
    /// Release velocities are capped to this magnitude (px/s).
    pub max_fling_velocity: f32,
    /// Longest down-to-up interval that still counts as a tap.
    pub tap_timeout_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            tap_timeout_ms: 500,
        }
    }
}

/// What a nested-scroll stop settles to when neither velocity nor distance
/// decide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollStopFallback {
    /// Return to the last stable state.
    #[default]
    LastStable,
    /// Go to whichever reachable state rests nearest the current top.
    Closest,
}

/// Release and scroll-stop resolver tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Seconds of projected travel used by the hide decision.
    pub hide_friction: f32,
    /// Projected overshoot past collapsed, in peek heights, that hides.
    pub hide_threshold: f32,
    /// Scroll-stop velocity magnitude (px/s) that decides direction outright.
    pub stop_velocity_threshold: f32,
    /// Last scroll delta as a fraction of container height that decides
    /// direction when velocity does not.
    pub stop_fraction: f32,
    pub scroll_stop_fallback: ScrollStopFallback,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            hide_friction: 0.1,
            hide_threshold: 0.5,
            stop_velocity_threshold: 150.0,
            stop_fraction: 0.01,
            scroll_stop_fallback: ScrollStopFallback::LastStable,
        }
    }
}

/// Behavioral switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetFlags {
    /// The sheet may be dragged or flung to `Hidden`.
    pub hideable: bool,
    /// A downward release on a hideable sheet always hides.
    pub skip_collapsed: bool,
    /// Touches on the sheet are swallowed without moving it.
    pub disable_dragging: bool,
    /// Nested scrolling may not raise the sheet above its collapsed offset.
    pub locked_to_collapsed: bool,
    /// Tapping the peek strip of a collapsed sheet raises it to the anchor.
    pub expand_on_tap: bool,
}

impl Default for SheetFlags {
    fn default() -> Self {
        Self {
            hideable: false,
            skip_collapsed: false,
            disable_dragging: false,
            locked_to_collapsed: false,
            expand_on_tap: true,
        }
    }
}

/// When the sheet counts as "activated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// `top < container_height - peek_height`.
    #[default]
    TopOnly,
    /// As `TopOnly`, or the state is anything but `Collapsed`.
    TopOrNotCollapsed,
}

// ---------------------------------------------------------------------------
// SheetConfig
// ---------------------------------------------------------------------------

/// Complete configuration for one sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub geometry: GeometryConfig,
    pub gesture: GestureConfig,
    pub release: ReleaseConfig,
    pub settle: SettleConfig,
    pub flags: SheetFlags,
    pub order: StateOrder,
    pub activation: ActivationPolicy,
}

impl SheetConfig {
    /// Tablet layout: the sheet never collapses.
    #[must_use]
    pub fn tablet() -> Self {
        Self {
            order: StateOrder::tablet(),
            ..Self::default()
        }
    }

    /// Landscape layout: the only reachable state is `Hidden`.
    #[must_use]
    pub fn landscape() -> Self {
        Self {
            order: StateOrder::landscape(),
            flags: SheetFlags {
                hideable: true,
                ..SheetFlags::default()
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: StateOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: GeometryConfig) -> Self {
        self.geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: SheetFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_activation(mut self, activation: ActivationPolicy) -> Self {
        self.activation = activation;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let PeekHeight::Pixels(px) = self.geometry.peek_height {
            if px <= 0 {
                errors.push(format!("geometry.peek_height must be > 0, got {px}"));
            }
        }
        if self.geometry.peek_height_min <= 0 {
            errors.push(format!(
                "geometry.peek_height_min must be > 0, got {}",
                self.geometry.peek_height_min
            ));
        }
        if let AnchorSpec::Pixels(px) = self.geometry.anchor_point {
            if px < 0 {
                errors.push(format!("geometry.anchor_point must be >= 0, got {px}"));
            }
        }

        if !(self.gesture.touch_slop >= 0.0 && self.gesture.touch_slop.is_finite()) {
            errors.push(format!(
                "gesture.touch_slop must be finite and >= 0, got {}",
                self.gesture.touch_slop
            ));
        }
        if !(self.gesture.min_fling_velocity >= 0.0) {
            errors.push(format!(
                "gesture.min_fling_velocity must be >= 0, got {}",
                self.gesture.min_fling_velocity
            ));
        }
        if !(self.gesture.max_fling_velocity > self.gesture.min_fling_velocity) {
            errors.push(format!(
                "gesture.max_fling_velocity must exceed min_fling_velocity, got {}",
                self.gesture.max_fling_velocity
            ));
        }

        if !(self.release.hide_friction >= 0.0) {
            errors.push(format!(
                "release.hide_friction must be >= 0, got {}",
                self.release.hide_friction
            ));
        }
        if !(self.release.hide_threshold > 0.0) {
            errors.push(format!(
                "release.hide_threshold must be > 0, got {}",
                self.release.hide_threshold
            ));
        }
        if !(self.release.stop_velocity_threshold >= 0.0) {
            errors.push(format!(
                "release.stop_velocity_threshold must be >= 0, got {}",
                self.release.stop_velocity_threshold
            ));
        }
        if !(0.0..1.0).contains(&self.release.stop_fraction) {
            errors.push(format!(
                "release.stop_fraction must be in [0, 1), got {}",
                self.release.stop_fraction
            ));
        }

        if !(self.settle.stiffness > 0.0) {
            errors.push(format!(
                "settle.stiffness must be > 0, got {}",
                self.settle.stiffness
            ));
        }
        if let Some(c) = self.settle.damping {
            if !(c >= 0.0) {
                errors.push(format!("settle.damping must be >= 0, got {c}"));
            }
        }
        if !(self.settle.rest_threshold > 0.0) {
            errors.push(format!(
                "settle.rest_threshold must be > 0, got {}",
                self.settle.rest_threshold
            ));
        }
        if !(self.settle.velocity_threshold > 0.0) {
            errors.push(format!(
                "settle.velocity_threshold must be > 0, got {}",
                self.settle.velocity_threshold
            ));
        }
        if self.settle.max_duration_ms == 0 {
            errors.push("settle.max_duration_ms must be > 0".into());
        }

        if self.flags.locked_to_collapsed && !self.order.contains(StableState::Collapsed) {
            errors.push("flags.locked_to_collapsed requires Collapsed in the state order".into());
        }

        errors
    }

    /// `self` if it validates, else every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Failure to load or validate a [`SheetConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// One message per invalid field.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "invalid config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SheetConfig::default().validate().is_empty());
        assert!(SheetConfig::tablet().validate().is_empty());
        assert!(SheetConfig::landscape().validate().is_empty());
    }

    #[test]
    fn default_release_constants() {
        let release = ReleaseConfig::default();
        assert_eq!(release.hide_friction, 0.1);
        assert_eq!(release.hide_threshold, 0.5);
        assert_eq!(release.stop_velocity_threshold, 150.0);
        assert_eq!(release.stop_fraction, 0.01);
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut config = SheetConfig::tablet();
        config.geometry.peek_height = PeekHeight::Pixels(0);
        config.gesture.max_fling_velocity = 0.0;
        config.settle.max_duration_ms = 0;
        config.flags.locked_to_collapsed = true;

        let errors = config.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("peek_height")));
        assert!(errors.iter().any(|e| e.contains("locked_to_collapsed")));

        let err = config.validated().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 4));
    }

    #[test]
    fn nan_thresholds_are_rejected() {
        let mut config = SheetConfig::default();
        config.release.hide_threshold = f32::NAN;
        config.settle.stiffness = f64::NAN;
        assert_eq!(config.validate().len(), 2);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_override_keeps_defaults() {
        let config = SheetConfig::from_toml_str(
            r#"
            order = ["hidden", "anchor_point", "expanded"]
            activation = "top_or_not_collapsed"

            [geometry]
            peek_height = { pixels = 120 }

            [flags]
            hideable = true
            "#,
        )
        .unwrap();
        assert_eq!(config.geometry.peek_height, PeekHeight::Pixels(120));
        assert_eq!(config.geometry.anchor_point, AnchorSpec::Auto);
        assert!(config.flags.hideable);
        assert!(config.flags.expand_on_tap);
        assert_eq!(config.order, StateOrder::tablet());
        assert_eq!(config.activation, ActivationPolicy::TopOrNotCollapsed);
        assert_eq!(config.release, ReleaseConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trip() {
        let config = SheetConfig::landscape();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SheetConfig::from_json_str(&json).unwrap(), config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn bad_order_is_a_parse_error() {
        let err = SheetConfig::from_json_str(r#"{"order": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_is_io_error() {
        let err = SheetConfig::from_toml_file("/nonexistent/anchorsheet.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
