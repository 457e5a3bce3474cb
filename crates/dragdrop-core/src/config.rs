#![forbid(unsafe_code)]

//! Controller-wide configuration.

use crate::profile::AxisMode;

/// Class-list token that makes an element eligible to start a drag.
pub const DEFAULT_MARKER: &str = "draggable";

/// Settings shared by every element a controller manages.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ControllerConfig {
    /// Draggable marker token (default: `"draggable"`).
    pub marker: String,
    /// Reject inverted bounds and a zero snap at registration
    /// (default: `false`, options are trusted as given).
    pub strict_bounds: bool,
    /// Axis mode for profiles that do not set one (default: `Both`).
    pub default_mode: AxisMode,
    /// Snap for profiles that do not set one (default: 1).
    pub default_snap: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_owned(),
            strict_bounds: false,
            default_mode: AxisMode::Both,
            default_snap: 1,
        }
    }
}

impl ControllerConfig {
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_strict_bounds(mut self, strict: bool) -> Self {
        self.strict_bounds = strict;
        self
    }

    #[must_use]
    pub fn with_default_mode(mut self, mode: AxisMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Set the fallback snap. `0` is stored as `1`.
    #[must_use]
    pub fn with_default_snap(mut self, snap: u32) -> Self {
        self.default_snap = snap.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ControllerConfig::default();
        assert_eq!(config.marker, "draggable");
        assert!(!config.strict_bounds);
        assert_eq!(config.default_mode, AxisMode::Both);
        assert_eq!(config.default_snap, 1);
    }

    #[test]
    fn builder_chain() {
        let config = ControllerConfig::default()
            .with_marker("grip")
            .with_strict_bounds(true)
            .with_default_mode(AxisMode::VerticalOnly)
            .with_default_snap(0);
        assert_eq!(config.marker, "grip");
        assert!(config.strict_bounds);
        assert_eq!(config.default_mode, AxisMode::VerticalOnly);
        assert_eq!(config.default_snap, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_partial_config() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{"marker":"handle","default_snap":4}"#).unwrap();
        assert_eq!(config.marker, "handle");
        assert_eq!(config.default_snap, 4);
        assert!(!config.strict_bounds);
    }
}
