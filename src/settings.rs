//! Race settings and tuning
//!
//! Persisted as JSON. Missing fields fall back to the defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::pacing::PacingProfile;

/// Errors raised while loading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Race tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Track ===
    /// Total track length (pixels)
    pub track_length: f64,
    /// Car footprint so the nose stops at the finish line
    pub car_width_offset: f64,
    /// Content past the finish line (pixels)
    pub content_padding: f64,

    // === Pacing ===
    /// Base completion time (ms)
    pub base_time_ms: f64,
    /// Multiplier for the designated fastest lane (< 1)
    pub fast_factor: f64,
    /// Minimum multiplier for the other lanes (> fast_factor)
    pub slow_min: f64,
    /// Random spread on top of `slow_min`
    pub slow_spread: f64,

    // === Start lights ===
    /// Number of lights before GO
    pub light_count: u8,
    /// Interval between lights (ms)
    pub light_interval_ms: f64,

    // === Finish ===
    /// Delay before the celebration fires (ms)
    pub settle_delay_ms: f64,
    /// Fastest-lane progress at which the finish strip glows
    pub finish_glow_threshold: f64,

    // === Camera ===
    /// Forward bias keeping the followed car left of center
    pub camera_lead: f64,
    /// Transition hint for the presentation layer (ms)
    pub camera_transition_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track_length: TRACK_LENGTH,
            car_width_offset: CAR_WIDTH_OFFSET,
            content_padding: CONTENT_PADDING,

            base_time_ms: BASE_TIME_MS,
            fast_factor: FAST_FACTOR,
            slow_min: SLOW_MIN,
            slow_spread: SLOW_SPREAD,

            light_count: LIGHT_COUNT,
            light_interval_ms: LIGHT_INTERVAL_MS,

            settle_delay_ms: SETTLE_DELAY_MS,
            finish_glow_threshold: FINISH_GLOW_THRESHOLD,

            camera_lead: CAMERA_LEAD,
            camera_transition_ms: CAMERA_TRANSITION_MS,
        }
    }
}

impl Settings {
    /// Distance a car covers from start to finish
    pub fn drivable_length(&self) -> f64 {
        self.track_length - self.car_width_offset
    }

    /// Pacing parameters for the pacing generator
    pub fn pacing(&self) -> PacingProfile {
        PacingProfile {
            base_time_ms: self.base_time_ms,
            fast_factor: self.fast_factor,
            slow_min: self.slow_min,
            slow_spread: self.slow_spread,
        }
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.track_length > 0.0) {
            return Err(SettingsError::invalid("track_length", "must be positive"));
        }
        if !(self.car_width_offset >= 0.0 && self.car_width_offset < self.track_length) {
            return Err(SettingsError::invalid(
                "car_width_offset",
                format!("must be in [0, {})", self.track_length),
            ));
        }
        if !(self.content_padding >= 0.0) {
            return Err(SettingsError::invalid("content_padding", "must not be negative"));
        }
        if !(self.base_time_ms > 0.0) {
            return Err(SettingsError::invalid("base_time_ms", "must be positive"));
        }
        if !(self.fast_factor > 0.0 && self.fast_factor < 1.0) {
            return Err(SettingsError::invalid("fast_factor", "must be in (0, 1)"));
        }
        if !(self.slow_min > self.fast_factor) {
            return Err(SettingsError::invalid(
                "slow_min",
                format!("must exceed fast_factor ({})", self.fast_factor),
            ));
        }
        if !(self.slow_spread >= 0.0) {
            return Err(SettingsError::invalid("slow_spread", "must not be negative"));
        }
        if self.light_count == 0 {
            return Err(SettingsError::invalid("light_count", "must be at least 1"));
        }
        if !(self.light_interval_ms > 0.0) {
            return Err(SettingsError::invalid("light_interval_ms", "must be positive"));
        }
        if !(self.settle_delay_ms >= 0.0) {
            return Err(SettingsError::invalid("settle_delay_ms", "must not be negative"));
        }
        if !(self.camera_transition_ms >= 0.0) {
            return Err(SettingsError::invalid(
                "camera_transition_ms",
                "must not be negative",
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                log::warn!("Settings file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.drivable_length(), 1490.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "base_time_ms": 4000.0, "light_count": 3 }"#)
            .expect("partial settings should parse");
        assert_eq!(settings.base_time_ms, 4000.0);
        assert_eq!(settings.light_count, 3);
        assert_eq!(settings.track_length, TRACK_LENGTH);
        assert_eq!(settings.settle_delay_ms, SETTLE_DELAY_MS);
    }

    #[test]
    fn test_slow_lanes_must_be_slower() {
        let settings = Settings {
            slow_min: 0.85,
            ..Default::default()
        };
        match settings.validate() {
            Err(SettingsError::Invalid { field, .. }) => assert_eq!(field, "slow_min"),
            other => panic!("expected slow_min rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "light_count": 0 }"#),
            Err(SettingsError::Invalid { field: "light_count", .. })
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("definitely/not/here/settings.json");
        let settings = Settings::load_or_default(Some(path)).expect("fallback");
        assert_eq!(settings, Settings::default());
    }
}
