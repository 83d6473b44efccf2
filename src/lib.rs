//! Sprint Race - a multi-lane drag race engine
//!
//! Core modules:
//! - `sim`: Race simulation (start lights, pacing, progress, camera follow)
//! - `settings`: Data-driven race tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Default race tuning constants
pub mod consts {
    /// Track length (pixels)
    pub const TRACK_LENGTH: f64 = 1600.0;
    /// Car footprint subtracted from the track so the nose stops at the line
    pub const CAR_WIDTH_OFFSET: f64 = 110.0;
    /// Extra content past the finish line
    pub const CONTENT_PADDING: f64 = 200.0;

    /// Base completion time (ms)
    pub const BASE_TIME_MS: f64 = 5600.0;
    /// Duration multiplier for the designated fastest lane
    pub const FAST_FACTOR: f64 = 0.88;
    /// Minimum duration multiplier for every other lane
    pub const SLOW_MIN: f64 = 0.96;
    /// Random spread added on top of `SLOW_MIN`
    pub const SLOW_SPREAD: f64 = 0.22;

    /// Number of start lights
    pub const LIGHT_COUNT: u8 = 5;
    /// Time between start lights (ms)
    pub const LIGHT_INTERVAL_MS: f64 = 650.0;
    /// Delay between the finish and the celebration (ms)
    pub const SETTLE_DELAY_MS: f64 = 450.0;

    /// Forward bias of the follow camera (pixels)
    pub const CAMERA_LEAD: f64 = 160.0;
    /// Camera transition hint for the presentation layer (ms)
    pub const CAMERA_TRANSITION_MS: f64 = 60.0;
    /// Fastest-lane progress past which the finish strip glows
    pub const FINISH_GLOW_THRESHOLD: f64 = 0.9;

    /// Fallback viewport width when the host never reported one
    pub const DEFAULT_VIEW_WIDTH: f64 = 800.0;
}
