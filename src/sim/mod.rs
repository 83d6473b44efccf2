//! Race simulation module
//!
//! All race logic lives here. This module is pure and frame-driven:
//! - Time only enters through the `now` passed to `tick`
//! - Pacing randomness comes from the seeded RNG in `RaceState`
//! - Lanes are evaluated in roster order
//! - No rendering or platform dependencies

pub mod camera;
pub mod lights;
pub mod pacing;
pub mod progress;
pub mod roster;
pub mod state;
pub mod tick;

pub use camera::{CameraTransform, Viewport, follow_offset};
pub use lights::{LightStep, StartLights};
pub use pacing::{PacingProfile, assign_durations, pick_fastest};
pub use progress::{LaneSample, ease_out_cubic, pacing_noise, sample_lane};
pub use roster::{Team, default_roster, lane_of};
pub use state::{
    LaneSnapshot, RaceEvent, RaceOutcome, RacePhase, RaceRun, RaceSnapshot, RaceState,
};
pub use tick::{TickInput, run_to_completion, tick};
