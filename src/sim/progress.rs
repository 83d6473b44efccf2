//! Per-lane progress sampling
//!
//! Position is a pure function of elapsed time: cubic ease-out of linear progress,
//! plus a pair of sinusoids that fade out toward the finish.

use serde::{Deserialize, Serialize};

/// Primary wobble: period divisor (ms) and amplitude
const WAVE_A_PERIOD: f64 = 140.0;
const WAVE_A_AMPLITUDE: f64 = 0.04;
/// Secondary wobble
const WAVE_B_PERIOD: f64 = 330.0;
const WAVE_B_AMPLITUDE: f64 = 0.02;

/// One lane at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneSample {
    /// Unperturbed `min(1, t/d)`
    pub linear: f64,
    /// Eased linear progress
    pub eased: f64,
    /// Eased progress plus noise, clamped to [0, 1]
    pub rendered: f64,
    /// Rendered progress scaled to the drivable length
    pub position: f64,
    /// Linear progress reached 1 (noise-independent)
    pub finished: bool,
}

/// Cubic ease-out: fast launch, smooth arrival
#[inline]
pub fn ease_out_cubic(p: f64) -> f64 {
    1.0 - (1.0 - p).powi(3)
}

/// Pacing wobble for a lane; vanishes as `linear` reaches 1
#[inline]
pub fn pacing_noise(elapsed_ms: f64, linear: f64, lane: usize) -> f64 {
    let lane = lane as f64;
    let damping = 1.0 - linear;
    (elapsed_ms / WAVE_A_PERIOD + lane).sin() * WAVE_A_AMPLITUDE * damping
        + (elapsed_ms / WAVE_B_PERIOD + lane * 2.0).sin() * WAVE_B_AMPLITUDE * damping
}

/// Sample a lane with total duration `duration_ms` at `elapsed_ms`
pub fn sample_lane(elapsed_ms: f64, duration_ms: f64, lane: usize, drivable: f64) -> LaneSample {
    debug_assert!(duration_ms > 0.0, "lane duration must be positive");
    let elapsed_ms = elapsed_ms.max(0.0);

    let linear = (elapsed_ms / duration_ms).min(1.0);
    let eased = ease_out_cubic(linear);
    let rendered = (eased + pacing_noise(elapsed_ms, linear, lane)).clamp(0.0, 1.0);

    LaneSample {
        linear,
        eased,
        rendered,
        position: rendered * drivable,
        finished: linear >= 1.0,
    }
}
