//! Randomized lane pacing
//!
//! Every race assigns each lane a total completion time. One lane is designated
//! fastest; the rest draw from a slower band so the fastest is the likely winner.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Parameters for duration assignment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacingProfile {
    pub base_time_ms: f64,
    pub fast_factor: f64,
    pub slow_min: f64,
    pub slow_spread: f64,
}

impl PacingProfile {
    /// Duration of the fastest lane
    pub fn fast_duration(&self) -> f64 {
        self.base_time_ms * self.fast_factor
    }

    /// Range every other lane's duration falls into (`[min, max)`)
    pub fn slow_range(&self) -> (f64, f64) {
        (
            self.base_time_ms * self.slow_min,
            self.base_time_ms * (self.slow_min + self.slow_spread),
        )
    }
}

/// Pick the designated fastest lane uniformly
pub fn pick_fastest<R: Rng + ?Sized>(count: usize, rng: &mut R) -> usize {
    debug_assert!(count > 0, "cannot pick a lane from an empty grid");
    rng.random_range(0..count)
}

/// Assign a total duration (ms) to each of `count` lanes
pub fn assign_durations<R: Rng + ?Sized>(
    count: usize,
    fastest: usize,
    profile: &PacingProfile,
    rng: &mut R,
) -> Vec<f64> {
    (0..count)
        .map(|lane| {
            if lane == fastest {
                profile.fast_duration()
            } else {
                profile.base_time_ms * (profile.slow_min + rng.random::<f64>() * profile.slow_spread)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_five_lane_example() {
        let profile = Settings::default().pacing();
        let mut rng = Pcg32::seed_from_u64(7);
        let durations = assign_durations(5, 2, &profile, &mut rng);

        assert_eq!(durations.len(), 5);
        assert!((durations[2] - 4928.0).abs() < 1e-9);
        for (lane, &d) in durations.iter().enumerate() {
            if lane != 2 {
                assert!((5376.0..6608.0).contains(&d), "lane {} got {}", lane, d);
            }
        }
    }

    #[test]
    fn test_profile_bounds() {
        let profile = Settings::default().pacing();
        let (min, max) = profile.slow_range();
        assert!((min - 5376.0).abs() < 1e-9);
        assert!((max - 6608.0).abs() < 1e-9);
        assert!(profile.fast_duration() < min);
    }

    #[test]
    fn test_durations_positive_and_fastest_unique() {
        let profile = Settings::default().pacing();
        let mut rng = Pcg32::seed_from_u64(42);
        for count in 1..8 {
            let fastest = pick_fastest(count, &mut rng);
            assert!(fastest < count);
            let durations = assign_durations(count, fastest, &profile, &mut rng);
            assert!(durations.iter().all(|&d| d > 0.0));
            let shortest = durations
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .map(|(i, _)| i);
            assert_eq!(shortest, Some(fastest));
        }
    }

    #[test]
    fn test_same_seed_same_pacing() {
        let profile = Settings::default().pacing();
        let a = assign_durations(5, 0, &profile, &mut Pcg32::seed_from_u64(99));
        let b = assign_durations(5, 0, &profile, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
