//! Competitor roster
//!
//! Teams are static display metadata. Pacing and positions live in the race state.

use serde::{Deserialize, Serialize};

/// A competing team (one lane on the track)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Stable identifier used for selection
    pub id: String,
    /// Display label
    pub name: String,
    /// Accent color (CSS hex)
    pub color: String,
    /// Car artwork URL
    pub car_image: String,
    /// Reward link shown when the player's pick wins
    pub link: String,
}

impl Team {
    pub fn new(id: &str, name: &str, color: &str, car_image: &str, link: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            car_image: car_image.to_string(),
            link: link.to_string(),
        }
    }
}

const CAR_IMAGE_BASE: &str =
    "https://media.formula1.com/image/upload/c_lfill,w_600/q_auto/v1740000000/common/f1/2025";

/// The five-lane default grid
pub fn default_roster() -> Vec<Team> {
    [
        ("redbull", "Red Bull", "#1E90FF", "redbullracing", "https://promo.redbull.com"),
        ("ferrari", "Ferrari", "#DC0000", "ferrari", "https://promo.ferrari.com"),
        ("mercedes", "Mercedes", "#00D2BE", "mercedes", "https://promo.mercedes.com"),
        ("mclaren", "McLaren", "#FF8700", "mclaren", "https://promo.mclaren.com"),
        ("alpine", "Alpine", "#0061FF", "alpine", "https://promo.alpine.com"),
    ]
    .into_iter()
    .map(|(id, name, color, slug, link)| {
        let image = format!("{CAR_IMAGE_BASE}/{slug}/2025{slug}carright.webp");
        Team::new(id, name, color, &image, link)
    })
    .collect()
}

/// Lane index of the team with the given id
pub fn lane_of(roster: &[Team], id: &str) -> Option<usize> {
    roster.iter().position(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let roster = default_roster();
        assert_eq!(roster.len(), 5);
        assert_eq!(lane_of(&roster, "ferrari"), Some(1));
        assert_eq!(lane_of(&roster, "williams"), None);
        assert!(roster[0].car_image.ends_with("redbullracing/2025redbullracingcarright.webp"));
    }
}
