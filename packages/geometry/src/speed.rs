//! Recommended-speed policy for heavy vehicles, as a step function of
//! the turn angle at a point.

use serde::{Deserialize, Serialize};

/// Turn-angle speed policy table.
///
/// `recommended_kmph` is monotonically non-increasing in the angle as
/// long as the breakpoints and speeds are each ordered, which the
/// defaults are. The default table matches the established heavy-
/// vehicle policy: straight/slight curves run at the full speed limit,
/// U-turn-grade angles drop to a crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeedPolicy {
    /// Maximum permitted speed in km/h, used at or below
    /// `slight_turn_max_deg`.
    pub max_kmph: u32,
    /// Speed for moderate turns in km/h.
    pub moderate_kmph: u32,
    /// Speed for sharp turns in km/h.
    pub sharp_kmph: u32,
    /// Crawl speed for extreme turns and U-turns in km/h.
    pub crawl_kmph: u32,
    /// Angles at or below this are treated as straight road (degrees).
    pub slight_turn_max_deg: f64,
    /// Upper bound of the moderate-turn band (degrees).
    pub moderate_turn_max_deg: f64,
    /// Upper bound of the sharp-turn band (degrees); above it the
    /// crawl speed applies.
    pub sharp_turn_max_deg: f64,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self {
            max_kmph: 60,
            moderate_kmph: 35,
            sharp_kmph: 20,
            crawl_kmph: 10,
            slight_turn_max_deg: 20.0,
            moderate_turn_max_deg: 45.0,
            sharp_turn_max_deg: 90.0,
        }
    }
}

impl SpeedPolicy {
    /// Recommended speed in km/h for a turn of `turn_angle_deg`.
    ///
    /// A non-finite angle is treated as an extreme turn and yields the
    /// crawl speed.
    #[must_use]
    pub fn recommended_kmph(&self, turn_angle_deg: f64) -> u32 {
        if !turn_angle_deg.is_finite() || turn_angle_deg > self.sharp_turn_max_deg {
            self.crawl_kmph
        } else if turn_angle_deg > self.moderate_turn_max_deg {
            self.sharp_kmph
        } else if turn_angle_deg > self.slight_turn_max_deg {
            self.moderate_kmph
        } else {
            self.max_kmph
        }
    }
}
