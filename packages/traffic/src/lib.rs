#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Monte-Carlo traffic congestion simulation.
//!
//! No real traffic feed exists for the routes this system analyzes, so
//! congestion is simulated: the day is partitioned into bands (morning
//! and evening peak, daytime, off-peak), each band carries a
//! probability distribution over the three [`TrafficLevel`]s, and one
//! level is drawn independently per sampled route point. Randomness is
//! injected through a [`rand::Rng`] so that seeded runs are exactly
//! reproducible.

use rand::Rng;
use route_safety_route_models::{GeoPoint, TrafficLevel, TrafficSample};
use serde::{Deserialize, Serialize};

/// Probability of drawing each congestion level within a day band.
///
/// The three fields are expected to sum to 1.0; draws fall through to
/// heavy when they do not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProbabilities {
    /// Probability of light traffic.
    pub light: f64,
    /// Probability of moderate traffic.
    pub moderate: f64,
    /// Probability of heavy traffic.
    pub heavy: f64,
}

/// An inclusive range of hours within one day, e.g. `8..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourRange {
    /// First hour of the band (0-23).
    pub start: u8,
    /// Last hour of the band, inclusive (0-23).
    pub end: u8,
}

impl HourRange {
    /// Whether `hour` falls inside this band.
    #[must_use]
    pub const fn contains(self, hour: u8) -> bool {
        self.start <= hour && hour <= self.end
    }
}

/// Fixed delay factor (travel-time multiplier) per congestion level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayFactors {
    /// Multiplier for light traffic.
    pub light: f64,
    /// Multiplier for moderate traffic.
    pub moderate: f64,
    /// Multiplier for heavy traffic.
    pub heavy: f64,
}

impl DelayFactors {
    /// Delay factor for one congestion level.
    #[must_use]
    pub const fn for_level(self, level: TrafficLevel) -> f64 {
        match level {
            TrafficLevel::Light => self.light,
            TrafficLevel::Moderate => self.moderate,
            TrafficLevel::Heavy => self.heavy,
        }
    }
}

/// Tunables for the traffic simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrafficConfig {
    /// Every Nth densified point is sampled; routes with at most this
    /// many points are sampled in full. Bounds output size, not a
    /// correctness-critical value.
    pub sample_stride: usize,
    /// Morning peak band.
    pub morning_peak: HourRange,
    /// Evening peak band.
    pub evening_peak: HourRange,
    /// Daytime band between the peaks.
    pub daytime: HourRange,
    /// Level distribution during either peak band.
    pub peak_probabilities: LevelProbabilities,
    /// Level distribution during the daytime band.
    pub daytime_probabilities: LevelProbabilities,
    /// Level distribution outside all bands.
    pub off_peak_probabilities: LevelProbabilities,
    /// Delay factor per level.
    pub delay_factors: DelayFactors,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            sample_stride: 5,
            morning_peak: HourRange { start: 8, end: 10 },
            evening_peak: HourRange { start: 17, end: 19 },
            daytime: HourRange { start: 11, end: 16 },
            peak_probabilities: LevelProbabilities {
                light: 0.1,
                moderate: 0.4,
                heavy: 0.5,
            },
            daytime_probabilities: LevelProbabilities {
                light: 0.3,
                moderate: 0.5,
                heavy: 0.2,
            },
            off_peak_probabilities: LevelProbabilities {
                light: 0.6,
                moderate: 0.3,
                heavy: 0.1,
            },
            delay_factors: DelayFactors {
                light: 1.0,
                moderate: 1.3,
                heavy: 1.8,
            },
        }
    }
}

impl TrafficConfig {
    /// The level distribution in effect at `hour` (0-23; larger values
    /// wrap into the day).
    #[must_use]
    pub fn probabilities_for_hour(&self, hour: u8) -> LevelProbabilities {
        let hour = hour % 24;

        if self.morning_peak.contains(hour) || self.evening_peak.contains(hour) {
            self.peak_probabilities
        } else if self.daytime.contains(hour) {
            self.daytime_probabilities
        } else {
            self.off_peak_probabilities
        }
    }
}

/// Draws one congestion level from a band distribution.
fn draw_level(probabilities: LevelProbabilities, rng: &mut impl Rng) -> TrafficLevel {
    let roll: f64 = rng.gen_range(0.0..1.0);

    if roll < probabilities.light {
        TrafficLevel::Light
    } else if roll < probabilities.light + probabilities.moderate {
        TrafficLevel::Moderate
    } else {
        TrafficLevel::Heavy
    }
}

/// Simulates congestion along `points` for a departure at `hour`.
///
/// One sample per Nth point (see [`TrafficConfig::sample_stride`]),
/// each drawn independently — no spatial or temporal correlation is
/// modeled. Points with non-finite coordinates are skipped with a
/// warning; the simulation itself never fails.
pub fn simulate_traffic(
    points: &[GeoPoint],
    hour: u8,
    config: &TrafficConfig,
    rng: &mut impl Rng,
) -> Vec<TrafficSample> {
    let probabilities = config.probabilities_for_hour(hour);
    let stride = config.sample_stride.max(1);

    let sampled: Vec<GeoPoint> = if points.len() > stride {
        points.iter().copied().step_by(stride).collect()
    } else {
        points.to_vec()
    };

    let mut samples = Vec::with_capacity(sampled.len());

    for point in sampled {
        if !point.is_finite() {
            log::warn!(
                "skipping traffic sample at non-finite point ({}, {})",
                point.latitude,
                point.longitude
            );
            continue;
        }

        let level = draw_level(probabilities, rng);

        samples.push(TrafficSample {
            location: point,
            level,
            delay_factor: config.delay_factors.for_level(level),
        });
    }

    log::debug!("simulated {} traffic samples at hour {hour}", samples.len());

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand_chacha::ChaCha8Rng;

    fn straight_route(len: usize) -> Vec<GeoPoint> {
        (0..len)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let longitude = 0.001 * i as f64;
                GeoPoint::new(0.0, longitude)
            })
            .collect()
    }

    #[test]
    fn peak_hours_use_peak_probabilities() {
        let config = TrafficConfig::default();

        for hour in [8, 9, 10, 17, 18, 19] {
            assert_eq!(
                config.probabilities_for_hour(hour),
                config.peak_probabilities
            );
        }
        for hour in [11, 14, 16] {
            assert_eq!(
                config.probabilities_for_hour(hour),
                config.daytime_probabilities
            );
        }
        for hour in [0, 3, 7, 21, 23] {
            assert_eq!(
                config.probabilities_for_hour(hour),
                config.off_peak_probabilities
            );
        }
    }

    #[test]
    fn stride_bounds_sample_count() {
        let config = TrafficConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let samples = simulate_traffic(&straight_route(12), 3, &config, &mut rng);
        // Indices 0, 5, 10.
        assert_eq!(samples.len(), 3);
    }

    #[test]
    fn short_routes_are_sampled_in_full() {
        let config = TrafficConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let samples = simulate_traffic(&straight_route(4), 3, &config, &mut rng);
        assert_eq!(samples.len(), 4);
    }

    #[test]
    fn empty_route_yields_no_samples() {
        let config = TrafficConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        assert!(simulate_traffic(&[], 3, &config, &mut rng).is_empty());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = TrafficConfig::default();
        let route = straight_route(60);

        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);

        assert_eq!(
            simulate_traffic(&route, 9, &config, &mut rng_a),
            simulate_traffic(&route, 9, &config, &mut rng_b)
        );
    }

    #[test]
    fn delay_factor_matches_drawn_level() {
        let config = TrafficConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for sample in simulate_traffic(&straight_route(120), 18, &config, &mut rng) {
            assert!(
                (sample.delay_factor - config.delay_factors.for_level(sample.level)).abs()
                    < f64::EPSILON
            );
            assert!(sample.delay_factor >= 1.0);
        }
    }

    #[test]
    fn certain_distribution_always_draws_that_level() {
        let config = TrafficConfig {
            off_peak_probabilities: LevelProbabilities {
                light: 1.0,
                moderate: 0.0,
                heavy: 0.0,
            },
            ..TrafficConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for sample in simulate_traffic(&straight_route(40), 2, &config, &mut rng) {
            assert_eq!(sample.level, TrafficLevel::Light);
        }
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let config = TrafficConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let points = [GeoPoint::new(0.0, 0.0), GeoPoint::new(f64::NAN, 1.0)];
        let samples = simulate_traffic(&points, 12, &config, &mut rng);
        assert_eq!(samples.len(), 1);
    }
}
