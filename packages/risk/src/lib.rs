#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Multi-factor risk zone identification.
//!
//! Each interior route point is scored independently from three
//! contributions: turn sharpness, proximity to points of interest, and
//! a simulated accident-history draw standing in for unavailable
//! real-world data. Raw contributions are normalized against the
//! maximum attainable raw score to a `[0, 10]` scale and classified as
//! High, Medium, or dropped.
//!
//! Scoring never fails: malformed points or POIs are logged and
//! skipped so one bad item degrades to "no zone reported here" rather
//! than aborting the route.

use rand::Rng;
use route_safety_geometry::{bearing, distance_m, turn_angle};
use route_safety_route_models::{GeoPoint, PoiCategory, PointOfInterest, RiskLevel, RiskZone};
use serde::{Deserialize, Serialize};

/// Factor string recorded when the simulated accident-history draw
/// fires.
const HAZARD_FACTOR: &str = "Historically accident-prone zone (simulated)";

/// Tunables for risk scoring. Defaults are the documented policy; all
/// weights operate on the raw (pre-normalization) scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskConfig {
    /// Turn angles above this (degrees) contribute to the score.
    pub sharp_turn_angle_deg: f64,
    /// The turn contribution is `angle / turn_divisor`.
    pub turn_divisor: f64,
    /// POIs within this great-circle radius (meters) contribute.
    pub poi_radius_m: f64,
    /// Raw weight of a hospital at zero distance.
    pub hospital_weight: f64,
    /// Raw weight of a police station at zero distance.
    pub police_weight: f64,
    /// Raw weight of a fuel station at zero distance.
    pub fuel_weight: f64,
    /// Raw weight of any other POI at zero distance.
    pub other_weight: f64,
    /// Cap on the summed POI contribution at one point; also the POI
    /// term of the normalization bound.
    pub poi_contribution_cap: f64,
    /// Independent per-point probability of the simulated
    /// accident-history contribution. Zero disables the draw entirely.
    pub hazard_probability: f64,
    /// Raw contribution added when the hazard draw fires.
    pub hazard_weight: f64,
    /// Normalized score at or above which a zone is High.
    pub high_threshold: f64,
    /// Normalized score at or above which a zone is Medium; points
    /// below it are dropped.
    pub medium_threshold: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            sharp_turn_angle_deg: 60.0,
            turn_divisor: 30.0,
            poi_radius_m: 500.0,
            hospital_weight: 3.0,
            police_weight: 1.0,
            fuel_weight: 0.5,
            other_weight: 0.25,
            poi_contribution_cap: 5.0,
            hazard_probability: 0.005,
            hazard_weight: 5.0,
            high_threshold: 7.0,
            medium_threshold: 3.0,
        }
    }
}

impl RiskConfig {
    /// Raw zero-distance weight for a POI category.
    #[must_use]
    pub const fn category_weight(&self, category: PoiCategory) -> f64 {
        match category {
            PoiCategory::Hospital => self.hospital_weight,
            PoiCategory::Police => self.police_weight,
            PoiCategory::Fuel => self.fuel_weight,
            PoiCategory::Other => self.other_weight,
        }
    }

    /// Maximum attainable raw score: a 180° turn plus the POI cap
    /// plus the hazard weight. Normalization divides by this.
    #[must_use]
    pub fn max_raw_score(&self) -> f64 {
        let turn_max = if self.turn_divisor > 0.0 {
            180.0 / self.turn_divisor
        } else {
            0.0
        };

        turn_max + self.poi_contribution_cap + self.hazard_weight
    }
}

/// Factor string label for a POI category.
const fn category_label(category: PoiCategory) -> &'static str {
    match category {
        PoiCategory::Hospital => "hospital",
        PoiCategory::Police => "police station",
        PoiCategory::Fuel => "fuel station",
        PoiCategory::Other => "point of interest",
    }
}

/// Turn-sharpness contribution and factor string at one point.
fn turn_factor(
    prev: GeoPoint,
    current: GeoPoint,
    next: GeoPoint,
    config: &RiskConfig,
) -> Option<(f64, String)> {
    let angle = turn_angle(bearing(prev, current), bearing(current, next));

    if angle > config.sharp_turn_angle_deg && config.turn_divisor > 0.0 {
        Some((angle / config.turn_divisor, format!("Sharp turn ({angle:.1}°)")))
    } else {
        None
    }
}

/// Summed, capped POI-proximity contribution at one point, plus one
/// factor string per category encountered (in first-seen order).
///
/// Each POI inside the radius contributes its category weight scaled
/// by `1 - distance / radius`, so closer POIs weigh more. Malformed
/// POIs are skipped with a warning.
fn poi_factor(
    current: GeoPoint,
    pois: &[PointOfInterest],
    config: &RiskConfig,
) -> (f64, Vec<String>) {
    if config.poi_radius_m <= 0.0 {
        return (0.0, Vec::new());
    }

    let mut contribution = 0.0;
    let mut categories_seen: Vec<PoiCategory> = Vec::new();

    for poi in pois {
        if !poi.location.is_finite() {
            log::warn!("skipping POI '{}' with non-finite location", poi.name);
            continue;
        }

        let distance = distance_m(current, poi.location);
        if distance >= config.poi_radius_m {
            continue;
        }

        let proximity = 1.0 - distance / config.poi_radius_m;
        contribution += config.category_weight(poi.category) * proximity;

        if !categories_seen.contains(&poi.category) {
            categories_seen.push(poi.category);
        }
    }

    let factors = categories_seen
        .into_iter()
        .map(|category| format!("Proximity to {}", category_label(category)))
        .collect();

    (contribution.min(config.poi_contribution_cap), factors)
}

/// Identifies risk zones along a densified route.
///
/// Interior points only (the endpoints lack a neighbor for bearing
/// computation). Returned zones all score at least the Medium
/// threshold, in route order; everything below it is dropped, not
/// represented.
pub fn identify_risk_zones(
    points: &[GeoPoint],
    pois: &[PointOfInterest],
    config: &RiskConfig,
    rng: &mut impl Rng,
) -> Vec<RiskZone> {
    let max_raw = config.max_raw_score();
    if max_raw <= 0.0 || !max_raw.is_finite() {
        log::warn!("risk config normalizes to a non-positive bound; no zones reported");
        return Vec::new();
    }

    let mut zones = Vec::new();

    for window in points.windows(3) {
        let (prev, current, next) = (window[0], window[1], window[2]);

        if !prev.is_finite() || !current.is_finite() || !next.is_finite() {
            log::warn!(
                "skipping risk scoring at point with non-finite neighborhood ({}, {})",
                current.latitude,
                current.longitude
            );
            continue;
        }

        let mut raw_score = 0.0;
        let mut factors = Vec::new();

        if let Some((contribution, factor)) = turn_factor(prev, current, next, config) {
            raw_score += contribution;
            factors.push(factor);
        }

        let (poi_contribution, poi_factors) = poi_factor(current, pois, config);
        raw_score += poi_contribution;
        factors.extend(poi_factors);

        if config.hazard_probability > 0.0
            && rng.gen_bool(config.hazard_probability.clamp(0.0, 1.0))
        {
            raw_score += config.hazard_weight;
            factors.push(HAZARD_FACTOR.to_string());
        }

        let score = (raw_score / max_raw * 10.0).clamp(0.0, 10.0);

        let level = if score >= config.high_threshold {
            RiskLevel::High
        } else if score >= config.medium_threshold {
            RiskLevel::Medium
        } else {
            continue;
        };

        zones.push(RiskZone {
            location: current,
            score,
            level,
            factors,
        });
    }

    log::debug!("identified {} risk zones", zones.len());

    zones
}
