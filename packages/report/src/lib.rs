#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route report aggregation.
//!
//! [`generate_route_report`] is a total function: whatever the caller
//! hands it — empty collections, missing metadata, unparseable
//! distance text — it returns a renderable [`RouteReport`] with
//! defaulted fields rather than failing. The presentation layer always
//! has something to show.

use route_safety_route_models::{
    GeoPoint, PoiCategory, PointOfInterest, RiskLevel, RiskZone, RouteMetadata, RouteReport,
    RouteStats, TrafficLevel, TrafficSample, TrafficStats,
};
use serde::{Deserialize, Serialize};

/// Distance assumed when the metadata distance text is missing or
/// unparseable, so points-per-km never divides by zero.
const FALLBACK_DISTANCE_KM: f64 = 1.0;

/// Vehicle parameters echoed into the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleConfig {
    /// Gross vehicle weight in tonnes. Informational only; nothing is
    /// computed from it.
    pub truck_weight_tonnes: f64,
    /// Maximum permitted speed in km/h.
    pub max_speed_limit_kmph: u32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            // Midpoint of the 30-45 tonne heavy-vehicle class.
            truck_weight_tonnes: 37.5,
            max_speed_limit_kmph: 60,
        }
    }
}

/// Parses the leading number out of a distance text like `"243 km"`.
///
/// Missing, unparseable, or non-positive values fall back to
/// [`FALLBACK_DISTANCE_KM`].
fn distance_value_km(distance_text: Option<&str>) -> f64 {
    distance_text
        .and_then(|text| text.split_whitespace().next())
        .and_then(|token| token.replace(',', "").parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(FALLBACK_DISTANCE_KM)
}

fn count_pois(pois: &[PointOfInterest], category: PoiCategory) -> usize {
    pois.iter().filter(|poi| poi.category == category).count()
}

fn count_zones(zones: &[RiskZone], level: RiskLevel) -> usize {
    zones.iter().filter(|zone| zone.level == level).count()
}

fn count_samples(samples: &[TrafficSample], level: TrafficLevel) -> usize {
    samples.iter().filter(|sample| sample.level == level).count()
}

/// Arithmetic mean of the sample delay factors, `1.0` when no samples
/// exist.
fn average_delay_factor(samples: &[TrafficSample]) -> f64 {
    if samples.is_empty() {
        return 1.0;
    }

    let total: f64 = samples.iter().map(|sample| sample.delay_factor).sum();

    #[allow(clippy::cast_precision_loss)]
    let mean = total / samples.len() as f64;

    if mean.is_finite() { mean } else { 1.0 }
}

/// Fixed safety recommendations parameterized by the report counts.
/// Never empty.
fn safety_recommendations(
    vehicle: &VehicleConfig,
    route: &RouteStats,
) -> Vec<String> {
    let mut recommendations = vec![format!(
        "Maintain speed below {} kmph at all times.",
        vehicle.max_speed_limit_kmph
    )];

    if route.high_risk_zones > 0 {
        recommendations.push(format!(
            "Exercise extreme caution at the {} high-risk zones identified.",
            route.high_risk_zones
        ));
    }

    recommendations
        .push("Reduce speed to 15-30 kmph at sharp turns and intersections.".to_string());

    if route.fuel_stations > 0 {
        recommendations.push(format!(
            "Plan for refueling at the {} fuel stations marked along the route.",
            route.fuel_stations
        ));
    }

    if route.hospitals_along_route > 0 || route.police_stations > 0 {
        recommendations.push(
            "Keep emergency contacts handy for nearby hospitals and police stations.".to_string(),
        );
    }

    recommendations
}

/// Aggregates the analysis outputs into a [`RouteReport`].
///
/// Pure and infallible: counts by category and level, points per km
/// (with a defaulted distance when the metadata cannot be parsed),
/// mean delay factor, and the parameterized recommendation list.
#[must_use]
pub fn generate_route_report(
    points: &[GeoPoint],
    pois: &[PointOfInterest],
    risk_zones: &[RiskZone],
    traffic_samples: &[TrafficSample],
    metadata: &RouteMetadata,
    vehicle: &VehicleConfig,
) -> RouteReport {
    let distance_km = distance_value_km(metadata.distance_text.as_deref());

    #[allow(clippy::cast_precision_loss)]
    let points_per_km = points.len() as f64 / distance_km;

    let route_analysis = RouteStats {
        total_points: points.len(),
        points_per_km,
        high_risk_zones: count_zones(risk_zones, RiskLevel::High),
        medium_risk_zones: count_zones(risk_zones, RiskLevel::Medium),
        hospitals_along_route: count_pois(pois, PoiCategory::Hospital),
        fuel_stations: count_pois(pois, PoiCategory::Fuel),
        police_stations: count_pois(pois, PoiCategory::Police),
    };

    let traffic_analysis = TrafficStats {
        light_traffic_segments: count_samples(traffic_samples, TrafficLevel::Light),
        moderate_traffic_segments: count_samples(traffic_samples, TrafficLevel::Moderate),
        heavy_traffic_segments: count_samples(traffic_samples, TrafficLevel::Heavy),
        average_delay_factor: average_delay_factor(traffic_samples),
    };

    let safety_recommendations = safety_recommendations(vehicle, &route_analysis);

    log::debug!(
        "report: {} points, {} risk zones, {} traffic samples",
        route_analysis.total_points,
        risk_zones.len(),
        traffic_samples.len()
    );

    RouteReport {
        total_distance: metadata
            .distance_text
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        total_duration: metadata
            .duration_text
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        truck_weight_tonnes: vehicle.truck_weight_tonnes,
        max_speed_limit_kmph: vehicle.max_speed_limit_kmph,
        route_analysis,
        traffic_analysis,
        safety_recommendations,
    }
}
