#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared data model for heavy-vehicle route safety analysis.
//!
//! These types flow between the geometry, traffic, risk, and report
//! packages. Everything here is a plain value: entities are created
//! fresh for a single analysis run and owned by the returned
//! [`RouteAnalysis`] — nothing persists between invocations.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A geographic point in degrees (WGS-84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point from latitude/longitude degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are finite numbers.
    ///
    /// Malformed points (NaN or infinite coordinates) are skipped by
    /// every consumer rather than propagated into downstream math.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Category of a point of interest along the route.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PoiCategory {
    /// Hospital or other medical facility.
    Hospital,
    /// Police station.
    Police,
    /// Fuel station.
    Fuel,
    /// Any other place category.
    Other,
}

/// A point of interest near the route, produced by an external places
/// lookup and consumed read-only by the risk zone identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    /// Human-readable place name.
    pub name: String,
    /// Place location.
    pub location: GeoPoint,
    /// Place category.
    pub category: PoiCategory,
}

/// Simulated congestion level at a sampled route point.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TrafficLevel {
    /// Free-flowing traffic.
    Light,
    /// Noticeable congestion.
    Moderate,
    /// Severe congestion.
    Heavy,
}

/// One simulated congestion sample along the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSample {
    /// Sampled route point.
    pub location: GeoPoint,
    /// Drawn congestion level.
    pub level: TrafficLevel,
    /// Travel-time multiplier for this level, always >= 1.0.
    pub delay_factor: f64,
}

/// Reported severity of a risk zone.
///
/// Points scoring below the Medium threshold are dropped entirely, so
/// there is no "low" variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Score at or above the medium threshold.
    Medium,
    /// Score at or above the high threshold.
    High,
}

/// A flagged hazardous point on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskZone {
    /// Route point the zone is anchored at.
    pub location: GeoPoint,
    /// Normalized risk score in `[0, 10]`.
    pub score: f64,
    /// Severity classification derived from the score.
    pub level: RiskLevel,
    /// Ordered, human-readable contributing causes
    /// (e.g. `"Sharp turn (74.3°)"`).
    pub factors: Vec<String>,
}

/// Recommended speed at an interior route point, derived from the turn
/// angle between its incoming and outgoing segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedAdvisory {
    /// Route point the advisory applies to.
    pub location: GeoPoint,
    /// Deviation from straight ahead in degrees, `[0, 180]`.
    pub turn_angle_deg: f64,
    /// Recommended speed in km/h.
    pub recommended_kmph: u32,
}

/// Free-text route metadata as delivered by an external directions
/// provider, plus the planned departure hour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetadata {
    /// Total distance text (e.g. `"243 km"`).
    pub distance_text: Option<String>,
    /// Total duration text (e.g. `"4 hours 12 mins"`).
    pub duration_text: Option<String>,
    /// Planned departure hour of day (0-23). When absent the caller
    /// supplies the current hour.
    pub departure_hour: Option<u8>,
}

/// Point and risk-zone statistics over the analyzed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStats {
    /// Number of points after densification.
    pub total_points: usize,
    /// Points per kilometre of route.
    pub points_per_km: f64,
    /// Count of high-severity risk zones.
    pub high_risk_zones: usize,
    /// Count of medium-severity risk zones.
    pub medium_risk_zones: usize,
    /// Hospitals along the route.
    pub hospitals_along_route: usize,
    /// Fuel stations along the route.
    pub fuel_stations: usize,
    /// Police stations along the route.
    pub police_stations: usize,
}

/// Simulated congestion statistics over the analyzed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficStats {
    /// Samples that drew light traffic.
    pub light_traffic_segments: usize,
    /// Samples that drew moderate traffic.
    pub moderate_traffic_segments: usize,
    /// Samples that drew heavy traffic.
    pub heavy_traffic_segments: usize,
    /// Arithmetic mean of sample delay factors, 1.0 when no samples
    /// exist.
    pub average_delay_factor: f64,
}

/// Aggregated safety report for one analyzed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteReport {
    /// Distance text echoed from the route metadata (`"N/A"` when
    /// absent).
    pub total_distance: String,
    /// Duration text echoed from the route metadata (`"N/A"` when
    /// absent).
    pub total_duration: String,
    /// Vehicle weight in tonnes (informational only).
    pub truck_weight_tonnes: f64,
    /// Maximum permitted speed in km/h.
    pub max_speed_limit_kmph: u32,
    /// Point and risk statistics.
    pub route_analysis: RouteStats,
    /// Congestion statistics.
    pub traffic_analysis: TrafficStats,
    /// Count-parameterized safety recommendations; never empty.
    pub safety_recommendations: Vec<String>,
}

/// Full result bundle for one analysis run, handed to the presentation
/// layer. The core defines no wire format of its own; callers decide
/// how to serialize or store this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAnalysis {
    /// Aggregated report.
    pub report: RouteReport,
    /// Flagged risk zones, in route order.
    pub risk_zones: Vec<RiskZone>,
    /// Simulated congestion samples, in route order.
    pub traffic_samples: Vec<TrafficSample>,
    /// Per-interior-point speed advisories, in route order.
    pub speed_advisories: Vec<SpeedAdvisory>,
    /// The densified route the assessment was computed over.
    pub points: Vec<GeoPoint>,
}
