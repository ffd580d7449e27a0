#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route analysis orchestration.
//!
//! [`analyze_route`] runs the full pipeline over one route:
//! densification, traffic simulation, risk zone identification, speed
//! advisories, and report aggregation. It is a total function — any
//! input, however degenerate, produces a [`RouteAnalysis`] — and it is
//! stateless: randomness comes in through the caller's [`rand::Rng`],
//! so a seeded generator reproduces a run exactly.

pub mod config;

pub use config::{AnalysisConfig, ConfigError, DensifyConfig};

use rand::Rng;
use route_safety_geometry::{SpeedPolicy, bearing, densify, turn_angle};
use route_safety_report::generate_route_report;
use route_safety_risk::identify_risk_zones;
use route_safety_route_models::{
    GeoPoint, PointOfInterest, RouteAnalysis, RouteMetadata, SpeedAdvisory,
};
use route_safety_traffic::simulate_traffic;
use serde::{Deserialize, Serialize};

/// One route to analyze: the decoded polyline, the places found near
/// it, and the provider metadata. Everything an invocation needs is in
/// here — the analysis holds no handles to any external collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteInput {
    /// Ordered route points (a decoded polyline).
    pub points: Vec<GeoPoint>,
    /// Points of interest near the route, from an external places
    /// lookup.
    pub pois: Vec<PointOfInterest>,
    /// Route metadata from the directions provider.
    pub metadata: RouteMetadata,
}

/// Computes a speed advisory at every interior point with a finite
/// neighborhood.
fn speed_advisories(points: &[GeoPoint], policy: &SpeedPolicy) -> Vec<SpeedAdvisory> {
    let mut advisories = Vec::new();

    for window in points.windows(3) {
        let (prev, current, next) = (window[0], window[1], window[2]);

        if !prev.is_finite() || !current.is_finite() || !next.is_finite() {
            continue;
        }

        let turn_angle_deg = turn_angle(bearing(prev, current), bearing(current, next));

        advisories.push(SpeedAdvisory {
            location: current,
            turn_angle_deg,
            recommended_kmph: policy.recommended_kmph(turn_angle_deg),
        });
    }

    advisories
}

/// Runs the full safety analysis for one route departing at `hour`
/// (0-23).
///
/// The stages run in dependency order: the route is densified first,
/// and the simulated traffic, risk zones, and advisories are all
/// computed over the densified points. Each stage degrades gracefully
/// on malformed input, so the returned [`RouteAnalysis`] is always
/// renderable.
pub fn analyze_route(
    input: &RouteInput,
    hour: u8,
    config: &AnalysisConfig,
    rng: &mut impl Rng,
) -> RouteAnalysis {
    let points = densify(&input.points, config.densify.points_per_km);

    let traffic_samples = simulate_traffic(&points, hour, &config.traffic, rng);
    let risk_zones = identify_risk_zones(&points, &input.pois, &config.risk, rng);
    let speed_advisories = speed_advisories(&points, &config.speed);

    let report = generate_route_report(
        &points,
        &input.pois,
        &risk_zones,
        &traffic_samples,
        &input.metadata,
        &config.vehicle,
    );

    log::info!(
        "analyzed route: {} input points, {} densified, {} risk zones, {} traffic samples",
        input.points.len(),
        points.len(),
        risk_zones.len(),
        traffic_samples.len()
    );

    RouteAnalysis {
        report,
        risk_zones,
        traffic_samples,
        speed_advisories,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand_chacha::ChaCha8Rng;

    /// Disables the hazard draw so results depend only on geometry.
    fn deterministic_config() -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.risk.hazard_probability = 0.0;
        config
    }

    #[test]
    fn near_straight_short_route_raises_no_flags() {
        // A(0,0) -> B(0,0.001) -> C(0,0.002): due east, ~111 m hops.
        let input = RouteInput {
            points: vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 0.001),
                GeoPoint::new(0.0, 0.002),
            ],
            ..RouteInput::default()
        };
        let config = deterministic_config();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let analysis = analyze_route(&input, 12, &config, &mut rng);

        assert!(analysis.risk_zones.is_empty());
        assert!(!analysis.speed_advisories.is_empty());
        for advisory in &analysis.speed_advisories {
            assert!(advisory.turn_angle_deg < 1.0);
            assert_eq!(advisory.recommended_kmph, config.speed.max_kmph);
        }
        assert!(
            !analysis
                .risk_zones
                .iter()
                .any(|zone| zone.factors.iter().any(|f| f.contains("Sharp turn")))
        );
    }

    #[test]
    fn densified_route_keeps_endpoints() {
        let input = RouteInput {
            points: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.09, 0.0)],
            ..RouteInput::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let analysis = analyze_route(&input, 12, &deterministic_config(), &mut rng);

        assert_eq!(analysis.points.first().copied(), Some(input.points[0]));
        assert_eq!(analysis.points.last().copied(), Some(input.points[1]));
        assert!(analysis.points.len() > 100);
        assert_eq!(
            analysis.report.route_analysis.total_points,
            analysis.points.len()
        );
    }

    #[test]
    fn empty_route_still_yields_a_renderable_report() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let analysis = analyze_route(
            &RouteInput::default(),
            8,
            &AnalysisConfig::default(),
            &mut rng,
        );

        assert!(analysis.points.is_empty());
        assert!(analysis.risk_zones.is_empty());
        assert!(analysis.traffic_samples.is_empty());
        assert!(
            (analysis.report.traffic_analysis.average_delay_factor - 1.0).abs() < f64::EPSILON
        );
        assert!(!analysis.report.safety_recommendations.is_empty());
    }

    #[test]
    fn seeded_runs_are_reproducible_end_to_end() {
        let input = RouteInput {
            points: vec![
                GeoPoint::new(28.6139, 77.2090),
                GeoPoint::new(28.7041, 77.1025),
                GeoPoint::new(28.4595, 77.0266),
            ],
            pois: vec![PointOfInterest {
                name: "AIIMS".into(),
                location: GeoPoint::new(28.5672, 77.2100),
                category: route_safety_route_models::PoiCategory::Hospital,
            }],
            metadata: RouteMetadata {
                distance_text: Some("43 km".into()),
                duration_text: Some("1 hour 5 mins".into()),
                departure_hour: Some(9),
            },
        };
        let config = AnalysisConfig::default();

        let mut rng_a = ChaCha8Rng::seed_from_u64(2024);
        let mut rng_b = ChaCha8Rng::seed_from_u64(2024);

        assert_eq!(
            analyze_route(&input, 9, &config, &mut rng_a),
            analyze_route(&input, 9, &config, &mut rng_b)
        );
    }

    #[test]
    fn report_counts_match_collections() {
        let input = RouteInput {
            points: vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 0.01),
                GeoPoint::new(0.0, 0.0),
            ],
            ..RouteInput::default()
        };
        let config = deterministic_config();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let analysis = analyze_route(&input, 3, &config, &mut rng);

        let high = analysis
            .risk_zones
            .iter()
            .filter(|z| z.level == route_safety_route_models::RiskLevel::High)
            .count();
        let medium = analysis.risk_zones.len() - high;

        assert_eq!(analysis.report.route_analysis.high_risk_zones, high);
        assert_eq!(analysis.report.route_analysis.medium_risk_zones, medium);
    }
}
