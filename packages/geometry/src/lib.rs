#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route geometry primitives: compass bearing, turn angle, great-circle
//! distance, the turn-angle speed policy, and route densification.
//!
//! Every function here fails closed rather than propagating numerical
//! garbage: non-finite inputs yield `0.0` (or the unchanged input for
//! [`densify`]), so a single malformed coordinate can never poison an
//! entire route analysis.

pub mod densify;
pub mod speed;

pub use densify::densify;
pub use speed::SpeedPolicy;

use geo::{Distance, Haversine, Point};
use route_safety_route_models::GeoPoint;

/// Initial compass bearing from `a` to `b` in degrees, `[0, 360)`.
///
/// Standard spherical bearing (atan2 of the great-circle components).
/// Non-finite inputs, or a non-finite intermediate, yield `0.0`; for
/// identical points the bearing is `0.0`.
#[must_use]
pub fn bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return 0.0;
    }

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();

    let degrees = y.atan2(x).to_degrees();

    if degrees.is_finite() {
        (degrees + 360.0) % 360.0
    } else {
        0.0
    }
}

/// Absolute turn angle between two bearings in degrees, `[0, 180]`.
///
/// This is the deviation from "straight ahead": differences above 180
/// are reflected (`min(diff, 360 - diff)`), and no left/right sign is
/// kept. Non-finite bearings yield `0.0`.
#[must_use]
pub fn turn_angle(prev_bearing: f64, next_bearing: f64) -> f64 {
    if !prev_bearing.is_finite() || !next_bearing.is_finite() {
        return 0.0;
    }

    let diff = (next_bearing - prev_bearing).abs() % 360.0;
    diff.min(360.0 - diff)
}

/// Great-circle (Haversine) distance between two points in meters.
///
/// Non-finite inputs yield `0.0`.
#[must_use]
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return 0.0;
    }

    let meters = Haversine.distance(
        Point::new(a.longitude, a.latitude),
        Point::new(b.longitude, b.latitude),
    );

    if meters.is_finite() { meters } else { 0.0 }
}

/// Great-circle distance between two points in kilometres.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    distance_m(a, b) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);

        assert!((bearing(origin, GeoPoint::new(1.0, 0.0)) - 0.0).abs() < 1e-6);
        assert!((bearing(origin, GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-6);
        assert!((bearing(origin, GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-6);
        assert!((bearing(origin, GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-6);
    }

    #[test]
    fn bearing_identical_points_is_zero() {
        let p = GeoPoint::new(28.6139, 77.2090);
        assert!((bearing(p, p)).abs() < f64::EPSILON);
    }

    #[test]
    fn bearing_always_in_range_for_finite_input() {
        let points = [
            GeoPoint::new(89.9, 179.9),
            GeoPoint::new(-89.9, -179.9),
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(45.0, -120.0),
            GeoPoint::new(-33.0, 151.0),
        ];

        for a in points {
            for b in points {
                let deg = bearing(a, b);
                assert!(deg.is_finite());
                assert!((0.0..360.0).contains(&deg), "bearing {deg} out of range");
            }
        }
    }

    #[test]
    fn bearing_fails_closed_on_non_finite_input() {
        let good = GeoPoint::new(10.0, 10.0);
        let bad = GeoPoint::new(f64::NAN, 10.0);

        assert!((bearing(bad, good)).abs() < f64::EPSILON);
        assert!((bearing(good, GeoPoint::new(10.0, f64::INFINITY))).abs() < f64::EPSILON);
    }

    #[test]
    fn turn_angle_is_symmetric() {
        for (x, y) in [(10.0, 350.0), (0.0, 180.0), (45.0, 90.0), (300.0, 20.0)] {
            assert!((turn_angle(x, y) - turn_angle(y, x)).abs() < 1e-9);
        }
    }

    #[test]
    fn turn_angle_wraps_above_180() {
        assert!((turn_angle(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((turn_angle(10.0, 350.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn turn_angle_always_in_range() {
        let mut b = 0.0;
        while b < 360.0 {
            let mut c = 0.0;
            while c < 360.0 {
                let angle = turn_angle(b, c);
                assert!((0.0..=180.0).contains(&angle));
                c += 7.3;
            }
            b += 7.3;
        }
    }

    #[test]
    fn turn_angle_non_finite_is_zero() {
        assert!((turn_angle(f64::NAN, 90.0)).abs() < f64::EPSILON);
        assert!((turn_angle(90.0, f64::INFINITY)).abs() < f64::EPSILON);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 111.0).abs() < 1.0, "unexpected distance {d}");
    }

    #[test]
    fn distance_non_finite_is_zero() {
        let good = GeoPoint::new(0.0, 0.0);
        let bad = GeoPoint::new(f64::NAN, 0.0);
        assert!((distance_m(good, bad)).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_identical_points_is_zero() {
        let p = GeoPoint::new(12.9716, 77.5946);
        assert!(distance_m(p, p).abs() < 1e-9);
    }
}
