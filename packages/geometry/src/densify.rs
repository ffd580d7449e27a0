//! Route densification: expanding a sparse polyline into a denser one
//! by linear interpolation in latitude/longitude space.
//!
//! Linear lat/lng interpolation is an accepted approximation for the
//! short segments produced by decoded polylines; great-circle
//! interpolation is deliberately not used.

use route_safety_route_models::GeoPoint;

use crate::distance_km;

/// Expands `points` so that segments longer than `1 / points_per_km`
/// km gain `floor(distance_km * points_per_km) - 1` evenly spaced
/// intermediate points.
///
/// Every input point is preserved, in order, so the output endpoints
/// equal the input endpoints and the output is never shorter than the
/// input. Inputs with fewer than 2 points, or a non-positive density,
/// are returned unchanged. A segment with malformed coordinates
/// contributes no synthetic points but both its endpoints still
/// appear; densification never fails.
#[must_use]
pub fn densify(points: &[GeoPoint], points_per_km: f64) -> Vec<GeoPoint> {
    if points.len() < 2 || !points_per_km.is_finite() || points_per_km <= 0.0 {
        return points.to_vec();
    }

    let mut densified = Vec::with_capacity(points.len());
    densified.push(points[0]);

    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);

        if start.is_finite() && end.is_finite() {
            let segment_km = distance_km(start, end);

            if segment_km.is_finite() && segment_km > 1.0 / points_per_km {
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss
                )]
                let num_points = (segment_km * points_per_km).floor() as usize;

                for j in 1..num_points {
                    #[allow(clippy::cast_precision_loss)]
                    let ratio = j as f64 / num_points as f64;

                    densified.push(GeoPoint::new(
                        start.latitude + (end.latitude - start.latitude) * ratio,
                        start.longitude + (end.longitude - start.longitude) * ratio,
                    ));
                }
            }
        } else {
            log::warn!(
                "skipping interpolation of segment with non-finite coordinates: \
                 ({}, {}) -> ({}, {})",
                start.latitude,
                start.longitude,
                end.latitude,
                end.longitude
            );
        }

        densified.push(end);
    }

    densified
}
