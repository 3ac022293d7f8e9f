//! Great-circle distance and geofence containment.
//!
//! Coordinates are decimal degrees; distances use the haversine formula on
//! a spherical Earth. Geofence checks are advisory: a point outside the
//! fence is flagged by the evaluators, never rejected.

use crate::models::{Coordinate, GeofenceConfig};

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Computes the great-circle distance between two coordinates in meters.
///
/// Inputs are decimal degrees and are converted to radians internally.
/// The function is total: any pair of finite coordinates yields a
/// non-negative distance. NaN or out-of-range coordinates are a caller
/// contract violation and are not checked here.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::distance_meters;
/// use attendance_engine::models::Coordinate;
///
/// let office = Coordinate { latitude: -6.2088, longitude: 106.8456 };
/// assert_eq!(distance_meters(office, office), 0.0);
/// ```
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Returns true iff the point lies at or within the fence radius of the
/// fence center.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::is_within_geofence;
/// use attendance_engine::models::{Coordinate, GeofenceConfig};
///
/// let fence = GeofenceConfig {
///     center: Coordinate { latitude: -6.2088, longitude: 106.8456 },
///     radius_meters: 100.0,
/// };
/// assert!(is_within_geofence(fence.center, &fence));
/// ```
pub fn is_within_geofence(point: Coordinate, fence: &GeofenceConfig) -> bool {
    distance_meters(point, fence.center) <= fence.radius_meters
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate { latitude, longitude }
    }

    // One degree of latitude along a meridian: 2 * pi * R / 360.
    const METERS_PER_DEGREE: f64 = 111_194.92664455873;

    #[test]
    fn test_distance_zero_for_identical_points() {
        let p = coord(-6.2088, 106.8456);
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude_at_equator() {
        let a = coord(0.0, 0.0);
        let b = coord(1.0, 0.0);
        let d = distance_meters(a, b);
        assert!((d - METERS_PER_DEGREE).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_known_city_pair() {
        // Jakarta (Monas) to Bandung (Gedung Sate), roughly 119 km.
        let jakarta = coord(-6.1754, 106.8272);
        let bandung = coord(-6.9025, 107.6187);
        let d = distance_meters(jakarta, bandung);
        assert!((117_000.0..121_000.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_antipodal_points_near_half_circumference() {
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 180.0);
        let d = distance_meters(a, b);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - half_circumference).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_point_on_fence_boundary_is_within() {
        let center = coord(0.0, 0.0);
        let point = coord(0.001, 0.0); // ~111.19 m north
        let d = distance_meters(point, center);
        let fence = GeofenceConfig {
            center,
            radius_meters: d,
        };
        assert!(is_within_geofence(point, &fence));

        let tighter = GeofenceConfig {
            center,
            radius_meters: d - 0.5,
        };
        assert!(!is_within_geofence(point, &tighter));
    }

    #[test]
    fn test_fence_a_few_meters_off() {
        let fence = GeofenceConfig {
            center: coord(-6.2088, 106.8456),
            radius_meters: 100.0,
        };
        // ~55 m north of center
        assert!(is_within_geofence(coord(-6.20830, 106.8456), &fence));
        // ~1.1 km north of center
        assert!(!is_within_geofence(coord(-6.1988, 106.8456), &fence));
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(
            lat_a in -85.0f64..85.0,
            lon_a in -180.0f64..180.0,
            lat_b in -85.0f64..85.0,
            lon_b in -180.0f64..180.0,
        ) {
            let a = coord(lat_a, lon_a);
            let b = coord(lat_b, lon_b);
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            prop_assert!((ab - ba).abs() < 1e-6, "ab={ab} ba={ba}");
        }

        #[test]
        fn prop_distance_is_non_negative(
            lat_a in -85.0f64..85.0,
            lon_a in -180.0f64..180.0,
            lat_b in -85.0f64..85.0,
            lon_b in -180.0f64..180.0,
        ) {
            prop_assert!(distance_meters(coord(lat_a, lon_a), coord(lat_b, lon_b)) >= 0.0);
        }

        #[test]
        fn prop_distance_to_self_is_zero(
            lat in -85.0f64..85.0,
            lon in -180.0f64..180.0,
        ) {
            let p = coord(lat, lon);
            prop_assert!(distance_meters(p, p).abs() < 1e-9);
        }
    }
}
