//! # Geodesic path generator
//!
//! Great-circle routing on a spherical Earth: haversine distance, forward
//! azimuth, and evenly spaced waypoints obtained by spherical linear
//! interpolation over unit vectors.
//!
//! Downstream consumers must not assume canonical longitude wrapping: after
//! the antimeridian correction pass, waypoint longitudes are intentionally
//! left continuous rather than reduced into [-180, 180], so a route crossing
//! the date line plots without a 360 degree jump.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Kilometer, Radian, EARTH_RADIUS_KM, MAX_POINT_COUNT, RADEG};
use crate::geo::{normalize_degrees, GeoPoint};
use crate::sunpath_errors::SunpathError;

/// Angular separations below this are treated as coincident endpoints
const DEGENERATE_ANGLE_RAD: f64 = 1e-12;

/// One point along a great-circle route.
///
/// `latitude`/`longitude` are raw degrees; longitude may sit outside
/// [-180, 180] after antimeridian correction. `distance_km` is cumulative
/// from the route origin and non-decreasing along the sequence; `bearing`
/// points toward the next waypoint (the final waypoint repeats the bearing
/// of the last segment).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub latitude: Degree,
    pub longitude: Degree,
    pub distance_km: Kilometer,
    pub bearing: Degree,
}

/// Great-circle distance between two points, in kilometers, via the
/// haversine formula on a sphere of mean radius 6371 km.
pub fn haversine_km(origin: &GeoPoint, destination: &GeoPoint) -> Kilometer {
    central_angle(origin, destination) * EARTH_RADIUS_KM
}

/// Central angle between two surface points, in radians.
fn central_angle(origin: &GeoPoint, destination: &GeoPoint) -> Radian {
    let dlat = destination.latitude_rad() - origin.latitude_rad();
    let dlon = destination.longitude_rad() - origin.longitude_rad();

    let h = (dlat / 2.0).sin().powi(2)
        + origin.latitude_rad().cos() * destination.latitude_rad().cos() * (dlon / 2.0).sin().powi(2);

    2.0 * h.sqrt().clamp(-1.0, 1.0).asin()
}

/// Initial forward bearing from `origin` toward `destination`, in compass
/// degrees [0, 360).
pub fn initial_bearing(origin: &GeoPoint, destination: &GeoPoint) -> Degree {
    bearing_between(
        origin.latitude_rad(),
        origin.longitude_rad(),
        destination.latitude_rad(),
        destination.longitude_rad(),
    )
}

fn bearing_between(lat1: Radian, lon1: Radian, lat2: Radian, lon2: Radian) -> Degree {
    let dlon = lon2 - lon1;
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    normalize_degrees(y.atan2(x) / RADEG)
}

/// Unit vector on the sphere for a latitude/longitude pair in radians.
fn unit_vector(lat: Radian, lon: Radian) -> Vector3<f64> {
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Back from a unit vector to (latitude, longitude) in radians.
fn from_unit_vector(v: &Vector3<f64>) -> (Radian, Radian) {
    (v.z.clamp(-1.0, 1.0).asin(), v.y.atan2(v.x))
}

/// Generate `segments + 1` waypoints along the great circle from `origin`
/// to `destination`, endpoints included.
///
/// Arguments
/// ---------
/// * `origin`, `destination`: validated route endpoints
/// * `segments`: number of route segments; values above
///   [`MAX_POINT_COUNT`] are clamped to bound total work
///
/// Return
/// ------
/// * the ordered waypoint sequence, or [`SunpathError::InvalidPointCount`]
///   if `segments` is zero.
///
/// Remarks
/// -------
/// * Intermediate points come from spherical linear interpolation over unit
///   vectors; when the endpoints coincide the interpolation degenerates to
///   repeating the origin instead of dividing by `sin(δ) ≈ 0`.
/// * A final pass unwraps longitudes so consecutive deltas never exceed
///   ±180 degrees (see module docs).
pub fn waypoints(
    origin: &GeoPoint,
    destination: &GeoPoint,
    segments: usize,
) -> Result<Vec<Waypoint>, SunpathError> {
    if segments == 0 {
        return Err(SunpathError::InvalidPointCount(segments));
    }
    let segments = segments.min(MAX_POINT_COUNT);

    let delta = central_angle(origin, destination);
    let total_km = delta * EARTH_RADIUS_KM;

    let a = unit_vector(origin.latitude_rad(), origin.longitude_rad());
    let b = unit_vector(destination.latitude_rad(), destination.longitude_rad());

    // Positions first, in canonical degrees
    let mut positions: Vec<(Degree, Degree)> = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let f = i as f64 / segments as f64;
        let v = if delta < DEGENERATE_ANGLE_RAD {
            a
        } else {
            (a * ((1.0 - f) * delta).sin() + b * (f * delta).sin()) / delta.sin()
        };
        let (lat, lon) = from_unit_vector(&v);
        positions.push((lat / RADEG, lon / RADEG));
    }

    // Forward bearing toward the next point; the last waypoint repeats the
    // bearing of the preceding segment.
    let mut points: Vec<Waypoint> = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let (lat, lon) = positions[i];
        let bearing = if i < segments {
            let (lat2, lon2) = positions[i + 1];
            bearing_between(lat * RADEG, lon * RADEG, lat2 * RADEG, lon2 * RADEG)
        } else {
            points[i - 1].bearing
        };
        points.push(Waypoint {
            latitude: lat,
            longitude: lon,
            distance_km: total_km * i as f64 / segments as f64,
            bearing,
        });
    }

    unwrap_antimeridian(&mut points);
    Ok(points)
}

/// Keep consecutive longitudes continuous across the antimeridian by adding
/// or subtracting full turns whenever the delta to the previous waypoint
/// exceeds ±180 degrees.
fn unwrap_antimeridian(points: &mut [Waypoint]) {
    for i in 1..points.len() {
        let mut delta = points[i].longitude - points[i - 1].longitude;
        while delta > 180.0 {
            points[i].longitude -= 360.0;
            delta -= 360.0;
        }
        while delta < -180.0 {
            points[i].longitude += 360.0;
            delta += 360.0;
        }
    }
}

#[cfg(test)]
mod geodesic_test {
    use super::*;

    fn lax() -> GeoPoint {
        GeoPoint::new(33.9416, -118.4085).unwrap()
    }

    fn jfk() -> GeoPoint {
        GeoPoint::new(40.6413, -73.7781).unwrap()
    }

    #[test]
    fn test_haversine_lax_jfk() {
        let d = haversine_km(&lax(), &jfk());
        assert!((3900.0..4100.0).contains(&d), "distance {d} km");
        // Symmetric
        assert_eq!(d, haversine_km(&jfk(), &lax()));
    }

    #[test]
    fn test_haversine_zero_for_coincident() {
        let d = haversine_km(&lax(), &lax());
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_initial_bearing_cardinal() {
        let equator_w = GeoPoint::new(0.0, 0.0).unwrap();
        let equator_e = GeoPoint::new(0.0, 10.0).unwrap();
        let north = GeoPoint::new(10.0, 0.0).unwrap();

        assert!((initial_bearing(&equator_w, &equator_e) - 90.0).abs() < 1e-9);
        assert!((initial_bearing(&equator_e, &equator_w) - 270.0).abs() < 1e-9);
        assert!(initial_bearing(&equator_w, &north).abs() < 1e-9);
    }

    #[test]
    fn test_waypoints_endpoints_and_monotonicity() {
        let route = waypoints(&lax(), &jfk(), 100).unwrap();
        assert_eq!(route.len(), 101);

        let first = &route[0];
        assert!((first.latitude - 33.9416).abs() < 1e-9);
        assert!((first.longitude + 118.4085).abs() < 1e-9);
        assert_eq!(first.distance_km, 0.0);

        let last = &route[100];
        assert!((last.latitude - 40.6413).abs() < 1e-6);
        assert!((last.longitude + 73.7781).abs() < 1e-6);

        for pair in route.windows(2) {
            assert!(pair[1].distance_km >= pair[0].distance_km);
        }
        // Last waypoint repeats the bearing of the final segment
        assert_eq!(route[100].bearing, route[99].bearing);
    }

    #[test]
    fn test_waypoints_bearing_roughly_eastward() {
        // LAX to JFK heads generally east-northeast the whole way
        let route = waypoints(&lax(), &jfk(), 50).unwrap();
        for wp in &route {
            assert!(
                wp.bearing > 30.0 && wp.bearing < 120.0,
                "bearing {} out of eastward band",
                wp.bearing
            );
        }
    }

    #[test]
    fn test_waypoints_zero_segments_rejected() {
        assert_eq!(
            waypoints(&lax(), &jfk(), 0),
            Err(SunpathError::InvalidPointCount(0))
        );
    }

    #[test]
    fn test_waypoints_coincident_endpoints() {
        let route = waypoints(&lax(), &lax(), 10).unwrap();
        assert_eq!(route.len(), 11);
        for wp in &route {
            assert!((wp.latitude - 33.9416).abs() < 1e-9);
            assert!((wp.longitude + 118.4085).abs() < 1e-9);
            assert_eq!(wp.distance_km, 0.0);
        }
    }

    #[test]
    fn test_antimeridian_unwrap() {
        // Tokyo to Los Angeles crosses the date line
        let hnd = GeoPoint::new(35.5494, 139.7798).unwrap();
        let route = waypoints(&hnd, &lax(), 60).unwrap();

        for pair in route.windows(2) {
            let delta = pair[1].longitude - pair[0].longitude;
            assert!(
                delta.abs() <= 180.0,
                "discontinuity between {} and {}",
                pair[0].longitude,
                pair[1].longitude
            );
        }
        // The sequence stays continuous by leaving the canonical range
        assert!(route.iter().any(|wp| wp.longitude > 180.0));
        // Final longitude is the destination plus one full turn
        let last = route.last().unwrap();
        assert!((last.longitude - (360.0 - 118.4085)).abs() < 1e-6);
    }

    #[test]
    fn test_point_count_clamped() {
        let route = waypoints(&lax(), &jfk(), MAX_POINT_COUNT + 500).unwrap();
        assert_eq!(route.len(), MAX_POINT_COUNT + 1);
    }
}
