//! # Flight timeline builder
//!
//! Fuses the geodesic path generator with the solar ephemeris into a
//! time-stamped trajectory: one solar evaluation per waypoint, day/night
//! transition events, and aggregate daylight statistics.
//!
//! Every solar evaluation is independent of the others, but the transition
//! scan is inherently sequential (each event depends on the preceding
//! point) and runs in index order after all evaluations complete.

use hifitime::{Epoch, Unit};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{Degree, Kilometer, Minutes, HORIZON_ALTITUDE_DEG};
use crate::ephemeris::{solar_position, SolarPosition};
use crate::geo::{normalize_signed_degrees, GeoPoint};
use crate::geodesic::{waypoints, Waypoint};
use crate::sunpath_errors::SunpathError;

/// Cruise parameters for a timeline request.
///
/// `point_count` is the number of route segments; the timeline contains
/// `point_count + 1` points. Counts above
/// [`MAX_POINT_COUNT`](crate::constants::MAX_POINT_COUNT) are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub point_count: usize,
    pub cruise_speed_kmh: f64,
    pub cruise_altitude_ft: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        TimelineConfig {
            point_count: 150,
            cruise_speed_kmh: 850.0,
            cruise_altitude_ft: 37_000.0,
        }
    }
}

/// One sampled instant of a flight: where the vehicle is, when, and where
/// the Sun stands relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub waypoint: Waypoint,
    pub timestamp: Epoch,
    pub elapsed_minutes: Minutes,
    pub solar: SolarPosition,
    /// Sun above the −0.833° visible-disc horizon
    pub is_daylight: bool,
    /// Vehicle heading, degrees [0, 360); equals the waypoint bearing
    pub heading: Degree,
    pub speed_kmh: f64,
    pub altitude_ft: f64,
}

/// Kind of a day/night transition observed along the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SunEventKind {
    Sunrise,
    Sunset,
}

/// A day/night transition along the flight, attributed to the later point
/// of the transition pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunEvent {
    pub kind: SunEventKind,
    pub timestamp: Epoch,
    pub latitude: Degree,
    pub longitude: Degree,
    /// Index into the timeline point sequence
    pub index: usize,
}

/// Inline-optimized event list; flights cross the terminator at most a
/// handful of times.
pub type SunEvents = SmallVec<[SunEvent; 4]>;

/// Aggregate daylight statistics over a timeline.
///
/// `daylight_minutes` is a point-count approximation — the fraction of
/// points flagged daylight times the total duration — not a time-weighted
/// integral. Points are near-uniformly spaced in time, so the two agree to
/// within one point interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineStats {
    pub daylight_minutes: Minutes,
    pub darkness_minutes: Minutes,
    pub daylight_percentage: f64,
    pub average_solar_altitude: Degree,
    pub min_solar_altitude: Degree,
    pub max_solar_altitude: Degree,
}

/// A complete time-stamped flight trajectory with solar context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub points: Vec<TimelinePoint>,
    pub total_distance_km: Kilometer,
    pub total_duration_minutes: Minutes,
    pub events: SunEvents,
    pub stats: TimelineStats,
}

impl Timeline {
    /// Share of the flight spent in daylight, percent
    pub fn daylight_percentage(&self) -> f64 {
        self.stats.daylight_percentage
    }

    /// Uniform time slice represented by one timeline point, in minutes.
    ///
    /// Defined as total duration over the number of points so that summing
    /// the slice across all points reproduces the total duration exactly.
    pub fn point_interval_minutes(&self) -> Minutes {
        if self.points.is_empty() {
            0.0
        } else {
            self.total_duration_minutes / self.points.len() as f64
        }
    }
}

/// Build the full solar timeline for a flight.
///
/// Arguments
/// ---------
/// * `origin`, `destination`: validated route endpoints
/// * `departure`: UTC departure instant
/// * `config`: cruise parameters; [`TimelineConfig::default`] gives the
///   150-segment, 850 km/h, 37 000 ft profile
///
/// Return
/// ------
/// * the assembled [`Timeline`], or [`SunpathError::InvalidPointCount`]
///   when `config.point_count` is zero.
///
/// See also
/// --------
/// * [`waypoints`] – the underlying route sampler.
/// * [`crate::exposure::analyze_flight`] – cabin-side aggregation over the result.
pub fn build_timeline(
    origin: &GeoPoint,
    destination: &GeoPoint,
    departure: Epoch,
    config: &TimelineConfig,
) -> Result<Timeline, SunpathError> {
    let route = waypoints(origin, destination, config.point_count)?;

    let total_distance_km = route.last().map(|wp| wp.distance_km).unwrap_or(0.0);
    let total_duration_minutes = total_distance_km / config.cruise_speed_kmh * 60.0;

    let segments = (route.len() - 1) as f64;
    let points: Vec<TimelinePoint> = route
        .into_iter()
        .enumerate()
        .map(|(i, waypoint)| {
            let fraction = if segments > 0.0 { i as f64 / segments } else { 0.0 };
            let elapsed_minutes = total_duration_minutes * fraction;
            let timestamp = departure + Unit::Minute * elapsed_minutes;

            // Waypoint longitudes may be unwrapped past the antimeridian;
            // fold back into canonical range for the ephemeris. The inputs
            // were validated at the crate boundary, so this cannot fail.
            let observer = GeoPoint::new(
                waypoint.latitude,
                normalize_signed_degrees(waypoint.longitude),
            )
            .expect("slerp output within valid coordinate ranges");

            let solar = solar_position(&observer, timestamp);

            TimelinePoint {
                waypoint,
                timestamp,
                elapsed_minutes,
                is_daylight: solar.altitude > HORIZON_ALTITUDE_DEG,
                solar,
                heading: waypoint.bearing,
                speed_kmh: config.cruise_speed_kmh,
                altitude_ft: config.cruise_altitude_ft,
            }
        })
        .collect();

    let events = detect_sun_events(&points);
    let stats = compute_stats(&points, total_duration_minutes);

    Ok(Timeline {
        points,
        total_distance_km,
        total_duration_minutes,
        events,
        stats,
    })
}

/// Scan consecutive points for day/night flips. A false→true transition is
/// a sunrise seen from the aircraft, true→false a sunset; the event carries
/// the instant and location of the later point.
fn detect_sun_events(points: &[TimelinePoint]) -> SunEvents {
    points
        .iter()
        .enumerate()
        .tuple_windows()
        .filter_map(|((_, prev), (i, cur))| {
            let kind = match (prev.is_daylight, cur.is_daylight) {
                (false, true) => SunEventKind::Sunrise,
                (true, false) => SunEventKind::Sunset,
                _ => return None,
            };
            Some(SunEvent {
                kind,
                timestamp: cur.timestamp,
                latitude: cur.waypoint.latitude,
                longitude: cur.waypoint.longitude,
                index: i,
            })
        })
        .collect()
}

fn compute_stats(points: &[TimelinePoint], total_duration_minutes: Minutes) -> TimelineStats {
    if points.is_empty() {
        return TimelineStats {
            daylight_minutes: 0.0,
            darkness_minutes: 0.0,
            daylight_percentage: 0.0,
            average_solar_altitude: 0.0,
            min_solar_altitude: 0.0,
            max_solar_altitude: 0.0,
        };
    }

    let n = points.len() as f64;
    let daylight_fraction = points.iter().filter(|p| p.is_daylight).count() as f64 / n;

    // Point-count approximation of the daylight integral, preserved as the
    // documented behavior of this statistic.
    let daylight_minutes = daylight_fraction * total_duration_minutes;

    let altitudes = points.iter().map(|p| p.solar.altitude);
    let (min_alt, max_alt) = altitudes
        .clone()
        .minmax()
        .into_option()
        .expect("points is non-empty");

    TimelineStats {
        daylight_minutes,
        darkness_minutes: total_duration_minutes - daylight_minutes,
        daylight_percentage: daylight_fraction * 100.0,
        average_solar_altitude: altitudes.sum::<f64>() / n,
        min_solar_altitude: min_alt,
        max_solar_altitude: max_alt,
    }
}

#[cfg(test)]
mod timeline_test {
    use super::*;

    fn lax() -> GeoPoint {
        GeoPoint::new(33.9416, -118.4085).unwrap()
    }

    fn jfk() -> GeoPoint {
        GeoPoint::new(40.6413, -73.7781).unwrap()
    }

    fn lax_jfk_timeline(point_count: usize, hour: u8) -> Timeline {
        let config = TimelineConfig {
            point_count,
            ..TimelineConfig::default()
        };
        build_timeline(
            &lax(),
            &jfk(),
            Epoch::from_gregorian_utc(2024, 6, 21, hour, 0, 0, 0),
            &config,
        )
        .unwrap()
    }

    #[test]
    fn test_lax_jfk_scenario() {
        let timeline = lax_jfk_timeline(100, 8);

        assert_eq!(timeline.points.len(), 101);
        assert!(
            (3900.0..4100.0).contains(&timeline.total_distance_km),
            "distance {}",
            timeline.total_distance_km
        );
        assert!(
            (250.0..350.0).contains(&timeline.total_duration_minutes),
            "duration {}",
            timeline.total_duration_minutes
        );
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let timeline = lax_jfk_timeline(100, 8);
        for pair in timeline.points.windows(2) {
            assert!(pair[1].timestamp > pair[0].timestamp);
            assert!(pair[1].elapsed_minutes > pair[0].elapsed_minutes);
        }
        let last = timeline.points.last().unwrap();
        assert!((last.elapsed_minutes - timeline.total_duration_minutes).abs() < 1e-9);
    }

    #[test]
    fn test_event_detection_matches_flags() {
        // Departure at 08:00 UTC is pre-dawn on the US west coast; flying
        // east the flight meets the sunrise terminator.
        let timeline = lax_jfk_timeline(100, 8);

        assert!(!timeline.points[0].is_daylight, "LAX pre-dawn at 08:00 UTC");
        assert!(
            timeline.points.last().unwrap().is_daylight,
            "JFK mid-morning on arrival"
        );

        let sunrises: Vec<_> = timeline
            .events
            .iter()
            .filter(|e| e.kind == SunEventKind::Sunrise)
            .collect();
        assert_eq!(sunrises.len(), 1);

        let event = sunrises[0];
        assert!(!timeline.points[event.index - 1].is_daylight);
        assert!(timeline.points[event.index].is_daylight);
        assert_eq!(event.timestamp, timeline.points[event.index].timestamp);
    }

    #[test]
    fn test_stats_consistency() {
        let timeline = lax_jfk_timeline(100, 8);
        let stats = &timeline.stats;

        assert!(
            (stats.daylight_minutes + stats.darkness_minutes - timeline.total_duration_minutes)
                .abs()
                < 1e-9
        );
        assert!((0.0..=100.0).contains(&stats.daylight_percentage));
        assert!(stats.min_solar_altitude <= stats.average_solar_altitude);
        assert!(stats.average_solar_altitude <= stats.max_solar_altitude);
    }

    #[test]
    fn test_fully_daylight_flight() {
        // Departing at 16:00 UTC the whole route is in afternoon daylight
        let timeline = lax_jfk_timeline(80, 16);
        assert!(timeline.points.iter().all(|p| p.is_daylight));
        assert!(timeline.events.is_empty());
        assert_eq!(timeline.stats.daylight_percentage, 100.0);
        assert_eq!(
            timeline.stats.daylight_minutes,
            timeline.total_duration_minutes
        );
    }

    #[test]
    fn test_default_config() {
        let config = TimelineConfig::default();
        assert_eq!(config.point_count, 150);
        assert_eq!(config.cruise_speed_kmh, 850.0);
        assert_eq!(config.cruise_altitude_ft, 37_000.0);
    }

    #[test]
    fn test_zero_point_count_rejected() {
        let config = TimelineConfig {
            point_count: 0,
            ..TimelineConfig::default()
        };
        let result = build_timeline(
            &lax(),
            &jfk(),
            Epoch::from_gregorian_utc(2024, 6, 21, 8, 0, 0, 0),
            &config,
        );
        assert_eq!(result, Err(SunpathError::InvalidPointCount(0)));
    }

    #[test]
    fn test_point_interval_sums_to_duration() {
        let timeline = lax_jfk_timeline(100, 8);
        let total = timeline.point_interval_minutes() * timeline.points.len() as f64;
        assert!((total - timeline.total_duration_minutes).abs() < 1e-9);
    }

    #[test]
    fn test_idempotence() {
        let a = lax_jfk_timeline(60, 8);
        let b = lax_jfk_timeline(60, 8);
        assert_eq!(a, b);
    }
}
