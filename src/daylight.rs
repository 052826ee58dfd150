//! # Daylight event finder
//!
//! Sunrise, sunset, solar noon and civil twilight for one location and
//! calendar date, obtained by bisecting the solar altitude from
//! [`solar_position`](crate::ephemeris::solar_position) against the target
//! threshold.
//!
//! Solar noon is placed analytically (longitude offset corrected by the
//! equation of time); the horizon crossings are then searched in the
//! half-day windows on either side of noon. The search assumes a single
//! monotone crossing per window, which holds everywhere except within a
//! fraction of a degree of the polar day/night boundary; there the result
//! degrades to a best-effort instant rather than an error.

use hifitime::{Epoch, Unit};
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Hours, BISECTION_MAX_ITER, BISECTION_PRECISION_SEC, CIVIL_TWILIGHT_ALTITUDE_DEG,
    HORIZON_ALTITUDE_DEG,
};
use crate::ephemeris::{equation_of_time_minutes, solar_position};
use crate::geo::GeoPoint;
use crate::time::{julian_century, julian_day};

/// Daylight summary for one location and UTC calendar date.
///
/// The optional fields are `None` under polar conditions: in permanent day
/// there is no sunrise or sunset, in permanent night there may also be no
/// civil twilight if the Sun never climbs above −6°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaylightInfo {
    pub sunrise: Option<Epoch>,
    pub sunset: Option<Epoch>,
    pub solar_noon: Epoch,
    pub solar_midnight: Epoch,
    pub civil_twilight_start: Option<Epoch>,
    pub civil_twilight_end: Option<Epoch>,
    /// Hours of daylight; 24 in permanent day, 0 in permanent night
    pub day_length: Hours,
    /// Hours of darkness, `24 − day_length`
    pub night_length: Hours,
    pub is_always_day: bool,
    pub is_always_night: bool,
}

/// Refracted solar altitude at `instant`, degrees.
fn altitude_at(point: &GeoPoint, instant: Epoch) -> Degree {
    solar_position(point, instant).altitude
}

/// Locate the instant where the solar altitude crosses `threshold` inside
/// `[a, b]` by bisection.
///
/// Runs at most [`BISECTION_MAX_ITER`] rounds or until the window narrows
/// below [`BISECTION_PRECISION_SEC`], then returns the window midpoint.
/// The window is assumed to bracket exactly one crossing; if it does not
/// (possible right at the polar twilight boundary), the midpoint is still
/// returned as a best-effort instant.
fn bisect_crossing(point: &GeoPoint, mut a: Epoch, mut b: Epoch, threshold: Degree) -> Epoch {
    let mut f_a = altitude_at(point, a) - threshold;

    for _ in 0..BISECTION_MAX_ITER {
        let span_sec = (b - a).to_seconds();
        if span_sec < BISECTION_PRECISION_SEC {
            break;
        }

        let mid = a + Unit::Second * (span_sec / 2.0);
        let f_mid = altitude_at(point, mid) - threshold;

        if (f_mid > 0.0) == (f_a > 0.0) {
            a = mid;
            f_a = f_mid;
        } else {
            b = mid;
        }
    }

    a + Unit::Second * ((b - a).to_seconds() / 2.0)
}

/// Search `[a, b]` for an upward or downward crossing of `threshold`.
///
/// Returns `None` when both window ends sit on the same side of the
/// threshold, i.e. no crossing is bracketed.
fn find_crossing(point: &GeoPoint, a: Epoch, b: Epoch, threshold: Degree) -> Option<Epoch> {
    let f_a = altitude_at(point, a) - threshold;
    let f_b = altitude_at(point, b) - threshold;
    if (f_a > 0.0) == (f_b > 0.0) {
        return None;
    }
    Some(bisect_crossing(point, a, b, threshold))
}

/// Compute the daylight summary for a location and the UTC calendar date of
/// `date`.
///
/// Arguments
/// ---------
/// * `point`: validated observer location
/// * `date`: any instant within the UTC day of interest; only its calendar
///   date is used
///
/// Return
/// ------
/// * a [`DaylightInfo`] with solar noon/midnight always present and the
///   horizon/twilight crossings filled in when the date is not under polar
///   day or polar night.
///
/// See also
/// --------
/// * [`solar_position`] – the altitude source the bisection queries.
pub fn daylight_info(point: &GeoPoint, date: Epoch) -> DaylightInfo {
    let (year, month, day, ..) = date.to_gregorian_utc();
    let midnight_utc = Epoch::from_gregorian_utc_at_midnight(year, month, day);

    // Solar noon: mean noon shifted by longitude, corrected by the equation
    // of time evaluated at civil midday.
    let t_midday = julian_century(julian_day(midnight_utc + Unit::Hour * 12.0));
    let eot_min = equation_of_time_minutes(t_midday);
    let noon_hours = 12.0 - point.longitude() / 15.0 - eot_min / 60.0;

    let solar_noon = midnight_utc + Unit::Hour * noon_hours;
    let solar_midnight = solar_noon + Unit::Hour * 12.0;
    let previous_midnight = solar_noon - Unit::Hour * 12.0;

    let noon_altitude = altitude_at(point, solar_noon);
    let midnight_altitude = altitude_at(point, previous_midnight);

    let is_always_day = midnight_altitude > HORIZON_ALTITUDE_DEG;
    let is_always_night = noon_altitude < HORIZON_ALTITUDE_DEG;

    let (sunrise, sunset) = if is_always_day || is_always_night {
        (None, None)
    } else {
        (
            find_crossing(point, previous_midnight, solar_noon, HORIZON_ALTITUDE_DEG),
            find_crossing(point, solar_noon, solar_midnight, HORIZON_ALTITUDE_DEG),
        )
    };

    // Civil twilight exists whenever the altitude sweeps across -6 degrees,
    // including dates of polar night where the Sun still grazes twilight.
    let civil_twilight_start = find_crossing(
        point,
        previous_midnight,
        solar_noon,
        CIVIL_TWILIGHT_ALTITUDE_DEG,
    );
    let civil_twilight_end = find_crossing(
        point,
        solar_noon,
        solar_midnight,
        CIVIL_TWILIGHT_ALTITUDE_DEG,
    );

    let day_length = if is_always_day {
        24.0
    } else if is_always_night {
        0.0
    } else {
        match (sunrise, sunset) {
            (Some(rise), Some(set)) => (set - rise).to_seconds() / 3600.0,
            // Degenerate bracketing at the polar boundary: fall back to the
            // polar classification rather than erroring.
            _ => {
                if noon_altitude > HORIZON_ALTITUDE_DEG {
                    24.0
                } else {
                    0.0
                }
            }
        }
    };

    DaylightInfo {
        sunrise,
        sunset,
        solar_noon,
        solar_midnight,
        civil_twilight_start,
        civil_twilight_end,
        day_length,
        night_length: 24.0 - day_length,
        is_always_day,
        is_always_night,
    }
}

#[cfg(test)]
mod daylight_test {
    use super::*;

    fn info(lat: f64, lon: f64, y: i32, m: u8, d: u8) -> DaylightInfo {
        let point = GeoPoint::new(lat, lon).unwrap();
        daylight_info(&point, Epoch::from_gregorian_utc_at_midnight(y, m, d))
    }

    #[test]
    fn test_equator_equinox_near_twelve_hours() {
        let info = info(0.0, 0.0, 2024, 3, 20);
        assert!(!info.is_always_day && !info.is_always_night);
        // The -0.833 degree threshold makes the day slightly longer than 12h
        assert!(
            (info.day_length - 12.1).abs() < 0.2,
            "day length {}",
            info.day_length
        );
        assert!(info.sunrise.is_some() && info.sunset.is_some());
        assert!(info.sunrise.unwrap() < info.solar_noon);
        assert!(info.solar_noon < info.sunset.unwrap());
    }

    #[test]
    fn test_polar_day_at_70n_summer_solstice() {
        let info = info(70.0, 0.0, 2024, 6, 21);
        assert!(info.is_always_day);
        assert!(!info.is_always_night);
        assert_eq!(info.day_length, 24.0);
        assert_eq!(info.night_length, 0.0);
        assert!(info.sunrise.is_none());
        assert!(info.sunset.is_none());
    }

    #[test]
    fn test_polar_night_at_70n_winter_solstice() {
        let info = info(70.0, 0.0, 2024, 12, 21);
        assert!(info.is_always_night);
        assert!(!info.is_always_day);
        assert_eq!(info.day_length, 0.0);
        assert_eq!(info.night_length, 24.0);
        assert!(info.sunrise.is_none());
        assert!(info.sunset.is_none());
        // Noon grazes civil twilight even under polar night at this latitude
        assert!(info.civil_twilight_start.is_some());
        assert!(info.civil_twilight_end.is_some());
    }

    #[test]
    fn test_solar_noon_longitude_shift() {
        // 90 degrees west shifts solar noon six hours later in UTC
        let greenwich = info(45.0, 0.0, 2024, 9, 1);
        let west = info(45.0, -90.0, 2024, 9, 1);
        let shift_hours = (west.solar_noon - greenwich.solar_noon).to_seconds() / 3600.0;
        assert!((shift_hours - 6.0).abs() < 0.01, "shift {shift_hours}");
    }

    #[test]
    fn test_twilight_brackets_sunrise_sunset() {
        let info = info(48.85, 2.35, 2024, 4, 15);
        let rise = info.sunrise.unwrap();
        let set = info.sunset.unwrap();
        let tw_start = info.civil_twilight_start.unwrap();
        let tw_end = info.civil_twilight_end.unwrap();

        assert!(tw_start < rise, "twilight starts before sunrise");
        assert!(tw_end > set, "twilight ends after sunset");
        // Civil twilight spans on the order of half an hour at mid-latitudes
        let morning_span = (rise - tw_start).to_seconds() / 60.0;
        assert!(
            morning_span > 15.0 && morning_span < 60.0,
            "morning twilight span {morning_span} min"
        );
    }

    #[test]
    fn test_bisection_precision() {
        // Sunrise altitude should land within the documented window of the
        // -0.833 degree threshold.
        let point = GeoPoint::new(40.6413, -73.7781).unwrap();
        let info = daylight_info(&point, Epoch::from_gregorian_utc_at_midnight(2024, 6, 21));
        let rise = info.sunrise.unwrap();
        let alt = solar_position(&point, rise).altitude;
        assert!(
            (alt - HORIZON_ALTITUDE_DEG).abs() < 0.05,
            "altitude at sunrise: {alt}"
        );
    }

    #[test]
    fn test_idempotence() {
        let point = GeoPoint::new(33.9416, -118.4085).unwrap();
        let date = Epoch::from_gregorian_utc_at_midnight(2024, 6, 21);
        assert_eq!(daylight_info(&point, date), daylight_info(&point, date));
    }
}
