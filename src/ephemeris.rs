//! # Solar ephemeris engine
//!
//! Low-precision solar position after Meeus (*Astronomical Algorithms*,
//! ch. 25), accurate to roughly an arcminute over a few centuries around
//! J2000 — ample for daylight detection and cabin-side classification.
//!
//! The chain is: Julian Century → geometric mean longitude and mean anomaly
//! → equation of center → apparent ecliptic longitude (with the Ω nutation
//! and aberration correction) → equatorial coordinates → hour angle via
//! Greenwich sidereal time → horizontal coordinates → piecewise atmospheric
//! refraction.
//!
//! Every function here is pure: the same `(point, instant)` pair always
//! yields a bit-identical [`SolarPosition`].

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Hours, JulianCentury, Minutes, Radian, RADEG, SUN_DISTANCE_AU,
};
use crate::geo::{normalize_degrees, GeoPoint};
use crate::time::{gmst_degrees, julian_century, julian_day};

/// The Sun's position for one observer at one instant.
///
/// Horizontal coordinates (`azimuth`, `altitude`, `zenith`) are observer
/// relative; equatorial coordinates (`right_ascension`, `declination`)
/// are observer independent. `zenith` always equals `90 − altitude`
/// exactly, with `altitude` already refraction-corrected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    /// Compass azimuth in degrees, [0, 360), measured clockwise from north.
    ///
    /// Near the poles `cos(latitude)` vanishes and the azimuth becomes
    /// numerically arbitrary; it stays finite but carries no directional
    /// meaning in that regime.
    pub azimuth: Degree,
    /// Altitude above the horizon in degrees, [-90, 90], refraction-corrected
    pub altitude: Degree,
    /// Zenith angle in degrees, exactly `90 − altitude`
    pub zenith: Degree,
    /// Sun–Earth distance in astronomical units (fixed approximation)
    pub distance_au: f64,
    /// Right ascension in hours, [0, 24)
    pub right_ascension: Hours,
    /// Declination in degrees, ≈[-23.44, 23.44]
    pub declination: Degree,
}

/// Geometric mean longitude of the Sun, degrees in [0, 360).
fn mean_longitude(t: JulianCentury) -> Degree {
    normalize_degrees(280.46646 + t * (36000.76983 + t * 0.0003032))
}

/// Mean anomaly of the Sun, degrees.
pub(crate) fn mean_anomaly(t: JulianCentury) -> Degree {
    357.52911 + t * (35999.05029 - t * 0.0001537)
}

/// Equation of center, degrees.
fn equation_of_center(m: Degree, t: JulianCentury) -> Degree {
    let m_rad = m * RADEG;
    m_rad.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m_rad).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m_rad).sin() * 0.000289
}

/// Longitude of the ascending node of the Moon's mean orbit, the auxiliary
/// angle driving the nutation/aberration corrections, degrees.
fn omega(t: JulianCentury) -> Degree {
    125.04 - 1934.136 * t
}

/// Apparent ecliptic longitude of the Sun, degrees.
fn apparent_longitude(t: JulianCentury) -> Degree {
    let true_longitude = mean_longitude(t) + equation_of_center(mean_anomaly(t), t);
    true_longitude - 0.00569 - 0.00478 * (omega(t) * RADEG).sin()
}

/// Mean obliquity of the ecliptic (IAU 1980 polynomial), degrees.
fn mean_obliquity(t: JulianCentury) -> Degree {
    // 23°26'21.448" and the polynomial coefficients, all in arcseconds
    let seconds = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

/// Obliquity corrected for nutation, degrees.
fn corrected_obliquity(t: JulianCentury) -> Degree {
    mean_obliquity(t) + 0.00256 * (omega(t) * RADEG).cos()
}

/// Equatorial coordinates of the Sun: (right ascension in degrees [0, 360),
/// declination in degrees).
fn equatorial_coordinates(t: JulianCentury) -> (Degree, Degree) {
    let lambda: Radian = apparent_longitude(t) * RADEG;
    let epsilon: Radian = corrected_obliquity(t) * RADEG;

    let ra = f64::atan2(epsilon.cos() * lambda.sin(), lambda.cos()) / RADEG;
    let dec = (epsilon.sin() * lambda.sin()).asin() / RADEG;

    (normalize_degrees(ra), dec)
}

/// Atmospheric refraction correction, in degrees, to add to the geometric
/// altitude.
///
/// Piecewise model (NOAA solar calculator): zero above 85°, a rational
/// expression in `tan(h)` for 5°–85°, a quartic polynomial through the
/// horizon band −0.575°–5°, and a single `tan` term below that. All
/// polynomial outputs are in arcseconds and divided down to degrees.
fn refraction_correction(altitude: Degree) -> Degree {
    if altitude > 85.0 {
        return 0.0;
    }

    let tan_h = (altitude * RADEG).tan();
    let seconds = if altitude > 5.0 {
        58.1 / tan_h - 0.07 / tan_h.powi(3) + 0.000086 / tan_h.powi(5)
    } else if altitude > -0.575 {
        1735.0 + altitude * (-518.2 + altitude * (103.4 + altitude * (-12.79 + altitude * 0.711)))
    } else {
        -20.774 / tan_h
    };

    seconds / 3600.0
}

/// Compute the Sun's position for an observer at one UTC instant.
///
/// Arguments
/// ---------
/// * `point`: validated observer location
/// * `instant`: UTC epoch of the evaluation
///
/// Return
/// ------
/// * the [`SolarPosition`] at that instant. Pure function of its inputs;
///   no side effects and no shared state.
///
/// Remarks
/// -------
/// * The azimuth arccosine ratio is clamped to [-1, 1] before inversion so
///   floating round-off near the zenith or the poles cannot produce NaN.
/// * When the Sun is in the western half of the sky (`sin(hour angle) > 0`)
///   the azimuth is flipped to `360 − az` to cover the full compass circle.
///
/// See also
/// --------
/// * [`crate::daylight::daylight_info`] – sunrise/sunset search built on this function.
pub fn solar_position(point: &GeoPoint, instant: Epoch) -> SolarPosition {
    let jd = julian_day(instant);
    let t = julian_century(jd);

    let (ra_deg, dec_deg) = equatorial_coordinates(t);

    // Local hour angle from Greenwich sidereal time
    let lst = gmst_degrees(jd) + point.longitude();
    let hour_angle: Radian = (lst - ra_deg) * RADEG;

    let lat = point.latitude_rad();
    let dec: Radian = dec_deg * RADEG;

    let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.cos();
    let altitude = sin_alt.clamp(-1.0, 1.0).asin() / RADEG;

    // Clamped to keep acos in its domain despite round-off; near the poles
    // cos(lat) -> 0 and the ratio saturates, leaving the azimuth arbitrary
    // but finite.
    let cos_az = (dec.sin() - sin_alt * lat.sin())
        / ((altitude * RADEG).cos() * lat.cos()).max(f64::MIN_POSITIVE);
    let mut azimuth = cos_az.clamp(-1.0, 1.0).acos() / RADEG;
    if hour_angle.sin() > 0.0 {
        azimuth = 360.0 - azimuth;
    }

    let refracted_altitude = altitude + refraction_correction(altitude);

    SolarPosition {
        azimuth: normalize_degrees(azimuth),
        altitude: refracted_altitude,
        zenith: 90.0 - refracted_altitude,
        distance_au: SUN_DISTANCE_AU,
        right_ascension: normalize_degrees(ra_deg) / 15.0,
        declination: dec_deg,
    }
}

/// Equation of time in minutes: the offset between mean and true solar time
/// caused by orbital eccentricity and axial tilt.
///
/// NOAA formulation in the mean longitude, mean anomaly, eccentricity and
/// half-obliquity. Used by the daylight finder to place solar noon.
pub fn equation_of_time_minutes(t: JulianCentury) -> Minutes {
    let l0: Radian = mean_longitude(t) * RADEG;
    let m: Radian = mean_anomaly(t) * RADEG;
    let eccentricity = 0.016708634 - t * (0.000042037 + t * 0.0000001267);
    let y = ((corrected_obliquity(t) * RADEG) / 2.0).tan().powi(2);

    let radians = y * (2.0 * l0).sin() - 2.0 * eccentricity * m.sin()
        + 4.0 * eccentricity * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * eccentricity * eccentricity * (2.0 * m).sin();

    4.0 * radians / RADEG
}
