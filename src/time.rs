//! Time scales for solar computations.
//!
//! [`hifitime::Epoch`] is the instant representation used across the crate;
//! this module provides the conversions from an epoch to the Julian Day and
//! Julian Century inputs expected by the low-precision solar formulas, plus
//! Greenwich Mean Sidereal Time.

use hifitime::Epoch;

use crate::constants::{Degree, JulianCentury, JulianDay, DAYS_PER_CENTURY, JD2000};
use crate::geo::normalize_degrees;

/// Convert a UTC epoch to a Julian Day number (fractional days, noon-referenced).
pub fn julian_day(epoch: Epoch) -> JulianDay {
    epoch.to_jde_utc_days()
}

/// Julian centuries elapsed since the J2000.0 epoch.
pub fn julian_century(jd: JulianDay) -> JulianCentury {
    (jd - JD2000) / DAYS_PER_CENTURY
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in degrees
/// for a given Julian Day (UT).
///
/// This is the IAU 1982 expression rearranged as a polynomial in the
/// full Julian Day plus Julian-century correction terms, which folds the
/// 0h-UT base value and the fractional-day rotation into a single linear
/// term (280.46061837° at J2000 plus 360.98564736629° per day).
///
/// # Arguments
/// * `jd` - Julian Day (UT time scale)
///
/// # Returns
/// * GMST angle in degrees, normalized to the interval [0, 360).
pub fn gmst_degrees(jd: JulianDay) -> Degree {
    // Linear coefficient: Earth's rotation in degrees per solar day
    const GMST_J2000: f64 = 280.46061837;
    const ROTATION_DEG_PER_DAY: f64 = 360.98564736629;
    const C2: f64 = 0.000387933;
    const C3: f64 = -1.0 / 38_710_000.0;

    let t = julian_century(jd);
    let gmst = GMST_J2000 + ROTATION_DEG_PER_DAY * (jd - JD2000) + (C2 + C3 * t) * t * t;

    normalize_degrees(gmst)
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_julian_day_j2000() {
        let epoch = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);
        assert_eq!(julian_day(epoch), 2451545.0);
        assert_eq!(julian_century(julian_day(epoch)), 0.0);
    }

    #[test]
    fn test_julian_day_midnight_fraction() {
        // JD is noon-referenced: civil midnight lands on a half-day boundary
        let epoch = Epoch::from_gregorian_utc(2024, 6, 21, 0, 0, 0, 0);
        assert_eq!(julian_day(epoch), 2460482.5);

        let epoch = Epoch::from_gregorian_utc(2024, 6, 21, 18, 0, 0, 0);
        assert_eq!(julian_day(epoch), 2460483.25);
    }

    #[test]
    fn test_julian_century_progression() {
        // 2050-01-01 12:00 UT is half a Julian century after J2000
        let epoch = Epoch::from_gregorian_utc(2050, 1, 1, 12, 0, 0, 0);
        let t = julian_century(julian_day(epoch));
        assert!((t - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_gmst_j2000() {
        let gmst = gmst_degrees(JD2000);
        assert_eq!(gmst, 280.46061837);
    }

    #[test]
    fn test_gmst_advances_faster_than_solar_day() {
        // One solar day later, GMST has gained ~0.9856 degrees
        let g0 = gmst_degrees(JD2000);
        let g1 = gmst_degrees(JD2000 + 1.0);
        let gain = (g1 - g0).rem_euclid(360.0);
        assert!((gain - 0.98565).abs() < 1e-3);
    }

    #[test]
    fn test_gmst_range() {
        for i in 0..1000 {
            let jd = JD2000 + i as f64 * 3.7;
            let g = gmst_degrees(jd);
            assert!((0.0..360.0).contains(&g), "gmst out of range: {g}");
        }
    }
}
