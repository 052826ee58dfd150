//! # Constants and type definitions for sunpath
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `sunpath` library.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians)
//! - Altitude thresholds for horizon crossings and civil twilight
//! - Iteration caps for the root-finder and the timeline builder
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the solar ephemeris,
//! the daylight event finder, the geodesic path generator and the timeline builder.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Minutes in a full day
pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const JD2000: f64 = 2_451_545.0;

/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Mean Earth radius in kilometers (spherical model used for great-circle routing)
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Sun–Earth distance held at a fixed approximation of one astronomical unit.
///
/// The crate deliberately does not model orbital eccentricity; every
/// [`SolarPosition`](crate::ephemeris::SolarPosition) reports this constant.
pub const SUN_DISTANCE_AU: f64 = 1.0;

/// Altitude threshold for sunrise/sunset, in degrees.
///
/// −0.833° folds in mean atmospheric refraction at the horizon (~34′) and the
/// Sun's apparent semi-diameter (~16′), so "daylight" matches the visible disc.
pub const HORIZON_ALTITUDE_DEG: f64 = -0.833;

/// Altitude threshold bounding civil twilight, in degrees
pub const CIVIL_TWILIGHT_ALTITUDE_DEG: f64 = -6.0;

// -------------------------------------------------------------------------------------------------
// Algorithm bounds
// -------------------------------------------------------------------------------------------------

/// Maximum number of bisection iterations when locating an altitude crossing
pub const BISECTION_MAX_ITER: usize = 20;

/// Bisection terminates once the search window narrows below this many seconds
pub const BISECTION_PRECISION_SEC: f64 = 10.0;

/// Upper bound on the number of route segments a single timeline may request.
///
/// `point_count` is untrusted input and total work scales linearly with it;
/// values above this cap are clamped rather than rejected.
pub const MAX_POINT_COUNT: usize = 10_000;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Duration in minutes
pub type Minutes = f64;
/// Duration in hours
pub type Hours = f64;
/// Julian Day (days since the JD epoch, noon-referenced)
pub type JulianDay = f64;
/// Julian centuries since J2000.0
pub type JulianCentury = f64;
