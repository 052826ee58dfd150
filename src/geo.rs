//! Validated geographic coordinates.
//!
//! [`GeoPoint`] is the entry point for all observer and route locations.
//! Validation happens once at construction: out-of-range or non-finite
//! coordinates are rejected with [`SunpathError`], so every downstream
//! component can treat its inputs as well-formed and stay infallible.

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Radian, RADEG};
use crate::sunpath_errors::SunpathError;

/// An immutable surface location in geographic degrees.
///
/// Latitude is restricted to [-90, 90] and longitude to [-180, 180].
/// Construction through [`GeoPoint::new`] fails fast on malformed input
/// instead of letting NaN propagate through the trigonometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: Degree,
    longitude: Degree,
}

impl GeoPoint {
    /// Build a validated geographic point.
    ///
    /// Arguments
    /// ---------
    /// * `latitude`: latitude in degrees, [-90, 90]
    /// * `longitude`: longitude in degrees, [-180, 180]
    ///
    /// Return
    /// ------
    /// * the point, or a [`SunpathError`] naming the offending coordinate.
    pub fn new(latitude: Degree, longitude: Degree) -> Result<Self, SunpathError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SunpathError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SunpathError::InvalidLongitude(longitude));
        }
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> Degree {
        self.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> Degree {
        self.longitude
    }

    /// Latitude in radians
    pub fn latitude_rad(&self) -> Radian {
        self.latitude * RADEG
    }

    /// Longitude in radians
    pub fn longitude_rad(&self) -> Radian {
        self.longitude * RADEG
    }
}

/// Reduce an angle in degrees into [0, 360).
pub(crate) fn normalize_degrees(angle: Degree) -> Degree {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can return 360.0 when the input is a tiny negative number
    if a >= 360.0 {
        a - 360.0
    } else {
        a
    }
}

/// Reduce an angle in degrees into (-180, 180].
pub(crate) fn normalize_signed_degrees(angle: Degree) -> Degree {
    let a = normalize_degrees(angle);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}
