use thiserror::Error;

/// Error type for every fallible entry point of the crate.
///
/// Only genuinely malformed input is an error. Numerical soft spots —
/// near-pole azimuth instability, a bisection that hits its iteration cap —
/// return best-effort finite values instead of failing, so no operation in
/// this crate is ever fatal to the surrounding application.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SunpathError {
    #[error("Invalid latitude: {0} (expected a finite value in [-90, 90])")]
    InvalidLatitude(f64),

    #[error("Invalid longitude: {0} (expected a finite value in [-180, 180])")]
    InvalidLongitude(f64),

    #[error("Invalid point count: {0} (at least one route segment is required)")]
    InvalidPointCount(usize),
}
