//! # Cabin sun-exposure classifier
//!
//! Given the vehicle heading and the Sun's horizontal position, decides
//! which cabin side the Sun illuminates and how strongly, plus a passenger
//! facing recommendation. A companion aggregator rolls per-point
//! classifications into per-side minute totals for a whole flight.
//!
//! The per-instant decision is an ordered list of guard clauses over
//! [`CabinSide`]; each branch is a small pure classification whose message
//! text is resolved from a single lookup on [`ExposureKind`], keeping the
//! tree flat instead of nested.

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Minutes, RADEG};
use crate::geo::normalize_signed_degrees;
use crate::timeline::{SunEventKind, Timeline};

/// Which side of the cabin the Sun illuminates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CabinSide {
    Left,
    Right,
    /// Sun high enough (>70°) to light both sides through the top of the cabin
    Overhead,
    /// No meaningful side exposure: night, twilight, or Sun ahead/behind
    None,
}

impl std::fmt::Display for CabinSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CabinSide::Left => "left",
            CabinSide::Right => "right",
            CabinSide::Overhead => "overhead",
            CabinSide::None => "none",
        };
        write!(f, "{name}")
    }
}

/// Classification branch reached by the decision tree; keys the
/// recommendation text lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExposureKind {
    Night,
    TwilightSunrise,
    TwilightSunset,
    Overhead,
    Ahead,
    Behind,
    Glare,
    GoldenHour,
    Strong,
    Gentle,
}

/// Per-instant classification of the Sun relative to the cabin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunExposureSample {
    pub side: CabinSide,
    /// Sun azimuth relative to the heading, degrees in (-180, 180];
    /// positive means starboard
    pub relative_bearing: Degree,
    /// Sun altitude at the instant, degrees
    pub sun_altitude: Degree,
    /// Illumination intensity in [0, 1]: zero below the horizon, maximal
    /// for a high Sun exactly broadside
    pub intensity: f64,
    pub recommendation: String,
}

/// Classify the cabin-side sun exposure for one instant.
///
/// Arguments
/// ---------
/// * `heading`: vehicle heading in compass degrees
/// * `sun_azimuth`: Sun azimuth in compass degrees
/// * `sun_altitude`: Sun altitude in degrees
///
/// Return
/// ------
/// * a [`SunExposureSample`]; pure function of its inputs.
///
/// Remarks
/// -------
/// * `intensity = (1 − directness) · sin(altitude)` for a Sun above the
///   horizon, where directness is 0 exactly broadside and 1 exactly
///   ahead/behind; zero otherwise.
pub fn exposure(heading: Degree, sun_azimuth: Degree, sun_altitude: Degree) -> SunExposureSample {
    let relative_bearing = normalize_signed_degrees(sun_azimuth - heading);
    let directness = (relative_bearing.abs() - 90.0).abs() / 90.0;
    let intensity = if sun_altitude > 0.0 {
        (1.0 - directness) * (sun_altitude * RADEG).sin()
    } else {
        0.0
    };

    let (side, kind) = classify(relative_bearing, sun_altitude, intensity);

    SunExposureSample {
        side,
        relative_bearing,
        sun_altitude,
        intensity,
        recommendation: recommendation_text(kind, side, relative_bearing),
    }
}

/// The ordered guard clauses of the decision tree. Evaluation order is
/// significant: night and twilight outrank geometry, overhead outranks the
/// ahead/behind cones, and only then does a side win.
fn classify(relative_bearing: Degree, altitude: Degree, intensity: f64) -> (CabinSide, ExposureKind) {
    if altitude < -6.0 {
        return (CabinSide::None, ExposureKind::Night);
    }
    if altitude < 0.0 {
        // Twilight; -3 degrees splits "approaching sunrise" from "fading sunset"
        let kind = if altitude > -3.0 {
            ExposureKind::TwilightSunrise
        } else {
            ExposureKind::TwilightSunset
        };
        return (CabinSide::None, kind);
    }
    if altitude > 70.0 {
        return (CabinSide::Overhead, ExposureKind::Overhead);
    }
    if relative_bearing.abs() <= 30.0 {
        return (CabinSide::None, ExposureKind::Ahead);
    }
    if relative_bearing.abs() >= 150.0 {
        return (CabinSide::None, ExposureKind::Behind);
    }

    let side = if relative_bearing > 0.0 {
        CabinSide::Right
    } else {
        CabinSide::Left
    };

    let kind = if intensity > 0.7 && (relative_bearing.abs() - 90.0).abs() < 30.0 {
        ExposureKind::Glare
    } else if altitude < 20.0 {
        ExposureKind::GoldenHour
    } else if intensity > 0.5 {
        ExposureKind::Strong
    } else {
        ExposureKind::Gentle
    };

    (side, kind)
}

/// Resolve the recommendation text for a classification branch.
fn recommendation_text(kind: ExposureKind, side: CabinSide, relative_bearing: Degree) -> String {
    let twilight_side = if relative_bearing > 0.0 { "right" } else { "left" };

    match kind {
        ExposureKind::Night => "Nighttime flight, no sun exposure on either side".to_string(),
        ExposureKind::TwilightSunrise => format!(
            "Twilight, sunrise approaching on the {twilight_side} side"
        ),
        ExposureKind::TwilightSunset => format!(
            "Twilight, sunset fading on the {twilight_side} side"
        ),
        ExposureKind::Overhead => {
            "Sun nearly overhead, both sides get strong tropical light".to_string()
        }
        ExposureKind::Ahead => "Sun directly ahead, neither side is exposed".to_string(),
        ExposureKind::Behind => "Sun directly behind, neither side is exposed".to_string(),
        ExposureKind::Glare => format!(
            "Intense glare broadside on the {side} side, keep the shades handy"
        ),
        ExposureKind::GoldenHour => format!(
            "Low golden-hour light on the {side} side, good views without harsh glare"
        ),
        ExposureKind::Strong => format!("Good strong light on the {side} side"),
        ExposureKind::Gentle => format!("Gentle light on the {side} side"),
    }
}

/// Per-side exposure totals and the holistic recommendation for a flight.
///
/// The four minute totals partition the total flight duration: each
/// timeline point contributes one uniform time slice to exactly one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSunAnalysis {
    pub left_minutes: Minutes,
    pub right_minutes: Minutes,
    pub overhead_minutes: Minutes,
    pub none_minutes: Minutes,
    pub recommendation: String,
    /// Human-readable per-side breakdown lines
    pub breakdown: Vec<String>,
}

/// Aggregate cabin-side exposure across an entire timeline.
///
/// Each point is classified with [`exposure`] and weighted by the uniform
/// per-point time slice, so the side totals sum to the flight duration.
/// The holistic recommendation comes from a threshold tree over the
/// totals: mostly-dark flights read as red-eyes, a dominant overhead share
/// as a tropical route, a 2× side imbalance as heavy one-sided exposure
/// graded by its mean intensity, and mostly-lit flights as full daytime,
/// with a sun-event or balanced fallback otherwise.
pub fn analyze_flight(timeline: &Timeline) -> FlightSunAnalysis {
    let slice = timeline.point_interval_minutes();
    let total = timeline.total_duration_minutes;

    let mut minutes = [0.0_f64; 4]; // left, right, overhead, none
    let mut intensity_sums = [0.0_f64; 4];
    let mut counts = [0_usize; 4];

    for point in &timeline.points {
        let sample = exposure(point.heading, point.solar.azimuth, point.solar.altitude);
        let slot = match sample.side {
            CabinSide::Left => 0,
            CabinSide::Right => 1,
            CabinSide::Overhead => 2,
            CabinSide::None => 3,
        };
        minutes[slot] += slice;
        intensity_sums[slot] += sample.intensity;
        counts[slot] += 1;
    }

    let [left_minutes, right_minutes, overhead_minutes, none_minutes] = minutes;

    let mean_intensity = |slot: usize| {
        if counts[slot] > 0 {
            intensity_sums[slot] / counts[slot] as f64
        } else {
            0.0
        }
    };

    let recommendation = if total <= 0.0 {
        "Zero-length flight, no sun exposure to analyze".to_string()
    } else if none_minutes > 0.8 * total {
        "Red-eye or night flight, pick either side and rest".to_string()
    } else if overhead_minutes > 0.4 * total {
        "Tropical route with a high sun, both sides are bright; window shades recommended"
            .to_string()
    } else if left_minutes > 2.0 * right_minutes && left_minutes > 0.0 {
        if mean_intensity(0) > 0.7 {
            "Heavy sun on the left side with strong glare, sit right to avoid it or left for the light".to_string()
        } else {
            "Mostly left-side sun, sit left for views or right for shade".to_string()
        }
    } else if right_minutes > 2.0 * left_minutes && right_minutes > 0.0 {
        if mean_intensity(1) > 0.7 {
            "Heavy sun on the right side with strong glare, sit left to avoid it or right for the light".to_string()
        } else {
            "Mostly right-side sun, sit right for views or left for shade".to_string()
        }
    } else if timeline.daylight_percentage() > 80.0 {
        "Full daytime flight with balanced light, either side works well".to_string()
    } else if let Some(event) = timeline.events.first() {
        match event.kind {
            SunEventKind::Sunrise => {
                "You will catch a sunrise in flight; the twilight side has the show".to_string()
            }
            SunEventKind::Sunset => {
                "You will catch a sunset in flight; the twilight side has the show".to_string()
            }
        }
    } else {
        "Mixed conditions with balanced exposure, either side works".to_string()
    };

    let share = |m: f64| if total > 0.0 { m / total * 100.0 } else { 0.0 };
    let breakdown = vec![
        format!(
            "Left side: {:.0} min ({:.0}%)",
            left_minutes,
            share(left_minutes)
        ),
        format!(
            "Right side: {:.0} min ({:.0}%)",
            right_minutes,
            share(right_minutes)
        ),
        format!(
            "Overhead sun: {:.0} min ({:.0}%)",
            overhead_minutes,
            share(overhead_minutes)
        ),
        format!(
            "No side exposure: {:.0} min ({:.0}%)",
            none_minutes,
            share(none_minutes)
        ),
    ];

    FlightSunAnalysis {
        left_minutes,
        right_minutes,
        overhead_minutes,
        none_minutes,
        recommendation,
        breakdown,
    }
}
