//! # sunpath
//!
//! Computational core for flight sun-exposure analysis: a low-precision
//! solar ephemeris, a great-circle path generator, a sunrise/sunset and
//! twilight root-finder, a flight timeline assembler, and a cabin-side
//! sun-exposure classifier.
//!
//! Everything is a synchronous pure-function pipeline over immutable
//! records: the caller supplies two surface locations and a UTC departure
//! instant, and gets back plain serializable values. There is no I/O, no
//! shared state and no timezone resolution — all instants are UTC.
//!
//! ```rust
//! use hifitime::Epoch;
//! use sunpath::exposure::analyze_flight;
//! use sunpath::geo::GeoPoint;
//! use sunpath::timeline::{build_timeline, TimelineConfig};
//!
//! let lax = GeoPoint::new(33.9416, -118.4085).unwrap();
//! let jfk = GeoPoint::new(40.6413, -73.7781).unwrap();
//! let departure = Epoch::from_gregorian_utc(2024, 6, 21, 8, 0, 0, 0);
//!
//! let timeline = build_timeline(&lax, &jfk, departure, &TimelineConfig::default()).unwrap();
//! let analysis = analyze_flight(&timeline);
//! println!("{}", analysis.recommendation);
//! ```

pub mod constants;
pub mod daylight;
pub mod ephemeris;
pub mod exposure;
pub mod geo;
pub mod geodesic;
pub mod sunpath_errors;
pub mod time;
pub mod timeline;

pub use daylight::{daylight_info, DaylightInfo};
pub use ephemeris::{solar_position, SolarPosition};
pub use exposure::{analyze_flight, exposure, CabinSide, FlightSunAnalysis, SunExposureSample};
pub use geo::GeoPoint;
pub use geodesic::{haversine_km, initial_bearing, waypoints, Waypoint};
pub use sunpath_errors::SunpathError;
pub use timeline::{
    build_timeline, SunEvent, SunEventKind, Timeline, TimelineConfig, TimelinePoint, TimelineStats,
};
