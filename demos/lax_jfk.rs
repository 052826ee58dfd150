//! End-to-end demo: solar timeline and cabin-side analysis for an
//! eastbound LAX → JFK flight departing before dawn.
//!
//! Run with: `cargo run --example lax_jfk`

use hifitime::Epoch;

use sunpath::daylight::daylight_info;
use sunpath::exposure::analyze_flight;
use sunpath::geo::GeoPoint;
use sunpath::timeline::{build_timeline, TimelineConfig};

fn main() -> Result<(), sunpath::SunpathError> {
    let lax = GeoPoint::new(33.9416, -118.4085)?;
    let jfk = GeoPoint::new(40.6413, -73.7781)?;
    let departure = Epoch::from_gregorian_utc(2024, 6, 21, 8, 0, 0, 0);

    let timeline = build_timeline(&lax, &jfk, departure, &TimelineConfig::default())?;

    println!("LAX -> JFK, departing {departure}");
    println!(
        "  distance: {:.0} km, duration: {:.0} min, {} timeline points",
        timeline.total_distance_km,
        timeline.total_duration_minutes,
        timeline.points.len()
    );
    println!(
        "  daylight: {:.0}% ({:.0} min), solar altitude {:.1}..{:.1} deg",
        timeline.stats.daylight_percentage,
        timeline.stats.daylight_minutes,
        timeline.stats.min_solar_altitude,
        timeline.stats.max_solar_altitude
    );

    for event in &timeline.events {
        println!(
            "  {:?} seen from the aircraft at {} ({:.2}, {:.2})",
            event.kind, event.timestamp, event.latitude, event.longitude
        );
    }

    let analysis = analyze_flight(&timeline);
    println!("\nCabin sun exposure:");
    for line in &analysis.breakdown {
        println!("  {line}");
    }
    println!("  => {}", analysis.recommendation);

    let info = daylight_info(&lax, departure);
    println!("\nDaylight at LAX on departure day:");
    println!("  solar noon: {}", info.solar_noon);
    if let (Some(rise), Some(set)) = (info.sunrise, info.sunset) {
        println!("  sunrise {rise}, sunset {set} ({:.1} h of daylight)", info.day_length);
    }

    Ok(())
}
