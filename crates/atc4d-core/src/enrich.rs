//! Offline enrichment: flight plans plus an airport table become full 4D flights.
//!
//! A run is all-or-nothing; the first bad record aborts the whole batch.

use std::collections::HashMap;

use crate::error::{CoreError, Result};
use crate::geodesy::Point2D;
use crate::models::{Airport, AirportRef, Flight, FlightPlanRecord};
use crate::path::FlightPath;
use crate::route::parse_route;
use crate::rules::ProfileRules;
use crate::trajectory::build_trajectory;

/// 1 knot in meters per second.
pub const KNOT_TO_MPS: f64 = 0.514444;

/// Longest trip enrichment accepts, in seconds (two days).
pub const MAX_TRIP_DURATION_SEC: i64 = 2 * 24 * 3600;

/// ICAO code to airport location.
pub type AirportTable = HashMap<String, Airport>;

fn lookup_airport(airports: &AirportTable, icao: &str, flight_id: &str) -> Result<AirportRef> {
    let airport = airports.get(icao).ok_or_else(|| CoreError::MissingAirport {
        icao: icao.to_string(),
        flight_id: flight_id.to_string(),
    })?;
    Ok(AirportRef {
        icao: icao.to_string(),
        lat: airport.lat,
        lon: airport.lon,
    })
}

/// Resolve endpoints, parse the route, derive the arrival time from path
/// length and airspeed, and synthesize the trajectory.
pub fn enrich_flight(
    record: &FlightPlanRecord,
    airports: &AirportTable,
    rules: &ProfileRules,
) -> Result<Flight> {
    let departure = lookup_airport(airports, &record.departure_airport, &record.acid)?;
    let arrival = lookup_airport(airports, &record.arrival_airport, &record.acid)?;

    let speed_kts = record.aircraft_speed;
    if !(speed_kts > 0.0 && speed_kts.is_finite()) {
        return Err(CoreError::InvalidSpeed {
            flight_id: record.acid.clone(),
            speed_kts,
        });
    }

    let fixes = parse_route(&record.route)?;
    let mut waypoints = Vec::with_capacity(fixes.len() + 2);
    waypoints.push(Point2D::new(departure.lat, departure.lon));
    waypoints.extend(fixes);
    waypoints.push(Point2D::new(arrival.lat, arrival.lon));

    let path = FlightPath::new(waypoints.clone()).ok_or_else(|| CoreError::TrajectoryTooShort {
        flight_id: record.acid.clone(),
        points: 0,
    })?;

    let distance_m = path.total_length();
    let duration = (distance_m / (speed_kts * KNOT_TO_MPS)).round();
    if !(duration.is_finite() && duration <= MAX_TRIP_DURATION_SEC as f64) {
        return Err(CoreError::TripTooLong {
            flight_id: record.acid.clone(),
            duration_sec: duration,
        });
    }
    let duration_sec = duration as i64;
    let dep_time = record.departure_time;
    let arr_time = dep_time
        .checked_add(duration_sec)
        .ok_or_else(|| CoreError::TimeOutOfRange {
            flight_id: record.acid.clone(),
            dep_time,
        })?;

    let trajectory = build_trajectory(&path, dep_time, arr_time, record.altitude, rules);

    tracing::debug!(
        "Enriched {} {} -> {}: {:.0} m, {} s, {} samples",
        record.acid,
        departure.icao,
        arrival.icao,
        distance_m,
        duration_sec,
        trajectory.len()
    );

    Ok(Flight {
        id: record.acid.clone(),
        plane_type: record.plane_type.clone(),
        passengers: record.passengers,
        is_cargo: record.is_cargo,
        departure,
        arrival,
        cruise_alt_ft: record.altitude,
        speed_kts,
        dep_time,
        arr_time,
        duration_sec,
        distance_meters: distance_m.round() as i64,
        waypoints,
        trajectory,
    })
}

/// Enrich every record in order, failing on the first bad one.
pub fn enrich_flights(
    records: &[FlightPlanRecord],
    airports: &AirportTable,
    rules: &ProfileRules,
) -> Result<Vec<Flight>> {
    let flights = records
        .iter()
        .map(|record| enrich_flight(record, airports, rules))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Enriched {} flight(s)", flights.len());
    Ok(flights)
}
