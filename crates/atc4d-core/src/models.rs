//! Input flight plans, airport entries and the enriched per-flight record.

use serde::{Deserialize, Serialize};

use crate::geodesy::Point2D;
use crate::sampler;

/// One flight plan as supplied to enrichment.
///
/// Every accepted field name is listed here; a record missing a required
/// field is rejected by the deserializer rather than patched up later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightPlanRecord {
    #[serde(rename = "ACID", alias = "id", alias = "callsign")]
    pub acid: String,
    #[serde(rename = "Plane type", alias = "type", default)]
    pub plane_type: String,
    #[serde(rename = "departure airport")]
    pub departure_airport: String,
    #[serde(rename = "arrival airport")]
    pub arrival_airport: String,
    /// Epoch seconds
    #[serde(rename = "departure time")]
    pub departure_time: i64,
    /// Knots
    #[serde(rename = "aircraft speed")]
    pub aircraft_speed: f64,
    /// Cruise altitude in feet
    pub altitude: f64,
    /// Whitespace separated `LAT/LON` tokens, e.g. `51.2N/3.4W 52.0N/1.0W`
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub passengers: u32,
    #[serde(default)]
    pub is_cargo: bool,
}

/// Airport table entry keyed by ICAO code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub lat: f64,
    pub lon: f64,
}

impl Airport {
    pub fn point(&self) -> Point2D {
        Point2D::new(self.lat, self.lon)
    }
}

/// Airport as written into an enriched record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRef {
    pub icao: String,
    pub lat: f64,
    pub lon: f64,
}

/// Time-stamped 4D trajectory sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Epoch seconds
    pub t: f64,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "altFt")]
    pub alt_ft: f64,
}

impl TrajectoryPoint {
    pub fn position(&self) -> Point2D {
        Point2D::new(self.lat, self.lon)
    }
}

/// Enriched flight: the record consumed by renderers and by the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(rename = "ACID")]
    pub id: String,
    #[serde(default)]
    pub plane_type: String,
    #[serde(default)]
    pub passengers: u32,
    #[serde(default)]
    pub is_cargo: bool,
    pub departure: AirportRef,
    pub arrival: AirportRef,
    pub cruise_alt_ft: f64,
    pub speed_kts: f64,
    pub dep_time: i64,
    pub arr_time: i64,
    pub duration_sec: i64,
    pub distance_meters: i64,
    pub waypoints: Vec<Point2D>,
    pub trajectory: Vec<TrajectoryPoint>,
}

impl Flight {
    /// Airborne window check, inclusive at both ends.
    pub fn is_active_at(&self, t: f64) -> bool {
        self.dep_time as f64 <= t && t <= self.arr_time as f64
    }

    /// Interpolated state at `t`, clamped to the trajectory endpoints.
    pub fn sample(&self, t: f64) -> Option<TrajectoryPoint> {
        sampler::sample(&self.trajectory, t)
    }
}
