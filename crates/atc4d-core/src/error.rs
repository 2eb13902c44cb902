//! Error type shared by the enrichment, context and scan layers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Route coordinate that does not match `<number><N|S|E|W>` or a pair without a `/`.
    #[error("bad coordinate token '{token}'")]
    BadCoordToken { token: String },

    #[error("airport '{icao}' referenced by flight {flight_id} is not in the airport table")]
    MissingAirport { icao: String, flight_id: String },

    #[error("flight {flight_id} has a trajectory of {points} point(s), at least 2 are required")]
    TrajectoryTooShort { flight_id: String, points: usize },

    #[error("flight {flight_id} has non-positive airspeed {speed_kts} kts")]
    InvalidSpeed { flight_id: String, speed_kts: f64 },

    #[error("flight {flight_id} would take {duration_sec} s, beyond the supported trip length")]
    TripTooLong { flight_id: String, duration_sec: f64 },

    #[error("flight {flight_id} departs at {dep_time}, arrival time is out of range")]
    TimeOutOfRange { flight_id: String, dep_time: i64 },

    #[error("flight id {flight_id} appears more than once")]
    DuplicateFlight { flight_id: String },

    #[error("no flights to simulate")]
    EmptyFlightSet,

    #[error("simulation window is empty: start {start}, end {end}")]
    InvalidTimeWindow { start: i64, end: i64 },

    #[error("scan step must be at least one second")]
    InvalidStep,
}
