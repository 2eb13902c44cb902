pub mod conflict;
pub mod enrich;
pub mod error;
pub mod geodesy;
pub mod models;
pub mod path;
pub mod route;
pub mod rules;
pub mod sampler;
pub mod scanner;
pub mod trajectory;

pub use conflict::{
    closest_approach, detect_conflicts, ClosestApproach, ConflictPair, ConflictSet,
    SampledPosition,
};
pub use enrich::{enrich_flight, enrich_flights, AirportTable};
pub use error::{CoreError, Result};
pub use geodesy::{bearing, distance, Point2D, EARTH_RADIUS_M, METERS_PER_NM};
pub use models::{Airport, AirportRef, Flight, FlightPlanRecord, TrajectoryPoint};
pub use path::FlightPath;
pub use rules::{ProfileRules, SeparationRules};
pub use sampler::sample;
pub use scanner::{
    sampled_position, FirstConflict, FlightState, SafetyReport, SimulationContext,
};
pub use trajectory::{altitude_at_fraction, build_trajectory};
