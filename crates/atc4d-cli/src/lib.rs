//! ATC4D CLI - command line tools around the 4D trajectory core.
//!
//! Binaries:
//! - enrich_flights: flight plans + airports -> flights_4d.json
//! - safety_scan: first conflict and closest approach over the whole window
//! - snapshot: every flight's state and the conflict set at one instant

pub mod config;
pub mod io;
pub mod logging;

pub use config::Config;
pub use io::{format_utc, read_json, write_json};
pub use logging::init_tracing;
