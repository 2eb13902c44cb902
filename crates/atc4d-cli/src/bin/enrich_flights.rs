//! Enrich flight plans into 4D trajectories.
//!
//! Usage:
//!   cargo run -p atc4d-cli --bin enrich_flights -- \
//!     --flights canadian_flights_250.json --airports airport.json --out flights_4d.json

use anyhow::Result;
use atc4d_cli::{init_tracing, read_json, write_json, Config};
use atc4d_core::{enrich_flights, AirportTable, FlightPlanRecord};
use clap::Parser;
use std::path::PathBuf;

/// Turn static flight plans into time-sampled 4D trajectories
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON array of flight plans
    #[arg(long, default_value = "canadian_flights_250.json")]
    flights: PathBuf,

    /// JSON object mapping ICAO code to {lat, lon}
    #[arg(long, default_value = "airport.json")]
    airports: PathBuf,

    /// Output file for enriched flights
    #[arg(long, default_value = "flights_4d.json")]
    out: PathBuf,

    /// Seconds between trajectory samples (env ATC4D_STEP_SEC, default 60)
    #[arg(long)]
    step: Option<u32>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs)?;

    let config = Config::from_env().with_overrides(args.step, None, None, None);

    let records: Vec<FlightPlanRecord> = read_json(&args.flights)?;
    let airports: AirportTable = read_json(&args.airports)?;
    tracing::info!(
        "Loaded {} flight plan(s) and {} airport(s)",
        records.len(),
        airports.len()
    );

    let flights = enrich_flights(&records, &airports, &config.profile_rules())?;

    write_json(&args.out, &flights)?;
    println!("Wrote {} ({} flights)", args.out.display(), flights.len());
    Ok(())
}
