//! Scan the whole simulation window for loss of separation.
//!
//! Reports the first conflicting instant and the closest approach seen
//! anywhere in the window.

use anyhow::Result;
use atc4d_cli::{format_utc, init_tracing, read_json, Config};
use atc4d_core::{Flight, SimulationContext};
use clap::Parser;
use std::path::PathBuf;

/// Separation scan over enriched flights
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Enriched flights produced by enrich_flights
    #[arg(long, default_value = "flights_4d.json")]
    flights: PathBuf,

    /// Seconds between scanned instants (env ATC4D_SCAN_STEP_SEC, default 60)
    #[arg(long)]
    step: Option<u32>,

    /// Minimum horizontal separation in NM (env ATC4D_HORIZ_NM, default 5)
    #[arg(long)]
    horiz_nm: Option<f64>,

    /// Minimum vertical separation in feet (env ATC4D_VERT_FT, default 2000)
    #[arg(long)]
    vert_ft: Option<f64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs)?;

    let config =
        Config::from_env().with_overrides(None, args.step, args.horiz_nm, args.vert_ft);

    let flights: Vec<Flight> = read_json(&args.flights)?;
    let ctx = SimulationContext::new(flights, config.separation_rules())?;
    tracing::info!(
        "Scanning {} flight(s) from {} to {} every {}s",
        ctx.flights().len(),
        format_utc(ctx.sim_start()),
        format_utc(ctx.sim_end()),
        config.scan_step_sec
    );

    let report = ctx.scan(config.scan_step_sec)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &report.first_conflict {
        Some(first) => println!(
            "First conflict: {} ({}) involving {}",
            format_utc(first.t),
            first.t,
            first.ids.join(", ")
        ),
        None => println!("First conflict: none"),
    }

    match &report.closest_approach {
        Some(closest) => println!(
            "Closest approach: {} <-> {} at {} ({:.2} NM, {:.0} ft)",
            closest.id_a,
            closest.id_b,
            format_utc(closest.t as i64),
            closest.horizontal_nm,
            closest.vertical_ft
        ),
        None => println!("Closest approach: no data"),
    }

    Ok(())
}
