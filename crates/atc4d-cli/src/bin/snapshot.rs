//! Print every flight's sampled state and the conflicts at one instant.

use anyhow::Result;
use atc4d_cli::{format_utc, init_tracing, read_json, Config};
use atc4d_core::{Flight, SimulationContext};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Flight states at a single simulation time
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Enriched flights produced by enrich_flights
    #[arg(long, default_value = "flights_4d.json")]
    flights: PathBuf,

    /// Epoch seconds to sample (default: start of the simulation window)
    #[arg(long)]
    at: Option<i64>,

    /// Fraction of the simulation window to sample, 0..1 (ignored with --at)
    #[arg(long)]
    frac: Option<f64>,

    /// Minimum horizontal separation in NM (env ATC4D_HORIZ_NM, default 5)
    #[arg(long)]
    horiz_nm: Option<f64>,

    /// Minimum vertical separation in feet (env ATC4D_VERT_FT, default 2000)
    #[arg(long)]
    vert_ft: Option<f64>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    t: i64,
    utc: String,
    active_count: usize,
    conflict_ids: Vec<String>,
    flights: Vec<atc4d_core::scanner::FlightState>,
    conflicts: Vec<atc4d_core::ConflictPair>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs)?;

    let config = Config::from_env().with_overrides(None, None, args.horiz_nm, args.vert_ft);

    let flights: Vec<Flight> = read_json(&args.flights)?;
    let ctx = SimulationContext::new(flights, config.separation_rules())?;

    let t = match (args.at, args.frac) {
        (Some(at), _) => at,
        (None, Some(frac)) => {
            let span = (ctx.sim_end() - ctx.sim_start()) as f64;
            ctx.sim_start() + (frac.clamp(0.0, 1.0) * span).round() as i64
        }
        (None, None) => ctx.sim_start(),
    };
    let now = t as f64;

    let active = ctx.active_flights_at(now);
    let conflicts = ctx.detect_conflicts(&active, now);
    tracing::info!(
        "{}: {} active, {} in conflict",
        format_utc(t),
        active.len(),
        conflicts.ids.len()
    );

    let snapshot = Snapshot {
        t,
        utc: format_utc(t),
        active_count: active.len(),
        conflict_ids: conflicts.ids.iter().cloned().collect(),
        flights: ctx.snapshot(now),
        conflicts: conflicts.pairs,
    };
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
