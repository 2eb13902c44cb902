//! Time-sampled 4D trajectory synthesis from a waypoint path.

use crate::models::TrajectoryPoint;
use crate::path::FlightPath;
use crate::rules::ProfileRules;

/// Upper bound on the up-front sample allocation.
const MAX_PREALLOC: usize = 4096;

/// Altitude in feet at trip fraction `frac`: linear climb, cruise hold, linear
/// descent. Never negative.
pub fn altitude_at_fraction(cruise_alt_ft: f64, frac: f64, rules: &ProfileRules) -> f64 {
    let climb = rules.climb_fraction;
    let desc = rules.descent_fraction;
    let alt = if climb > 0.0 && frac < climb {
        cruise_alt_ft * (frac / climb)
    } else if desc > 0.0 && frac > 1.0 - desc {
        cruise_alt_ft * ((1.0 - frac) / desc)
    } else {
        cruise_alt_ft
    };
    alt.max(0.0)
}

/// Sample `path` every `rules.sample_step_sec` seconds from `dep_time` up to
/// `arr_time`, then close with a touchdown sample at exactly `arr_time`.
///
/// Altitudes are rounded to whole feet. The final interval is shorter than the
/// step when the trip duration is not a multiple of it. A non-positive trip
/// duration yields an empty trajectory.
pub fn build_trajectory(
    path: &FlightPath,
    dep_time: i64,
    arr_time: i64,
    cruise_alt_ft: f64,
    rules: &ProfileRules,
) -> Vec<TrajectoryPoint> {
    let duration = arr_time - dep_time;
    if duration <= 0 {
        return Vec::new();
    }

    let step = i64::from(rules.sample_step_sec.max(1));
    let mut out = Vec::with_capacity(((duration / step) as usize + 2).min(MAX_PREALLOC));

    // A loop sample landing exactly on arr_time is superseded by the touchdown sample.
    let mut next = Some(dep_time);
    while let Some(t) = next.filter(|&t| t < arr_time) {
        let frac = (t - dep_time) as f64 / duration as f64;
        let pos = path.position_at_fraction(frac);
        out.push(TrajectoryPoint {
            t: t as f64,
            lat: pos.lat,
            lon: pos.lon,
            alt_ft: altitude_at_fraction(cruise_alt_ft, frac, rules).round(),
        });
        next = t.checked_add(step);
    }

    let last = path.position_at_fraction(1.0);
    out.push(TrajectoryPoint {
        t: arr_time as f64,
        lat: last.lat,
        lon: last.lon,
        alt_ft: 0.0,
    });

    out
}
