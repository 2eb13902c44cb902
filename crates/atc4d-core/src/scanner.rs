//! Simulation context and full-horizon safety scan.
//!
//! The context owns a validated flight set and is read-only afterwards. All
//! queries take the simulation time explicitly; there is no shared clock.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::conflict::{self, ClosestApproach, ConflictSet, SampledPosition};
use crate::error::{CoreError, Result};
use crate::models::Flight;
use crate::rules::SeparationRules;
use crate::sampler;

/// Earliest scanned instant with a loss of separation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstConflict {
    pub t: i64,
    /// Sorted ids of every flight in conflict at `t`
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReport {
    pub first_conflict: Option<FirstConflict>,
    /// Global minimum separation, `None` when two flights were never airborne together
    pub closest_approach: Option<ClosestApproach>,
    pub steps_scanned: usize,
}

/// Per-flight state for a renderer at one instant. Inactive flights are
/// reported at their clamped trajectory endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightState {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub alt_ft: f64,
    pub heading: f64,
    pub active: bool,
}

/// Interpolated position of `flight` at `t`.
pub fn sampled_position(flight: &Flight, t: f64) -> Option<SampledPosition> {
    let point = flight.sample(t)?;
    Some(SampledPosition::new(
        flight.id.clone(),
        point.lat,
        point.lon,
        point.alt_ft,
    ))
}

#[derive(Debug, Clone)]
pub struct SimulationContext {
    flights: Vec<Flight>,
    rules: SeparationRules,
    sim_start: i64,
    sim_end: i64,
}

impl SimulationContext {
    /// Validate and take ownership of `flights`.
    ///
    /// Every flight needs a trajectory of at least two samples and a unique
    /// id; the window from the earliest departure to the latest arrival must
    /// not be empty.
    pub fn new(flights: Vec<Flight>, rules: SeparationRules) -> Result<Self> {
        if flights.is_empty() {
            return Err(CoreError::EmptyFlightSet);
        }

        {
            let mut seen = HashSet::with_capacity(flights.len());
            for flight in &flights {
                if flight.trajectory.len() < 2 {
                    return Err(CoreError::TrajectoryTooShort {
                        flight_id: flight.id.clone(),
                        points: flight.trajectory.len(),
                    });
                }
                if !seen.insert(flight.id.as_str()) {
                    return Err(CoreError::DuplicateFlight {
                        flight_id: flight.id.clone(),
                    });
                }
            }
        }

        let sim_start = flights.iter().map(|f| f.dep_time).min().unwrap_or_default();
        let sim_end = flights.iter().map(|f| f.arr_time).max().unwrap_or_default();
        if sim_end <= sim_start {
            return Err(CoreError::InvalidTimeWindow {
                start: sim_start,
                end: sim_end,
            });
        }

        Ok(Self {
            flights,
            rules,
            sim_start,
            sim_end,
        })
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn flight(&self, id: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == id)
    }

    pub fn rules(&self) -> &SeparationRules {
        &self.rules
    }

    pub fn sim_start(&self) -> i64 {
        self.sim_start
    }

    pub fn sim_end(&self) -> i64 {
        self.sim_end
    }

    /// Positions of every flight airborne at `t`.
    pub fn active_flights_at(&self, t: f64) -> Vec<SampledPosition> {
        self.flights
            .iter()
            .filter(|f| f.is_active_at(t))
            .filter_map(|f| sampled_position(f, t))
            .collect()
    }

    /// Loss-of-separation pairs among `positions` under this context's minima.
    pub fn detect_conflicts(&self, positions: &[SampledPosition], t: f64) -> ConflictSet {
        conflict::detect_conflicts(positions, t, &self.rules)
    }

    /// State of every flight at `t`, including inactive ones.
    pub fn snapshot(&self, t: f64) -> Vec<FlightState> {
        self.flights
            .iter()
            .filter_map(|f| {
                let point = f.sample(t)?;
                Some(FlightState {
                    id: f.id.clone(),
                    lat: point.lat,
                    lon: point.lon,
                    alt_ft: point.alt_ft,
                    heading: sampler::heading_at(&f.trajectory, t).unwrap_or(0.0),
                    active: f.is_active_at(t),
                })
            })
            .collect()
    }

    /// Scan the whole simulation window.
    pub fn scan(&self, step_sec: u32) -> Result<SafetyReport> {
        self.scan_range(self.sim_start, self.sim_end, step_sec)
    }

    /// Sample every flight from `start` to `end` inclusive at `step_sec`.
    ///
    /// The first conflicting instant is kept once found, while the closest
    /// approach keeps being tracked until the end of the range.
    pub fn scan_range(&self, start: i64, end: i64, step_sec: u32) -> Result<SafetyReport> {
        if step_sec == 0 {
            return Err(CoreError::InvalidStep);
        }
        let step = i64::from(step_sec);

        let mut report = SafetyReport::default();
        let mut next = Some(start);
        while let Some(t) = next.filter(|&t| t <= end) {
            report.steps_scanned += 1;
            let now = t as f64;
            next = t.checked_add(step);

            let positions = self.active_flights_at(now);
            if positions.len() < 2 {
                continue;
            }

            if report.first_conflict.is_none() {
                let conflicts = self.detect_conflicts(&positions, now);
                if !conflicts.is_empty() {
                    let ids: Vec<String> = conflicts.ids.into_iter().collect();
                    tracing::warn!("First loss of separation at t={}: {:?}", now, ids);
                    report.first_conflict = Some(FirstConflict { t: now as i64, ids });
                }
            }

            if let Some(candidate) = conflict::closest_approach(&positions, now) {
                let replace = report
                    .closest_approach
                    .as_ref()
                    .map(|best| candidate.is_closer_than(best))
                    .unwrap_or(true);
                if replace {
                    report.closest_approach = Some(candidate);
                }
            }
        }

        tracing::info!(
            "Scanned {} step(s) over [{}, {}]: first conflict {}, closest approach {}",
            report.steps_scanned,
            start,
            end,
            report
                .first_conflict
                .as_ref()
                .map(|c| c.t.to_string())
                .unwrap_or_else(|| "none".to_string()),
            report
                .closest_approach
                .as_ref()
                .map(|c| format!("{:.2} NM / {:.0} ft", c.horizontal_nm, c.vertical_ft))
                .unwrap_or_else(|| "no data".to_string()),
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::Point2D;
    use crate::models::{AirportRef, TrajectoryPoint};

    fn flight(id: &str, points: &[(f64, f64, f64, f64)]) -> Flight {
        let trajectory: Vec<TrajectoryPoint> = points
            .iter()
            .map(|&(t, lat, lon, alt_ft)| TrajectoryPoint { t, lat, lon, alt_ft })
            .collect();
        let first = trajectory.first().copied();
        let last = trajectory.last().copied();
        let airport = |p: Option<TrajectoryPoint>| AirportRef {
            icao: "ZZZZ".into(),
            lat: p.map(|p| p.lat).unwrap_or_default(),
            lon: p.map(|p| p.lon).unwrap_or_default(),
        };
        Flight {
            id: id.into(),
            plane_type: String::new(),
            passengers: 0,
            is_cargo: false,
            departure: airport(first),
            arrival: airport(last),
            cruise_alt_ft: 30_000.0,
            speed_kts: 450.0,
            dep_time: first.map(|p| p.t as i64).unwrap_or_default(),
            arr_time: last.map(|p| p.t as i64).unwrap_or_default(),
            duration_sec: 0,
            distance_meters: 0,
            waypoints: trajectory.iter().map(|p| Point2D::new(p.lat, p.lon)).collect(),
            trajectory,
        }
    }

    #[test]
    fn test_rejects_short_trajectory_naming_flight() {
        let err = SimulationContext::new(
            vec![
                flight("OK1", &[(0.0, 0.0, 0.0, 0.0), (10.0, 0.0, 1.0, 0.0)]),
                flight("BAD", &[(0.0, 0.0, 0.0, 0.0)]),
            ],
            SeparationRules::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::TrajectoryTooShort {
                flight_id: "BAD".into(),
                points: 1
            }
        );
    }

    #[test]
    fn test_rejects_duplicates_and_empty_sets() {
        let a = flight("DUP", &[(0.0, 0.0, 0.0, 0.0), (10.0, 0.0, 1.0, 0.0)]);
        let err = SimulationContext::new(vec![a.clone(), a], SeparationRules::default())
            .unwrap_err();
        assert_eq!(err, CoreError::DuplicateFlight { flight_id: "DUP".into() });

        let err = SimulationContext::new(Vec::new(), SeparationRules::default()).unwrap_err();
        assert_eq!(err, CoreError::EmptyFlightSet);
    }

    #[test]
    fn test_window_spans_all_flights() {
        let ctx = SimulationContext::new(
            vec![
                flight("A", &[(100.0, 0.0, 0.0, 0.0), (500.0, 0.0, 1.0, 0.0)]),
                flight("B", &[(50.0, 1.0, 0.0, 0.0), (300.0, 1.0, 1.0, 0.0)]),
            ],
            SeparationRules::default(),
        )
        .unwrap();
        assert_eq!((ctx.sim_start(), ctx.sim_end()), (50, 500));
        assert_eq!(ctx.active_flights_at(75.0).len(), 1);
        assert_eq!(ctx.active_flights_at(200.0).len(), 2);
        assert_eq!(ctx.active_flights_at(500.0).len(), 1);
        assert!(ctx.flight("B").is_some());
    }

    #[test]
    fn test_snapshot_marks_inactive_flights() {
        let ctx = SimulationContext::new(
            vec![
                flight("EAST", &[(0.0, 0.0, 0.0, 0.0), (600.0, 0.0, 1.0, 0.0)]),
                flight("LATE", &[(1000.0, 5.0, 5.0, 0.0), (2000.0, 6.0, 5.0, 0.0)]),
            ],
            SeparationRules::default(),
        )
        .unwrap();

        let states = ctx.snapshot(300.0);
        assert_eq!(states.len(), 2);
        assert!(states[0].active);
        assert!((states[0].heading - 90.0).abs() < 1e-6);
        assert!(!states[1].active);
        assert_eq!((states[1].lat, states[1].lon), (5.0, 5.0));
    }

    #[test]
    fn test_zero_step_is_rejected() {
        let ctx = SimulationContext::new(
            vec![flight("A", &[(0.0, 0.0, 0.0, 0.0), (10.0, 0.0, 1.0, 0.0)])],
            SeparationRules::default(),
        )
        .unwrap();
        assert_eq!(ctx.scan(0).unwrap_err(), CoreError::InvalidStep);
    }

    #[test]
    fn test_scan_range_ending_at_time_limit_terminates() {
        let ctx = SimulationContext::new(
            vec![flight("A", &[(0.0, 0.0, 0.0, 0.0), (10.0, 0.0, 1.0, 0.0)])],
            SeparationRules::default(),
        )
        .unwrap();
        let report = ctx.scan_range(i64::MAX - 5, i64::MAX, 4).unwrap();
        assert_eq!(report.steps_scanned, 2);
    }

    #[test]
    fn test_single_flight_scan_has_no_data() {
        let ctx = SimulationContext::new(
            vec![flight("A", &[(0.0, 0.0, 0.0, 0.0), (600.0, 0.0, 1.0, 0.0)])],
            SeparationRules::default(),
        )
        .unwrap();
        let report = ctx.scan(60).unwrap();
        assert_eq!(report.steps_scanned, 11);
        assert!(report.first_conflict.is_none());
        assert!(report.closest_approach.is_none());
    }
}
