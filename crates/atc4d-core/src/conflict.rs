//! Instantaneous loss-of-separation detection.
//!
//! All positions handed to these functions are assumed valid at the same
//! instant. Pairs are checked exhaustively, which is fine for the tens of
//! simultaneously airborne flights a scenario carries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::geodesy::{distance, Point2D, METERS_PER_NM};
use crate::rules::SeparationRules;

/// A flight's interpolated state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledPosition {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub alt_ft: f64,
}

impl SampledPosition {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64, alt_ft: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
            alt_ft,
        }
    }

    fn point(&self) -> Point2D {
        Point2D::new(self.lat, self.lon)
    }
}

/// Two flights inside both separation minima at time `t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictPair {
    pub id_a: String,
    pub id_b: String,
    pub horizontal_nm: f64,
    pub vertical_ft: f64,
    pub t: f64,
}

/// Violating pairs at one instant plus the distinct ids involved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictSet {
    pub pairs: Vec<ConflictPair>,
    pub ids: BTreeSet<String>,
}

impl ConflictSet {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// Minimum-separation pair. Smaller horizontal separation wins, ties go to the
/// smaller vertical separation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosestApproach {
    pub id_a: String,
    pub id_b: String,
    pub horizontal_nm: f64,
    pub vertical_ft: f64,
    pub t: f64,
}

impl ClosestApproach {
    pub fn is_closer_than(&self, other: &ClosestApproach) -> bool {
        is_closer(self.horizontal_nm, self.vertical_ft, other)
    }
}

fn is_closer(horizontal_nm: f64, vertical_ft: f64, best: &ClosestApproach) -> bool {
    horizontal_nm < best.horizontal_nm
        || (horizontal_nm == best.horizontal_nm && vertical_ft < best.vertical_ft)
}

/// Returns (horizontal_nm, vertical_ft), both non-negative.
fn separation(a: &SampledPosition, b: &SampledPosition) -> (f64, f64) {
    let horizontal_nm = distance(a.point(), b.point()) / METERS_PER_NM;
    let vertical_ft = (a.alt_ft - b.alt_ft).abs();
    (horizontal_nm, vertical_ft)
}

fn ordered_ids(a: &SampledPosition, b: &SampledPosition) -> (String, String) {
    if a.id <= b.id {
        (a.id.clone(), b.id.clone())
    } else {
        (b.id.clone(), a.id.clone())
    }
}

/// Every unordered pair strictly inside both minima at time `t`.
pub fn detect_conflicts(
    positions: &[SampledPosition],
    t: f64,
    rules: &SeparationRules,
) -> ConflictSet {
    let mut set = ConflictSet::default();

    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            let (horizontal_nm, vertical_ft) = separation(a, b);
            if !rules.is_violation(horizontal_nm, vertical_ft) {
                continue;
            }

            let (id_a, id_b) = ordered_ids(a, b);
            set.ids.insert(id_a.clone());
            set.ids.insert(id_b.clone());
            set.pairs.push(ConflictPair {
                id_a,
                id_b,
                horizontal_nm,
                vertical_ft,
                t,
            });
        }
    }

    set
}

/// Closest pair among `positions` at time `t`, or `None` with fewer than two.
pub fn closest_approach(positions: &[SampledPosition], t: f64) -> Option<ClosestApproach> {
    let mut best: Option<ClosestApproach> = None;

    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            let (horizontal_nm, vertical_ft) = separation(a, b);
            let replace = best
                .as_ref()
                .map(|best| is_closer(horizontal_nm, vertical_ft, best))
                .unwrap_or(true);
            if replace {
                let (id_a, id_b) = ordered_ids(a, b);
                best = Some(ClosestApproach {
                    id_a,
                    id_b,
                    horizontal_nm,
                    vertical_ft,
                    t,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Degrees of longitude spanning `nm` nautical miles along the equator.
    fn equator_lon_for_nm(nm: f64) -> f64 {
        (nm * METERS_PER_NM / crate::geodesy::EARTH_RADIUS_M).to_degrees()
    }

    #[test]
    fn test_two_nm_apart_conflicts_under_default_minima() {
        let positions = vec![
            SampledPosition::new("ACA101", 0.0, 0.0, 30_000.0),
            SampledPosition::new("WJA202", 0.0, equator_lon_for_nm(2.0), 30_500.0),
        ];

        let set = detect_conflicts(&positions, 1000.0, &SeparationRules::default());
        assert_eq!(set.pairs.len(), 1);
        assert!(set.contains("ACA101"));
        assert!(set.contains("WJA202"));
        let pair = &set.pairs[0];
        assert!((pair.horizontal_nm - 2.0).abs() < 1e-6);
        assert_eq!(pair.vertical_ft, 500.0);
        assert_eq!(pair.t, 1000.0);

        let tight = SeparationRules::new(1.0, 2000.0);
        assert!(detect_conflicts(&positions, 1000.0, &tight).is_empty());
    }

    #[test]
    fn test_flight_in_several_pairs_is_counted_once() {
        let positions = vec![
            SampledPosition::new("A", 0.0, 0.0, 10_000.0),
            SampledPosition::new("B", 0.0, equator_lon_for_nm(1.0), 10_000.0),
            SampledPosition::new("C", 0.0, -equator_lon_for_nm(1.0), 10_000.0),
            SampledPosition::new("FAR", 10.0, 10.0, 10_000.0),
        ];

        let set = detect_conflicts(&positions, 0.0, &SeparationRules::default());
        assert_eq!(set.pairs.len(), 3);
        assert_eq!(
            set.ids.iter().cloned().collect::<Vec<_>>(),
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
        assert!(!set.contains("FAR"));
    }

    #[test]
    fn test_vertical_separation_alone_prevents_conflict() {
        let positions = vec![
            SampledPosition::new("A", 45.0, -75.0, 10_000.0),
            SampledPosition::new("B", 45.0, -75.0, 12_000.0),
        ];
        assert!(detect_conflicts(&positions, 0.0, &SeparationRules::default()).is_empty());
    }

    #[test]
    fn test_pair_ids_are_ordered() {
        let positions = vec![
            SampledPosition::new("ZZZ", 0.0, 0.0, 0.0),
            SampledPosition::new("AAA", 0.0, 0.0, 0.0),
        ];
        let set = detect_conflicts(&positions, 0.0, &SeparationRules::default());
        assert_eq!(set.pairs[0].id_a, "AAA");
        assert_eq!(set.pairs[0].id_b, "ZZZ");
    }

    #[test]
    fn test_closest_approach_needs_two_positions() {
        assert!(closest_approach(&[], 0.0).is_none());
        let one = vec![SampledPosition::new("SOLO", 0.0, 0.0, 0.0)];
        assert!(closest_approach(&one, 0.0).is_none());
    }

    #[test]
    fn test_closest_approach_picks_min_horizontal() {
        let positions = vec![
            SampledPosition::new("A", 0.0, 0.0, 0.0),
            SampledPosition::new("B", 0.0, 1.0, 0.0),
            SampledPosition::new("C", 0.0, 0.1, 35_000.0),
        ];
        let best = closest_approach(&positions, 42.0).unwrap();
        assert_eq!((best.id_a.as_str(), best.id_b.as_str()), ("A", "C"));
        assert_eq!(best.vertical_ft, 35_000.0);
        assert_eq!(best.t, 42.0);
    }

    #[test]
    fn test_closest_approach_tie_breaks_on_vertical() {
        // B and C sit at the same horizontal distance from A
        let positions = vec![
            SampledPosition::new("A", 0.0, 0.0, 10_000.0),
            SampledPosition::new("B", 0.0, 0.5, 14_000.0),
            SampledPosition::new("C", 0.0, -0.5, 11_000.0),
        ];
        let best = closest_approach(&positions, 0.0).unwrap();
        assert_eq!((best.id_a.as_str(), best.id_b.as_str()), ("A", "C"));
        assert_eq!(best.vertical_ft, 1_000.0);
    }
}
