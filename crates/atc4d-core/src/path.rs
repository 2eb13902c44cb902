//! Polyline path through a flight's waypoints.
//!
//! Lengths are great-circle, but intermediate positions are interpolated
//! linearly on raw lat/lon within the containing segment. Callers must not
//! treat those points as geodesically exact.

use crate::geodesy::{distance, Point2D};

#[derive(Debug, Clone)]
pub struct FlightPath {
    waypoints: Vec<Point2D>,
    /// cumulative[i] is the path length from waypoints[0] to waypoints[i]
    cumulative: Vec<f64>,
}

impl FlightPath {
    /// Build a path from `[departure, ...fixes, arrival]`. Returns `None` for an
    /// empty waypoint list; a single waypoint is a stationary path.
    pub fn new(waypoints: Vec<Point2D>) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }

        let mut cumulative = Vec::with_capacity(waypoints.len());
        cumulative.push(0.0);
        let mut total = 0.0;
        for pair in waypoints.windows(2) {
            total += distance(pair[0], pair[1]);
            cumulative.push(total);
        }

        Some(Self {
            waypoints,
            cumulative,
        })
    }

    pub fn waypoints(&self) -> &[Point2D] {
        &self.waypoints
    }

    /// Length of segment `i` (between waypoints `i` and `i + 1`) in meters.
    pub fn segment_length(&self, i: usize) -> Option<f64> {
        Some(self.cumulative.get(i + 1)? - self.cumulative.get(i)?)
    }

    /// Total great-circle length in meters.
    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Position at `frac` of the total length, `frac` clamped to [0, 1].
    pub fn position_at_fraction(&self, frac: f64) -> Point2D {
        let first = self.waypoints[0];
        let last = self.waypoints[self.waypoints.len() - 1];

        let frac = if frac.is_nan() { 0.0 } else { frac.clamp(0.0, 1.0) };
        let total = self.total_length();
        if total <= 0.0 || frac == 0.0 {
            return first;
        }
        if frac == 1.0 {
            return last;
        }

        let target = frac * total;
        for (i, pair) in self.waypoints.windows(2).enumerate() {
            let prefix = self.cumulative[i];
            let end = self.cumulative[i + 1];
            if target > end {
                continue;
            }
            let seg_len = end - prefix;
            let u = if seg_len > 0.0 {
                (target - prefix) / seg_len
            } else {
                0.0
            };
            let (a, b) = (pair[0], pair[1]);
            return Point2D::new(a.lat + (b.lat - a.lat) * u, a.lon + (b.lon - a.lon) * u);
        }

        last
    }
}
