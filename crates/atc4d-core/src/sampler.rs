//! Point-in-time lookup on a sorted trajectory.

use crate::geodesy::bearing;
use crate::models::TrajectoryPoint;

/// Seconds ahead used to derive a heading from the trajectory itself.
pub const HEADING_LOOKAHEAD_SEC: f64 = 60.0;

/// Interpolated trajectory state at `t` in O(log n).
///
/// Queries before the first or after the last sample return that endpoint
/// unchanged. Otherwise lat, lon and altitude are blended linearly between the
/// bracketing samples and the returned `t` is the query time. `None` only for
/// an empty trajectory.
pub fn sample(trajectory: &[TrajectoryPoint], t: f64) -> Option<TrajectoryPoint> {
    let first = trajectory.first()?;
    let last = trajectory.last()?;
    if t <= first.t {
        return Some(*first);
    }
    if t >= last.t {
        return Some(*last);
    }

    // invariant: trajectory[lo].t <= t < trajectory[hi].t
    let mut lo = 0usize;
    let mut hi = trajectory.len() - 1;
    while lo + 1 < hi {
        let mid = lo + (hi - lo) / 2;
        if trajectory[mid].t <= t {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let a = &trajectory[lo];
    let b = &trajectory[hi];
    let span = b.t - a.t;
    let u = if span == 0.0 { 0.0 } else { (t - a.t) / span };

    Some(TrajectoryPoint {
        t,
        lat: a.lat + (b.lat - a.lat) * u,
        lon: a.lon + (b.lon - a.lon) * u,
        alt_ft: a.alt_ft + (b.alt_ft - a.alt_ft) * u,
    })
}

/// Direction of travel at `t`, from the sampled position toward the position
/// `HEADING_LOOKAHEAD_SEC` later. Stationary or finished flights report 0.
pub fn heading_at(trajectory: &[TrajectoryPoint], t: f64) -> Option<f64> {
    let here = sample(trajectory, t)?;
    let ahead = sample(trajectory, t + HEADING_LOOKAHEAD_SEC)?;
    Some(bearing(here.position(), ahead.position()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(t: f64, lat: f64, lon: f64, alt_ft: f64) -> TrajectoryPoint {
        TrajectoryPoint { t, lat, lon, alt_ft }
    }

    fn track() -> Vec<TrajectoryPoint> {
        vec![
            point(100.0, 0.0, 0.0, 0.0),
            point(160.0, 0.0, 0.1, 6_000.0),
            point(220.0, 0.1, 0.2, 12_000.0),
            point(250.0, 0.1, 0.3, 0.0),
        ]
    }

    #[test]
    fn empty_trajectory_has_no_sample() {
        assert!(sample(&[], 10.0).is_none());
        assert!(heading_at(&[], 10.0).is_none());
    }

    #[test]
    fn out_of_range_queries_clamp_to_endpoints() {
        let traj = track();
        assert_eq!(sample(&traj, -1e9), Some(traj[0]));
        assert_eq!(sample(&traj, 100.0), Some(traj[0]));
        assert_eq!(sample(&traj, 250.0), Some(traj[3]));
        assert_eq!(sample(&traj, 1e9), Some(traj[3]));
    }

    #[test]
    fn sample_timestamps_reproduce_points() {
        let traj = track();
        for p in &traj {
            let s = sample(&traj, p.t).unwrap();
            assert!((s.lat - p.lat).abs() < 1e-12);
            assert!((s.lon - p.lon).abs() < 1e-12);
            assert!((s.alt_ft - p.alt_ft).abs() < 1e-9);
        }
    }

    #[test]
    fn interpolates_between_bracketing_samples() {
        let traj = track();
        let s = sample(&traj, 190.0).unwrap();
        assert_eq!(s.t, 190.0);
        assert!((s.lat - 0.05).abs() < 1e-12);
        assert!((s.lon - 0.15).abs() < 1e-12);
        assert!((s.alt_ft - 9_000.0).abs() < 1e-9);
    }

    #[test]
    fn duplicate_timestamps_do_not_divide_by_zero() {
        let traj = vec![
            point(0.0, 0.0, 0.0, 0.0),
            point(10.0, 1.0, 1.0, 100.0),
            point(10.0, 2.0, 2.0, 200.0),
            point(20.0, 3.0, 3.0, 0.0),
        ];
        let s = sample(&traj, 15.0).unwrap();
        assert!((s.lat - 2.5).abs() < 1e-12);
        assert!(s.lat.is_finite() && s.alt_ft.is_finite());
    }

    #[test]
    fn heading_points_along_track() {
        let traj = vec![point(0.0, 0.0, 0.0, 0.0), point(600.0, 0.0, 1.0, 0.0)];
        let heading = heading_at(&traj, 100.0).unwrap();
        assert!((heading - 90.0).abs() < 1e-6);
        // after arrival both samples clamp to the last point
        assert_eq!(heading_at(&traj, 900.0), Some(0.0));
    }
}
