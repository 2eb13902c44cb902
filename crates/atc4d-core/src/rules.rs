//! Separation minima and climb/cruise/descent profile settings.

use serde::{Deserialize, Serialize};

/// Loss-of-separation thresholds. A pair violates separation only when it is
/// strictly inside both minima.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeparationRules {
    /// Minimum horizontal separation in nautical miles
    pub min_horizontal_nm: f64,
    /// Minimum vertical separation in feet
    pub min_vertical_ft: f64,
}

impl Default for SeparationRules {
    fn default() -> Self {
        Self {
            min_horizontal_nm: 5.0,
            min_vertical_ft: 2000.0,
        }
    }
}

impl SeparationRules {
    pub fn new(min_horizontal_nm: f64, min_vertical_ft: f64) -> Self {
        Self {
            min_horizontal_nm,
            min_vertical_ft,
        }
    }

    /// True when both separations fall strictly below the minima.
    pub fn is_violation(&self, horizontal_nm: f64, vertical_ft: f64) -> bool {
        horizontal_nm < self.min_horizontal_nm && vertical_ft < self.min_vertical_ft
    }
}

/// Trip-fraction based vertical profile and trajectory sampling step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileRules {
    /// Fraction of the trip spent climbing from the ground to cruise
    pub climb_fraction: f64,
    /// Fraction of the trip spent descending from cruise to the ground
    pub descent_fraction: f64,
    /// Seconds between synthesized trajectory samples
    pub sample_step_sec: u32,
}

impl Default for ProfileRules {
    fn default() -> Self {
        Self {
            climb_fraction: 0.15,
            descent_fraction: 0.15,
            sample_step_sec: 60,
        }
    }
}

impl ProfileRules {
    pub fn with_step(mut self, sample_step_sec: u32) -> Self {
        self.sample_step_sec = sample_step_sec;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_separation_is_not_a_violation() {
        let rules = SeparationRules::default();
        assert!(!rules.is_violation(5.0, 0.0));
        assert!(!rules.is_violation(0.0, 2000.0));
        assert!(rules.is_violation(4.999, 1999.0));
    }

    #[test]
    fn both_minima_must_be_breached() {
        let rules = SeparationRules::new(5.0, 2000.0);
        assert!(!rules.is_violation(1.0, 3000.0));
        assert!(!rules.is_violation(10.0, 0.0));
    }
}
