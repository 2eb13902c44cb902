//! Tool configuration from environment, overridable per flag.

use std::env;

use atc4d_core::{ProfileRules, SeparationRules};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Seconds between synthesized trajectory samples
    pub trajectory_step_sec: u32,
    /// Seconds between safety scan instants
    pub scan_step_sec: u32,
    pub min_horizontal_nm: f64,
    pub min_vertical_ft: f64,
}

impl Default for Config {
    fn default() -> Self {
        let separation = SeparationRules::default();
        Self {
            trajectory_step_sec: ProfileRules::default().sample_step_sec,
            scan_step_sec: 60,
            min_horizontal_nm: separation.min_horizontal_nm,
            min_vertical_ft: separation.min_vertical_ft,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            trajectory_step_sec: env_or("ATC4D_STEP_SEC", defaults.trajectory_step_sec),
            scan_step_sec: env_or("ATC4D_SCAN_STEP_SEC", defaults.scan_step_sec),
            min_horizontal_nm: env_or("ATC4D_HORIZ_NM", defaults.min_horizontal_nm),
            min_vertical_ft: env_or("ATC4D_VERT_FT", defaults.min_vertical_ft),
        }
    }

    /// Replace any value given explicitly on the command line.
    pub fn with_overrides(
        mut self,
        trajectory_step_sec: Option<u32>,
        scan_step_sec: Option<u32>,
        min_horizontal_nm: Option<f64>,
        min_vertical_ft: Option<f64>,
    ) -> Self {
        if let Some(v) = trajectory_step_sec {
            self.trajectory_step_sec = v;
        }
        if let Some(v) = scan_step_sec {
            self.scan_step_sec = v;
        }
        if let Some(v) = min_horizontal_nm {
            self.min_horizontal_nm = v;
        }
        if let Some(v) = min_vertical_ft {
            self.min_vertical_ft = v;
        }
        self
    }

    pub fn profile_rules(&self) -> ProfileRules {
        ProfileRules::default().with_step(self.trajectory_step_sec)
    }

    pub fn separation_rules(&self) -> SeparationRules {
        SeparationRules::new(self.min_horizontal_nm, self.min_vertical_ft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_rules() {
        let config = Config::default();
        assert_eq!(config.trajectory_step_sec, 60);
        assert_eq!(config.scan_step_sec, 60);
        assert_eq!(config.separation_rules(), SeparationRules::default());
    }

    #[test]
    fn flags_override_values() {
        let config = Config::default().with_overrides(Some(30), None, Some(3.0), None);
        assert_eq!(config.trajectory_step_sec, 30);
        assert_eq!(config.scan_step_sec, 60);
        assert_eq!(config.profile_rules().sample_step_sec, 30);
        assert_eq!(config.separation_rules(), SeparationRules::new(3.0, 2000.0));
    }

    #[test]
    fn unparsable_env_value_falls_back() {
        assert_eq!(env_or("ATC4D_TEST_UNSET_KEY_FOR_CONFIG", 42u32), 42);
    }
}
