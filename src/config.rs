use crate::error::SsitError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_N_MAX: u64 = 1_500_000;
pub const DEFAULT_NEAR_EPS: f64 = 0.02;
pub const DEFAULT_LANE_EPSILON: f64 = 1e-12;
pub const DEFAULT_LANE_STABLE_THRESHOLD: f64 = -0.3;
pub const DEFAULT_LANE_INFINITY_THRESHOLD: f64 = -0.7;
pub const DEFAULT_DEPTH_PROXIMITY_QUANTILE: f64 = 0.33;
pub const DEFAULT_SHOCK_QUANTILE: f64 = 0.95;

/// Depth tercile cut points used for SIS banding.
pub const TERCILE_LOW_QUANTILE: f64 = 0.33;
pub const TERCILE_HIGH_QUANTILE: f64 = 0.66;

/// Inputs of one batch scan over `[2, n_max]`.
///
/// Missing fields in a JSON config file fall back to the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(default)]
pub struct ScanConfig {
    /// Inclusive upper bound of the scanned range.
    pub n_max: u64,
    /// Width of the near-infinity window below `H_s = 1`.
    pub near_eps: f64,
    /// Distance kept between a lane and the open interval's bounds.
    pub lane_epsilon: f64,
    pub lane_stable_threshold: f64,
    pub lane_infinity_threshold: f64,
    pub depth_proximity_quantile: f64,
    pub shock_quantile: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            n_max: DEFAULT_N_MAX,
            near_eps: DEFAULT_NEAR_EPS,
            lane_epsilon: DEFAULT_LANE_EPSILON,
            lane_stable_threshold: DEFAULT_LANE_STABLE_THRESHOLD,
            lane_infinity_threshold: DEFAULT_LANE_INFINITY_THRESHOLD,
            depth_proximity_quantile: DEFAULT_DEPTH_PROXIMITY_QUANTILE,
            shock_quantile: DEFAULT_SHOCK_QUANTILE,
        }
    }
}

impl ScanConfig {
    pub fn with_n_max(n_max: u64) -> Self {
        Self {
            n_max,
            ..Self::default()
        }
    }

    /// Load a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SsitError> {
        let text = fs::read_to_string(path)?;
        let config: ScanConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Reject any configuration the scan cannot run with. Called before any
    /// allocation so nothing is partially computed.
    pub fn validate(&self) -> Result<(), SsitError> {
        if self.n_max < 2 {
            return Err(SsitError::Config(format!("n_max must be at least 2, got {}", self.n_max)));
        }
        if usize::try_from(self.n_max).ok().and_then(|n| n.checked_add(1)).is_none() {
            return Err(SsitError::Config(format!(
                "n_max {} is not addressable on this platform",
                self.n_max
            )));
        }

        check_unit_interval("near_eps", self.near_eps)?;
        check_unit_interval("depth_proximity_quantile", self.depth_proximity_quantile)?;
        check_unit_interval("shock_quantile", self.shock_quantile)?;

        if !(self.lane_epsilon > 0.0 && self.lane_epsilon < 1.0) {
            return Err(SsitError::Config(format!(
                "lane_epsilon must lie in (0, 1), got {}",
                self.lane_epsilon
            )));
        }

        for (name, value) in [
            ("lane_stable_threshold", self.lane_stable_threshold),
            ("lane_infinity_threshold", self.lane_infinity_threshold),
        ] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(SsitError::Config(format!(
                    "{} must lie in [-1, 1], got {}",
                    name, value
                )));
            }
        }

        if self.lane_infinity_threshold > self.lane_stable_threshold {
            return Err(SsitError::Config(format!(
                "lane_infinity_threshold ({}) must not exceed lane_stable_threshold ({})",
                self.lane_infinity_threshold, self.lane_stable_threshold
            )));
        }

        Ok(())
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<(), SsitError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SsitError::Config(format!("{} must lie in [0, 1], got {}", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_max, 1_500_000);
        assert_eq!(config.depth_proximity_quantile, 0.33);
        assert_eq!(config.shock_quantile, 0.95);
    }

    #[test]
    fn test_n_max_below_two_rejected() {
        for n_max in [0, 1] {
            let err = ScanConfig::with_n_max(n_max).validate().unwrap_err();
            assert!(matches!(err, SsitError::Config(_)), "n_max={} should fail", n_max);
        }
        assert!(ScanConfig::with_n_max(2).validate().is_ok());
    }

    #[test]
    fn test_quantile_out_of_range_rejected() {
        let mut config = ScanConfig::with_n_max(100);
        config.shock_quantile = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("shock_quantile"));

        let mut config = ScanConfig::with_n_max(100);
        config.depth_proximity_quantile = -0.01;
        assert!(config.validate().is_err());

        let mut config = ScanConfig::with_n_max(100);
        config.depth_proximity_quantile = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lane_thresholds_must_be_ordered() {
        let mut config = ScanConfig::with_n_max(100);
        config.lane_infinity_threshold = -0.1;
        config.lane_stable_threshold = -0.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("lane_infinity_threshold"));

        config.lane_infinity_threshold = -0.5;
        assert!(config.validate().is_ok(), "equal thresholds are allowed");
    }

    #[test]
    fn test_lane_epsilon_domain() {
        let mut config = ScanConfig::with_n_max(100);
        config.lane_epsilon = 0.0;
        assert!(config.validate().is_err());
        config.lane_epsilon = 1.0;
        assert!(config.validate().is_err());
        config.lane_epsilon = 1e-9;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ScanConfig =
            serde_json::from_str(r#"{"n_max": 500, "shock_quantile": 0.9}"#).unwrap();
        assert_eq!(config.n_max, 500);
        assert_eq!(config.shock_quantile, 0.9);
        assert_eq!(config.lane_stable_threshold, DEFAULT_LANE_STABLE_THRESHOLD);
        assert_eq!(config.near_eps, DEFAULT_NEAR_EPS);
    }

    #[test]
    fn test_from_json_file() {
        let mut path = std::env::temp_dir();
        path.push("ssit_config_test_from_json_file.json");
        fs::write(&path, r#"{"n_max": 64, "lane_infinity_threshold": -0.8}"#).unwrap();

        let config = ScanConfig::from_json_file(&path).unwrap();
        assert_eq!(config.n_max, 64);
        assert_eq!(config.lane_infinity_threshold, -0.8);

        let _ = fs::remove_file(&path);
    }
}
