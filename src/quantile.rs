use crate::config::{ScanConfig, TERCILE_HIGH_QUANTILE, TERCILE_LOW_QUANTILE};
use crate::metric::Metrics;
use bincode::{Decode, Encode};
use serde::Serialize;

/// Floor-rank quantile of an ascending slice: `v[floor(q * (m - 1))]`,
/// 0.0 for an empty slice.
pub fn quantile_floor(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        m => {
            let idx = (q * (m - 1) as f64).floor();
            // q outside [0, 1] clamps to the first or last element
            let idx = if idx < 0.0 { 0 } else { (idx as usize).min(m - 1) };
            sorted[idx]
        }
    }
}

/// Data-derived cut points computed once the whole range has been measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Encode, Decode)]
pub struct Thresholds {
    pub tercile_low: f64,
    pub tercile_high: f64,
    pub depth_proximity: f64,
    pub shock: f64,
}

impl Thresholds {
    /// `metrics` supplies FINITE depths, `curvatures` the defined curvature values.
    pub fn estimate(metrics: &[Metrics], curvatures: &[Option<f64>], config: &ScanConfig) -> Self {
        let mut depths: Vec<f64> = metrics
            .iter()
            .filter(|m| m.class.is_finite())
            .map(|m| m.depth)
            .collect();
        depths.sort_by(f64::total_cmp);

        let mut defined: Vec<f64> = curvatures.iter().flatten().copied().collect();
        defined.sort_by(f64::total_cmp);

        Thresholds {
            tercile_low: quantile_floor(&depths, TERCILE_LOW_QUANTILE),
            tercile_high: quantile_floor(&depths, TERCILE_HIGH_QUANTILE),
            depth_proximity: quantile_floor(&depths, config.depth_proximity_quantile),
            shock: quantile_floor(&defined, config.shock_quantile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Inversion, SetClass};

    fn finite(n: u64, depth: f64) -> Metrics {
        Metrics {
            n,
            class: SetClass::Finite,
            d_min: Some(2),
            h_s: Some(0.5),
            inversion: Inversion::Finite(2.0),
            near_infinity: false,
            prime_proxy: false,
            lane: 0.0,
            depth,
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(quantile_floor(&[], 0.5), 0.0);
        assert_eq!(quantile_floor(&[0.7], 0.0), 0.7);
        assert_eq!(quantile_floor(&[0.7], 1.0), 0.7);
    }

    #[test]
    fn test_floor_rank() {
        let v: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert_eq!(quantile_floor(&v, 0.0), 0.0);
        assert_eq!(quantile_floor(&v, 0.33), 2.0);
        assert_eq!(quantile_floor(&v, 0.66), 5.0);
        assert_eq!(quantile_floor(&v, 0.95), 8.0);
        assert_eq!(quantile_floor(&v, 1.0), 9.0);
    }

    #[test]
    fn test_out_of_range_quantile_is_clamped() {
        let v = [1.0, 2.0, 3.0];
        assert_eq!(quantile_floor(&v, -0.5), 1.0);
        assert_eq!(quantile_floor(&v, 7.0), 3.0);
    }

    #[test]
    fn test_estimate_ignores_infinite_entries() {
        let mut infinite = finite(5, 0.0);
        infinite.class = SetClass::Infinite;
        infinite.inversion = Inversion::Infinite;

        let metrics = vec![finite(6, 1.0), infinite, finite(10, 0.25), finite(12, 0.5)];
        let curvatures = vec![None, Some(4.0), None, Some(1.0)];
        let t = Thresholds::estimate(&metrics, &curvatures, &ScanConfig::with_n_max(12));

        assert_eq!(t.tercile_low, 0.25);
        assert_eq!(t.tercile_high, 0.5);
        assert_eq!(t.depth_proximity, 0.25);
        // floor(0.95 * 1) = 0
        assert_eq!(t.shock, 1.0);
    }

    #[test]
    fn test_single_finite_entry() {
        let t = Thresholds::estimate(&[finite(6, 1.0)], &[None], &ScanConfig::with_n_max(7));
        assert_eq!(t.tercile_low, 1.0);
        assert_eq!(t.tercile_high, 1.0);
        assert_eq!(t.depth_proximity, 1.0);
        assert_eq!(t.shock, 0.0);
    }
}
