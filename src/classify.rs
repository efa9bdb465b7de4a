use crate::config::ScanConfig;
use crate::metric::Metrics;
use crate::quantile::Thresholds;
use crate::record::{Band, Record, SetClass, Zone};
use fixedbitset::FixedBitSet;

/// Bit i is set when `metrics[i]` is FINITE.
pub fn finite_mask(metrics: &[Metrics]) -> FixedBitSet {
    let mut mask = FixedBitSet::with_capacity(metrics.len());
    for (i, m) in metrics.iter().enumerate() {
        if m.class.is_finite() {
            mask.insert(i);
        }
    }
    mask
}

/// Signed second difference of `I` at every index whose neighbours on both
/// sides are FINITE and inside the table; `None` everywhere else.
pub fn second_differences(metrics: &[Metrics]) -> Vec<Option<f64>> {
    let mask = finite_mask(metrics);
    let mut out = vec![None; metrics.len()];
    // the first and last entries lack a neighbour and stay None
    for i in 1..metrics.len().saturating_sub(1) {
        if !(mask.contains(i - 1) && mask.contains(i) && mask.contains(i + 1)) {
            continue;
        }
        let (Some(prev), Some(cur), Some(next)) = (
            metrics[i - 1].inversion.value(),
            metrics[i].inversion.value(),
            metrics[i + 1].inversion.value(),
        ) else {
            unreachable!("finite entry {} without a finite inversion", metrics[i].n);
        };
        out[i] = Some(next - 2.0 * cur + prev);
    }
    out
}

pub fn band_for(depth: f64, tercile_low: f64, tercile_high: f64) -> Band {
    if depth <= tercile_low {
        Band::Thin
    } else if depth <= tercile_high {
        Band::Medium
    } else {
        Band::Thick
    }
}

pub fn zone_for(
    class: SetClass,
    lane: f64,
    depth: f64,
    config: &ScanConfig,
    depth_proximity: f64,
) -> Zone {
    if !class.is_finite() {
        return Zone::Infinite;
    }
    if lane <= config.lane_infinity_threshold && depth <= depth_proximity {
        Zone::Proximal
    } else if lane <= config.lane_stable_threshold {
        Zone::Transitional
    } else {
        Zone::Stable
    }
}

/// Phase B: turn measured entries into classified records. `dominators` is
/// left empty for the dominance sweep.
pub fn classify(
    metrics: Vec<Metrics>,
    second_differences: &[Option<f64>],
    thresholds: &Thresholds,
    config: &ScanConfig,
) -> Vec<Record> {
    metrics
        .into_iter()
        .zip(second_differences)
        .map(|(m, &second_difference)| {
            let curvature = second_difference.map(f64::abs);
            let shock = curvature.is_some_and(|k| k >= thresholds.shock);
            let band = m
                .class
                .is_finite()
                .then(|| band_for(m.depth, thresholds.tercile_low, thresholds.tercile_high));
            let zone = zone_for(m.class, m.lane, m.depth, config, thresholds.depth_proximity);

            Record {
                n: m.n,
                class: m.class,
                d_min: m.d_min,
                h_s: m.h_s,
                inversion: m.inversion,
                near_infinity: m.near_infinity,
                prime_proxy: m.prime_proxy,
                lane: m.lane,
                depth: m.depth,
                band,
                second_difference,
                curvature,
                shock,
                zone,
                guard: zone == Zone::Proximal || shock,
                dominators: None,
            }
        })
        .collect()
}
