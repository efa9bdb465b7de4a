use crate::classify::{classify, second_differences};
use crate::config::ScanConfig;
use crate::dominance::assign_dominators;
use crate::error::SsitError;
use crate::metric::{Metrics, measure};
use crate::quantile::Thresholds;
use crate::record::{Record, Zone};
use crate::sieve::SpfSieve;
use bincode::{Decode, Encode};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// The finished scan: one record per n in `[2, n_max]`, indexed by `n - 2`.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct ScanTable {
    config: ScanConfig,
    thresholds: Thresholds,
    records: Vec<Record>,
}

/// Counters reported alongside a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub finite: u64,
    pub infinite: u64,
    pub near_infinity: u64,
    pub prime_proxy: u64,
    pub shock: u64,
    pub guard: u64,
    pub stable: u64,
    pub transitional: u64,
    pub proximal: u64,
}

impl ScanTable {
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, n: u64) -> Option<&Record> {
        let idx = n.checked_sub(2)?;
        self.records.get(usize::try_from(idx).ok()?)
    }

    pub fn finite(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| r.is_finite())
    }

    pub fn finite_count(&self) -> usize {
        self.finite().count()
    }

    pub fn infinite_count(&self) -> usize {
        self.records.len() - self.finite_count()
    }

    pub fn stats(&self) -> ScanStats {
        let mut stats = ScanStats::default();
        for r in &self.records {
            if r.is_finite() {
                stats.finite += 1;
            } else {
                stats.infinite += 1;
            }
            stats.near_infinity += u64::from(r.near_infinity);
            stats.prime_proxy += u64::from(r.prime_proxy);
            stats.shock += u64::from(r.shock);
            stats.guard += u64::from(r.guard);
            match r.zone {
                Zone::Stable => stats.stable += 1,
                Zone::Transitional => stats.transitional += 1,
                Zone::Proximal => stats.proximal += 1,
                Zone::Infinite => {}
            }
        }
        stats
    }
}

/// Phase A: measure every n on its own.
#[instrument(skip_all, fields(n_max = config.n_max))]
pub fn measure_range(sieve: &SpfSieve, config: &ScanConfig) -> Vec<Metrics> {
    let metrics: Vec<Metrics> = (2..=config.n_max).map(|n| measure(n, sieve, config)).collect();
    let finite = metrics.iter().filter(|m| m.class.is_finite()).count();
    info!(entries = metrics.len(), finite, infinite = metrics.len() - finite, "phase A measured");
    metrics
}

/// Run the whole batch: validate, sieve, measure, estimate thresholds,
/// classify, then count dominators.
#[instrument(skip_all, fields(n_max = config.n_max))]
pub fn run_scan(config: &ScanConfig) -> Result<ScanTable, SsitError> {
    config.validate()?;
    let started = Instant::now();

    let sieve = SpfSieve::new(config.n_max);
    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "sieve built");

    let metrics = measure_range(&sieve, config);
    // barrier 1: thresholds need every metric before anything is classified
    let second = second_differences(&metrics);
    let curvatures: Vec<Option<f64>> = second.iter().map(|d| d.map(f64::abs)).collect();

    let thresholds = Thresholds::estimate(&metrics, &curvatures, config);
    info!(
        tercile_low = thresholds.tercile_low,
        tercile_high = thresholds.tercile_high,
        depth_proximity = thresholds.depth_proximity,
        shock = thresholds.shock,
        defined_curvatures = curvatures.iter().flatten().count(),
        "thresholds estimated"
    );

    let mut records = classify(metrics, &second, &thresholds, config);
    debug!("phase B classified");

    // barrier 2: dominance compares against the complete FINITE set
    assign_dominators(&mut records);

    let table = ScanTable {
        config: config.clone(),
        thresholds,
        records,
    };
    info!(
        records = table.len(),
        finite = table.finite_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scan complete"
    );
    Ok(table)
}
