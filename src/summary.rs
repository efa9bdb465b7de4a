use crate::export::format_real;
use crate::pipeline::ScanTable;
use crate::record::{Record, SetClass, Zone};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::fmt::Write as _;

pub const DEFAULT_TOP_K: usize = 50;

/// Guard-oriented digest of a finished table.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardSummary {
    pub finite: usize,
    pub infinite: usize,
    pub guard: usize,
    pub shock: usize,
    pub zone_counts: Vec<(Zone, usize)>,
    pub top_dominated: Vec<(u64, u64)>,
    pub top_curvature: Vec<(f64, u64)>,
    pub first_proximal: Vec<(u64, f64, f64)>,
    pub top_score: Vec<(f64, u64)>,
}

/// Largest `value` first; equal values put the larger n first.
fn top_by<F>(records: &[&Record], k: usize, value: F) -> Vec<(f64, u64)>
where
    F: Fn(&Record) -> Option<f64>,
{
    records
        .iter()
        .filter_map(|&r| value(r).map(|v| (v, r.n)))
        .sorted_by(|a, b| b.0.total_cmp(&a.0).then(b.1.cmp(&a.1)))
        .take(k)
        .collect()
}

impl GuardSummary {
    pub fn from_table(table: &ScanTable, top_k: usize) -> Self {
        let mut class_counts: FxHashMap<SetClass, usize> = FxHashMap::default();
        let mut zone_counts: FxHashMap<Zone, usize> = FxHashMap::default();
        let mut guard = 0;
        let mut shock = 0;

        for r in table.records() {
            *class_counts.entry(r.class).or_default() += 1;
            *zone_counts.entry(r.zone).or_default() += 1;
            guard += usize::from(r.guard);
            shock += usize::from(r.shock);
        }

        let finite: Vec<&Record> = table.finite().collect();

        let top_dominated = finite
            .iter()
            .filter_map(|r| r.dominators.map(|d| (d, r.n)))
            .sorted_by_key(|&(d, n)| Reverse((d, n)))
            .take(top_k)
            .collect();

        let first_proximal = finite
            .iter()
            .filter(|r| r.zone == Zone::Proximal)
            .take(top_k)
            .map(|r| (r.n, r.lane, r.depth))
            .collect();

        GuardSummary {
            finite: class_counts.get(&SetClass::Finite).copied().unwrap_or(0),
            infinite: class_counts.get(&SetClass::Infinite).copied().unwrap_or(0),
            guard,
            shock,
            zone_counts: zone_counts
                .into_iter()
                .sorted_by_key(|&(zone, _)| zone.as_str())
                .collect(),
            top_dominated,
            top_curvature: top_by(&finite, top_k, |r| r.curvature),
            first_proximal,
            top_score: top_by(&finite, top_k, |r| Some(r.infinity_score())),
        }
    }

    pub fn render(&self, top_k: usize, csv_sha256: Option<&str>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "SSIT Guard Summary");
        let _ = writeln!(out, "==================\n");
        if let Some(digest) = csv_sha256 {
            let _ = writeln!(out, "scan_csv_sha256={}\n", digest);
        }

        let _ = writeln!(out, "Counts\n------");
        let _ = writeln!(out, "FINITE_count={}", self.finite);
        let _ = writeln!(out, "INFINITE_count={}", self.infinite);
        let _ = writeln!(out, "guard_flag_count={}", self.guard);
        let _ = writeln!(out, "shock_flag_count={}\n", self.shock);

        let _ = writeln!(out, "Zone counts\n-----------");
        for (zone, count) in &self.zone_counts {
            let _ = writeln!(out, "{}={}", zone, count);
        }
        out.push('\n');

        let _ = writeln!(out, "Top {} FINITE by ido_dominators", top_k);
        for (count, n) in &self.top_dominated {
            let _ = writeln!(out, "n={} ido_dominators={}", n, count);
        }
        out.push('\n');

        let _ = writeln!(out, "Top {} FINITE by curvature K", top_k);
        for (k, n) in &self.top_curvature {
            let _ = writeln!(out, "n={} K={}", n, format_real(*k));
        }
        out.push('\n');

        let _ = writeln!(out, "First {} FINITE in PROXIMAL zone", top_k);
        for (n, lane, depth) in &self.first_proximal {
            let _ = writeln!(
                out,
                "n={} lane={} depth={}",
                n,
                format_real(*lane),
                format_real(*depth)
            );
        }
        out.push('\n');

        let _ = writeln!(out, "Top {} FINITE by infinity-likeness score", top_k);
        let _ = writeln!(out, "score(n)=(-lane_a)*(1-D_inf)");
        for (score, n) in &self.top_score {
            let _ = writeln!(out, "n={} score={}", n, format_real(*score));
        }

        out
    }
}
