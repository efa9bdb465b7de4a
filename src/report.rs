use crate::config::ScanConfig;
use crate::error::SsitError;
use crate::export::format_real;
use crate::pipeline::{ScanStats, ScanTable};
use crate::quantile::Thresholds;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const DEFINITIONS: &[&str] = &[
    "`H_s(n) = d_min(n) / sqrt(n)`",
    "`I(n) = 1 / (1 - H_s(n))` when `H_s(n) < 1`; else `I(n)=INF` (INFINITE)",
    "`lane a(n) = clamp(2*R_full(n) - 1)` where `R_full` is mean spacing ratio of divisors within sqrt(n)",
    "`D_inf(n)` is weighted divisor density within `2..floor(sqrt(n))` normalized to `[0,1]`",
    "SIS bands are terciles of `D_inf` over FINITE: THIN / MEDIUM / THICK",
    "Curvature proxy: `K(n) = abs(I(n+1) - 2*I(n) + I(n-1))` over finite triples",
    "Shock flag: `K(n) >= shock_K_threshold`",
    "Zones (FINITE only): STABLE / TRANSITIONAL / PROXIMAL",
    "Guard flag: 1 iff zone is PROXIMAL or shock_flag=1",
    "IDO dominators (FINITE only): count of FINITE objects `o` with `o.lane < lane(n)` and `o.depth <= depth(n)`",
];

/// Machine-readable companion of the text report.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub run_unix_secs: u64,
    pub config: &'a ScanConfig,
    pub thresholds: &'a Thresholds,
    pub stats: ScanStats,
    pub csv_file: String,
    pub csv_sha256: String,
}

impl<'a> Manifest<'a> {
    pub fn new(table: &'a ScanTable, run_unix_secs: u64, csv_file: &str, csv_sha256: &str) -> Self {
        Manifest {
            run_unix_secs,
            config: table.config(),
            thresholds: table.thresholds(),
            stats: table.stats(),
            csv_file: csv_file.to_string(),
            csv_sha256: csv_sha256.to_string(),
        }
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), SsitError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

/// Plain-text run report: parameters, thresholds, definitions, counts and
/// the CSV digest.
pub fn render_report(table: &ScanTable, run_unix_secs: u64, csv_sha256: &str) -> String {
    let config = table.config();
    let t = table.thresholds();
    let stats = table.stats();
    let mut out = String::new();

    let title = "SSIT scan report: zones, shock, guard, IDO dominators";
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}\n", "=".repeat(title.len()));

    let _ = writeln!(out, "run_unix_secs={}", run_unix_secs);
    let _ = writeln!(out, "n_max={}", config.n_max);
    let _ = writeln!(out, "near_eps={}", config.near_eps);
    let _ = writeln!(out, "lane_epsilon={}", config.lane_epsilon);
    let _ = writeln!(out, "lane_stable={}", config.lane_stable_threshold);
    let _ = writeln!(out, "lane_infty={}", config.lane_infinity_threshold);
    let _ = writeln!(out, "depth_infprox_quantile={}", config.depth_proximity_quantile);
    let _ = writeln!(out, "depth_infprox_value={}", format_real(t.depth_proximity));
    let _ = writeln!(out, "depth_tercile_33={}", format_real(t.tercile_low));
    let _ = writeln!(out, "depth_tercile_66={}", format_real(t.tercile_high));
    let _ = writeln!(out, "shock_quantile={}", config.shock_quantile);
    let _ = writeln!(out, "shock_K_threshold={}\n", format_real(t.shock));

    section(&mut out, "Definitions (ASCII)");
    for line in DEFINITIONS {
        let _ = writeln!(out, "{}", line);
    }
    out.push('\n');

    section(&mut out, "Counts");
    let _ = writeln!(out, "INFINITE_count={}", stats.infinite);
    let _ = writeln!(out, "FINITE_count={}", stats.finite);
    let _ = writeln!(out, "NearInf_FINITE_count={}", stats.near_infinity);
    let _ = writeln!(out, "prime_proxy_count={}\n", stats.prime_proxy);

    section(&mut out, "SHA-256");
    let _ = writeln!(out, "scan_csv_sha256={}", csv_sha256);

    out
}
