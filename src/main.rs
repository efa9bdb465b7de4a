use clap::{Args, Parser, Subcommand};
use ssit::export::{sha256_hex, write_csv_file};
use ssit::omega::{DEFAULT_PAIRS, describe_pair, parse_pairs};
use ssit::report::{Manifest, render_report};
use ssit::summary::{DEFAULT_TOP_K, GuardSummary};
use ssit::{ScanConfig, SsitError, run_scan, snapshot, table_print};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

const CSV_FILENAME: &str = "ssit_scan.csv";
const REPORT_FILENAME: &str = "ssit_report.txt";
const MANIFEST_FILENAME: &str = "ssit_manifest.json";

#[derive(Parser)]
#[command(name = "ssit")]
#[command(
    about = "Divisor-structure scan: lanes, depths, zones, guards and dominance counts",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan [2, n_max] and write the CSV table, report, manifest and snapshot
    Scan(ScanArgs),
    /// Guard summary of a saved snapshot
    Summary {
        /// Snapshot written by `scan`
        #[arg(long)]
        snapshot: PathBuf,
        /// Where to write the summary report
        #[arg(long)]
        out_report: PathBuf,
        /// Optional scan CSV whose SHA-256 is recorded in the summary
        #[arg(long)]
        scan_csv: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Symbolic infinity operations on Omega(n) pairs
    Ops {
        /// Comma-separated pairs 'a:b,c:d,...'
        #[arg(long, default_value = DEFAULT_PAIRS)]
        pairs: String,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// JSON config file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    n_max: Option<u64>,
    #[arg(long, default_value = "ssit_out")]
    out_dir: PathBuf,
    #[arg(long)]
    near_eps: Option<f64>,
    #[arg(long)]
    lane_epsilon: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    lane_stable: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    lane_infinity: Option<f64>,
    #[arg(long)]
    depth_proximity_quantile: Option<f64>,
    #[arg(long)]
    shock_quantile: Option<f64>,
    /// Print records n in [from, to] after the scan, e.g. `--preview 2:40`
    #[arg(long)]
    preview: Option<String>,
}

impl ScanArgs {
    fn resolve_config(&self) -> Result<ScanConfig, SsitError> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_json_file(path)?,
            None => ScanConfig::default(),
        };
        if let Some(v) = self.n_max {
            config.n_max = v;
        }
        if let Some(v) = self.near_eps {
            config.near_eps = v;
        }
        if let Some(v) = self.lane_epsilon {
            config.lane_epsilon = v;
        }
        if let Some(v) = self.lane_stable {
            config.lane_stable_threshold = v;
        }
        if let Some(v) = self.lane_infinity {
            config.lane_infinity_threshold = v;
        }
        if let Some(v) = self.depth_proximity_quantile {
            config.depth_proximity_quantile = v;
        }
        if let Some(v) = self.shock_quantile {
            config.shock_quantile = v;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_window(text: &str) -> Result<(u64, u64), SsitError> {
    let (from, to) = text.split_once(':').ok_or_else(|| {
        SsitError::Parse(format!(
            "preview window must look like 'from:to', got '{}'",
            text
        ))
    })?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u64>()
            .map_err(|_| SsitError::Parse(format!("'{}' is not a non-negative integer", s)))
    };
    Ok((parse(from)?, parse(to)?))
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn run_scan_command(args: &ScanArgs) -> Result<(), SsitError> {
    let config = args.resolve_config()?;
    let window = args.preview.as_deref().map(parse_window).transpose()?;

    fs::create_dir_all(&args.out_dir)?;
    let csv_path = args.out_dir.join(CSV_FILENAME);
    let report_path = args.out_dir.join(REPORT_FILENAME);
    let manifest_path = args.out_dir.join(MANIFEST_FILENAME);
    let snapshot_path = args.out_dir.join(snapshot::snapshot_filename());

    info!(out_dir = %args.out_dir.display(), n_max = config.n_max, "starting scan");
    let run_secs = unix_secs();
    let table = run_scan(&config)?;

    let digest = write_csv_file(&table, &csv_path)?;
    info!(path = %csv_path.display(), sha256 = %digest, "csv written");

    fs::write(&report_path, render_report(&table, run_secs, &digest))?;
    Manifest::new(&table, run_secs, CSV_FILENAME, &digest).write(&manifest_path)?;
    snapshot::save(&table, &snapshot_path)?;
    info!(
        report = %report_path.display(),
        manifest = %manifest_path.display(),
        snapshot = %snapshot_path.display(),
        "outputs written"
    );

    if let Some((from, to)) = window {
        println!("[ssit] Records {}..={}", from, to);
        table_print::print_window(&table, from, to);
    }

    let stats = table.stats();
    println!(
        "[ssit] n_max={} FINITE={} INFINITE={} guard={} shock={}",
        config.n_max, stats.finite, stats.infinite, stats.guard, stats.shock
    );
    println!("[ssit] scan_csv_sha256={}", digest);
    Ok(())
}

fn run_summary_command(
    snapshot_path: &Path,
    out_report: &Path,
    scan_csv: Option<&Path>,
    top_k: usize,
) -> Result<(), SsitError> {
    let table = snapshot::load(snapshot_path)?;
    info!(path = %snapshot_path.display(), records = table.len(), "snapshot loaded");

    let digest = match scan_csv {
        Some(path) => Some(sha256_hex(&fs::read(path)?)),
        None => None,
    };

    let summary = GuardSummary::from_table(&table, top_k);
    if let Some(parent) = out_report.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(out_report, summary.render(top_k, digest.as_deref()))?;

    println!(
        "[ssit] summary written to {} (guard={}, shock={})",
        out_report.display(),
        summary.guard,
        summary.shock
    );
    Ok(())
}

fn run_ops_command(pairs: &str) -> Result<(), SsitError> {
    let pairs = parse_pairs(pairs)?;

    println!("=== SSIT Infinity Ops Demo ===");
    println!("Omega(n) := <+INF, lane=a(n)> where a(n)=clamp(2*R_full(n)-1)");
    println!("  Omega1 / Omega2 -> finite-class( abs(a1 - a2) )");
    println!("  Omega1 - Omega2 -> zero-class( abs(a1 - a2) )");
    println!("  Omega1 + Omega2 -> <+INF, lane=clamp((a1 + a2)/2)>");
    println!();

    for (x, y) in pairs {
        for line in describe_pair(x, y) {
            println!("{}", line);
        }
        println!("{}", "-".repeat(60));
    }
    Ok(())
}

fn main() -> Result<(), SsitError> {
    ssit::init_tracing("ssit");
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => run_scan_command(&args),
        Commands::Summary {
            snapshot,
            out_report,
            scan_csv,
            top_k,
        } => run_summary_command(&snapshot, &out_report, scan_csv.as_deref(), top_k),
        Commands::Ops { pairs } => run_ops_command(&pairs),
    }
}
