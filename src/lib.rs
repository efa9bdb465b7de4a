pub mod classify;
pub mod config;
pub mod divisors;
pub mod dominance;
pub mod error;
pub mod export;
pub mod fenwick;
pub mod metric;
pub mod omega;
pub mod pipeline;
pub mod quantile;
pub mod record;
pub mod report;
pub mod sieve;
pub mod snapshot;
pub mod summary;
pub mod table_print;

pub use config::ScanConfig;
pub use error::*;
pub use pipeline::{ScanTable, run_scan};
pub use record::*;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(service: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
    if installed.is_ok() {
        tracing::debug!(service, "tracing initialised");
    }
}
