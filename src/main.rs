//! memstat binary entry point.
//!
//! ## Usage
//! ```bash
//! memstat
//! ```
//!
//! No flags, environment knobs or configuration files are recognized; the
//! report format is fixed. `RUST_LOG` only adjusts diagnostic verbosity on
//! stderr.

use anyhow::Result;
use tracing::info;

use memstat::metrics::MemoryMetrics;
use memstat::{collector, logging, parser, report};

fn main() -> Result<()> {
    logging::init_logging("warn")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Collecting memory statistics"
    );

    let snapshot = collector::collect()?;
    let raw = parser::parse_snapshot(&snapshot)?;
    let metrics = MemoryMetrics::from_raw(&raw)?;

    print!("{}", report::render_report(&metrics));

    Ok(())
}
