//! # memstat
//!
//! Single-shot reporter for the macOS memory subsystem.
//!
//! The whole program is one synchronous pipeline: invoke three OS-provided
//! commands (`vm_stat`, `sysctl`, the custom `vmmetrics` helper), parse
//! their fixed-format output into a flat counter map, validate that map
//! into a typed [`metrics::MemoryMetrics`] record, and render three aligned
//! tables on stdout.
//!
//! Any failure along the way (missing executable, abnormal exit, malformed
//! output, absent counter, unrecognized pressure level) aborts the run with
//! a diagnostic before anything is printed; there is no partial report.

pub mod collector;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod parser;
pub mod report;

pub use error::{MetricsError, Result};
pub use metrics::{MemoryMetrics, PressureLevel};
