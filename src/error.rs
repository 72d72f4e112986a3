//! Error types for metrics collection and reporting.

use thiserror::Error;

/// Errors that can occur while collecting or interpreting memory counters.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Spawning or reaping an external command failed.
    #[error("Command execution failed: {0}")]
    Command(String),

    /// Command output did not match the expected shape.
    #[error("Unexpected command output: {0}")]
    Parse(String),

    /// A counter the report depends on was not present in the output.
    #[error("Metric not reported: {0}")]
    MissingMetric(String),

    /// The kernel reported a pressure level outside the known 1-3 range.
    #[error("Unknown memory pressure level: {0}")]
    UnknownPressureLevel(u64),
}

/// Result type alias for metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;
