//! External command invocation.
//!
//! The memory counters come from three OS-provided sources: `vm_stat` for
//! paging statistics, `sysctl` for kernel parameters plus the swap summary,
//! and the custom `vmmetrics` helper for the free-memory percentage. The
//! commands run sequentially, each reaped before the next starts.

use std::process::Command;

use tracing::debug;

use crate::error::{MetricsError, Result};

/// Kernel parameters queried through `sysctl`, in order.
///
/// `vm.swapusage` reports a differently-shaped summary line and must remain
/// last so the parser can find it in a fixed position.
pub const SYSCTL_PARAMS: [&str; 4] = [
    // Dirty pages holding app data and memory mapped files.
    "vm.pageout_inactive_dirty_internal",
    // Dirty pages holding file data.
    "vm.pageout_inactive_dirty_external",
    // Pressure level: 1 (Normal), 2 (Warn) or 3 (Critical).
    "kern.memorystatus_vm_pressure_level",
    "vm.swapusage",
];

/// Captured stdout of the three external commands.
#[derive(Debug, Clone)]
pub struct RawSnapshot {
    pub vm_stat: String,
    pub sysctl: String,
    pub vmmetrics: String,
}

/// Run all three commands and capture their output.
pub fn collect() -> Result<RawSnapshot> {
    Ok(RawSnapshot {
        vm_stat: run_command("vm_stat", &[])?,
        sysctl: run_command("sysctl", &SYSCTL_PARAMS)?,
        vmmetrics: run_command("vmmetrics", &[])?,
    })
}

/// Run one command to completion and return its decoded stdout.
fn run_command(program: &str, args: &[&str]) -> Result<String> {
    debug!(command = program, "Running external command");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| MetricsError::Command(format!("{}: {}", program, e)))?;

    if !output.status.success() {
        return Err(MetricsError::Command(format!(
            "{} exited with {}",
            program, output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
