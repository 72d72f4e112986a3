//! Parsers for the fixed-format text the external commands produce.
//!
//! Everything lands in a flat map keyed by the exact label text of the
//! upstream line, embedded spaces and dots included. Page counts are
//! converted to bytes here; validation into a typed record happens in
//! [`crate::metrics`].

use std::collections::HashMap;

use crate::collector::RawSnapshot;
use crate::error::{MetricsError, Result};

/// Fixed page size used by the paging counters, in bytes.
pub const PAGE_SIZE: u64 = 4096;

/// Sysctl parameter whose value is a classification, not a page count.
pub const PRESSURE_LEVEL_PARAM: &str = "kern.memorystatus_vm_pressure_level";

/// Trailing entries of the `vm_stat` line split that are cumulative event
/// counters rather than page counts (six summary lines plus the empty
/// element after the final newline).
const VM_STAT_TRAILER: usize = 7;

/// Parse all three command outputs into a single metrics map.
pub fn parse_snapshot(snapshot: &RawSnapshot) -> Result<HashMap<String, u64>> {
    let mut metrics = HashMap::new();
    parse_vm_stat(&snapshot.vm_stat, &mut metrics)?;
    parse_sysctl(&snapshot.sysctl, &mut metrics)?;
    parse_vmmetrics(&snapshot.vmmetrics, &mut metrics)?;
    Ok(metrics)
}

/// Parse `vm_stat` output: a header line, one `name: count.` line per
/// counter, and the trailer of cumulative event counters.
fn parse_vm_stat(raw: &str, metrics: &mut HashMap<String, u64>) -> Result<()> {
    let lines: Vec<&str> = raw.split('\n').collect();
    if lines.len() < VM_STAT_TRAILER + 1 {
        return Err(MetricsError::Parse(format!(
            "vm_stat output too short: {} lines",
            lines.len()
        )));
    }

    for line in &lines[1..lines.len() - VM_STAT_TRAILER] {
        let (name, value) = split_metric_line(line, "vm_stat")?;
        let pages = parse_count(value, "vm_stat")?;
        metrics.insert(name.to_string(), pages * PAGE_SIZE);
    }

    Ok(())
}

/// Parse `sysctl` output. Every line is `name: value` except the
/// second-to-last entry, the `vm.swapusage` summary.
fn parse_sysctl(raw: &str, metrics: &mut HashMap<String, u64>) -> Result<()> {
    let lines: Vec<&str> = raw.split('\n').collect();
    if lines.len() < 2 {
        return Err(MetricsError::Parse(format!(
            "sysctl output too short: {} lines",
            lines.len()
        )));
    }

    for line in &lines[..lines.len() - 2] {
        let (name, value) = split_metric_line(line, "sysctl")?;
        let count = parse_count(value, "sysctl")?;
        if name == PRESSURE_LEVEL_PARAM {
            metrics.insert(name.to_string(), count);
        } else {
            metrics.insert(name.to_string(), count * PAGE_SIZE);
        }
    }

    let swap = lines[lines.len() - 2];
    metrics.insert("Swap total".to_string(), extract_swap_field(swap, "total")?);
    metrics.insert("Swap used".to_string(), extract_swap_field(swap, "used")?);
    metrics.insert("Swap free".to_string(), extract_swap_field(swap, "free")?);

    Ok(())
}

/// Parse `vmmetrics` output: `name: value` lines with raw integer values,
/// followed by a final empty line. Sole source of `Free memory percent`.
fn parse_vmmetrics(raw: &str, metrics: &mut HashMap<String, u64>) -> Result<()> {
    let lines: Vec<&str> = raw.split('\n').collect();

    for line in &lines[..lines.len() - 1] {
        let (name, value) = split_metric_line(line, "vmmetrics")?;
        let count = parse_count(value, "vmmetrics")?;
        metrics.insert(name.to_string(), count);
    }

    Ok(())
}

/// Extract one `label = X.XXM` field from the swap summary line and convert
/// megabytes to bytes, truncating the sub-megabyte remainder. The summary
/// carries two decimals, so the truncation loses nothing the kernel
/// reported.
///
/// Input format:
/// `vm.swapusage: total = 2048.00M  used = 1097.25M  free = 950.75M  (encrypted)`
pub fn extract_swap_field(line: &str, label: &str) -> Result<u64> {
    let pos = line.find(label).ok_or_else(|| {
        MetricsError::Parse(format!("swap field {:?} not found in {:?}", label, line))
    })?;

    // Skip past `label = `.
    let start = pos + label.len() + 3;
    let rest = line.get(start..).ok_or_else(|| {
        MetricsError::Parse(format!("swap field {:?} truncated in {:?}", label, line))
    })?;
    let end = rest.find('M').ok_or_else(|| {
        MetricsError::Parse(format!("swap field {:?} missing unit in {:?}", label, line))
    })?;

    let megabytes: f64 = rest[..end].trim().parse().map_err(|_| {
        MetricsError::Parse(format!("swap field {:?} is not a number: {:?}", label, &rest[..end]))
    })?;

    Ok((megabytes * 1_048_576.0) as u64)
}

/// Split a `name: value` line at the first colon. The name is kept exactly
/// as printed.
fn split_metric_line<'a>(line: &'a str, source: &str) -> Result<(&'a str, &'a str)> {
    line.trim()
        .split_once(':')
        .map(|(name, value)| (name, value.trim()))
        .ok_or_else(|| {
            MetricsError::Parse(format!("{} line missing separator: {:?}", source, line))
        })
}

/// Parse a numeric token, tolerating the trailing `.` that `vm_stat`
/// appends to every count.
fn parse_count(token: &str, source: &str) -> Result<u64> {
    token.trim_end_matches('.').parse::<u64>().map_err(|_| {
        MetricsError::Parse(format!("{} count {:?} is not an integer", source, token))
    })
}
