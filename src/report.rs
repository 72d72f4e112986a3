//! Report rendering: unit scaling and the three fixed-layout tables.
//!
//! Layout is fixed. Labels are right-aligned to a per-table width, sizes
//! are right-aligned to [`SIZE_WIDTH`] with [`SIZE_DECIMALS`] fractional
//! digits, and each table opens with a heading and a dash rule sized to the
//! wider of the heading or the column span.

use std::fmt::Write;

use crate::metrics::MemoryMetrics;

/// Width of the numeric column; the longest expected rendering is `xxxx.xx`.
const SIZE_WIDTH: usize = 7;
/// Fractional digits for scaled sizes.
const SIZE_DECIMALS: usize = 2;

const BYTES_PER_KB: f64 = 1024.0;
const BYTES_PER_MB: f64 = 1_048_576.0;
const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Format a byte count with the largest 1024-based unit that scales it to
/// at least 1.0, right-aligned to `width` with `decimals` fractional
/// digits. Counts below 1 KB print as a raw byte count with no decimals.
pub fn pretty_size(size: u64, width: usize, decimals: usize) -> String {
    let size_gb = size as f64 / BYTES_PER_GB;
    if size_gb >= 1.0 {
        return format!("{:>width$.decimals$} GB", size_gb);
    }

    let size_mb = size as f64 / BYTES_PER_MB;
    if size_mb >= 1.0 {
        return format!("{:>width$.decimals$} MB", size_mb);
    }

    let size_kb = size as f64 / BYTES_PER_KB;
    if size_kb >= 1.0 {
        return format!("{:>width$.decimals$} KB", size_kb);
    }

    format!("{:>width$} B", size)
}

/// Render the full three-table report, ready to print. Every line is
/// newline-terminated; tables are separated by one blank line.
pub fn render_report(metrics: &MemoryMetrics) -> String {
    let mut out = String::new();
    render_physical(metrics, &mut out);
    out.push('\n');
    render_swap(metrics, &mut out);
    out.push('\n');
    render_additional(metrics, &mut out);
    out
}

fn render_physical(metrics: &MemoryMetrics, out: &mut String) {
    const LABEL_WIDTH: usize = 12;

    let heading = "Breakdown of physical memory:";
    let rule = table_rule(heading, LABEL_WIDTH);
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}", rule);

    for (label, bytes) in [
        ("Active", metrics.active),
        ("Inactive", metrics.inactive),
        ("Free", metrics.free),
        ("Wired", metrics.wired),
        ("Throttled", metrics.throttled),
        ("Speculative", metrics.speculative),
    ] {
        size_row(out, label, LABEL_WIDTH, bytes);
    }
    let _ = writeln!(
        out,
        "{:>LABEL_WIDTH$}:{} (Uncompressed:{})",
        "Compressor",
        pretty_size(metrics.compressor_occupied, SIZE_WIDTH, SIZE_DECIMALS),
        pretty_size(metrics.compressor_stored, SIZE_WIDTH, SIZE_DECIMALS)
    );

    let _ = writeln!(out, "{}", rule);
    size_row(out, "Total", LABEL_WIDTH, metrics.total_physical());
}

fn render_swap(metrics: &MemoryMetrics, out: &mut String) {
    const LABEL_WIDTH: usize = 5;

    let heading = "Swap usage:";
    let rule = table_rule(heading, LABEL_WIDTH);
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}", rule);

    size_row(out, "Used", LABEL_WIDTH, metrics.swap_used);
    size_row(out, "Free", LABEL_WIDTH, metrics.swap_free);

    let _ = writeln!(out, "{}", rule);
    size_row(out, "Total", LABEL_WIDTH, metrics.swap_total);
}

fn render_additional(metrics: &MemoryMetrics, out: &mut String) {
    const LABEL_WIDTH: usize = 25;

    let heading = "Additional stats:";
    let rule = table_rule(heading, LABEL_WIDTH);
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}", rule);

    size_row(out, "Compressor is saving", LABEL_WIDTH, metrics.compressor_savings());
    size_row(out, "Application memory usage", LABEL_WIDTH, metrics.application_memory());
    size_row(out, "Cached files", LABEL_WIDTH, metrics.cached_files());
    size_row(out, "top's used", LABEL_WIDTH, metrics.top_used());
    size_row(out, "Dirty pages", LABEL_WIDTH, metrics.dirty_total());
    size_row(out, "Available memory", LABEL_WIDTH, metrics.available_memory());

    let _ = writeln!(
        out,
        "{:>LABEL_WIDTH$}:{:>SIZE_WIDTH$} % ({})",
        "Memory pressure",
        metrics.pressure_percent(),
        metrics.pressure_level
    );
}

/// One `label:size` row with the label right-aligned to the table width.
fn size_row(out: &mut String, label: &str, label_width: usize, bytes: u64) {
    let _ = writeln!(
        out,
        "{:>label_width$}:{}",
        label,
        pretty_size(bytes, SIZE_WIDTH, SIZE_DECIMALS)
    );
}

/// Dash rule covering both the heading and the rows beneath it. The 4
/// extra columns are the `:` plus the ` GB` unit suffix.
fn table_rule(heading: &str, label_width: usize) -> String {
    "-".repeat(heading.len().max(label_width + SIZE_WIDTH + 4))
}
