//! End-to-end test of the parse -> validate -> render pipeline.
//!
//! Drives the full pipeline on fixed synthetic command outputs matching the
//! documented formats and compares the rendered report byte-for-byte
//! against the expected fixture.

use memstat::collector::RawSnapshot;
use memstat::metrics::MemoryMetrics;
use memstat::{parser, report};

const VM_STAT: &str = r#"Mach Virtual Memory Statistics: (page size of 4096 bytes)
Pages free:                               37279.
Pages active:                            462343.
Pages inactive:                          445668.
Pages speculative:                         2295.
Pages throttled:                              0.
Pages wired down:                        213472.
Pages purgeable:                           8612.
"Translation faults":                 130701951.
Pages copy-on-write:                    7645188.
Pages zero filled:                     76107817.
Pages reactivated:                       266244.
Pages purged:                            186884.
File-backed pages:                       397736.
Anonymous pages:                         512570.
Pages stored in compressor:              267670.
Pages occupied by compressor:             78536.
Decompressions:                          642120.
Compressions:                           1129310.
Pageins:                                3178668.
Pageouts:                                 14422.
Swapins:                                      0.
Swapouts:                                     0.
"#;

const SYSCTL: &str = r#"vm.pageout_inactive_dirty_internal: 13456
vm.pageout_inactive_dirty_external: 2890
kern.memorystatus_vm_pressure_level: 1
vm.swapusage: total = 2048.00M  used = 1097.25M  free = 950.75M  (encrypted)
"#;

const VMMETRICS: &str = r#"Free memory percent: 58
"#;

const EXPECTED_REPORT: &str = r#"Breakdown of physical memory:
-----------------------------
      Active:   1.76 GB
    Inactive:   1.70 GB
        Free: 145.62 MB
       Wired: 833.88 MB
   Throttled:      0 B
 Speculative:   8.96 MB
  Compressor: 306.78 MB (Uncompressed:   1.02 GB)
-----------------------------
       Total:   4.73 GB

Swap usage:
----------------
 Used:   1.07 GB
 Free: 950.75 MB
----------------
Total:   2.00 GB

Additional stats:
------------------------------------
     Compressor is saving: 738.80 MB
 Application memory usage:   1.92 GB
             Cached files:   1.55 GB
               top's used:   4.58 GB
              Dirty pages:  63.85 MB
         Available memory:   2.74 GB
          Memory pressure:     42 % (Normal)
"#;

fn sample_snapshot() -> RawSnapshot {
    RawSnapshot {
        vm_stat: VM_STAT.to_string(),
        sysctl: SYSCTL.to_string(),
        vmmetrics: VMMETRICS.to_string(),
    }
}

/// The rendered report must match the fixture exactly, separators and
/// column alignment included.
#[test]
fn test_report_matches_fixture() {
    let raw = parser::parse_snapshot(&sample_snapshot()).expect("parse failed");
    let metrics = MemoryMetrics::from_raw(&raw).expect("validation failed");

    assert_eq!(report::render_report(&metrics), EXPECTED_REPORT);
}

/// Spot-check the values the fixture report is derived from.
#[test]
fn test_fixture_metric_values() {
    let raw = parser::parse_snapshot(&sample_snapshot()).expect("parse failed");
    let metrics = MemoryMetrics::from_raw(&raw).expect("validation failed");

    assert_eq!(metrics.active, 462_343 * 4096);
    assert_eq!(metrics.swap_total, 2_147_483_648);
    assert_eq!(metrics.swap_used, 1_150_550_016);
    assert_eq!(metrics.swap_free, 996_933_632);
    assert_eq!(metrics.dirty_total(), (13_456 + 2_890) * 4096);
    assert_eq!(metrics.total_physical(), 5_077_372_928);
    assert_eq!(metrics.available_memory(), 2_944_876_298);
    assert_eq!(metrics.pressure_percent(), 42);
}

/// An out-of-range pressure level must abort validation, not render.
#[test]
fn test_unknown_pressure_level_is_fatal() {
    let mut snapshot = sample_snapshot();
    snapshot.sysctl = snapshot
        .sysctl
        .replace("kern.memorystatus_vm_pressure_level: 1", "kern.memorystatus_vm_pressure_level: 7");

    let raw = parser::parse_snapshot(&snapshot).expect("parse failed");
    assert!(matches!(
        MemoryMetrics::from_raw(&raw),
        Err(memstat::MetricsError::UnknownPressureLevel(7))
    ));
}

/// A counter the report depends on going missing is a single typed error.
#[test]
fn test_missing_counter_is_fatal() {
    let mut snapshot = sample_snapshot();
    snapshot.vm_stat = snapshot.vm_stat.replace("Anonymous pages", "Anonymous page");

    let raw = parser::parse_snapshot(&snapshot).expect("parse failed");
    assert!(matches!(
        MemoryMetrics::from_raw(&raw),
        Err(memstat::MetricsError::MissingMetric(name)) if name == "Anonymous pages"
    ));
}
