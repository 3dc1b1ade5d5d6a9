//! Runtime counter interface for the packet-filter engine.
//!
//! The engine periodically writes a plain-text counter file (`total: N`,
//! `blocked: N`). To show per-second rates, the previous sample is persisted
//! as a small JSON snapshot and diffed against the current read. Both file
//! formats are external contracts shared with the engine and the status page.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Default location the engine writes its counters to.
pub const COUNTERS_FILE: &str = "/tmp/adblocker-stats.dat";

/// Default location for the previous-sample snapshot.
pub const SNAPSHOT_FILE: &str = "/tmp/adblocker-prev-stats.dat";

/// Counters as written by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaemonCounters {
    pub total: u64,
    pub blocked: u64,
}

/// Parse the counter file contents. Unknown lines are ignored and missing
/// keys read as zero, so a partially written file degrades gracefully.
pub fn parse_counters(contents: &str) -> DaemonCounters {
    let mut counters = DaemonCounters::default();
    for line in contents.lines() {
        if let Some(value) = line.strip_prefix("total:") {
            counters.total = value.trim().parse().unwrap_or(0);
        } else if let Some(value) = line.strip_prefix("blocked:") {
            counters.blocked = value.trim().parse().unwrap_or(0);
        }
    }
    counters
}

/// Read the counter file; a missing file means the engine is not running and
/// reads as all-zero counters.
pub fn read_counters(path: &Path) -> Result<DaemonCounters> {
    if !path.exists() {
        warn!("Counter file {} not found, is the engine running?", path.display());
        return Ok(DaemonCounters::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read counter file {}", path.display()))?;
    Ok(parse_counters(&contents))
}

/// Previous-sample snapshot persisted between polls.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Snapshot {
    /// Unix timestamp (fractional seconds) of the sample.
    pub timestamp: f64,
    pub total_packets: u64,
    pub blocked_packets: u64,
}

impl Snapshot {
    pub fn now(counters: DaemonCounters) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
            total_packets: counters.total,
            blocked_packets: counters.blocked,
        }
    }

    /// Load a snapshot; missing or corrupt files read as `None` so the first
    /// poll simply reports no rates.
    pub fn load(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        Ok(())
    }
}

/// Point-in-time status derived from the counters and the previous snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub timestamp: String,
    pub total_packets: u64,
    pub blocked_packets: u64,
    /// Percentage of all packets that were blocked.
    pub blocking_rate: f64,
    /// Packets per second since the previous sample.
    pub total_rate: f64,
    pub blocked_rate: f64,
}

impl StatusReport {
    /// Build a report from the current counters and an optional previous
    /// snapshot taken `snapshot.timestamp` seconds into the past.
    pub fn compute(counters: DaemonCounters, previous: Option<&Snapshot>) -> Self {
        let now = Utc::now();
        let blocking_rate = if counters.total > 0 {
            counters.blocked as f64 / counters.total as f64 * 100.0
        } else {
            0.0
        };

        let (total_rate, blocked_rate) = match previous {
            Some(prev) => {
                let elapsed = now.timestamp_millis() as f64 / 1000.0 - prev.timestamp;
                if elapsed > 0.0 {
                    (
                        counters.total.saturating_sub(prev.total_packets) as f64 / elapsed,
                        counters.blocked.saturating_sub(prev.blocked_packets) as f64 / elapsed,
                    )
                } else {
                    (0.0, 0.0)
                }
            }
            None => (0.0, 0.0),
        };

        Self {
            timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            total_packets: counters.total,
            blocked_packets: counters.blocked,
            blocking_rate,
            total_rate,
            blocked_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counters() {
        let counters = parse_counters("total: 1234\nblocked: 56\n");
        assert_eq!(counters.total, 1234);
        assert_eq!(counters.blocked, 56);
    }

    #[test]
    fn test_parse_counters_tolerates_noise() {
        let counters = parse_counters("garbage\ntotal: 10\nunknown: 5\n");
        assert_eq!(counters.total, 10);
        assert_eq!(counters.blocked, 0);
    }

    #[test]
    fn test_parse_counters_empty() {
        assert_eq!(parse_counters(""), DaemonCounters::default());
    }

    #[test]
    fn test_read_counters_missing_file() {
        let counters = read_counters(Path::new("/nonexistent/stats.dat")).unwrap();
        assert_eq!(counters, DaemonCounters::default());
    }

    #[test]
    fn test_blocking_rate() {
        let report = StatusReport::compute(
            DaemonCounters {
                total: 200,
                blocked: 50,
            },
            None,
        );
        assert!((report.blocking_rate - 25.0).abs() < f64::EPSILON);
        assert_eq!(report.total_rate, 0.0);
    }

    #[test]
    fn test_blocking_rate_zero_total() {
        let report = StatusReport::compute(DaemonCounters::default(), None);
        assert_eq!(report.blocking_rate, 0.0);
    }

    #[test]
    fn test_rates_against_previous_snapshot() {
        let prev = Snapshot {
            timestamp: Utc::now().timestamp_millis() as f64 / 1000.0 - 10.0,
            total_packets: 1000,
            blocked_packets: 100,
        };
        let report = StatusReport::compute(
            DaemonCounters {
                total: 2000,
                blocked: 300,
            },
            Some(&prev),
        );
        // 1000 packets over ~10s; allow slack for test runtime.
        assert!(report.total_rate > 80.0 && report.total_rate < 120.0);
        assert!(report.blocked_rate > 16.0 && report.blocked_rate < 24.0);
    }

    #[test]
    fn test_counter_reset_does_not_go_negative() {
        let prev = Snapshot {
            timestamp: Utc::now().timestamp_millis() as f64 / 1000.0 - 5.0,
            total_packets: 5000,
            blocked_packets: 700,
        };
        let report = StatusReport::compute(
            DaemonCounters {
                total: 10,
                blocked: 2,
            },
            Some(&prev),
        );
        assert!(report.total_rate >= 0.0);
        assert!(report.blocked_rate >= 0.0);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prev-stats.dat");
        let snapshot = Snapshot::now(DaemonCounters {
            total: 42,
            blocked: 7,
        });
        snapshot.save(&path).unwrap();

        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded.total_packets, 42);
        assert_eq!(loaded.blocked_packets, 7);
    }

    #[test]
    fn test_snapshot_load_missing_or_corrupt() {
        assert!(Snapshot::load(Path::new("/nonexistent/prev.dat")).is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dat");
        std::fs::write(&path, "not json").unwrap();
        assert!(Snapshot::load(&path).is_none());
    }
}
