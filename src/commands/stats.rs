//! Stats command implementation.

use anyhow::Result;
use std::path::Path;

use crate::stats::{read_counters, Snapshot, StatusReport};
use crate::utils::format_count;

/// Run the stats command: read the engine's counter file, derive rates
/// against the previous snapshot, persist the new snapshot.
pub async fn run(counters_path: &Path, snapshot_path: &Path, json: bool) -> Result<()> {
    let counters = read_counters(counters_path)?;
    let previous = Snapshot::load(snapshot_path);
    let report = StatusReport::compute(counters, previous.as_ref());

    Snapshot::now(counters).save(snapshot_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("══════════════════════════════════════════════════════");
    println!(" BLOCKING STATISTICS");
    println!("══════════════════════════════════════════════════════");
    println!();
    println!(" Sampled at: {}", report.timestamp);
    println!(" Total packets: {}", format_count(report.total_packets as usize));
    println!(" Blocked packets: {}", format_count(report.blocked_packets as usize));
    println!(" Blocking rate: {:.2}%", report.blocking_rate);
    println!(" Total rate: {:.1} pkt/s", report.total_rate);
    println!(" Blocked rate: {:.1} pkt/s", report.blocked_rate);
    println!("══════════════════════════════════════════════════════");
    println!();

    Ok(())
}
