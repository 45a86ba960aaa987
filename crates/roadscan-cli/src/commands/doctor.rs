//! Doctor command: health checks for the data directory, the stored
//! snapshot, and the detection backend.

use anyhow::Result;
use console::style;
use roadscan_core::config::LayeredConfig;
use roadscan_inference::HttpDetector;
use roadscan_store::{FileSnapshotStore, SnapshotStore, StoreSnapshot, SNAPSHOT_KEY};
use std::path::Path;

use crate::cli::DoctorArgs;

pub async fn execute(
    args: DoctorArgs,
    config: &LayeredConfig,
    data_dir: &Path,
    durability: &FileSnapshotStore,
) -> Result<()> {
    println!("\n{}", style("Roadscan Health Check").bold().underlined());
    println!("{}", style("═".repeat(60)).dim());
    println!();

    let mut checks_passed = 0;
    let mut total_checks = 0;

    // Check data directory
    total_checks += 1;
    if data_dir.exists() {
        println!("{} Data directory: {}", style("✓").green(), data_dir.display());
        checks_passed += 1;
    } else {
        println!(
            "{} Data directory: {} does not exist yet (created on first save)",
            style("⚠").yellow(),
            data_dir.display()
        );
    }

    // Check stored snapshot
    total_checks += 1;
    match durability.get(SNAPSHOT_KEY).await {
        Ok(Some(content)) => match serde_json::from_str::<StoreSnapshot>(&content) {
            Ok(snapshot) => {
                println!(
                    "{} Snapshot: {} videos, {} detection lists",
                    style("✓").green(),
                    snapshot.videos.len(),
                    snapshot.detections.len()
                );
                checks_passed += 1;
            }
            Err(e) => {
                println!("{} Snapshot: unreadable ({})", style("✗").red(), e);
            }
        },
        Ok(None) => {
            println!("{} Snapshot: none stored yet", style("⚠").yellow());
            println!("  → Finish a capture session or register a video to create one");
        }
        Err(e) => {
            println!("{} Snapshot: {}", style("✗").red(), e);
        }
    }

    // Check detection backend
    total_checks += 1;
    let detector = HttpDetector::new(config.backend_url.value.clone());
    if detector.is_reachable().await {
        println!("{} Detection backend: reachable", style("✓").green());
        checks_passed += 1;
    } else {
        println!(
            "{} Detection backend: not reachable at {}",
            style("✗").red(),
            config.backend_url.value
        );
        println!("  → Captures still run; frames simply yield zero detections");
    }

    if args.verbose {
        println!();
        println!("{}", style("Configuration").bold());
        for (key, (value, source)) in config.to_inspection_map() {
            println!("  {} = {} ({:?})", key, value, source);
        }
    }

    println!();
    println!("{}", style("═".repeat(60)).dim());
    println!("Checks passed: {}/{}", checks_passed, total_checks);

    Ok(())
}
