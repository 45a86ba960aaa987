mod delete;
mod doctor;
mod report;
mod status;
mod videos;

use anyhow::Result;
use roadscan_core::config::LayeredConfig;
use roadscan_store::{snapshot, FileSnapshotStore, MemoryInspectionStore};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = LayeredConfig::with_defaults().load_from_env();
    let data_dir =
        cli.data_dir.unwrap_or_else(|| PathBuf::from(config.data_dir.value.clone()));

    let store = Arc::new(MemoryInspectionStore::new());
    let durability = FileSnapshotStore::new(&data_dir);
    snapshot::load(store.as_ref(), &durability).await;

    match cli.command {
        Commands::Videos(args) => videos::execute(args, store, &output).await,
        Commands::Report(args) => report::execute(args, store, &config, &output).await,
        Commands::Status(args) => status::execute(args, store, &data_dir, &output).await,
        Commands::Delete(args) => delete::execute(args, store, &durability, &output).await,
        Commands::Doctor(args) => doctor::execute(args, &config, &data_dir, &durability).await,
    }
}
