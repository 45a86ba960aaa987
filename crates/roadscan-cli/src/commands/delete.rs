//! Delete command

use anyhow::Result;
use roadscan_core::models::VideoId;
use roadscan_store::{snapshot, FileSnapshotStore, InspectionStore, MemoryInspectionStore};
use std::sync::Arc;

use crate::cli::DeleteArgs;
use crate::output::OutputWriter;

pub async fn execute(
    args: DeleteArgs,
    store: Arc<MemoryInspectionStore>,
    durability: &FileSnapshotStore,
    output: &OutputWriter,
) -> Result<()> {
    let video_id = VideoId(args.video_id.clone());

    if store.video(&video_id).await?.is_none() {
        output.error(format!("Video not found: {}", args.video_id));
        return Ok(());
    }

    store.delete_video(&video_id).await?;
    snapshot::save(store.as_ref(), durability).await;

    output.success(format!("Deleted video {} and its detections", args.video_id));
    Ok(())
}
