//! Videos listing command

use anyhow::Result;
use roadscan_core::models::{ProcessingStatus, UserId, Video};
use roadscan_store::{InspectionStore, MemoryInspectionStore};
use std::sync::Arc;
use tabled::Tabled;

use crate::cli::VideosArgs;
use crate::output::OutputWriter;

#[derive(Tabled)]
struct VideoRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Filename")]
    filename: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Frames")]
    frames: String,
    #[tabled(rename = "Detections")]
    detections: String,
    #[tabled(rename = "Uploaded")]
    uploaded: String,
}

pub async fn execute(
    args: VideosArgs,
    store: Arc<MemoryInspectionStore>,
    output: &OutputWriter,
) -> Result<()> {
    let videos = match args.user {
        Some(user) => store.videos_by_user(&UserId(user)).await?,
        None => store.all_videos().await?,
    };

    if output.is_json() {
        return output.result(videos);
    }

    let rows: Vec<VideoRow> = videos.iter().map(video_row).collect();
    output.table(rows);
    Ok(())
}

fn video_row(video: &Video) -> VideoRow {
    VideoRow {
        id: video.id.to_string(),
        filename: video.original_filename.clone(),
        status: status_label(video.processing_status),
        frames: video
            .total_frames
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string()),
        detections: video
            .detection_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string()),
        uploaded: video.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
    }
}

fn status_label(status: ProcessingStatus) -> &'static str {
    match status {
        ProcessingStatus::Pending => "pending",
        ProcessingStatus::Processing => "processing",
        ProcessingStatus::Completed => "completed",
        ProcessingStatus::Failed => "failed",
    }
}
