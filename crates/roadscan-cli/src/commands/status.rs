//! Status command

use anyhow::Result;
use roadscan_store::{InspectionStore, MemoryInspectionStore};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::cli::StatusArgs;
use crate::output::OutputWriter;

#[derive(Serialize)]
struct StatusOutput {
    data_dir: String,
    data_dir_exists: bool,
    video_count: usize,
    detection_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_video: Option<Vec<VideoDetections>>,
}

#[derive(Serialize)]
struct VideoDetections {
    video_id: String,
    detections: usize,
}

pub async fn execute(
    args: StatusArgs,
    store: Arc<MemoryInspectionStore>,
    data_dir: &Path,
    output: &OutputWriter,
) -> Result<()> {
    let videos = store.all_videos().await?;
    let detections = store.all_detections().await?;

    let per_video = if args.verbose {
        let mut counts = Vec::with_capacity(videos.len());
        for video in &videos {
            let list = store.detections_by_video(&video.id).await?;
            counts.push(VideoDetections {
                video_id: video.id.to_string(),
                detections: list.len(),
            });
        }
        Some(counts)
    } else {
        None
    };

    if output.is_json() {
        return output.result(StatusOutput {
            data_dir: data_dir.display().to_string(),
            data_dir_exists: data_dir.exists(),
            video_count: videos.len(),
            detection_count: detections.len(),
            per_video,
        });
    }

    output.section("Store Status");
    output.kv("Data directory", data_dir.display());
    output.kv("Videos", videos.len());
    output.kv("Detections", detections.len());

    if let Some(per_video) = per_video {
        output.section("Detections per Video");
        for entry in per_video {
            output.kv(entry.video_id, entry.detections);
        }
    }

    Ok(())
}
