mod detections;
mod health;
mod reports;
mod videos;

pub use detections::list_detections_for_video;
pub use health::health_check;
pub use reports::video_report;
pub use videos::{create_video, delete_video, get_video, list_videos, update_video_status};
