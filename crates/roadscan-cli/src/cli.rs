use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Roadscan - Road-inspection data tools
#[derive(Parser, Debug)]
#[command(name = "roadscan")]
#[command(about = "Road-inspection data tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory of the local durability layer (overrides configuration)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List stored inspection videos
    Videos(VideosArgs),

    /// Regenerate the report for one video
    Report(ReportArgs),

    /// Show store statistics
    Status(StatusArgs),

    /// Delete a video and all its detections
    Delete(DeleteArgs),

    /// Run health checks and diagnostics
    Doctor(DoctorArgs),
}

#[derive(Parser, Debug)]
pub struct VideosArgs {
    /// Restrict the listing to one user's videos
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Video id to summarize
    pub video_id: String,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Show per-video detection counts
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Video id to delete
    pub video_id: String,
}

#[derive(Parser, Debug)]
pub struct DoctorArgs {
    /// Show configuration details for each check
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
