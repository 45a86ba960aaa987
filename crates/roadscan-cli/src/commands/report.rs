//! Report command

use anyhow::Result;
use roadscan_core::config::LayeredConfig;
use roadscan_core::models::VideoId;
use roadscan_report::ReportGenerator;
use roadscan_store::MemoryInspectionStore;
use std::sync::Arc;

use crate::cli::ReportArgs;
use crate::output::OutputWriter;

pub async fn execute(
    args: ReportArgs,
    store: Arc<MemoryInspectionStore>,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let reports = ReportGenerator::new(
        store,
        config.inspector_name.value.clone(),
        config.organization.value.clone(),
    );

    let Some(report) = reports.summarize(&VideoId(args.video_id.clone())).await? else {
        output.warning(format!(
            "No report available for {} (unknown video or no detections)",
            args.video_id
        ));
        return Ok(());
    };

    if output.is_json() {
        return output.result(report);
    }

    output.section("Report");
    output.kv("ID", &report.id);
    output.kv("Video", &report.video_id);
    output.kv("Inspector", &report.inspector_name);
    output.kv("Organization", &report.organization);
    output.kv("Created", report.created_at.format("%Y-%m-%d %H:%M:%S UTC"));

    let summary = &report.summary;
    output.section("Summary");
    output.kv("Total detections", summary.total_detections);
    output.kv(
        "By severity",
        format!(
            "low {} / medium {} / high {} / critical {}",
            summary.by_severity.low,
            summary.by_severity.medium,
            summary.by_severity.high,
            summary.by_severity.critical
        ),
    );
    output.kv(
        "By class",
        format!(
            "pothole {} / crack {} / other {}",
            summary.by_class.pothole, summary.by_class.crack, summary.by_class.other
        ),
    );

    // Bounding extent of all detection coordinates, not path endpoints
    output.section("Extent");
    output.kv(
        "Latitude",
        format!("{:.6} to {:.6}", summary.route_start_lat, summary.route_end_lat),
    );
    output.kv(
        "Longitude",
        format!("{:.6} to {:.6}", summary.route_start_lng, summary.route_end_lng),
    );

    Ok(())
}
