use roadscan_report::ReportGenerator;
use roadscan_store::{InspectionStore, SnapshotStore};
use std::sync::Arc;

/// Shared handler state: the detection store, the durability layer it
/// snapshots to after every mutation, and the report generator.
pub struct AppState {
    pub store: Arc<dyn InspectionStore>,
    pub durability: Arc<dyn SnapshotStore>,
    pub reports: ReportGenerator,
}

impl AppState {
    pub fn new(
        store: Arc<dyn InspectionStore>,
        durability: Arc<dyn SnapshotStore>,
        reports: ReportGenerator,
    ) -> Self {
        Self {
            store,
            durability,
            reports,
        }
    }
}
