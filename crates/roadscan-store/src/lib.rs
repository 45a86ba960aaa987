//! Roadscan Store - Durable keyed collection of detections and videos
//!
//! Defines the storage ports, the in-memory adapter, and the snapshot
//! round-trip through the local durability layer.

pub mod memory;
pub mod ports;
pub mod snapshot;

pub use memory::MemoryInspectionStore;
pub use ports::{InspectionStore, SnapshotStore};
pub use snapshot::{load, save, FileSnapshotStore, MemorySnapshotStore, StoreSnapshot, SNAPSHOT_KEY};
