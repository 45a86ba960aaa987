pub mod detection;
pub mod gps;
pub mod media;
pub mod report;
pub mod session;
pub mod video;

pub use detection::{BBox, Detection, DetectionClass, DetectionId, SeverityLevel};
pub use gps::{GpsPoint, LocationFix};
pub use media::{Frame, MediaBlob};
pub use report::{ClassCounts, Report, ReportSummary, SeverityCounts};
pub use session::{SessionOutcome, SessionState};
pub use video::{ProcessingStatus, UserId, Video, VideoId};
