//! Roadscan Report - Derived aggregation over the detection store
//!
//! Reduces a video's detection set into severity and class histograms,
//! the bounding geographic extent, and a report summary.

pub mod summary;

pub use summary::ReportGenerator;
