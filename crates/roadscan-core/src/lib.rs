//! Roadscan Core - Domain models, error taxonomy, and configuration
//!
//! This crate contains the shared domain types for the roadscan system.

pub mod config;
pub mod error;
pub mod models;

pub use error::{Result, RoadscanError};
