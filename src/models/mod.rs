//! Data models for the export tool
//!
//! This module contains the core domain models organized by concern:
//! - Row: survey rows as parsed and campaign rows as produced
//! - Commune: geocoder answers
//! - Forecast: air quality forecast responses and the selected daily record
//! - Output: named CSV payloads ready to be written

pub mod commune;
pub mod forecast;
pub mod output;
pub mod row;

// Re-export all public types for convenient access
pub use commune::Commune;
pub use forecast::{ForecastEntry, ForecastRecord, ForecastResponse, RegionMetadata};
pub use output::{OutputFile, OutputFileSet};
pub use row::{OutputRow, RawRow};
