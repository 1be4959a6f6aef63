//! `ecosante-export` - Ecosanté campaign files from survey exports
//!
//! This library turns a survey export (CSV or Framaforms TSV) into the CSV
//! files used to run Ecosanté notification campaigns, adding today's air
//! quality forecast for each respondent's city.

pub mod api;
pub mod config;
pub mod delimited;
pub mod enrichment;
pub mod error;
pub mod export;
pub mod forecast;
pub mod geo;
pub mod models;
pub mod partition;
pub mod scale;
pub mod transform;
pub mod variant;

// Re-export core types for public API
pub use config::EcosanteConfig;
pub use enrichment::Enricher;
pub use error::EcosanteError;
pub use export::CampaignExporter;
pub use forecast::{ForecastApiClient, ForecastProvider};
pub use geo::{CommuneResolver, GeoApiClient};
pub use models::{ForecastRecord, OutputFile, OutputFileSet, RawRow};
pub use partition::{Bucket, Channel, Frequency};
pub use scale::{ATMO_2004, LabelRegister, QualifierTables};
pub use variant::{FRAMAFORMS_SURVEY, FormVariant, SIMPLE_SURVEY};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, EcosanteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
