//! Air quality forecast responses
//!
//! The forecast service has answered in two shapes over time: a flat list of
//! daily entries, or an object holding that list under `data` next to the
//! regional air quality agency metadata. Both deserialize into
//! [`ForecastResponse`].

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// One daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Calendar day, `YYYY-MM-DD`; an entry without one never matches
    #[serde(default)]
    pub date: String,
    /// ATMO index, 1 (very good) to 10 (very bad)
    #[serde(default, deserialize_with = "deserialize_indice")]
    pub indice: Option<i64>,
    /// Textual category, sent by older deployments instead of the index
    #[serde(default)]
    pub qualif: Option<String>,
}

/// Regional agency (AASQA) the commune depends on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMetadata {
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ForecastMetadata {
    #[serde(default)]
    pub region: Option<RegionMetadata>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ForecastResponse {
    /// `[{date, indice}, ...]`
    Flat(Vec<ForecastEntry>),
    /// `{data: [...], metadata: {region: {nom, website}}}`
    Detailed {
        #[serde(default)]
        data: Option<Vec<ForecastEntry>>,
        #[serde(default)]
        metadata: ForecastMetadata,
    },
}

impl ForecastResponse {
    #[must_use]
    pub fn entries(&self) -> &[ForecastEntry] {
        match self {
            ForecastResponse::Flat(entries) => entries,
            ForecastResponse::Detailed { data, .. } => data.as_deref().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn region(&self) -> Option<&RegionMetadata> {
        match self {
            ForecastResponse::Flat(_) => None,
            ForecastResponse::Detailed { metadata, .. } => metadata.region.as_ref(),
        }
    }
}

/// The forecast retained for one survey row: today's entry plus region metadata
///
/// Only built when an entry is dated today. A response whose list holds other
/// days only yields no record, so its region metadata is dropped as well and
/// the Région / Lien_AASQA cells stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRecord {
    pub date: String,
    pub indice: Option<i64>,
    pub qualif: Option<String>,
    pub region_name: Option<String>,
    pub region_website: Option<String>,
}

impl ForecastRecord {
    #[must_use]
    pub fn new(entry: ForecastEntry, region: Option<&RegionMetadata>) -> Self {
        Self {
            date: entry.date,
            indice: entry.indice,
            qualif: entry.qualif,
            region_name: region.and_then(|r| r.nom.clone()),
            region_website: region.and_then(|r| r.website.clone()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IndiceRepr {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Accepts `3`, `3.0` and `"3"`; anything else reads as no index
fn deserialize_indice<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<IndiceRepr>::deserialize(deserializer)?;
    Ok(match repr {
        Some(IndiceRepr::Integer(value)) => Some(value),
        Some(IndiceRepr::Float(value)) if value.fract() == 0.0 => Some(value as i64),
        Some(IndiceRepr::Text(text)) => text.trim().parse().ok(),
        Some(IndiceRepr::Float(_) | IndiceRepr::Other(IgnoredAny)) | None => None,
    })
}
