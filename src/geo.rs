//! Commune lookup
//!
//! Resolves the free-text city answered in the survey to an INSEE code through
//! the geo.api.gouv.fr communes endpoint, ranking candidates by population and
//! keeping the first one.

use reqwest::Client;
use tracing::{debug, instrument};

use crate::api::{build_client, get_json, normalize_base_url};
use crate::config::ServiceConfig;
use crate::models::Commune;
use crate::{EcosanteError, Result};

/// Anything able to turn a city name into an INSEE code
pub trait CommuneResolver {
    /// `Ok(None)` when the service knows no such commune
    async fn resolve_insee(&self, city: &str) -> Result<Option<String>>;
}

/// Client for the geo.api.gouv.fr communes endpoint
pub struct GeoApiClient {
    client: Client,
    base_url: String,
}

impl GeoApiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: normalize_base_url(&config.base_url),
        })
    }

    /// Lookup URL for a city, at most one candidate, largest population first
    #[must_use]
    pub fn communes_url(&self, city: &str) -> String {
        format!(
            "{}/communes?nom={}&boost=population&limit=1",
            self.base_url,
            urlencoding::encode(city)
        )
    }

    #[instrument(skip(self))]
    pub async fn search(&self, city: &str) -> Result<Vec<Commune>> {
        let communes: Vec<Commune> = get_json(&self.client, &self.communes_url(city)).await?;
        debug!("{} commune candidates for '{}'", communes.len(), city);
        Ok(communes)
    }
}

impl CommuneResolver for GeoApiClient {
    async fn resolve_insee(&self, city: &str) -> Result<Option<String>> {
        if city.trim().is_empty() {
            return Err(EcosanteError::validation("City cannot be empty"));
        }

        let communes = self.search(city).await?;
        Ok(communes.into_iter().next().map(|commune| commune.code))
    }
}
