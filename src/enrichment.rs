//! Per-row air quality enrichment
//!
//! Each row runs its own geocode then forecast lookup. All rows are in flight
//! at once, with no throttling, and results come back in input order whatever
//! the completion order. Failures stay inside the row: they are logged and the
//! row simply gets no forecast.

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::forecast::{ForecastProvider, date_key, select_today};
use crate::geo::CommuneResolver;
use crate::models::{ForecastRecord, RawRow};

pub struct Enricher<G, F> {
    geocoder: G,
    forecasts: F,
}

impl<G, F> Enricher<G, F>
where
    G: CommuneResolver,
    F: ForecastProvider,
{
    pub fn new(geocoder: G, forecasts: F) -> Self {
        Self {
            geocoder,
            forecasts,
        }
    }

    /// Today's forecast for a city, or `None` when any step comes up empty
    pub async fn enrich(&self, city: &str, today: NaiveDate) -> Option<ForecastRecord> {
        let city = city.trim();
        if city.is_empty() {
            warn!("No city given, skipping air quality lookup");
            return None;
        }

        let insee = match self.geocoder.resolve_insee(city).await {
            Ok(Some(code)) => code,
            Ok(None) => {
                warn!("INSEE code for '{}' not found", city);
                return None;
            }
            Err(err) => {
                warn!("INSEE code lookup for '{}' failed: {}", city, err);
                return None;
            }
        };

        let response = match self.forecasts.fetch_forecast(&insee).await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "No air quality information for {} ({}): {}",
                    insee, city, err
                );
                return None;
            }
        };

        if response.entries().is_empty() {
            warn!("Empty air quality forecast for {} ({})", insee, city);
            return None;
        }

        let record = select_today(&response, today);
        if record.is_none() {
            debug!(
                "No forecast dated {} for {} ({})",
                date_key(today),
                insee,
                city
            );
        }
        record
    }

    /// Enrich every row concurrently, results in row order
    pub async fn enrich_all<'r, I>(
        &self,
        rows: I,
        city_column: &str,
        today: NaiveDate,
    ) -> Vec<Option<ForecastRecord>>
    where
        I: IntoIterator<Item = &'r RawRow>,
    {
        let results = join_all(
            rows.into_iter()
                .map(|row| self.enrich(row.value(city_column), today)),
        )
        .await;

        let resolved = results.iter().filter(|r| r.is_some()).count();
        info!(
            "Air quality resolved for {}/{} rows",
            resolved,
            results.len()
        );
        results
    }
}
