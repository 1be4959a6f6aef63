//! Air quality forecast lookup
//!
//! Fetches the forecast list for an INSEE code and keeps the entry dated today.

use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::api::{build_client, get_json, normalize_base_url};
use crate::config::ServiceConfig;
use crate::models::{ForecastRecord, ForecastResponse};
use crate::Result;

/// Anything able to return the forecast list of a commune
pub trait ForecastProvider {
    async fn fetch_forecast(&self, insee: &str) -> Result<ForecastResponse>;
}

/// Client for the air quality forecast service
pub struct ForecastApiClient {
    client: Client,
    base_url: String,
}

impl ForecastApiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: normalize_base_url(&config.base_url),
        })
    }

    #[must_use]
    pub fn forecast_url(&self, insee: &str) -> String {
        format!(
            "{}/forecast?insee={}",
            self.base_url,
            urlencoding::encode(insee)
        )
    }
}

impl ForecastProvider for ForecastApiClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, insee: &str) -> Result<ForecastResponse> {
        let response: ForecastResponse = get_json(&self.client, &self.forecast_url(insee)).await?;
        debug!(
            "{} forecast entries for INSEE {}",
            response.entries().len(),
            insee
        );
        Ok(response)
    }
}

/// Format used by the forecast service for entry dates
pub fn date_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// The entry dated `today`, with the response's region metadata attached
#[must_use]
pub fn select_today(response: &ForecastResponse, today: NaiveDate) -> Option<ForecastRecord> {
    let key = date_key(today);
    response
        .entries()
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| ForecastRecord::new(entry.clone(), response.region()))
}
