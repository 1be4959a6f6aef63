//! HTTP plumbing shared by the geocoder and forecast clients
//!
//! One GET per call, no retry and no rate limiting: a failed call degrades the
//! row it was made for. The only stall protection is the client timeout.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::{EcosanteError, Result};

const USER_AGENT: &str = concat!("ecosante-export/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client honouring the service timeout
pub(crate) fn build_client(service: &ServiceConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(service.timeout_seconds.into()))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| EcosanteError::config(format!("Failed to create HTTP client: {e}")))
}

/// Base URL without its trailing slash
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// GET `url` and decode a JSON body, failing on transport errors and non-2xx statuses
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let start_time = Instant::now();
    debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| EcosanteError::api(format!("Network error: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(EcosanteError::api(format!(
            "Request failed with status: {} - {}",
            status,
            status.canonical_reason().unwrap_or("Unknown error")
        )));
    }

    let body = response
        .json::<T>()
        .await
        .map_err(|e| EcosanteError::api(format!("Invalid response body: {e}")))?;

    let total_duration = start_time.elapsed();
    debug!(
        "HTTP response {} in {:.3}s",
        status,
        total_duration.as_secs_f64()
    );
    if total_duration.as_secs() > 5 {
        warn!(
            "Slow API response detected: {:.3}s",
            total_duration.as_secs_f64()
        );
    }

    Ok(body)
}
