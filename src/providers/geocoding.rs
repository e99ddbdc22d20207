use super::{GeocodedLocation, GeocodingProvider};
use crate::{
    config::GoogleConfig, error::AppError, logging::SensitiveApiKey,
    models::geocoding::GeocodeResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;

/// Google Geocoding API client
#[derive(Debug, Clone)]
pub struct GoogleGeocodingClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GoogleGeocodingClient {
    pub fn new(client: Client, config: &GoogleConfig) -> Self {
        Self {
            client,
            base_url: config.geocode_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    async fn send(&self, address: &str, api_key: &str) -> Result<GeocodedLocation, AppError> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("address", address), ("key", api_key)])
            .send()
            .await
            .map_err(|e| AppError::Geocode(format!("request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Geocode(format!("provider returned {}", status)));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| AppError::Geocode(format!("malformed payload: {}", e.without_url())))?;

        if body.status != "OK" {
            let detail = body.error_message.unwrap_or_default();
            return Err(AppError::Geocode(
                format!("status {} {}", body.status, detail).trim_end().to_string(),
            ));
        }

        let result = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Geocode("status OK but no results".to_string()))?;

        Ok(GeocodedLocation {
            formatted_address: result.formatted_address,
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
        })
    }
}

#[async_trait]
impl GeocodingProvider for GoogleGeocodingClient {
    async fn geocode(&self, address: &str, api_key: &str) -> Result<GeocodedLocation, AppError> {
        tracing::debug!(api_key = %SensitiveApiKey::new(api_key), "Geocoding address");

        match timeout(self.timeout, self.send(address, api_key)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_seconds = self.timeout.as_secs(),
                    "Geocoding request timed out"
                );
                Err(AppError::Geocode(format!(
                    "request timed out after {} seconds",
                    self.timeout.as_secs()
                )))
            }
        }
    }
}
