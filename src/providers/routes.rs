use super::RoutingProvider;
use crate::{
    config::GoogleConfig,
    error::AppError,
    logging::{sanitize_log_value, SensitiveApiKey},
    models::routes::{ComputeRoutesRequest, ComputeRoutesResponse, ROUTES_FIELD_MASK},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;

/// Google Routes API v2 client
#[derive(Debug, Clone)]
pub struct GoogleRoutesClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GoogleRoutesClient {
    pub fn new(client: Client, config: &GoogleConfig) -> Self {
        Self {
            client,
            base_url: config.routes_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    async fn send(
        &self,
        request: &ComputeRoutesRequest,
        api_key: &str,
    ) -> Result<ComputeRoutesResponse, AppError> {
        let url = format!("{}/directions/v2:computeRoutes", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", ROUTES_FIELD_MASK)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Routing(format!("request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!(
                status = %status,
                body = %sanitize_log_value(&error_text),
                "Routing provider error body"
            );
            return Err(AppError::Routing(format!(
                "provider returned {}: {}",
                status, error_text
            )));
        }

        response
            .json::<ComputeRoutesResponse>()
            .await
            .map_err(|e| AppError::Routing(format!("malformed payload: {}", e.without_url())))
    }
}

#[async_trait]
impl RoutingProvider for GoogleRoutesClient {
    async fn compute_route(
        &self,
        request: &ComputeRoutesRequest,
        api_key: &str,
    ) -> Result<ComputeRoutesResponse, AppError> {
        tracing::debug!(
            waypoints = request.intermediates.len(),
            api_key = %SensitiveApiKey::new(api_key),
            "Requesting route"
        );

        match timeout(self.timeout, self.send(request, api_key)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Routing request failed");
                Err(e)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_seconds = self.timeout.as_secs(),
                    "Routing request timed out"
                );
                Err(AppError::Routing(format!(
                    "request timed out after {} seconds",
                    self.timeout.as_secs()
                )))
            }
        }
    }
}
