//! External collaborators: routing and geocoding.
//!
//! The core only talks to the [`RoutingProvider`] and [`GeocodingProvider`] traits; the
//! Google implementations live in the submodules. Tests swap in canned implementations.

pub mod geocoding;
pub mod routes;

use crate::error::AppError;
use crate::models::routes::{ComputeRoutesRequest, ComputeRoutesResponse};
use async_trait::async_trait;

pub use geocoding::GoogleGeocodingClient;
pub use routes::GoogleRoutesClient;

/// Result of geocoding a free-form address
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Compute one multi-leg route. Non-success statuses, transport errors and timeouts
    /// all surface as [`AppError::Routing`].
    async fn compute_route(
        &self,
        request: &ComputeRoutesRequest,
        api_key: &str,
    ) -> Result<ComputeRoutesResponse, AppError>;
}

#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Resolve an address. Anything but an `OK` status is an [`AppError::Geocode`].
    async fn geocode(&self, address: &str, api_key: &str) -> Result<GeocodedLocation, AppError>;
}
