use serde::{Deserialize, Serialize};

/// Google Geocoding API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// "OK", "ZERO_RESULTS", "REQUEST_DENIED", ...
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}
