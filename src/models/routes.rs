use serde::{Deserialize, Serialize};

/// Field mask sent with every computeRoutes call
pub const ROUTES_FIELD_MASK: &str = "routes.distanceMeters,\
routes.duration,\
routes.polyline.encodedPolyline,\
routes.legs.distanceMeters,\
routes.legs.duration,\
routes.travelAdvisory.tollInfo";

/// Google Routes `computeRoutes` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRoutesRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intermediates: Vec<Waypoint>,
    pub travel_mode: String,
    pub extra_computations: Vec<String>,
    pub routing_preference: String,
    pub polyline_quality: String,
}

impl ComputeRoutesRequest {
    /// Driving request with toll computation, traffic-aware routing and an overview polyline
    pub fn driving(origin: &str, destination: &str, intermediates: &[String]) -> Self {
        Self {
            origin: Waypoint::address(origin),
            destination: Waypoint::address(destination),
            intermediates: intermediates.iter().map(|a| Waypoint::address(a)).collect(),
            travel_mode: "DRIVE".to_string(),
            extra_computations: vec!["TOLLS".to_string()],
            routing_preference: "TRAFFIC_AWARE_OPTIMAL".to_string(),
            polyline_quality: "OVERVIEW".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub address: String,
}

impl Waypoint {
    pub fn address(address: &str) -> Self {
        Self {
            address: address.to_string(),
        }
    }
}

/// Google Routes `computeRoutes` response.
///
/// Every field is optional on the wire; presence is checked during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRoutesResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub distance_meters: Option<u64>,
    pub duration: Option<String>,
    pub polyline: Option<Polyline>,
    #[serde(default)]
    pub legs: Vec<Leg>,
    pub travel_advisory: Option<TravelAdvisory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub distance_meters: Option<u64>,
    /// Seconds with an `s` suffix, e.g. `"5400s"`
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    pub encoded_polyline: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelAdvisory {
    pub toll_info: Option<TollInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TollInfo {
    #[serde(default)]
    pub estimated_price: Vec<MoneyAmount>,
}

/// `google.type.Money`: whole units plus nano-units (10^-9).
///
/// proto3 JSON renders int64 as a string and omits zero fields, so both
/// representations are accepted and a missing field reads as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyAmount {
    pub currency_code: Option<String>,
    pub units: Option<IntOrString>,
    pub nanos: Option<IntOrString>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Text(String),
}

impl IntOrString {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ComputeRoutesRequest::driving(
            "Depot",
            "Depot",
            &["Client A".to_string(), "Reload".to_string()],
        );
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["origin"]["address"], "Depot");
        assert_eq!(json["intermediates"][1]["address"], "Reload");
        assert_eq!(json["travelMode"], "DRIVE");
        assert_eq!(json["extraComputations"][0], "TOLLS");
        assert_eq!(json["polylineQuality"], "OVERVIEW");
    }

    #[test]
    fn test_request_without_intermediates_omits_field() {
        let request = ComputeRoutesRequest::driving("A", "B", &[]);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("intermediates").is_none());
    }

    #[test]
    fn test_response_accepts_string_and_numeric_money() {
        let body = r#"{
            "routes": [{
                "legs": [{"distanceMeters": 1200, "duration": "60s"}],
                "polyline": {"encodedPolyline": "abc"},
                "travelAdvisory": {"tollInfo": {"estimatedPrice": [
                    {"currencyCode": "BRL", "units": "12", "nanos": 500000000}
                ]}}
            }]
        }"#;
        let response: ComputeRoutesResponse = serde_json::from_str(body).unwrap();
        let route = &response.routes[0];
        let price = &route.travel_advisory.as_ref().unwrap().toll_info.as_ref().unwrap().estimated_price[0];

        assert_eq!(price.units.as_ref().and_then(IntOrString::as_i64), Some(12));
        assert_eq!(price.nanos.as_ref().and_then(IntOrString::as_i64), Some(500_000_000));
        assert_eq!(route.legs[0].duration.as_deref(), Some("60s"));
    }
}
