/// Integration tests for the Google provider clients against a mock upstream
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use vectura::{
    config::GoogleConfig,
    error::AppError,
    models::routes::{ComputeRoutesRequest, ROUTES_FIELD_MASK},
    providers::{GeocodingProvider, GoogleGeocodingClient, GoogleRoutesClient, RoutingProvider},
    quote::{ComparisonEngine, ComparisonRequest, RouteDataNormalizer},
};
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const ROUTES_PATH: &str = "/directions/v2:computeRoutes";
const GEOCODE_PATH: &str = "/maps/api/geocode/json";

fn google_config(server: &MockServer, timeout_seconds: u64) -> GoogleConfig {
    GoogleConfig {
        routes_base_url: server.uri(),
        geocode_base_url: server.uri(),
        timeout_seconds,
    }
}

fn route_body(legs: &[(u64, &str)], units: serde_json::Value, nanos: serde_json::Value) -> serde_json::Value {
    let legs: Vec<_> = legs
        .iter()
        .map(|(meters, duration)| json!({"distanceMeters": meters, "duration": duration}))
        .collect();
    json!({
        "routes": [{
            "distanceMeters": 1,
            "duration": "1s",
            "legs": legs,
            "polyline": {"encodedPolyline": "abc~def"},
            "travelAdvisory": {"tollInfo": {"estimatedPrice": [
                {"currencyCode": "BRL", "units": units, "nanos": nanos}
            ]}}
        }]
    })
}

#[tokio::test]
async fn test_routes_client_sends_headers_and_parses_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .and(header("X-Goog-Api-Key", "AIza-test"))
        .and(body_partial_json(json!({
            "travelMode": "DRIVE",
            "extraComputations": ["TOLLS"],
            "routingPreference": "TRAFFIC_AWARE_OPTIMAL"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body(
            &[(1000, "60s"), (2000, "120s")],
            json!(3),
            json!(250000000),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleRoutesClient::new(reqwest::Client::new(), &google_config(&server, 5));
    let request = ComputeRoutesRequest::driving("A", "A", &["B".to_string()]);
    let response = client.compute_route(&request, "AIza-test").await.unwrap();

    let route = &response.routes[0];
    assert_eq!(route.legs.len(), 2);
    assert_eq!(route.legs[1].distance_meters, Some(2000));

    // the header matcher splits values on commas, so the mask is checked verbatim here
    let received = server.received_requests().await.unwrap();
    let field_mask = received[0].headers.get("X-Goog-FieldMask").unwrap();
    assert_eq!(field_mask.to_str().unwrap(), ROUTES_FIELD_MASK);
}

#[tokio::test]
async fn test_routes_client_non_success_is_routing_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
        })))
        .mount(&server)
        .await;

    let client = GoogleRoutesClient::new(reqwest::Client::new(), &google_config(&server, 5));
    let request = ComputeRoutesRequest::driving("A", "A", &["B".to_string()]);
    let err = client.compute_route(&request, "bad").await.unwrap_err();

    match err {
        AppError::Routing(message) => assert!(message.contains("403"), "{}", message),
        other => panic!("Expected routing failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_routes_client_timeout_is_routing_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({"routes": []})),
        )
        .mount(&server)
        .await;

    let client = GoogleRoutesClient::new(reqwest::Client::new(), &google_config(&server, 1));
    let request = ComputeRoutesRequest::driving("A", "A", &["B".to_string()]);
    let err = client.compute_route(&request, "key").await.unwrap_err();

    assert!(matches!(err, AppError::Routing(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_engine_end_to_end_against_mock_routes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .and(body_partial_json(json!({"intermediates": [{"address": "Port"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body(
            &[(120_400, "5400s"), (118_900, "3600s")],
            json!("12"),
            json!("500000000"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .and(body_partial_json(json!({"intermediates": [
            {"address": "Port"}, {"address": "Yard"}, {"address": "Mill"}
        ]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body(
            &[(60_000, "2400s"), (55_000, "2000s"), (58_000, "2100s"), (65_000, "2500s")],
            json!(8),
            json!(750000000),
        )))
        // partial matching lets the simple matcher accept longer arrays too
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let routing = GoogleRoutesClient::new(reqwest::Client::new(), &google_config(&server, 5));
    let engine = ComparisonEngine::new(Arc::new(routing), RouteDataNormalizer::default());

    let result = engine
        .compare(&ComparisonRequest {
            origin: Some("HQ".to_string()),
            destination1: Some("Port".to_string()),
            recharge: Some("Yard".to_string()),
            destination2: Some("Mill".to_string()),
            api_key: "AIza-test".to_string(),
            rate_per_km: 10.0,
        })
        .await
        .unwrap();

    assert_eq!(result.distance_diff.hectometers(), 13);
    assert_eq!(result.toll_diff.cents(), 2250);
    assert_eq!(result.suggested_value.cents(), 3550);
    assert_eq!(result.polyline_full.as_deref(), Some("abc~def"));
}

#[tokio::test]
async fn test_engine_rejects_wrong_leg_count() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body(
            &[(1000, "60s")],
            json!(0),
            json!(0),
        )))
        .mount(&server)
        .await;

    let routing = GoogleRoutesClient::new(reqwest::Client::new(), &google_config(&server, 5));
    let engine = ComparisonEngine::new(Arc::new(routing), RouteDataNormalizer::default());

    let err = engine
        .compare(&ComparisonRequest {
            origin: Some("HQ".to_string()),
            destination1: Some("Port".to_string()),
            recharge: Some("Yard".to_string()),
            destination2: Some("Mill".to_string()),
            api_key: "key".to_string(),
            rate_per_km: 5.0,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Normalization(_)), "got {:?}", err);
    assert!(err.is_routing_failure());
}

#[tokio::test]
async fn test_geocoding_client_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", "av paulista 1000"))
        .and(query_param("key", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Av. Paulista, 1000 - Bela Vista, São Paulo - SP, 01310-100, Brazil",
                "geometry": {"location": {"lat": -23.5649, "lng": -46.6519}}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleGeocodingClient::new(reqwest::Client::new(), &google_config(&server, 5));
    let location = client.geocode("av paulista 1000", "s3cret").await.unwrap();

    assert!(location.formatted_address.starts_with("Av. Paulista"));
    assert_eq!(location.latitude, -23.5649);
    assert_eq!(location.longitude, -46.6519);
}

#[tokio::test]
async fn test_geocoding_client_non_ok_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "results": [],
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let client = GoogleGeocodingClient::new(reqwest::Client::new(), &google_config(&server, 5));
    let err = client.geocode("anywhere", "bad").await.unwrap_err();

    match err {
        AppError::Geocode(message) => assert!(message.contains("REQUEST_DENIED"), "{}", message),
        other => panic!("Expected geocode failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_errors_do_not_leak_the_key() {
    // nothing listens on the discard port
    let config = GoogleConfig {
        routes_base_url: "http://127.0.0.1:9".to_string(),
        geocode_base_url: "http://127.0.0.1:9".to_string(),
        timeout_seconds: 5,
    };
    let secret = "TOPSECRET-shared-key";

    let geocoding = GoogleGeocodingClient::new(reqwest::Client::new(), &config);
    let err = geocoding.geocode("Rua A", secret).await.unwrap_err();
    assert!(matches!(err, AppError::Geocode(_)), "got {:?}", err);
    assert!(!err.to_string().contains(secret), "{}", err);
    assert!(!format!("{:?}", err).contains(secret));

    let routing = GoogleRoutesClient::new(reqwest::Client::new(), &config);
    let request = ComputeRoutesRequest::driving("A", "A", &["B".to_string()]);
    let err = routing.compute_route(&request, secret).await.unwrap_err();
    assert!(matches!(err, AppError::Routing(_)), "got {:?}", err);
    assert!(!err.to_string().contains(secret), "{}", err);
}

#[tokio::test]
async fn test_malformed_geocode_payload_does_not_leak_the_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = GoogleGeocodingClient::new(reqwest::Client::new(), &google_config(&server, 5));
    let err = client.geocode("Rua A", "TOPSECRET-shared-key").await.unwrap_err();

    assert!(matches!(err, AppError::Geocode(_)), "got {:?}", err);
    assert!(!err.to_string().contains("TOPSECRET"), "{}", err);
}
