use super::units::{Distance, Money, TravelTime};
use crate::error::AppError;
use crate::models::routes::{ComputeRoutesResponse, IntOrString, Route};
use serde::{Deserialize, Serialize};

/// Toll multiplier for a loaded 6-axle truck
pub const DEFAULT_AXLE_MULTIPLIER: u32 = 6;

/// One point-to-point segment of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance: Distance,
    pub duration: TravelTime,
}

/// Typed view of one routing response
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRoute {
    pub legs: Vec<RouteLeg>,
    /// Whole-route toll, axle multiplier already applied
    pub toll: Money,
    pub polyline: Option<String>,
}

/// Converts provider responses into [`NormalizedRoute`]s
#[derive(Debug, Clone, Copy)]
pub struct RouteDataNormalizer {
    axle_multiplier: u32,
}

impl Default for RouteDataNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_AXLE_MULTIPLIER)
    }
}

impl RouteDataNormalizer {
    pub fn new(axle_multiplier: u32) -> Self {
        Self { axle_multiplier }
    }

    pub fn axle_multiplier(&self) -> u32 {
        self.axle_multiplier
    }

    /// Normalize the first route of `response`, which must have exactly `expected_legs` legs.
    pub fn normalize(
        &self,
        response: &ComputeRoutesResponse,
        expected_legs: usize,
    ) -> Result<NormalizedRoute, AppError> {
        let route = response
            .routes
            .first()
            .ok_or_else(|| AppError::Normalization("response contains no routes".to_string()))?;

        if route.legs.len() != expected_legs {
            return Err(AppError::Normalization(format!(
                "expected {} legs, got {}",
                expected_legs,
                route.legs.len()
            )));
        }

        let legs = route
            .legs
            .iter()
            .enumerate()
            .map(|(idx, leg)| {
                let meters = leg.distance_meters.ok_or_else(|| {
                    AppError::Normalization(format!("leg {} has no distanceMeters", idx + 1))
                })?;
                let duration = leg.duration.as_deref().ok_or_else(|| {
                    AppError::Normalization(format!("leg {} has no duration", idx + 1))
                })?;

                Ok(RouteLeg {
                    distance: Distance::from_meters(meters),
                    duration: parse_duration(duration)?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let toll = self.route_toll(route)?;

        Ok(NormalizedRoute {
            legs,
            toll,
            polyline: route
                .polyline
                .as_ref()
                .and_then(|p| p.encoded_polyline.clone()),
        })
    }

    fn route_toll(&self, route: &Route) -> Result<Money, AppError> {
        let price = route
            .travel_advisory
            .as_ref()
            .and_then(|advisory| advisory.toll_info.as_ref())
            .and_then(|info| info.estimated_price.first())
            .ok_or_else(|| AppError::Normalization("route has no toll estimate".to_string()))?;

        let units = read_money_field(price.units.as_ref(), "units")?;
        let nanos = read_money_field(price.nanos.as_ref(), "nanos")?;

        Money::from_units_nanos(units, nanos)
            .and_then(|toll| toll.checked_times(self.axle_multiplier))
            .ok_or_else(|| {
                AppError::Normalization(format!(
                    "toll estimate out of range: {} units, {} nanos",
                    units, nanos
                ))
            })
    }
}

fn read_money_field(value: Option<&IntOrString>, field: &str) -> Result<i64, AppError> {
    match value {
        None => Ok(0),
        Some(v) => v.as_i64().ok_or_else(|| {
            AppError::Normalization(format!("toll estimate {} is not an integer: {:?}", field, v))
        }),
    }
}

/// Parse a provider duration such as `"5400s"` into whole seconds
pub fn parse_duration(raw: &str) -> Result<TravelTime, AppError> {
    raw.trim()
        .strip_suffix('s')
        .and_then(|digits| digits.parse::<u64>().ok())
        .map(TravelTime::from_secs)
        .ok_or_else(|| AppError::Normalization(format!("invalid duration '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(legs: serde_json::Value, toll: serde_json::Value) -> ComputeRoutesResponse {
        serde_json::from_value(json!({
            "routes": [{
                "legs": legs,
                "polyline": {"encodedPolyline": "_p~iF~ps|U"},
                "travelAdvisory": {"tollInfo": {"estimatedPrice": [toll]}}
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("5400s").unwrap().hms(), (1, 30, 0));
        assert_eq!(parse_duration("0s").unwrap(), TravelTime::ZERO);
        assert!(parse_duration("5400").is_err());
        assert!(parse_duration("1.5s").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn test_normalize_simple_route() {
        let response = response(
            json!([
                {"distanceMeters": 120_400, "duration": "5400s"},
                {"distanceMeters": 118_900, "duration": "3600s"}
            ]),
            json!({"currencyCode": "BRL", "units": "12", "nanos": 500_000_000}),
        );

        let route = RouteDataNormalizer::default().normalize(&response, 2).unwrap();

        assert_eq!(route.legs.len(), 2);
        assert_eq!(route.legs[0].distance.hectometers(), 1204);
        assert_eq!(route.legs[1].duration.secs(), 3600);
        assert_eq!(route.toll.cents(), 7500);
        assert_eq!(route.polyline.as_deref(), Some("_p~iF~ps|U"));
    }

    #[test]
    fn test_missing_nanos_reads_as_zero() {
        let response = response(
            json!([{"distanceMeters": 1000, "duration": "60s"}]),
            json!({"currencyCode": "BRL", "units": "7"}),
        );

        let route = RouteDataNormalizer::new(1).normalize(&response, 1).unwrap();
        assert_eq!(route.toll.cents(), 700);
    }

    #[test]
    fn test_missing_toll_estimate_fails() {
        let response: ComputeRoutesResponse = serde_json::from_value(json!({
            "routes": [{"legs": [{"distanceMeters": 1000, "duration": "60s"}]}]
        }))
        .unwrap();

        let err = RouteDataNormalizer::default().normalize(&response, 1).unwrap_err();
        assert!(matches!(err, AppError::Normalization(_)));
    }

    #[test]
    fn test_out_of_range_toll_fails() {
        let response = response(
            json!([{"distanceMeters": 1000, "duration": "60s"}]),
            json!({"units": i64::MAX.to_string()}),
        );

        let err = RouteDataNormalizer::default().normalize(&response, 1).unwrap_err();
        assert!(matches!(err, AppError::Normalization(_)));
    }

    #[test]
    fn test_missing_leg_fields_fail() {
        let no_distance = response(json!([{"duration": "60s"}]), json!({"units": "1"}));
        let no_duration = response(json!([{"distanceMeters": 10}]), json!({"units": "1"}));

        let normalizer = RouteDataNormalizer::default();
        assert!(normalizer.normalize(&no_distance, 1).is_err());
        assert!(normalizer.normalize(&no_duration, 1).is_err());
    }

    #[test]
    fn test_leg_count_mismatch_fails() {
        let response = response(
            json!([{"distanceMeters": 1000, "duration": "60s"}]),
            json!({"units": "1"}),
        );
        let err = RouteDataNormalizer::default().normalize(&response, 4).unwrap_err();
        assert!(err.to_string().contains("expected 4 legs"));
    }

    #[test]
    fn test_empty_response_fails() {
        let err = RouteDataNormalizer::default()
            .normalize(&ComputeRoutesResponse::default(), 2)
            .unwrap_err();
        assert!(err.is_routing_failure());
    }
}
