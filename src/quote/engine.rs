use super::normalizer::RouteDataNormalizer;
use super::scenario::{Scenario, ScenarioCalculator, ScenarioKind, ScenarioSummary};
use super::units::{Distance, Money, TravelTime};
use crate::error::AppError;
use crate::models::routes::ComputeRoutesRequest;
use crate::providers::RoutingProvider;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Inputs for one calculation. Locations are provider-resolvable addresses.
#[derive(Debug, Clone, Default)]
pub struct ComparisonRequest {
    pub origin: Option<String>,
    pub destination1: Option<String>,
    pub recharge: Option<String>,
    pub destination2: Option<String>,
    pub api_key: String,
    pub rate_per_km: f64,
}

/// The four stops of a validated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stops {
    pub origin: String,
    pub destination1: String,
    pub recharge: String,
    pub destination2: String,
}

/// Marginal distance, time and toll between the two scenarios
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioDiff {
    pub distance: Distance,
    pub duration: TravelTime,
    pub toll: Money,
    pub suggested_value: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub timestamp: DateTime<Utc>,
    pub stops: Stops,
    pub simple: Scenario,
    pub full: Scenario,
    pub distance_diff: Distance,
    pub duration_diff: TravelTime,
    pub toll_diff: Money,
    pub rate_per_km: f64,
    pub suggested_value: Money,
    pub polyline_simple: Option<String>,
    pub polyline_full: Option<String>,
}

/// Compares the Simple and Full scenarios for a set of stops.
///
/// Owns no persisted state; callers decide whether to record the result.
pub struct ComparisonEngine {
    routing: Arc<dyn RoutingProvider>,
    normalizer: RouteDataNormalizer,
}

impl ComparisonEngine {
    pub fn new(routing: Arc<dyn RoutingProvider>, normalizer: RouteDataNormalizer) -> Self {
        Self {
            routing,
            normalizer,
        }
    }

    /// Run one calculation.
    ///
    /// Validation failures return before any network call. Routing or normalization
    /// failures abort without a partial result.
    pub async fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult, AppError> {
        let stops = validate_request(request)?;

        let simple_request = ComputeRoutesRequest::driving(
            &stops.origin,
            &stops.origin,
            &[stops.destination1.clone()],
        );
        let full_request = ComputeRoutesRequest::driving(
            &stops.origin,
            &stops.origin,
            &[
                stops.destination1.clone(),
                stops.recharge.clone(),
                stops.destination2.clone(),
            ],
        );

        let simple_response = self
            .routing
            .compute_route(&simple_request, &request.api_key)
            .await?;
        let full_response = self
            .routing
            .compute_route(&full_request, &request.api_key)
            .await?;

        let simple_route = self
            .normalizer
            .normalize(&simple_response, ScenarioKind::Simple.expected_legs())?;
        let full_route = self
            .normalizer
            .normalize(&full_response, ScenarioKind::Full.expected_legs())?;

        let simple = ScenarioCalculator::simple(&simple_route);
        let full = ScenarioCalculator::full(&full_route);
        let diff = diff_scenarios(&simple.summary(), &full.summary(), request.rate_per_km)?;

        info!(
            distance_diff_hm = diff.distance.hectometers(),
            duration_diff_secs = diff.duration.secs(),
            toll_diff_cents = diff.toll.cents(),
            suggested_cents = diff.suggested_value.cents(),
            "Calculation completed"
        );

        Ok(ComparisonResult {
            timestamp: Utc::now(),
            stops,
            simple,
            full,
            distance_diff: diff.distance,
            duration_diff: diff.duration,
            toll_diff: diff.toll,
            rate_per_km: request.rate_per_km,
            suggested_value: diff.suggested_value,
            polyline_simple: simple_route.polyline,
            polyline_full: full_route.polyline,
        })
    }
}

/// Check inputs without touching the network
pub fn validate_request(request: &ComparisonRequest) -> Result<Stops, AppError> {
    let required = |value: &Option<String>, label: &str| -> Result<String, AppError> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation(format!("{} is missing", label)))
    };

    let stops = Stops {
        origin: required(&request.origin, "origin")?,
        destination1: required(&request.destination1, "destination 1")?,
        recharge: required(&request.recharge, "recharge point")?,
        destination2: required(&request.destination2, "destination 2")?,
    };

    if request.api_key.trim().is_empty() {
        return Err(AppError::Validation("API key is missing".to_string()));
    }

    if !(request.rate_per_km.is_finite() && request.rate_per_km > 0.0) {
        return Err(AppError::Validation(format!(
            "rate per km must be positive, got {}",
            request.rate_per_km
        )));
    }

    Ok(stops)
}

/// Diff two scenario summaries. Every component is an absolute difference, so the
/// result does not depend on argument order.
pub fn diff_scenarios(
    a: &ScenarioSummary,
    b: &ScenarioSummary,
    rate_per_km: f64,
) -> Result<ScenarioDiff, AppError> {
    let distance = a.total_distance.abs_diff(b.total_distance);
    let toll = a.toll.abs_diff(b.toll);

    Ok(ScenarioDiff {
        distance,
        duration: a.total_duration.abs_diff(b.total_duration),
        toll,
        suggested_value: suggested_value(rate_per_km, distance, toll)?,
    })
}

/// `rate_per_km × distance_diff + toll_diff`, rounded to the cent.
///
/// Fails with [`AppError::Validation`] when the amount does not fit in cents.
pub fn suggested_value(
    rate_per_km: f64,
    distance_diff: Distance,
    toll_diff: Money,
) -> Result<Money, AppError> {
    let out_of_range = || {
        AppError::Validation(format!(
            "suggested value out of range for rate {} per km",
            rate_per_km
        ))
    };

    // hectometres × 10 = km × 100, i.e. cents per unit of rate
    let distance_cents = (rate_per_km * distance_diff.hectometers() as f64 * 10.0).round();
    // i64::MAX as f64 rounds up to 2^63, so the bound is exclusive
    if !distance_cents.is_finite() || distance_cents >= i64::MAX as f64 || distance_cents < 0.0 {
        return Err(out_of_range());
    }

    Money::from_cents(distance_cents as i64)
        .checked_add(toll_diff)
        .ok_or_else(out_of_range)
}
