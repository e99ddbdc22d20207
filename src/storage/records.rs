use crate::quote::{ComparisonResult, Distance, Money, ScenarioSummary, TravelTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display/reporting projection of a [`ComparisonResult`].
///
/// Drops legs and polylines; shared by history and pinned collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub timestamp: DateTime<Utc>,
    pub origin: String,
    pub destination1: String,
    pub recharge: String,
    pub destination2: String,
    pub simple: ScenarioSummary,
    pub full: ScenarioSummary,
    pub distance_diff: Distance,
    pub duration_diff: TravelTime,
    pub toll_diff: Money,
    pub rate_per_km: f64,
    pub suggested_value: Money,
}

pub type HistoryEntry = CalculationRecord;
pub type PinnedEntry = CalculationRecord;

impl From<&ComparisonResult> for CalculationRecord {
    fn from(result: &ComparisonResult) -> Self {
        Self {
            timestamp: result.timestamp,
            origin: result.stops.origin.clone(),
            destination1: result.stops.destination1.clone(),
            recharge: result.stops.recharge.clone(),
            destination2: result.stops.destination2.clone(),
            simple: result.simple.summary(),
            full: result.full.summary(),
            distance_diff: result.distance_diff,
            duration_diff: result.duration_diff,
            toll_diff: result.toll_diff,
            rate_per_km: result.rate_per_km,
            suggested_value: result.suggested_value,
        }
    }
}
