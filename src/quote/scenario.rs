use super::normalizer::{NormalizedRoute, RouteLeg};
use super::units::{Distance, Money, TravelTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// origin → destination → origin
    Simple,
    /// origin → destination 1 → recharge → destination 2 → origin
    Full,
}

impl ScenarioKind {
    pub fn expected_legs(self) -> usize {
        match self {
            ScenarioKind::Simple => 2,
            ScenarioKind::Full => 4,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKind::Simple => write!(f, "simple"),
            ScenarioKind::Full => write!(f, "full"),
        }
    }
}

/// Totals only, as kept in history and pinned records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub total_distance: Distance,
    pub total_duration: TravelTime,
    pub toll: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub legs: Vec<RouteLeg>,
    pub total_distance: Distance,
    pub total_duration: TravelTime,
    pub toll: Money,
}

impl Scenario {
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            total_distance: self.total_distance,
            total_duration: self.total_duration,
            toll: self.toll,
        }
    }
}

/// Aggregates normalized legs into a [`Scenario`]
pub struct ScenarioCalculator;

impl ScenarioCalculator {
    pub fn aggregate(kind: ScenarioKind, route: &NormalizedRoute) -> Scenario {
        Scenario {
            kind,
            legs: route.legs.clone(),
            total_distance: route.legs.iter().map(|leg| leg.distance).sum(),
            total_duration: route.legs.iter().map(|leg| leg.duration).sum(),
            toll: route.toll,
        }
    }

    pub fn simple(route: &NormalizedRoute) -> Scenario {
        Self::aggregate(ScenarioKind::Simple, route)
    }

    pub fn full(route: &NormalizedRoute) -> Scenario {
        Self::aggregate(ScenarioKind::Full, route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(hectometers: u64, secs: u64) -> RouteLeg {
        RouteLeg {
            distance: Distance::from_hectometers(hectometers),
            duration: TravelTime::from_secs(secs),
        }
    }

    #[test]
    fn test_simple_scenario_totals() {
        let route = NormalizedRoute {
            legs: vec![leg(1204, 5400), leg(1189, 3600)],
            toll: Money::from_cents(7500),
            polyline: None,
        };

        let scenario = ScenarioCalculator::simple(&route);

        assert_eq!(scenario.kind, ScenarioKind::Simple);
        assert_eq!(scenario.total_distance.hectometers(), 2393);
        assert_eq!(scenario.total_duration.hms(), (2, 30, 0));
        assert_eq!(scenario.toll.cents(), 7500);
    }

    #[test]
    fn test_full_scenario_totals() {
        let route = NormalizedRoute {
            legs: vec![leg(600, 100), leg(550, 200), leg(580, 300), leg(650, 400)],
            toll: Money::from_cents(5250),
            polyline: Some("xyz".to_string()),
        };

        let scenario = ScenarioCalculator::full(&route);

        assert_eq!(scenario.legs.len(), ScenarioKind::Full.expected_legs());
        assert_eq!(scenario.total_distance.hectometers(), 2380);
        assert_eq!(scenario.total_duration.secs(), 1000);
        assert_eq!(scenario.summary().toll.cents(), 5250);
    }
}
