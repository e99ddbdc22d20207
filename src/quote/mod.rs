pub mod engine;
pub mod format;
pub mod normalizer;
pub mod scenario;
pub mod units;

pub use engine::{ComparisonEngine, ComparisonRequest, ComparisonResult, ScenarioDiff, Stops};
pub use normalizer::{NormalizedRoute, RouteDataNormalizer, RouteLeg};
pub use scenario::{Scenario, ScenarioCalculator, ScenarioKind, ScenarioSummary};
pub use units::{Distance, Money, TravelTime};
