use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Travel distance split by mode for one calendar day. The buckets sum to at
/// most the travel total; mode-less travel records contribute to the total
/// only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelModeTotals {
    pub walk: f64,
    pub bike: f64,
    pub bus: f64,
    pub car: f64,
}

impl TravelModeTotals {
    /// Distance covered by eco-friendly modes (walk, bike, bus).
    pub fn eco(&self) -> f64 {
        self.walk + self.bike + self.bus
    }
}

/// Per-category sums for one calendar day. Derived from the record history on
/// demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub water: f64,
    pub electricity: f64,
    pub travel: f64,
    pub waste: f64,
    pub recycle: f64,
    pub travel_modes: TravelModeTotals,
}

impl DailyTotals {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            water: 0.0,
            electricity: 0.0,
            travel: 0.0,
            waste: 0.0,
            recycle: 0.0,
            travel_modes: TravelModeTotals::default(),
        }
    }
}

/// Normalized per-category scores in [0, 100] before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    pub electricity: f64,
    pub water: f64,
    pub travel: f64,
    pub waste: f64,
}

/// Unrounded weighted contributions plus the bonus term, kept for display and
/// audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub electricity: f64,
    pub water: f64,
    pub travel: f64,
    pub waste: f64,
    pub bonus: f64,
}

/// Result of one EarthScore computation. `score` is the rounded integer in
/// [0, 100]; the components and breakdown carry the unrounded intermediates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: i64,
    pub components: ComponentScores,
    pub bonus: f64,
    pub breakdown: ScoreBreakdown,
}
