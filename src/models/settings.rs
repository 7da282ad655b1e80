use serde::{Deserialize, Serialize};

/// Expected daily consumption per category. Usage at the baseline scores a
/// component of 50; usage at twice the baseline drives it to 0. All values
/// must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baselines {
    pub electricity_per_day: f64,
    pub water_per_day: f64,
    pub travel_km_per_day: f64,
    pub waste_kg_per_day: f64,
}

impl Default for Baselines {
    fn default() -> Self {
        Self {
            electricity_per_day: 6.0,
            water_per_day: 100.0,
            travel_km_per_day: 10.0,
            waste_kg_per_day: 0.5,
        }
    }
}

/// Share of the base score carried by each category. By convention the
/// weights sum to 1.0; the engine does not enforce this, the configuration
/// owner does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weights {
    pub electricity: f64,
    pub travel: f64,
    pub water: f64,
    pub waste: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.electricity + self.travel + self.water + self.waste
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            electricity: 0.35,
            travel: 0.30,
            water: 0.25,
            waste: 0.10,
        }
    }
}

/// Persisted scoring configuration: baselines plus weights. Read-only input
/// to the score engine, never mutated by it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSettings {
    #[serde(default)]
    pub baselines: Baselines,
    #[serde(default)]
    pub weights: Weights,
}

/// Product-tuning constants of the score formula. The exact values carry no
/// deeper model; they are kept configurable instead of hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTuning {
    /// Usage at `saturation_factor × baseline` drives a component to 0.
    pub saturation_factor: f64,
    /// Maximum bonus for an all-eco travel day.
    pub eco_travel_bonus_max: f64,
    /// Bonus points granted per recycled unit.
    pub recycle_bonus_per_unit: f64,
    /// Cap on the recycling bonus.
    pub recycle_bonus_max: f64,
    /// Cap on the combined bonus term.
    pub bonus_max: f64,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            saturation_factor: 2.0,
            eco_travel_bonus_max: 8.0,
            recycle_bonus_per_unit: 2.0,
            recycle_bonus_max: 5.0,
            bonus_max: 10.0,
        }
    }
}
