use std::sync::{Arc, RwLock};

use serde_json::json;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::settings::{ScoringSettings, Weights};
use crate::store::EngineStore;

/// Scoring configuration backed by the storage port. Missing or corrupted
/// settings fall back to the documented defaults; that is a recovery, never
/// a surfaced error.
pub struct SettingsService {
    store: Arc<dyn EngineStore>,
    cache: RwLock<Option<ScoringSettings>>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn EngineStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    pub fn get(&self) -> AppResult<ScoringSettings> {
        if let Ok(guard) = self.cache.read() {
            if let Some(settings) = guard.as_ref() {
                return Ok(*settings);
            }
        }

        let settings = match self.store.load_settings()? {
            Some(settings) => settings,
            None => {
                debug!(
                    target: "earthscore::settings",
                    "no stored scoring settings, using defaults"
                );
                ScoringSettings::default()
            }
        };

        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(settings);
        }
        Ok(settings)
    }

    pub fn update(&self, settings: ScoringSettings) -> AppResult<ScoringSettings> {
        validate(&settings)?;

        self.store.save_settings(&settings)?;

        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(settings);
        }

        Ok(settings)
    }
}

fn validate(settings: &ScoringSettings) -> AppResult<()> {
    let baselines = &settings.baselines;
    for (name, value) in [
        ("electricityPerDay", baselines.electricity_per_day),
        ("waterPerDay", baselines.water_per_day),
        ("travelKmPerDay", baselines.travel_km_per_day),
        ("wasteKgPerDay", baselines.waste_kg_per_day),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::validation_with_details(
                format!("baseline {name} must be strictly positive"),
                json!({"field": name, "value": value}),
            ));
        }
    }

    let weights = &settings.weights;
    for (name, value) in [
        ("electricity", weights.electricity),
        ("travel", weights.travel),
        ("water", weights.water),
        ("waste", weights.waste),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::validation_with_details(
                format!("weight {name} must be non-negative"),
                json!({"field": name, "value": value}),
            ));
        }
    }

    // Weights summing to 1.0 is a convention, not an invariant the engine
    // enforces; flag the drift for the configuration owner.
    if (weights.sum() - 1.0).abs() > 0.01 {
        warn!(
            target: "earthscore::settings",
            sum = weights.sum(),
            "weights do not sum to 1.0"
        );
    }

    Ok(())
}
