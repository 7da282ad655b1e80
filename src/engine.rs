use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::badge::BadgeRecord;
use crate::models::mission::{default_missions, Mission, MissionProgress};
use crate::models::record::{ActivityRecord, RecordCategory, StoredRecord};
use crate::models::score::ScoreResult;
use crate::models::settings::{ScoreTuning, ScoringSettings};
use crate::services::score_service::ScoreEngine;
use crate::services::settings_service::SettingsService;
use crate::services::{aggregation_service, badge_service, mission_service, streak_service};
use crate::store::{EngineStore, SqliteStore};

/// Input for logging a new activity record. Timestamp defaults to now.
#[derive(Debug, Clone)]
pub struct RecordInput {
    pub category: RecordCategory,
    pub amount: f64,
    pub unit: String,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Facade wiring the storage port to the scoring, streak, badge and mission
/// services. All computations run over an immutable snapshot of the history;
/// the only mutations are record and badge appends through the port.
pub struct EarthScoreEngine {
    store: Arc<dyn EngineStore>,
    settings: SettingsService,
    scorer: ScoreEngine,
    missions: Vec<Mission>,
}

impl EarthScoreEngine {
    pub fn new(db: DbPool) -> Self {
        Self::with_store(Arc::new(SqliteStore::new(db)))
    }

    pub fn with_store(store: Arc<dyn EngineStore>) -> Self {
        Self {
            settings: SettingsService::new(Arc::clone(&store)),
            store,
            scorer: ScoreEngine::default(),
            missions: default_missions(),
        }
    }

    /// Replace the default score tuning. Intended for configuration owners;
    /// the stock values are the product defaults.
    pub fn with_tuning(mut self, tuning: ScoreTuning) -> Self {
        self.scorer = ScoreEngine::new(tuning);
        self
    }

    /// Replace the stock mission catalog.
    pub fn with_missions(mut self, missions: Vec<Mission>) -> Self {
        self.missions = missions;
        self
    }

    /// Validate and append one activity record to the log.
    pub fn log_record(&self, input: RecordInput) -> AppResult<ActivityRecord> {
        if !input.amount.is_finite() || input.amount < 0.0 {
            return Err(AppError::validation("amount must be a non-negative number"));
        }
        if input.unit.trim().is_empty() {
            return Err(AppError::validation("unit must not be empty"));
        }

        let record = ActivityRecord {
            id: Uuid::new_v4().to_string(),
            recorded_at: input.recorded_at.unwrap_or_else(Utc::now),
            category: input.category,
            amount: input.amount,
            unit: input.unit.trim().to_string(),
        };

        self.store.append_record(&StoredRecord::from_record(&record))?;
        debug!(
            target: "earthscore::engine",
            record_id = %record.id,
            category = record.category.type_str(),
            "activity record logged"
        );

        Ok(record)
    }

    /// EarthScore for one calendar day, using the stored baselines/weights.
    pub fn score_for_date(&self, date: NaiveDate) -> AppResult<ScoreResult> {
        let settings = self.settings.get()?;
        let records = self.load_history()?;
        let totals = aggregation_service::daily_totals(&records, date);
        Ok(self
            .scorer
            .earth_score(&totals, &settings.baselines, &settings.weights))
    }

    pub fn score_for_today(&self) -> AppResult<ScoreResult> {
        self.score_for_date(Utc::now().date_naive())
    }

    /// Consecutive days with at least one record, ending today.
    pub fn current_streak(&self) -> AppResult<u32> {
        let records = self.load_history()?;
        Ok(streak_service::current_streak(
            &records,
            Utc::now().date_naive(),
        ))
    }

    /// Evaluate the badge catalog and persist newly earned badges.
    ///
    /// Read-modify-write against the currently earned set; the port dedupes
    /// by badge id, so a concurrent evaluation racing on the same badge
    /// yields a single record. Returns the badges this call actually issued.
    pub fn evaluate_badges(&self) -> AppResult<Vec<BadgeRecord>> {
        let records = self.load_history()?;
        let already_earned: HashSet<String> = self
            .store
            .list_badges()?
            .into_iter()
            .map(|badge| badge.badge_id)
            .collect();

        let now = Utc::now();
        let candidates =
            badge_service::evaluate(&records, &already_earned, now.date_naive(), now);

        let mut issued = Vec::new();
        for badge in candidates {
            if self.store.append_badge(&badge)? {
                info!(
                    target: "earthscore::engine",
                    badge_id = %badge.badge_id,
                    "badge issued"
                );
                issued.push(badge);
            }
        }

        Ok(issued)
    }

    pub fn earned_badges(&self) -> AppResult<Vec<BadgeRecord>> {
        self.store.list_badges()
    }

    /// Current-week progress for one mission.
    pub fn mission_progress(&self, mission: &Mission) -> AppResult<u32> {
        let records = self.load_history()?;
        Ok(mission_service::progress(&records, mission, Utc::now()))
    }

    /// Progress for every mission in the engine's catalog.
    pub fn mission_overview(&self) -> AppResult<Vec<MissionProgress>> {
        let records = self.load_history()?;
        Ok(mission_service::overview(
            &records,
            &self.missions,
            Utc::now(),
        ))
    }

    pub fn settings(&self) -> AppResult<ScoringSettings> {
        self.settings.get()
    }

    pub fn update_settings(&self, settings: ScoringSettings) -> AppResult<ScoringSettings> {
        self.settings.update(settings)
    }

    /// Load the full history, skipping stored rows the engine does not
    /// understand. Unknown record types are forward-compatible data, not
    /// errors.
    fn load_history(&self) -> AppResult<Vec<ActivityRecord>> {
        let stored = self.store.list_records()?;
        let mut records = Vec::with_capacity(stored.len());

        for row in stored {
            let id = row.id.clone();
            let record_type = row.record_type.clone();
            match row.into_record() {
                Some(record) => records.push(record),
                None => {
                    debug!(
                        target: "earthscore::engine",
                        record_id = %id,
                        record_type = %record_type,
                        "skipping unrecognized stored record"
                    );
                }
            }
        }

        Ok(records)
    }
}
