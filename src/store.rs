use tracing::warn;

use crate::db::repositories::badge_repository::BadgeRepository;
use crate::db::repositories::record_repository::RecordRepository;
use crate::db::repositories::settings_repository::SettingsRepository;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::badge::BadgeRecord;
use crate::models::record::StoredRecord;
use crate::models::settings::ScoringSettings;

const KEY_SCORING_SETTINGS: &str = "scoring_settings";

/// Storage port of the engine. The record log is append-only and is the
/// single source of truth; badges are deduplicated by id; settings are a
/// single versioned blob.
pub trait EngineStore: Send + Sync {
    fn list_records(&self) -> AppResult<Vec<StoredRecord>>;

    fn append_record(&self, record: &StoredRecord) -> AppResult<()>;

    fn list_badges(&self) -> AppResult<Vec<BadgeRecord>>;

    /// Append a badge unless its id is already present. Returns whether the
    /// badge was actually written.
    fn append_badge(&self, badge: &BadgeRecord) -> AppResult<bool>;

    /// Load the stored scoring settings. `None` means absent or unreadable;
    /// callers fall back to defaults (recovery, not an error).
    fn load_settings(&self) -> AppResult<Option<ScoringSettings>>;

    fn save_settings(&self, settings: &ScoringSettings) -> AppResult<()>;
}

/// `EngineStore` over a local sqlite database.
pub struct SqliteStore {
    db: DbPool,
}

impl SqliteStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

impl EngineStore for SqliteStore {
    fn list_records(&self) -> AppResult<Vec<StoredRecord>> {
        self.db.with_connection(RecordRepository::list_all)
    }

    fn append_record(&self, record: &StoredRecord) -> AppResult<()> {
        self.db
            .with_connection(|conn| RecordRepository::insert(conn, record))
    }

    fn list_badges(&self) -> AppResult<Vec<BadgeRecord>> {
        self.db.with_connection(BadgeRepository::list)
    }

    fn append_badge(&self, badge: &BadgeRecord) -> AppResult<bool> {
        self.db
            .with_connection(|conn| BadgeRepository::insert_ignore(conn, badge))
    }

    fn load_settings(&self) -> AppResult<Option<ScoringSettings>> {
        self.db.with_connection(|conn| {
            let row = SettingsRepository::get(conn, KEY_SCORING_SETTINGS)?;
            let Some(row) = row else {
                return Ok(None);
            };

            match serde_json::from_str::<ScoringSettings>(&row.value) {
                Ok(settings) => Ok(Some(settings)),
                Err(err) => {
                    warn!(
                        target: "earthscore::settings",
                        error = %err,
                        "stored scoring settings unreadable, falling back to defaults"
                    );
                    Ok(None)
                }
            }
        })
    }

    fn save_settings(&self, settings: &ScoringSettings) -> AppResult<()> {
        let value = serde_json::to_string(settings)?;
        self.db
            .with_connection(|conn| SettingsRepository::upsert(conn, KEY_SCORING_SETTINGS, &value))
    }
}
