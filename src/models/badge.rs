use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An earned achievement. Created exactly once per badge id; owned by the
/// storage port and never deleted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRecord {
    pub badge_id: String,
    pub earned_at: DateTime<Utc>,
}
