use std::convert::TryFrom;

use chrono::{DateTime, Utc};
use rusqlite::{named_params, Connection, Row};

use crate::error::AppResult;
use crate::models::badge::BadgeRecord;

impl TryFrom<&Row<'_>> for BadgeRecord {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        let earned_raw: String = row.get("earned_at")?;
        let earned_at = DateTime::parse_from_rfc3339(&earned_raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    Box::new(err),
                )
            })?;

        Ok(Self {
            badge_id: row.get("badge_id")?,
            earned_at,
        })
    }
}

pub struct BadgeRepository;

impl BadgeRepository {
    pub fn list(conn: &Connection) -> AppResult<Vec<BadgeRecord>> {
        let mut stmt = conn.prepare(
            "SELECT badge_id, earned_at FROM earned_badges ORDER BY earned_at ASC",
        )?;

        let rows = stmt
            .query_map([], |row| BadgeRecord::try_from(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Insert a badge unless the id is already present. Returns whether a row
    /// was written; concurrent evaluations racing on the same badge collapse
    /// into a single record.
    pub fn insert_ignore(conn: &Connection, badge: &BadgeRecord) -> AppResult<bool> {
        let affected = conn.execute(
            r#"
            INSERT INTO earned_badges (badge_id, earned_at)
            VALUES (:badge_id, :earned_at)
            ON CONFLICT(badge_id) DO NOTHING
            "#,
            named_params! {
                ":badge_id": badge.badge_id,
                ":earned_at": badge.earned_at.to_rfc3339(),
            },
        )?;

        Ok(affected > 0)
    }
}
