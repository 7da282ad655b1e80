use std::convert::TryFrom;

use rusqlite::{named_params, Connection, Row};
use tracing::warn;

use crate::error::AppResult;
use crate::models::record::{RecordMeta, StoredRecord};

impl TryFrom<&Row<'_>> for StoredRecord {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        let meta_json: Option<String> = row.get("meta")?;
        let meta = meta_json.and_then(|raw| match serde_json::from_str::<RecordMeta>(&raw) {
            Ok(meta) => Some(meta),
            Err(err) => {
                warn!(
                    target: "earthscore::db",
                    error = %err,
                    "dropping unparseable record meta"
                );
                None
            }
        });

        Ok(Self {
            id: row.get("id")?,
            date: row.get("recorded_at")?,
            record_type: row.get("record_type")?,
            value: row.get("value")?,
            unit: row.get("unit")?,
            meta,
        })
    }
}

pub struct RecordRepository;

impl RecordRepository {
    pub fn insert(conn: &Connection, record: &StoredRecord) -> AppResult<()> {
        let meta = record
            .meta
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        conn.execute(
            r#"
            INSERT INTO activity_records (id, recorded_at, record_type, value, unit, meta)
            VALUES (:id, :recorded_at, :record_type, :value, :unit, :meta)
            "#,
            named_params! {
                ":id": record.id,
                ":recorded_at": record.date,
                ":record_type": record.record_type,
                ":value": record.value,
                ":unit": record.unit,
                ":meta": meta,
            },
        )?;

        Ok(())
    }

    pub fn list_all(conn: &Connection) -> AppResult<Vec<StoredRecord>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, recorded_at, record_type, value, unit, meta
            FROM activity_records
            ORDER BY recorded_at ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| StoredRecord::try_from(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
