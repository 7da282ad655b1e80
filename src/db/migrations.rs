use chrono::Utc;
use rusqlite::Connection;
use tracing::info;

use crate::error::AppResult;

pub fn run(conn: &Connection) -> AppResult<()> {
    // Ensure migration history table exists
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS migration_history (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;

    let mut current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version < 1 {
        info!(target: "earthscore::db", version = current_version, "running migration v1");
        migrate_to_v1(conn)?;
        current_version = 1;
        conn.execute(&format!("PRAGMA user_version = {}", current_version), [])?;
        record_migration(conn, 1, "Add category index to activity records")?;
    }

    let _ = current_version;

    Ok(())
}

fn migrate_to_v1(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_activity_records_record_type
            ON activity_records (record_type);
        "#,
    )?;
    Ok(())
}

fn record_migration(conn: &Connection, version: i32, description: &str) -> AppResult<()> {
    conn.execute(
        r#"
        INSERT INTO migration_history (version, description, applied_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(version) DO NOTHING
        "#,
        rusqlite::params![version, description, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}
