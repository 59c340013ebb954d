use crate::error::StoreError;

const SCHEMA_SQL: &str = r#"
-- Keyed JSON state, one row per logical key (sim.scans, sim.scan_details,
-- sim.timeline). Values are whole documents; writes replace them.
CREATE TABLE IF NOT EXISTS state (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

pub fn initialize(conn: &rusqlite::Connection) -> Result<(), StoreError> {
    // WAL before DDL. Concurrent instances race last-write-wins per key;
    // there is no locking beyond SQLite's own.
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
