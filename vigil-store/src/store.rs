use crate::error::StoreError;
use crate::schema;
use crate::seed;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use vigil_types::{ScanDetail, ScanMeta, TimelineLog};

const KEY_SCANS: &str = "sim.scans";
const KEY_SCAN_DETAILS: &str = "sim.scan_details";
const KEY_TIMELINE: &str = "sim.timeline";

/// Persisted simulation state: three logical keys mapped to JSON documents
/// in a single-table SQLite database.
///
/// Reads never fail: missing or corrupt state transparently re-seeds from
/// the bundled data. Writes never fail either: a SQLite error degrades the
/// key to an in-memory overlay that lasts for the process lifetime.
pub struct SimStore {
    conn: Connection,
    /// Values that could not be flushed to SQLite, served back on reads
    /// until a later write succeeds.
    overlay: HashMap<String, String>,
}

/// Directory holding Vigil's persisted state. `VIGIL_DATA_DIR` overrides
/// the platform default.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VIGIL_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if cfg!(windows) {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("vigil")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".vigil")
    }
}

fn default_db_path() -> PathBuf {
    data_dir().join("sim.db")
}

impl SimStore {
    /// Open (or create) the database at the default location.
    pub fn open_default() -> Result<Self, StoreError> {
        let path = default_db_path();
        Self::open(&path)
    }

    /// Open a database at a specific path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Other(format!(
                    "failed to create state directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        debug!(path = %path.display(), "simulation store opened");
        Ok(Self {
            conn,
            overlay: HashMap::new(),
        })
    }

    /// Open an in-memory database. Used for tests and as the degraded
    /// fallback when the on-disk store cannot be opened.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self {
            conn,
            overlay: HashMap::new(),
        })
    }

    /// Scan list, newest first. An absent, empty, or corrupt value re-seeds
    /// and persists the bundled list before returning it.
    pub fn scans(&mut self) -> Vec<ScanMeta> {
        match self.read_key::<Vec<ScanMeta>>(KEY_SCANS) {
            Some(scans) if !scans.is_empty() => scans,
            _ => {
                let seeded = seed::seed_scans();
                self.write_json(KEY_SCANS, &seeded);
                seeded
            }
        }
    }

    pub fn set_scans(&mut self, scans: &[ScanMeta]) {
        self.write_json(KEY_SCANS, &scans);
    }

    /// Detail map keyed by scan id. Heals like [`SimStore::scans`].
    pub fn scan_details(&mut self) -> BTreeMap<String, ScanDetail> {
        match self.read_key::<BTreeMap<String, ScanDetail>>(KEY_SCAN_DETAILS) {
            Some(details) if !details.is_empty() => details,
            _ => {
                let seeded = seed::seed_scan_details();
                self.write_json(KEY_SCAN_DETAILS, &seeded);
                seeded
            }
        }
    }

    pub fn set_scan_details(&mut self, details: &BTreeMap<String, ScanDetail>) {
        self.write_json(KEY_SCAN_DETAILS, details);
    }

    /// Activity log. Heals like [`SimStore::scans`].
    pub fn timeline(&mut self) -> TimelineLog {
        match self.read_key::<TimelineLog>(KEY_TIMELINE) {
            Some(log) if !log.items.is_empty() => log,
            _ => {
                let seeded = seed::seed_timeline();
                self.write_json(KEY_TIMELINE, &seeded);
                seeded
            }
        }
    }

    pub fn set_timeline(&mut self, log: &TimelineLog) {
        self.write_json(KEY_TIMELINE, log);
    }

    fn read_key<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored state is corrupt; re-seeding");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.put_raw(key, &raw),
            Err(e) => warn!(key, error = %e, "state value not serializable; dropping write"),
        }
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        if let Some(value) = self.overlay.get(key) {
            return Some(value.clone());
        }
        let result = self
            .conn
            .query_row(
                "SELECT value FROM state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional();
        match result {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "state read failed");
                None
            }
        }
    }

    /// Last write wins, whole document per key, no cross-key transaction.
    fn put_raw(&mut self, key: &str, raw: &str) {
        let result = self.conn.execute(
            "INSERT OR REPLACE INTO state (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, raw, Utc::now().timestamp()],
        );
        match result {
            Ok(_) => {
                self.overlay.remove(key);
            }
            Err(e) => {
                warn!(key, error = %e, "state write failed; keeping value in memory only");
                self.overlay.insert(key.to_string(), raw.to_string());
            }
        }
    }
}
