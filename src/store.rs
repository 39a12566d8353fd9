use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

use crate::models::ProfileRecord;

const LAST_ANALYSIS_KEY: &str = "last_analysis";

/// A profile record as it was saved, with the time it was saved.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedProfile {
    pub record: ProfileRecord,
    pub saved_at: DateTime<Utc>,
}

pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::default_path())
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(Self { conn, path: path.to_path_buf() })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_path() -> PathBuf {
        match directories::ProjectDirs::from("", "", "scout") {
            Some(dirs) => dirs.data_dir().join("scout.db"),
            None => PathBuf::from("scout.db"),
        }
    }

    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        let tables: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='kv'",
            [],
            |row| row.get(0),
        )?;
        if tables == 0 {
            return Err(anyhow!("Store not initialized. Run 'scout init' first."));
        }
        Ok(())
    }

    /// Replace the last saved analysis with `record`.
    pub fn save_last(&self, record: &ProfileRecord) -> Result<SavedProfile> {
        let value = serde_json::to_string(record).context("Failed to serialize profile")?;
        let saved_at = Utc::now();
        self.conn.execute(
            "INSERT INTO kv (key, value, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, saved_at = excluded.saved_at",
            params![LAST_ANALYSIS_KEY, value, saved_at.to_rfc3339()],
        )?;
        tracing::debug!(name = ?record.name, "saved last analysis");
        Ok(SavedProfile { record: record.clone(), saved_at })
    }

    pub fn load_last(&self) -> Result<Option<SavedProfile>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT value, saved_at FROM kv WHERE key = ?1",
                [LAST_ANALYSIS_KEY],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((value, saved_at)) = row else {
            return Ok(None);
        };
        let record = serde_json::from_str(&value).context("Stored profile is not valid JSON")?;
        let saved_at = DateTime::parse_from_rfc3339(&saved_at)
            .with_context(|| format!("Bad timestamp in store: {}", saved_at))?
            .with_timezone(&Utc);
        Ok(Some(SavedProfile { record, saved_at }))
    }
}
