use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{ProfileRecord, ScoreReport};

/// A record and its report, written side by side as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisExport {
    pub profile: ProfileRecord,
    pub analysis: ScoreReport,
    pub exported_at: DateTime<Utc>,
}

impl AnalysisExport {
    pub fn new(profile: ProfileRecord, analysis: ScoreReport) -> Self {
        Self { profile, analysis, exported_at: Utc::now() }
    }

    pub fn file_name(&self) -> String {
        export_file_name(self.profile.name.as_deref(), self.exported_at.timestamp_millis())
    }
}

/// `Jane Q Doe` at 1700000000000 -> `Jane_Q_Doe_analysis_1700000000000.json`.
pub fn export_file_name(name: Option<&str>, millis: i64) -> String {
    let stem = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.split_whitespace().collect::<Vec<_>>().join("_"),
        None => "profile".to_string(),
    };
    format!("{}_analysis_{}.json", stem, millis)
}

/// Write `export` as pretty JSON into `dir`, returning the file's path.
pub fn write_export(dir: &Path, export: &AnalysisExport) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(export.file_name());
    let json = serde_json::to_string_pretty(export).context("Failed to serialize analysis")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "exported analysis");
    Ok(path)
}

pub fn read_export(path: &Path) -> Result<AnalysisExport> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Not an analysis export: {}", path.display()))
}
