use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
}

/// Thresholds used while deriving flags and signals from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub about_min_length: usize,
    pub diverse_employer_min: usize, // more than this many employers
    pub multilingual_min: usize,     // more than this many languages
    pub continuous_learning_skill_min: usize,
    pub broad_skill_signal_min: usize,
    pub active_post_min: usize,
    pub top_skills: usize,
    pub post_excerpt_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            about_min_length: 50,
            diverse_employer_min: 2,
            multilingual_min: 1,
            continuous_learning_skill_min: 15,
            broad_skill_signal_min: 10,
            active_post_min: 2,
            top_skills: 5,
            post_excerpt_chars: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub findings_skill_min: usize,
    pub findings_about_min: usize,
    pub limited_skills_below: usize,
    pub frequent_changes_above: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            findings_skill_min: 10,
            findings_about_min: 200,
            limited_skills_below: 5,
            frequent_changes_above: 5,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the user config directory when a
    /// file exists there. Falls back to defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "scout")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"extraction": {{"active_post_min": 3}}}}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.extraction.active_post_min, 3);
        assert_eq!(config.extraction.about_min_length, 50);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }
}
