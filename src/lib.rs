//! Profile page extraction and potential scoring.
//!
//! [`Extractor`] turns a parsed profile page into a [`ProfileRecord`];
//! [`Scorer`] turns that record into a [`ScoreReport`]. Both are pure. The
//! `store` and `export` modules persist their output.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod heuristics;
pub mod models;
pub mod score;
pub mod store;

pub use config::{Config, ExtractionConfig, ScoringConfig};
pub use error::{ExtractionError, ScoringError};
pub use extract::Extractor;
pub use models::{ProfileRecord, ScoreReport};
pub use score::Scorer;
