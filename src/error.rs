use thiserror::Error;

/// The input could not be treated as a profile document at all.
///
/// Missing sections or fields are never reported here; they simply leave
/// the corresponding record fields empty.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("document is empty")]
    EmptyInput,

    #[error("input contains no markup")]
    NotMarkup,

    #[error("input is an HTML fragment, not a document")]
    Fragment,
}

/// A profile record violated its own invariants and cannot be scored.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("total experience years must be a finite non-negative number, got {0}")]
    InvalidExperienceYears(f64),

    #[error("{field} is {declared} but {actual} entries are present")]
    InconsistentCount {
        field: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("{count} top skills listed, at most {limit} allowed")]
    TooManyTopSkills { count: usize, limit: usize },
}
