//! Error type shared by the input, scenario and report layers
//!
//! The calculation engine itself is infallible; only the collaborators that
//! touch files or validate user input return these errors.

use std::fmt;
use thiserror::Error;

/// A single failed input check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationIssue {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid inputs: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("scenario name must not be blank")]
    InvalidScenarioName,

    #[error("parse error: {0}")]
    Parse(String),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, SimError>;
