// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions of a coding run. None of them is retried; the operator
/// fixes the directory or the group file and runs again.
#[derive(Debug, Error)]
pub enum CoderError {
    #[error("No valid raw CSV file found in {dir:?}")]
    InputNotFound { dir: PathBuf },

    #[error("More than one CSV found in {dir:?} ({}); keep only one input CSV in the folder", .candidates.join(", "))]
    AmbiguousInput {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("Malformed table {path:?}: {reason}")]
    MalformedTable { path: PathBuf, reason: String },

    #[error("Group {group}: column {column} has no answer key entry")]
    MissingAnswerKey { group: String, column: String },

    #[error("Invalid group configuration: {reason}")]
    InvalidGroups { reason: String },

    #[error("No group matches file name {file_name:?} and no fallback group is configured")]
    NoMatchingGroup { file_name: String },
}
