// src/group/types.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Survey column → answer counted as correct.
pub type AnswerKey = BTreeMap<String, String>;

/// One experimental condition and how its answers are scored.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct GroupConfig {
    pub label: String,
    /// Case-sensitive substring of the input file name that selects this
    /// group. A group without a marker is the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    /// Pre-test columns, positionally paired with `post`.
    pub pre: Vec<String>,
    pub post: Vec<String>,
    pub answers: AnswerKey,
}

/// Background question copied through under a readable name.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct BackgroundField {
    pub source: String,
    pub field: String,
}

/// Everything a run needs to classify and score an export.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct GroupSet {
    #[serde(default)]
    pub background: Vec<BackgroundField>,
    pub groups: Vec<GroupConfig>,
}
