// src/score/mod.rs

use crate::{
    group::{AnswerKey, BackgroundField, GroupConfig},
    table::{Row, SurveyTable},
};

/// Cell texts treated as "no response".
const MISSING_MARKERS: [&str; 3] = ["", "nan", "NaN"];

/// Trimmed answer, or `None` for a non-response.
pub fn normalize_answer(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

/// Correctness flag for a single scored column on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub column: String,
    pub correct: bool,
}

impl Flag {
    pub fn value(&self) -> u32 {
        u32::from(self.correct)
    }
}

/// Flags emitted for one test phase and their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseScore {
    pub flags: Vec<Flag>,
    pub score: u32,
}

/// Score one phase of `row`. Absent columns and non-responses emit no flag.
/// Columns must have an answer key entry; [`GroupConfig::validate`] checks
/// that before scoring starts, and a column that slips through scores 0.
pub fn score_phase(row: &Row<'_>, columns: &[String], key: &AnswerKey) -> PhaseScore {
    let mut phase = PhaseScore::default();
    for col in columns {
        let raw = match row.get(col) {
            Some(raw) => raw,
            None => continue,
        };
        let answer = match normalize_answer(raw) {
            Some(a) => a,
            None => continue,
        };
        let correct = key.get(col).is_some_and(|expected| expected == answer);
        phase.score += u32::from(correct);
        phase.flags.push(Flag {
            column: col.clone(),
            correct,
        });
    }
    phase
}

/// One coded participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRecord {
    pub id: usize,
    pub group: String,
    /// `(semantic name, raw value)` in background mapping order.
    pub background: Vec<(String, String)>,
    pub pre: PhaseScore,
    pub post: PhaseScore,
}

impl ParticipantRecord {
    pub fn pre_score(&self) -> u32 {
        self.pre.score
    }

    pub fn post_score(&self) -> u32 {
        self.post.score
    }

    pub fn gain(&self) -> i64 {
        i64::from(self.post.score) - i64::from(self.pre.score)
    }

    /// Output fields in column order: id, group, background, pre flags,
    /// pre_score, post flags, post_score, gain.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(
            self.background.len() + self.pre.flags.len() + self.post.flags.len() + 5,
        );
        out.push(("id".to_string(), self.id.to_string()));
        out.push(("group".to_string(), self.group.clone()));
        out.extend(self.background.iter().cloned());
        for flag in &self.pre.flags {
            out.push((flag.column.clone(), flag.value().to_string()));
        }
        out.push(("pre_score".to_string(), self.pre_score().to_string()));
        for flag in &self.post.flags {
            out.push((flag.column.clone(), flag.value().to_string()));
        }
        out.push(("post_score".to_string(), self.post_score().to_string()));
        out.push(("gain".to_string(), self.gain().to_string()));
        out
    }
}

/// Copy the background columns present in the table, unchanged.
pub fn extract_background(row: &Row<'_>, mapping: &[BackgroundField]) -> Vec<(String, String)> {
    mapping
        .iter()
        .filter_map(|bg| {
            row.get(&bg.source)
                .map(|value| (bg.field.clone(), value.to_string()))
        })
        .collect()
}

pub fn score_row(
    row: &Row<'_>,
    group: &GroupConfig,
    background: &[BackgroundField],
) -> ParticipantRecord {
    ParticipantRecord {
        id: row.position(),
        group: group.label.clone(),
        background: extract_background(row, background),
        pre: score_phase(row, &group.pre, &group.answers),
        post: score_phase(row, &group.post, &group.answers),
    }
}

pub fn score_table(
    table: &SurveyTable,
    group: &GroupConfig,
    background: &[BackgroundField],
) -> Vec<ParticipantRecord> {
    table
        .rows()
        .map(|row| score_row(&row, group, background))
        .collect()
}
