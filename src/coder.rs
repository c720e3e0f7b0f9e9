// src/coder.rs

use anyhow::Result;
use std::{path::PathBuf, time::Instant};
use tracing::{debug, info};

use crate::{
    config::Config,
    discover,
    group::GroupSet,
    score::{self, ParticipantRecord},
    table::{CodedTable, SurveyTable},
};

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub group: String,
    pub records: Vec<ParticipantRecord>,
    pub table: CodedTable,
}

/// locate input → load table → select group → score rows → write output.
/// Nothing is written unless every earlier step succeeded.
pub fn run(config: &Config) -> Result<RunSummary> {
    let groups = config.group_set()?;
    run_with_groups(config, &groups)
}

pub fn run_with_groups(config: &Config, groups: &GroupSet) -> Result<RunSummary> {
    let start = Instant::now();
    groups.validate()?;

    let input = discover::find_input(&config.dir)?;
    info!(input = %input.display(), "found survey export");

    let table = SurveyTable::load(&input)?;
    info!(
        rows = table.len(),
        columns = table.headers().len(),
        "loaded survey table"
    );

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let group = groups.classify(&file_name)?;
    info!(group = %group.label, "selected group");

    let missing: Vec<&String> = group
        .pre
        .iter()
        .chain(group.post.iter())
        .filter(|c| !table.has_column(c))
        .collect();
    if !missing.is_empty() {
        debug!(?missing, "scored columns absent from table");
    }

    let records = score::score_table(&table, group, &groups.background);
    for rec in &records {
        debug!(
            id = rec.id,
            pre = rec.pre_score(),
            post = rec.post_score(),
            gain = rec.gain(),
            "scored participant"
        );
    }

    let coded = CodedTable::from_records(&records);
    let output = discover::output_path_for(&input);
    coded.write(&output)?;

    info!(
        participants = records.len(),
        elapsed = ?start.elapsed(),
        "coding complete"
    );

    Ok(RunSummary {
        input,
        output,
        group: group.label.clone(),
        records,
        table: coded,
    })
}
