// src/discover/mod.rs

use anyhow::{Context, Result};
use glob::{glob_with, MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CoderError;

/// Name prefix reserved for files this tool writes.
pub const OUTPUT_PREFIX: &str = "coded_";

/// Fixed name of the coded results file.
pub const OUTPUT_FILE_NAME: &str = "coded_results.csv";

/// List every `*.csv` directly inside `dir` that is not a previous output.
/// Hidden files are not candidates. Sorted by file name so error messages
/// are stable.
pub fn list_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.csv", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let mut out = Vec::new();
    let entries =
        glob_with(&pattern, options).context("invalid glob pattern for input discovery")?;
    for entry in entries {
        let path = entry.with_context(|| format!("reading entry in {:?}", dir))?;
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        if name.starts_with(OUTPUT_PREFIX) {
            debug!(file = name, "skipping previous output");
            continue;
        }
        out.push(path);
    }
    out.sort();
    Ok(out)
}

/// Locate the single raw survey export in `dir`.
pub fn find_input(dir: &Path) -> Result<PathBuf> {
    let mut candidates = list_candidates(dir)?;
    match candidates.len() {
        0 => Err(CoderError::InputNotFound {
            dir: dir.to_path_buf(),
        }
        .into()),
        1 => Ok(candidates.remove(0)),
        _ => Err(CoderError::AmbiguousInput {
            dir: dir.to_path_buf(),
            candidates: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }
        .into()),
    }
}

/// Output path for a given input: same directory, fixed name.
pub fn output_path_for(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(OUTPUT_FILE_NAME)
}
