// src/config.rs

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::group::{GroupSet, BUILTIN_GROUPS};

/// Score a survey export's pre/post tests and write coded_results.csv
/// next to it.
#[derive(Parser, Debug, Clone)]
#[command(name = "surveycoder", version)]
pub struct Config {
    /// Directory holding exactly one raw survey CSV.
    #[arg(long, env = "SURVEYCODER_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// YAML file describing groups, columns and answer keys. Built-in VR and
    /// Video groups are used when omitted.
    #[arg(long, env = "SURVEYCODER_GROUPS")]
    pub groups: Option<PathBuf>,

    /// Rows shown in the console preview.
    #[arg(long, env = "SURVEYCODER_PREVIEW", default_value_t = 5)]
    pub preview: usize,

    /// Default tracing directive; RUST_LOG takes precedence.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Config for coding `dir` with the built-in groups.
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            groups: None,
            preview: 5,
            log_level: "info".to_string(),
        }
    }

    pub fn group_set(&self) -> Result<GroupSet> {
        match &self.groups {
            Some(path) => GroupSet::load(path),
            None => Ok((*BUILTIN_GROUPS).clone()),
        }
    }
}
