// src/group/mod.rs
pub mod builtin;
pub mod types;

pub use builtin::BUILTIN_GROUPS;
pub use types::{AnswerKey, BackgroundField, GroupConfig, GroupSet};

use anyhow::{Context, Result};
use std::{collections::HashSet, fs, path::Path};
use tracing::{debug, info};

use crate::error::CoderError;

impl GroupConfig {
    /// Every scored column must have an expected answer.
    pub fn validate(&self) -> Result<(), CoderError> {
        for col in self.pre.iter().chain(self.post.iter()) {
            if !self.answers.contains_key(col) {
                return Err(CoderError::MissingAnswerKey {
                    group: self.label.clone(),
                    column: col.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn is_fallback(&self) -> bool {
        self.marker.is_none()
    }
}

impl GroupSet {
    /// Parse and validate a YAML group file.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let set: GroupSet = serde_yaml::from_str(text).context("parsing group YAML")?;
        set.validate()?;
        Ok(set)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading group file {:?}", path))?;
        let set = Self::from_yaml_str(&text).with_context(|| format!("loading {:?}", path))?;
        info!(path = %path.display(), groups = set.groups.len(), "loaded group file");
        Ok(set)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serializing groups to YAML")
    }

    pub fn validate(&self) -> Result<(), CoderError> {
        let invalid = |reason: String| CoderError::InvalidGroups { reason };

        if self.groups.is_empty() {
            return Err(invalid("no groups defined".to_string()));
        }
        let mut labels = HashSet::new();
        for g in &self.groups {
            if !labels.insert(g.label.as_str()) {
                return Err(invalid(format!("duplicate group label {:?}", g.label)));
            }
            if matches!(g.marker.as_deref(), Some("")) {
                return Err(invalid(format!("group {:?} has an empty marker", g.label)));
            }
            g.validate()?;
        }
        let fallbacks = self.groups.iter().filter(|g| g.is_fallback()).count();
        if fallbacks > 1 {
            return Err(invalid(format!(
                "{} groups without a marker, at most one fallback is allowed",
                fallbacks
            )));
        }
        Ok(())
    }

    /// First group whose marker occurs in `file_name`, else the fallback.
    pub fn classify(&self, file_name: &str) -> Result<&GroupConfig, CoderError> {
        let matched = self
            .groups
            .iter()
            .find(|g| matches!(g.marker.as_deref(), Some(m) if file_name.contains(m)))
            .or_else(|| self.groups.iter().find(|g| g.is_fallback()));

        match matched {
            Some(g) => {
                debug!(file_name, group = %g.label, "classified input");
                Ok(g)
            }
            None => Err(CoderError::NoMatchingGroup {
                file_name: file_name.to_string(),
            }),
        }
    }
}
