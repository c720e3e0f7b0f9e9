// src/table/coded.rs

use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::score::ParticipantRecord;

/// Coded results laid out as a rectangle. The header is the union of all
/// record fields in order of first appearance; fields a record did not
/// emit are empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CodedTable {
    pub fn from_records(records: &[ParticipantRecord]) -> Self {
        let per_record: Vec<Vec<(String, String)>> =
            records.iter().map(ParticipantRecord::fields).collect();

        let mut header: Vec<String> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();
        for fields in &per_record {
            for (name, _) in fields {
                if !position.contains_key(name) {
                    position.insert(name.clone(), header.len());
                    header.push(name.clone());
                }
            }
        }

        let rows = per_record
            .into_iter()
            .map(|fields| {
                let mut row = vec![String::new(); header.len()];
                for (name, value) in fields {
                    row[position[&name]] = value;
                }
                row
            })
            .collect();

        Self { header, rows }
    }

    /// Serialize as CSV into any writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        if self.header.is_empty() {
            return Ok(());
        }
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.header)
            .context("writing coded header")?;
        for (i, row) in self.rows.iter().enumerate() {
            wtr.write_record(row)
                .with_context(|| format!("writing coded row {}", i))?;
        }
        wtr.flush().context("flushing coded results")?;
        Ok(())
    }

    /// Write to `path`, replacing any existing file. The data goes to a
    /// hidden temp file first and is renamed over the target.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "coded_results.csv".to_string());
        let tmp_path: PathBuf = dir.join(format!(".{}.tmp", file_name));

        let file = fs::File::create(&tmp_path)
            .with_context(|| format!("creating {:?}", tmp_path))?;
        if let Err(e) = self.write_to(file) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path));
        }

        info!(path = %path.display(), rows = self.rows.len(), "wrote coded results");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{Flag, PhaseScore};
    use tempfile::tempdir;

    fn record(id: usize, pre: &[(&str, bool)], post: &[(&str, bool)]) -> ParticipantRecord {
        let phase = |flags: &[(&str, bool)]| PhaseScore {
            flags: flags
                .iter()
                .map(|(c, ok)| Flag {
                    column: c.to_string(),
                    correct: *ok,
                })
                .collect(),
            score: flags.iter().filter(|(_, ok)| *ok).count() as u32,
        };
        ParticipantRecord {
            id,
            group: "VR".to_string(),
            background: vec![],
            pre: phase(pre),
            post: phase(post),
        }
    }

    #[test]
    fn header_is_union_in_first_appearance_order() {
        let recs = vec![
            record(0, &[("Q16", true)], &[]),
            record(1, &[("Q16", false), ("Q17", true)], &[("Q87", true)]),
        ];
        let table = CodedTable::from_records(&recs);
        assert_eq!(
            table.header,
            vec!["id", "group", "Q16", "pre_score", "post_score", "gain", "Q17", "Q87"]
        );
        assert_eq!(table.rows[0], vec!["0", "VR", "1", "1", "0", "-1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "VR", "0", "1", "1", "0", "1", "1"]);
    }

    #[test]
    fn pre_score_sits_between_pre_and_post_flags() {
        let table = CodedTable::from_records(&[record(0, &[("Q16", true)], &[("Q87", false)])]);
        assert_eq!(
            table.header,
            vec!["id", "group", "Q16", "pre_score", "Q87", "post_score", "gain"]
        );
        assert_eq!(table.rows[0], vec!["0", "VR", "1", "1", "0", "0", "-1"]);
    }

    #[test]
    fn no_records_writes_nothing() -> Result<()> {
        let table = CodedTable::from_records(&[]);
        assert!(table.header.is_empty());
        let mut buf = Vec::new();
        table.write_to(&mut buf)?;
        assert!(buf.is_empty());
        Ok(())
    }

    #[test]
    fn write_replaces_existing_file_and_leaves_no_temp() -> Result<()> {
        let tmp = tempdir()?;
        let out = tmp.path().join("coded_results.csv");
        fs::write(&out, "stale")?;

        let table = CodedTable::from_records(&[record(0, &[("Q16", true)], &[])]);
        table.write(&out)?;

        let text = fs::read_to_string(&out)?;
        assert_eq!(
            text,
            "id,group,Q16,pre_score,post_score,gain\n0,VR,1,1,0,-1\n"
        );
        let leftovers: Vec<_> = fs::read_dir(tmp.path())?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
        Ok(())
    }

    #[test]
    fn failed_rename_removes_temp_file() -> Result<()> {
        let tmp = tempdir()?;
        // a non-empty directory in the way makes the rename fail
        let out = tmp.path().join("coded_results.csv");
        fs::create_dir(&out)?;
        fs::write(out.join("keep.txt"), "x")?;

        let table = CodedTable::from_records(&[record(0, &[("Q16", true)], &[])]);
        assert!(table.write(&out).is_err());

        assert!(!tmp.path().join(".coded_results.csv.tmp").exists());
        assert!(out.is_dir());
        Ok(())
    }
}
