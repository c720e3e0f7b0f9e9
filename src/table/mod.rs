// src/table/mod.rs
pub mod coded;

pub use coded::CodedTable;

use anyhow::Result;
use csv::ReaderBuilder;
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, warn};

use crate::error::CoderError;

/// A survey export held in memory: header plus raw string cells.
#[derive(Debug, Clone)]
pub struct SurveyTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

/// One row of a [`SurveyTable`], addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a SurveyTable,
    position: usize,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// 0-based position of the row in the table.
    pub fn position(&self) -> usize {
        self.position
    }

    /// `None` when the table has no such column. A row shorter than the
    /// header reads as an empty cell for the trailing columns.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let i = *self.table.index.get(column)?;
        Some(self.cells.get(i).map(String::as_str).unwrap_or(""))
    }
}

impl SurveyTable {
    /// Build a table from an already-split header and rows.
    pub fn new(raw_headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = dedupe_headers(raw_headers);
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            headers,
            index,
            rows,
        }
    }

    /// Read the CSV at `path`. Any open or parse failure is a
    /// [`CoderError::MalformedTable`].
    #[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CoderError::MalformedTable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse CSV text from any reader; `source` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let malformed = |reason: String| CoderError::MalformedTable {
            path: source.to_path_buf(),
            reason,
        };

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let raw_headers: Vec<String> = rdr
            .headers()
            .map_err(|e| malformed(e.to_string()))?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();
        if raw_headers.is_empty() {
            return Err(malformed("missing header row".to_string()).into());
        }
        let width = raw_headers.len();

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| malformed(format!("record {}: {}", idx, e)))?;
            if record.len() > width {
                return Err(malformed(format!(
                    "record {} has {} fields, header has {}",
                    idx,
                    record.len(),
                    width
                ))
                .into());
            }
            if record.len() < width {
                warn!(
                    record = idx,
                    fields = record.len(),
                    expected = width,
                    "short record, trailing cells read as missing"
                );
            }
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let table = Self::new(raw_headers, rows);
        debug!(
            columns = table.headers.len(),
            rows = table.rows.len(),
            "loaded survey table"
        );
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().enumerate().map(move |(position, cells)| Row {
            table: self,
            position,
            cells,
        })
    }
}

/// Disambiguate repeated header names: the second `Q52` becomes `Q52.1`,
/// the third `Q52.2`, skipping any name that is already taken.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());
    for original in headers {
        let mut name = original;
        let mut cur = counts.get(&name).copied().unwrap_or(0);
        while cur > 0 {
            counts.insert(name.clone(), cur + 1);
            name = format!("{}.{}", name, cur);
            cur = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), cur + 1);
        out.push(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<SurveyTable> {
        SurveyTable::from_reader(Cursor::new(text.as_bytes()), Path::new("test.csv"))
    }

    #[test]
    fn reads_quoted_cells_and_looks_up_by_name() -> Result<()> {
        let table = parse("Q1,Q25\nyes,\"2,3\"\nno, 2 \n")?;
        assert_eq!(table.headers(), &["Q1", "Q25"]);
        assert_eq!(table.len(), 2);

        let rows: Vec<Row<'_>> = table.rows().collect();
        assert_eq!(rows[0].get("Q25"), Some("2,3"));
        assert_eq!(rows[1].get("Q25"), Some(" 2 "));
        assert_eq!(rows[1].position(), 1);
        assert_eq!(rows[0].get("Q99"), None);
        Ok(())
    }

    #[test]
    fn short_rows_read_as_empty_cells() -> Result<()> {
        let table = parse("Q1,Q2,Q3\na\n")?;
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("Q1"), Some("a"));
        assert_eq!(row.get("Q3"), Some(""));
        Ok(())
    }

    #[test]
    fn long_rows_are_malformed() {
        let err = parse("Q1\na,b\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoderError>(),
            Some(CoderError::MalformedTable { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"Q1\n\xff\xfe\n";
        let err = SurveyTable::from_reader(Cursor::new(bytes), Path::new("bad.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoderError>(),
            Some(CoderError::MalformedTable { .. })
        ));
    }

    #[test]
    fn missing_file_is_malformed() {
        let err = SurveyTable::load("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoderError>(),
            Some(CoderError::MalformedTable { .. })
        ));
    }

    #[test]
    fn strips_bom_from_first_header() -> Result<()> {
        let table = parse("\u{feff}Q1,Q2\nx,y\n")?;
        assert!(table.has_column("Q1"));
        Ok(())
    }

    #[test]
    fn duplicate_headers_get_numeric_suffixes() {
        let headers = ["Q52", "Q55", "Q52", "Q52", "Q55", "Q52.1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            dedupe_headers(headers),
            vec!["Q52", "Q55", "Q52.1", "Q52.2", "Q55.1", "Q52.1.1"]
        );
    }
}
