// src/preview.rs

use crate::table::CodedTable;

/// Fixed-width text of the header and the first `limit` rows, columns
/// right-aligned.
pub fn render(table: &CodedTable, limit: usize) -> String {
    if table.header.is_empty() {
        return "(no rows)\n".to_string();
    }
    let rows: Vec<&Vec<String>> = table.rows.iter().take(limit).collect();

    let widths: Vec<usize> = table
        .header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>width$}", c, width = *w))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&table.header));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn aligns_columns_and_limits_rows() {
        let table = CodedTable {
            header: strings(&["id", "group", "gain"]),
            rows: (0..8)
                .map(|i| strings(&[&i.to_string(), "Video", "-12"]))
                .collect(),
        };
        let text = render(&table, 5);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "id  group  gain");
        assert_eq!(lines[1], " 0  Video   -12");
        assert_eq!(lines[5], " 4  Video   -12");
    }

    #[test]
    fn empty_table() {
        let table = CodedTable {
            header: vec![],
            rows: vec![],
        };
        assert_eq!(render(&table, 5), "(no rows)\n");
    }
}
