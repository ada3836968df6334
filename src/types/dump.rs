use serde::Serialize;

use crate::db::{QueryResult, Value};

/// A titled set of rows, printed as an aligned grid.
///
/// The grid mimics a data frame print: a leading row index, then every
/// column right-aligned to its widest cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableDump {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TableDump {
    pub fn new(title: impl Into<String>, result: QueryResult) -> Self {
        Self {
            title: title.into(),
            headers: result.headers,
            rows: result.rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of one column by header name (case-insensitive).
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self
            .headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }

    /// Render the rows as an aligned grid without the title.
    pub fn render_grid(&self) -> String {
        if self.rows.is_empty() {
            return format!("Empty table\nColumns: [{}]", self.headers.join(", "));
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();

        let index_width = (self.rows.len() - 1).to_string().len();
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(cells.len() + 1);
        let mut header = " ".repeat(index_width);
        for (h, width) in self.headers.iter().zip(&widths) {
            header.push_str(&format!("  {:>width$}", h, width = width));
        }
        lines.push(header);

        for (row_idx, row) in cells.iter().enumerate() {
            let mut line = format!("{:<width$}", row_idx, width = index_width);
            for (cell, width) in row.iter().zip(&widths) {
                line.push_str(&format!("  {:>width$}", cell, width = width));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions() -> TableDump {
        TableDump {
            title: "Position".to_string(),
            headers: vec!["positionNo".to_string(), "salary".to_string()],
            rows: vec![
                vec![Value::from("J00001"), Value::Real(120000.0)],
                vec![Value::from("J00005"), Value::Real(40000.0)],
            ],
        }
    }

    #[test]
    fn test_render_grid_aligns_columns() {
        let expected = "   positionNo    salary\n\
                        0      J00001  120000.0\n\
                        1      J00005   40000.0";
        assert_eq!(positions().render_grid(), expected);
    }

    #[test]
    fn test_render_grid_empty() {
        let dump = TableDump {
            title: "Pet".to_string(),
            headers: vec!["petNo".to_string()],
            rows: vec![],
        };
        assert_eq!(dump.render_grid(), "Empty table\nColumns: [petNo]");
    }

    #[test]
    fn test_column_lookup() {
        let dump = positions();
        let ids: Vec<_> = dump
            .column("POSITIONNO")
            .unwrap()
            .into_iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(ids, vec!["J00001", "J00005"]);
        assert!(dump.column("missing").is_none());
    }

    #[test]
    fn test_new_from_query_result() {
        let result = QueryResult {
            headers: vec!["petCounter".to_string()],
            rows: vec![vec![Value::Integer(2)]],
        };
        let dump = TableDump::new("Pets per clinic", result);
        assert_eq!(dump.row_count(), 1);
        assert_eq!(dump.title, "Pets per clinic");
    }
}
