//! Header and table recognition.
//!
//! Headers are recognized line by line. Tables are recognized as a unit: a
//! header row, a separator row and at least one data row, all consecutive.
//! Each table is emitted on a single output line so the list stage sees it as
//! one plain line.

use crate::backend::{Alignment, RenderBackend};
use crate::line::{Line, is_table_row};

/// Transform headers and tables in `text`, leaving every other line untouched.
pub(crate) fn transform_blocks<B: RenderBackend>(text: &str, warnings: &mut Vec<String>) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut output = String::with_capacity(text.len());
    let mut idx = 0;

    while idx < lines.len() {
        if idx > 0 {
            output.push('\n');
        }

        match Line::classify(lines[idx]) {
            Line::Header { level, text } => {
                B::heading(level, text, &mut output);
                idx += 1;
            }
            Line::TableRow(header) => {
                if let Some(table) = Table::parse(header, &lines[idx + 1..]) {
                    table.render::<B>(&mut output);
                    idx += table.line_count();
                } else {
                    if lines.get(idx + 1).is_some_and(|l| parse_separator(l.trim()).is_some()) {
                        tracing::debug!(line = idx + 1, "Table without data rows, keeping as text");
                        warnings.push(format!(
                            "line {}: table has no data rows, rendered as text",
                            idx + 1
                        ));
                    }
                    output.push_str(lines[idx]);
                    idx += 1;
                }
            }
            Line::ListItem(_) | Line::Blank | Line::Plain(_) => {
                output.push_str(lines[idx]);
                idx += 1;
            }
        }
    }

    output
}

/// A recognized table.
#[derive(Debug, PartialEq, Eq)]
struct Table<'a> {
    header: Vec<&'a str>,
    alignments: Vec<Alignment>,
    rows: Vec<Vec<&'a str>>,
}

impl<'a> Table<'a> {
    /// Parse a table whose header row is `header` and whose remaining rows
    /// start at `following[0]`.
    fn parse(header: &'a str, following: &[&'a str]) -> Option<Self> {
        let alignments = parse_separator(following.first()?.trim())?;
        let rows: Vec<Vec<&str>> = following[1..]
            .iter()
            .map(|line| line.trim())
            .take_while(|line| is_table_row(line))
            .map(split_cells)
            .collect();
        if rows.is_empty() {
            return None;
        }

        Some(Self {
            header: split_cells(header),
            alignments,
            rows,
        })
    }

    /// Number of source lines consumed, including the separator row.
    fn line_count(&self) -> usize {
        self.rows.len() + 2
    }

    fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    fn render<B: RenderBackend>(&self, out: &mut String) {
        B::table_start(out);

        B::table_head_start(out);
        B::table_row_start(out);
        for (column, cell) in self.header.iter().enumerate() {
            B::table_cell(true, self.alignment(column), cell, out);
        }
        B::table_row_end(out);
        B::table_head_end(out);

        B::table_body_start(out);
        for row in &self.rows {
            B::table_row_start(out);
            for (column, cell) in row.iter().enumerate() {
                B::table_cell(false, self.alignment(column), cell, out);
            }
            B::table_row_end(out);
        }
        B::table_body_end(out);

        B::table_end(out);
    }
}

/// Split a trimmed row into trimmed cells.
///
/// Only the empty cells produced by the leading and trailing `|` are dropped.
fn split_cells(row: &str) -> Vec<&str> {
    let inner = row.strip_prefix('|').unwrap_or(row);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

/// Parse a separator row such as `|:---|:-:|--:|` into column alignments.
fn parse_separator(trimmed: &str) -> Option<Vec<Alignment>> {
    if !is_table_row(trimmed) {
        return None;
    }
    split_cells(trimmed)
        .into_iter()
        .map(|cell| {
            let dashes = cell.trim_start_matches(':').trim_end_matches(':');
            if dashes.is_empty() || !dashes.bytes().all(|b| b == b'-') {
                return None;
            }
            Some(match (cell.starts_with(':'), cell.ends_with(':')) {
                (true, true) => Alignment::Center,
                (true, false) => Alignment::Left,
                (false, true) => Alignment::Right,
                (false, false) => Alignment::None,
            })
        })
        .collect()
}
