use std::io::Write;

use crate::errors::{BookError, Result};

use super::{Align, Block, Report, ReportWriter, RowStyle, Table};

const PAGE_COLUMNS: usize = 78;
/// Points per character when mapping column widths to monospace cells.
const POINTS_PER_CHAR: f32 = 6.0;

fn pad(text: &str, width: usize, align: Align) -> String {
    let mut text: String = text.chars().take(width).collect();
    let len = text.chars().count();
    let gap = width - len;
    match align {
        Align::Left => {
            text.push_str(&" ".repeat(gap));
            text
        }
        Align::Right => format!("{}{}", " ".repeat(gap), text),
        Align::Center => {
            let left = gap / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
        }
    }
}

fn write_row<'a>(
    cells: impl Iterator<Item = (&'a str, Align)>,
    widths: &[usize],
    out: &mut String,
) {
    let row: Vec<String> = cells
        .zip(widths)
        .map(|((text, align), width)| pad(text, *width, align))
        .collect();
    out.push_str(row.join(" ").trim_end());
    out.push('\n');
}

fn render_table(table: &Table, out: &mut String) {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .map(|column| ((column.width / POINTS_PER_CHAR).round() as usize).max(4))
        .collect();
    let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);

    if table.show_header {
        write_row(
            table.columns.iter().map(|c| (c.title.as_str(), c.align)),
            &widths,
            out,
        );
        out.push_str(&"=".repeat(total));
        out.push('\n');
    }
    for row in &table.rows {
        if row.style == RowStyle::Total {
            out.push_str(&"-".repeat(total));
            out.push('\n');
        }
        write_row(
            row.cells
                .iter()
                .zip(&table.columns)
                .map(|(cell, column)| (cell.as_str(), column.align)),
            &widths,
            out,
        );
    }
}

/// Plain-text rendering used for terminal previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWriter;

impl TextWriter {
    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();
        for line in &report.header {
            out.push_str(pad(&line.text, PAGE_COLUMNS, line.align).trim_end());
            out.push('\n');
        }
        for block in &report.blocks {
            match block {
                Block::Table(table) => render_table(table, &mut out),
                Block::Spacer(_) => out.push('\n'),
                Block::Line { text, .. } => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Signatures(names) => {
                    let width = PAGE_COLUMNS / names.len().max(1);
                    let rules: String = names
                        .iter()
                        .map(|_| pad("____________________", width, Align::Center))
                        .collect();
                    let labels: String = names
                        .iter()
                        .map(|name| pad(name, width, Align::Center))
                        .collect();
                    out.push_str(rules.trim_end());
                    out.push('\n');
                    out.push_str(labels.trim_end());
                    out.push('\n');
                }
            }
        }
        out
    }
}

impl ReportWriter for TextWriter {
    fn write(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        out.write_all(self.render(report).as_bytes())
            .map_err(|err| BookError::Report(err.to_string()))
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{Column, HeaderLine, Row};

    #[test]
    fn pad_respects_alignment() {
        assert_eq!(pad("ab", 5, Align::Left), "ab   ");
        assert_eq!(pad("ab", 5, Align::Right), "   ab");
        assert_eq!(pad("ab", 6, Align::Center), "  ab  ");
        assert_eq!(pad("abcdef", 3, Align::Left), "abc");
    }

    #[test]
    fn tables_render_with_rules_before_totals() {
        let report = Report {
            title: "t".into(),
            header: vec![HeaderLine::new("ACME", 16.0, true, Align::Center)],
            blocks: vec![Block::Table(Table {
                columns: vec![
                    Column::new("ASSETS", 120.0, Align::Left),
                    Column::new("Amount", 60.0, Align::Right),
                ],
                show_header: true,
                rows: vec![
                    Row::new(RowStyle::Item, ["    Cash", "$100.00"]),
                    Row::new(RowStyle::Total, ["TOTAL ASSETS", "$100.00"]),
                ],
            })],
        };
        let text = TextWriter.render(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "ACME");
        assert_eq!(lines[1], "ASSETS                   Amount");
        assert!(lines[2].chars().all(|c| c == '='));
        assert_eq!(lines[3], "    Cash                $100.00");
        assert!(lines[4].chars().all(|c| c == '-'));
        assert_eq!(lines[5], "TOTAL ASSETS            $100.00");
    }
}
