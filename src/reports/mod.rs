//! Printable statement reports.
//!
//! Builders turn a statement into a [`Report`], a layout-neutral model of header
//! lines and blocks. A [`ReportWriter`] renders that model: [`PdfWriter`] for
//! exported documents and [`TextWriter`] for terminal previews.

pub mod builders;
pub mod pdf;
pub mod text;

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::{
    errors::{BookError, Result},
    ledger::StatementKind,
    utils::{paths::file_stem_for, persistence::write_atomic},
};

pub use builders::{balance_sheet_report, income_statement_report};
pub use pdf::PdfWriter;
pub use text::TextWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Title line drawn above the first block.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLine {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub align: Align,
}

impl HeaderLine {
    pub fn new(text: impl Into<String>, size: f32, bold: bool, align: Align) -> Self {
        Self {
            text: text.into(),
            size,
            bold,
            align,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: String,
    /// Width in points.
    pub width: f32,
    pub align: Align,
}

impl Column {
    pub fn new(title: impl Into<String>, width: f32, align: Align) -> Self {
        Self {
            title: title.into(),
            width,
            align,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    /// Section heading such as "CURRENT ASSETS".
    Section,
    Item,
    Subtotal,
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub style: RowStyle,
}

impl Row {
    pub fn new(style: RowStyle, cells: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    /// Draw the column titles as a header row.
    pub show_header: bool,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Table(Table),
    /// Vertical gap in points.
    Spacer(f32),
    /// Single line of text, e.g. a closing total.
    Line { text: String, bold: bool },
    /// Signature lines laid out side by side.
    Signatures(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Document title recorded in the output metadata.
    pub title: String,
    pub header: Vec<HeaderLine>,
    pub blocks: Vec<Block>,
}

/// Renders a [`Report`] into some output format.
pub trait ReportWriter {
    fn write(&self, report: &Report, out: &mut dyn Write) -> Result<()>;
    /// File extension for the format, without the dot.
    fn extension(&self) -> &'static str;
}

/// Renders `report` to memory and writes it to `destination`.
///
/// `None` means the user cancelled the save prompt: nothing is written and
/// `Ok(None)` is returned. An existing file is replaced atomically.
pub fn export(
    report: &Report,
    writer: &dyn ReportWriter,
    destination: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let Some(path) = destination else {
        tracing::info!(title = %report.title, "export cancelled");
        return Ok(None);
    };
    let mut buffer = Vec::new();
    writer.write(report, &mut buffer)?;
    write_atomic(path, &buffer).map_err(|err| {
        BookError::Report(format!("cannot write `{}`: {}", path.display(), err))
    })?;
    tracing::info!(path = %path.display(), bytes = buffer.len(), "report exported");
    Ok(Some(path.to_path_buf()))
}

/// Default export name, e.g. `Balance_Sheet_Acme_31_12_2024.pdf`.
pub fn suggested_file_name(
    kind: StatementKind,
    company: &str,
    date: NaiveDate,
    extension: &str,
) -> String {
    let (prefix, date) = match kind {
        StatementKind::BalanceSheet => ("Balance_Sheet", date.format("%d_%m_%Y").to_string()),
        StatementKind::IncomeStatement => {
            ("Income_Statement", date.format("%Y_%m_%d").to_string())
        }
    };
    format!("{prefix}_{}_{date}.{extension}", file_stem_for(company))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Report {
        Report {
            title: "Sample".into(),
            header: vec![HeaderLine::new("Sample", 12.0, true, Align::Center)],
            blocks: vec![Block::Line {
                text: "Net Profit: $1.00".into(),
                bold: true,
            }],
        }
    }

    #[test]
    fn cancelled_export_writes_nothing() {
        let result = export(&sample(), &TextWriter, None).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn export_writes_rendered_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("report.txt");
        let written = export(&sample(), &TextWriter, Some(&path)).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Net Profit: $1.00"));
    }

    #[test]
    fn suggested_names_follow_statement_kind() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(
            suggested_file_name(StatementKind::BalanceSheet, "Acme Corp", date, "pdf"),
            "Balance_Sheet_Acme_Corp_31_12_2024.pdf"
        );
        assert_eq!(
            suggested_file_name(StatementKind::IncomeStatement, "Acme", date, "pdf"),
            "Income_Statement_Acme_2024_12_31.pdf"
        );
    }
}
