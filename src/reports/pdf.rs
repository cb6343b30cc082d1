//! Minimal PDF 1.4 writer for [`Report`]s.
//!
//! Output uses the two standard Helvetica faces, so no fonts are embedded. Text is
//! encoded as WinAnsi; characters outside Latin-1 print as `?`.

use std::io::Write;

use crate::errors::{BookError, Result};

use super::{Align, Block, Report, ReportWriter, Row, RowStyle, Table};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const ROW_HEIGHT: f32 = 14.0;
const HEADER_ROW_HEIGHT: f32 = 24.0;
const TOTAL_PADDING: f32 = 12.0;
const CELL_PADDING: f32 = 6.0;
const BODY_SIZE: f32 = 10.0;
const LINE_SIZE: f32 = 12.0;
const FOOTER_Y: f32 = 40.0;
const SIGNATURE_WIDTH: f32 = 180.0;
const SIGNATURE_RULE: &str = "_______________________";

/// Glyph widths (1/1000 em) for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

/// Width of `text` in points at `size`.
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let table = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };
    let units: u32 = text
        .chars()
        .map(|ch| match ch as u32 {
            code @ 32..=126 => u32::from(table[(code - 32) as usize]),
            _ => u32::from(FALLBACK_WIDTH),
        })
        .sum();
    units as f32 * size / 1000.0
}

/// Shortens `text` with a trailing `...` until it fits in `max` points.
fn fit_text(text: &str, size: f32, bold: bool, max: f32) -> String {
    if text_width(text, size, bold) <= max {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if text_width(&candidate, size, bold) <= max {
            return candidate;
        }
    }
    String::new()
}

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
    },
}

/// Places report elements top to bottom, opening a new page when one fills.
struct Layout {
    pages: Vec<Vec<Op>>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn ops(&mut self) -> &mut Vec<Op> {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Starts a new page unless `height` still fits above the bottom margin.
    /// Returns `true` when a page break happened.
    fn reserve(&mut self, height: f32) -> bool {
        if self.y - height >= MARGIN {
            return false;
        }
        self.pages.push(Vec::new());
        self.y = PAGE_HEIGHT - MARGIN;
        true
    }

    fn text(&mut self, x: f32, size: f32, bold: bool, text: String) {
        let y = self.y;
        if !text.is_empty() {
            self.ops().push(Op::Text {
                x,
                y,
                size,
                bold,
                text,
            });
        }
    }

    fn aligned_text(&mut self, left: f32, width: f32, align: Align, size: f32, bold: bool, text: &str) {
        let fitted = fit_text(text, size, bold, width);
        let used = text_width(&fitted, size, bold);
        let x = match align {
            Align::Left => left,
            Align::Center => left + (width - used) / 2.0,
            Align::Right => left + width - used,
        };
        self.text(x, size, bold, fitted);
    }

    fn header_line(&mut self, text: &str, size: f32, bold: bool, align: Align) {
        let height = size + 8.0;
        self.reserve(height);
        self.y -= size;
        self.aligned_text(MARGIN, CONTENT_WIDTH, align, size, bold, text);
        self.y -= 8.0;
    }

    fn table(&mut self, table: &Table) {
        let width: f32 = table.columns.iter().map(|c| c.width).sum();
        let left = MARGIN + ((CONTENT_WIDTH - width) / 2.0).max(0.0);

        if table.show_header {
            self.reserve(HEADER_ROW_HEIGHT + ROW_HEIGHT);
            self.table_header(table, left);
        }
        for row in &table.rows {
            let height = match row.style {
                RowStyle::Total => ROW_HEIGHT + TOTAL_PADDING,
                _ => ROW_HEIGHT,
            };
            if self.reserve(height) && table.show_header {
                self.table_header(table, left);
            }
            self.table_row(table, row, left, width);
        }
    }

    fn table_header(&mut self, table: &Table, left: f32) {
        self.y -= LINE_SIZE;
        let mut x = left;
        for column in &table.columns {
            self.aligned_text(
                x + CELL_PADDING,
                column.width - 2.0 * CELL_PADDING,
                column.align,
                LINE_SIZE,
                true,
                &column.title,
            );
            x += column.width;
        }
        self.y -= HEADER_ROW_HEIGHT - LINE_SIZE;
    }

    fn table_row(&mut self, table: &Table, row: &Row, left: f32, width: f32) {
        let bold = !matches!(row.style, RowStyle::Item);
        if row.style == RowStyle::Total {
            self.y -= TOTAL_PADDING;
        }
        self.y -= BODY_SIZE;
        let mut x = left;
        for (column, cell) in table.columns.iter().zip(&row.cells) {
            self.aligned_text(
                x + CELL_PADDING,
                column.width - 2.0 * CELL_PADDING,
                column.align,
                BODY_SIZE,
                bold,
                cell,
            );
            x += column.width;
        }
        self.y -= ROW_HEIGHT - BODY_SIZE;
        if row.style == RowStyle::Total {
            let y = self.y + 1.0;
            self.ops().push(Op::Rule {
                x1: left,
                x2: left + width,
                y,
            });
        }
    }

    fn line(&mut self, text: &str, bold: bool) {
        self.reserve(LINE_SIZE + 4.0);
        self.y -= LINE_SIZE;
        self.aligned_text(MARGIN, CONTENT_WIDTH, Align::Left, LINE_SIZE, bold, text);
        self.y -= 4.0;
    }

    fn spacer(&mut self, height: f32) {
        if !self.reserve(height) {
            self.y -= height;
        }
    }

    fn signatures(&mut self, names: &[String]) {
        if names.is_empty() {
            return;
        }
        let width = SIGNATURE_WIDTH.min(CONTENT_WIDTH / names.len() as f32);
        let left = MARGIN + (CONTENT_WIDTH - width * names.len() as f32) / 2.0;
        self.reserve(2.0 * ROW_HEIGHT + 5.0);

        self.y -= BODY_SIZE;
        for index in 0..names.len() {
            let x = left + width * index as f32;
            self.aligned_text(x, width, Align::Center, BODY_SIZE, false, SIGNATURE_RULE);
        }
        self.y -= ROW_HEIGHT - BODY_SIZE + 5.0;
        self.y -= BODY_SIZE;
        for (index, name) in names.iter().enumerate() {
            let x = left + width * index as f32;
            self.aligned_text(x, width, Align::Center, BODY_SIZE, false, name);
        }
        self.y -= ROW_HEIGHT - BODY_SIZE;
    }

    fn finish(mut self) -> Vec<Vec<Op>> {
        let total = self.pages.len();
        for (index, page) in self.pages.iter_mut().enumerate() {
            let label = format!("Page {} of {}", index + 1, total);
            let width = text_width(&label, 8.0, false);
            page.push(Op::Text {
                x: (PAGE_WIDTH - width) / 2.0,
                y: FOOTER_Y,
                size: 8.0,
                bold: false,
                text: label,
            });
        }
        self.pages
    }
}

fn lay_out(report: &Report) -> Vec<Vec<Op>> {
    let mut layout = Layout::new();
    for line in &report.header {
        layout.header_line(&line.text, line.size, line.bold, line.align);
    }
    for block in &report.blocks {
        match block {
            Block::Table(table) => layout.table(table),
            Block::Spacer(height) => layout.spacer(*height),
            Block::Line { text, bold } => layout.line(text, *bold),
            Block::Signatures(names) => layout.signatures(names),
        }
    }
    layout.finish()
}

/// Escapes a string for a PDF literal, transcoding to WinAnsi bytes.
fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", ch as u32)),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

fn content_stream(ops: &[Op]) -> String {
    let mut stream = String::new();
    for op in ops {
        match op {
            Op::Text {
                x,
                y,
                size,
                bold,
                text,
            } => {
                let font = if *bold { "F2" } else { "F1" };
                stream.push_str(&format!(
                    "BT /{font} {size:.1} Tf {x:.2} {y:.2} Td {} Tj ET\n",
                    pdf_string(text)
                ));
            }
            Op::Rule { x1, x2, y } => {
                stream.push_str(&format!("0.75 w {x1:.2} {y:.2} m {x2:.2} {y:.2} l S\n"));
            }
        }
    }
    stream
}

/// Accumulates numbered objects and records their byte offsets for the xref table.
struct PdfBuilder {
    buffer: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfBuilder {
    fn new() -> Self {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buffer,
            offsets: Vec::new(),
        }
    }

    /// Appends the next object; ids must be written in ascending order from 1.
    fn object(&mut self, id: usize, body: &str) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.buffer.len());
        self.buffer
            .extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn stream(&mut self, id: usize, data: &str) {
        self.object(
            id,
            &format!("<< /Length {} >>\nstream\n{data}endstream", data.len()),
        );
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        let xref_at = self.buffer.len();
        let size = self.offsets.len() + 1;
        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {size} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        ));
        self.buffer.extend_from_slice(xref.as_bytes());
        self.buffer
    }
}

/// Letter-size PDF output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn render(&self, report: &Report) -> Vec<u8> {
        const CATALOG: usize = 1;
        const PAGES: usize = 2;
        const INFO: usize = 5;
        const FIRST_PAGE: usize = 6;

        let pages = lay_out(report);
        let kids: Vec<String> = (0..pages.len())
            .map(|index| format!("{} 0 R", FIRST_PAGE + 2 * index))
            .collect();

        let mut pdf = PdfBuilder::new();
        pdf.object(CATALOG, &format!("<< /Type /Catalog /Pages {PAGES} 0 R >>"));
        pdf.object(
            PAGES,
            &format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            ),
        );
        pdf.object(
            3,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        );
        pdf.object(
            4,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
        );
        pdf.object(
            INFO,
            &format!(
                "<< /Title {} /Producer (chartbook {}) >>",
                pdf_string(&report.title),
                env!("CARGO_PKG_VERSION")
            ),
        );
        for (index, ops) in pages.iter().enumerate() {
            let page_id = FIRST_PAGE + 2 * index;
            pdf.object(
                page_id,
                &format!(
                    "<< /Type /Page /Parent {PAGES} 0 R /MediaBox [0 0 {PAGE_WIDTH:.0} {PAGE_HEIGHT:.0}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                    page_id + 1
                ),
            );
            pdf.stream(page_id + 1, &content_stream(ops));
        }
        pdf.finish(CATALOG, INFO)
    }
}

impl ReportWriter for PdfWriter {
    fn write(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        let bytes = self.render(report);
        out.write_all(&bytes)
            .map_err(|err| BookError::Report(err.to_string()))?;
        tracing::debug!(bytes = bytes.len(), title = %report.title, "pdf rendered");
        Ok(())
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}
