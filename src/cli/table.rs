//! Fixed-width listings for the chart of accounts and draft statement lines.

use crate::reports::Align;

use super::output;

const GAP: &str = "  ";

/// One listing column. `cap` truncates long cells with an ellipsis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub title: &'static str,
    pub align: Align,
    pub cap: Option<usize>,
}

impl Field {
    pub const fn left(title: &'static str) -> Self {
        Self {
            title,
            align: Align::Left,
            cap: None,
        }
    }

    pub const fn right(title: &'static str) -> Self {
        Self {
            title,
            align: Align::Right,
            cap: None,
        }
    }

    pub const fn capped(self, cap: usize) -> Self {
        Self {
            cap: Some(cap),
            ..self
        }
    }
}

pub struct Listing<'a> {
    fields: &'a [Field],
    rows: Vec<Vec<String>>,
}

impl<'a> Listing<'a> {
    pub fn new(fields: &'a [Field]) -> Self {
        Self {
            fields,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .fold(field.title.chars().count(), usize::max);
                field.cap.map_or(widest, |cap| widest.min(cap))
            })
            .collect()
    }

    fn line<'c>(&self, cells: impl Iterator<Item = &'c str>, widths: &[usize]) -> String {
        let parts: Vec<String> = cells
            .zip(self.fields)
            .zip(widths)
            .map(|((cell, field), width)| fit(cell, *width, field.align))
            .collect();
        parts.join(GAP).trim_end().to_string()
    }

    /// Header, rule, then one line per row. Script mode draws the rule in ASCII.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let span = widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1);
        let rule = if output::current_preferences().plain_mode {
            "-"
        } else {
            "─"
        };

        let mut lines = vec![
            self.line(self.fields.iter().map(|field| field.title), &widths),
            rule.repeat(span),
        ];
        for row in &self.rows {
            let cells = (0..self.fields.len()).map(|idx| row.get(idx).map_or("", String::as_str));
            lines.push(self.line(cells, &widths));
        }
        lines.join("\n")
    }
}

fn fit(text: &str, width: usize, align: Align) -> String {
    let shown: String = if text.chars().count() > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    };
    match align {
        Align::Right => format!("{shown:>width$}"),
        Align::Center => format!("{shown:^width$}"),
        Align::Left => format!("{shown:<width$}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [Field; 3] = [
        Field::right("#"),
        Field::left("Code"),
        Field::left("Name").capped(8),
    ];

    #[test]
    fn long_names_are_cut_to_the_cap() {
        let mut listing = Listing::new(&FIELDS);
        listing.row(vec!["1".into(), "110101".into(), "Petty cash and banks".into()]);
        listing.row(vec!["12".into(), "11".into(), "Current".into()]);
        let rendered = listing.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], " #  Code    Name");
        assert_eq!(lines[1].chars().count(), 20);
        assert_eq!(lines[2], " 1  110101  Petty c…");
        assert_eq!(lines[3], "12  11      Current");
    }

    #[test]
    fn missing_cells_render_blank() {
        let mut listing = Listing::new(&FIELDS[1..]);
        listing.row(vec!["1".into()]);
        assert_eq!(listing.render().lines().last(), Some("1"));
    }
}
