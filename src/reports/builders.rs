use chrono::NaiveDate;

use crate::{
    ledger::{Amount, LedgerLine, LineCategory},
    statements::{IncomeStatementTotals, StatementTotals},
};

use super::{Align, Block, Column, HeaderLine, Report, Row, RowStyle, Table};

const INDENT: &str = "    ";
const SIGNATORIES: [&str; 3] = ["Legal Representative", "Accountant", "Auditor"];

struct Section {
    title: &'static str,
    subtotal: &'static str,
    category: LineCategory,
}

const ASSET_SECTIONS: [Section; 2] = [
    Section {
        title: "CURRENT ASSETS",
        subtotal: "Total Current Assets",
        category: LineCategory::AssetCurrent,
    },
    Section {
        title: "NON-CURRENT ASSETS",
        subtotal: "Total Non-current Assets",
        category: LineCategory::AssetNonCurrent,
    },
];

const LIABILITY_SECTIONS: [Section; 2] = [
    Section {
        title: "CURRENT LIABILITIES",
        subtotal: "Total Current Liabilities",
        category: LineCategory::LiabilityCurrent,
    },
    Section {
        title: "NON-CURRENT LIABILITIES",
        subtotal: "Total Non-current Liabilities",
        category: LineCategory::LiabilityNonCurrent,
    },
];

fn money(amount: Amount) -> String {
    amount.to_string()
}

fn two_column_table(title: &str) -> Table {
    Table {
        columns: vec![
            Column::new(title, 288.0, Align::Left),
            Column::new("Amount", 144.0, Align::Right),
        ],
        show_header: true,
        rows: Vec::new(),
    }
}

/// Appends a section heading, its item rows and subtotal. Empty sections are skipped.
fn push_section(table: &mut Table, section: &Section, lines: &[LedgerLine]) {
    let items: Vec<&LedgerLine> = lines
        .iter()
        .filter(|line| line.category == section.category)
        .collect();
    if items.is_empty() {
        return;
    }
    table.rows.push(Row::new(RowStyle::Section, [section.title, ""]));
    for line in &items {
        table.rows.push(Row::new(
            RowStyle::Item,
            [format!("{INDENT}{}", line.name), money(line.amount)],
        ));
    }
    let subtotal: Amount = items.iter().map(|line| line.amount).sum();
    table
        .rows
        .push(Row::new(RowStyle::Subtotal, [section.subtotal.to_string(), money(subtotal)]));
}

/// Lays out a balance sheet: header, assets table, liabilities and equity table and
/// the signature block.
pub fn balance_sheet_report(
    company: &str,
    date: NaiveDate,
    lines: &[LedgerLine],
    totals: &StatementTotals,
) -> Report {
    let header = vec![
        HeaderLine::new(company.trim().to_uppercase(), 16.0, true, Align::Center),
        HeaderLine::new("BALANCE SHEET", 16.0, true, Align::Center),
        HeaderLine::new(format!("As of {}", date.format("%d/%m/%Y")), 12.0, false, Align::Center),
        HeaderLine::new("(Expressed in US dollars)", 12.0, false, Align::Center),
    ];

    let mut assets = two_column_table("ASSETS");
    for section in &ASSET_SECTIONS {
        push_section(&mut assets, section, lines);
    }
    assets.rows.push(Row::new(
        RowStyle::Total,
        ["TOTAL ASSETS".to_string(), money(totals.total_assets)],
    ));

    let mut claims = two_column_table("LIABILITIES AND EQUITY");
    for section in &LIABILITY_SECTIONS {
        push_section(&mut claims, section, lines);
    }
    claims.rows.push(Row::new(
        RowStyle::Total,
        ["TOTAL LIABILITIES".to_string(), money(totals.total_liabilities)],
    ));
    let equity = Section {
        title: "EQUITY",
        subtotal: "TOTAL EQUITY",
        category: LineCategory::Equity,
    };
    push_section(&mut claims, &equity, lines);
    claims.rows.push(Row::new(
        RowStyle::Total,
        [
            "TOTAL LIABILITIES AND EQUITY".to_string(),
            money(totals.liabilities_and_equity()),
        ],
    ));

    Report {
        title: format!("Balance Sheet - {}", company.trim()),
        header,
        blocks: vec![
            Block::Spacer(20.0),
            Block::Table(assets),
            Block::Spacer(20.0),
            Block::Table(claims),
            Block::Spacer(50.0),
            Block::Signatures(SIGNATORIES.iter().map(|s| s.to_string()).collect()),
        ],
    }
}

pub fn income_statement_report(
    company: &str,
    date: NaiveDate,
    lines: &[LedgerLine],
    totals: &IncomeStatementTotals,
) -> Report {
    let header = vec![
        HeaderLine::new(
            format!("Income Statement - {}", company.trim()),
            14.0,
            true,
            Align::Left,
        ),
        HeaderLine::new(format!("Date: {}", date.format("%Y-%m-%d")), 12.0, false, Align::Left),
    ];

    let mut table = Table {
        columns: vec![
            Column::new("Category", 170.0, Align::Left),
            Column::new("Account", 200.0, Align::Left),
            Column::new("Amount", 120.0, Align::Right),
        ],
        show_header: true,
        rows: Vec::new(),
    };
    for category in LineCategory::INCOME_STATEMENT {
        for line in lines.iter().filter(|line| line.category == category) {
            table.rows.push(Row::new(
                RowStyle::Item,
                [
                    category.label().to_string(),
                    line.name.clone(),
                    money(line.amount),
                ],
            ));
        }
    }

    let summary = [
        ("Total Revenue", totals.revenue),
        ("Total Costs", totals.cost),
        ("Gross Profit", totals.gross_profit),
        ("Total Operating Expenses", totals.operating_expense),
        ("Operating Profit", totals.operating_profit),
        ("Profit Before Taxes", totals.profit_before_tax),
        ("Net Profit", totals.net_profit),
    ];

    let mut blocks = vec![Block::Spacer(10.0), Block::Table(table), Block::Spacer(20.0)];
    blocks.extend(summary.iter().map(|(label, amount)| Block::Line {
        text: format!("{label}: {}", money(*amount)),
        bold: *label == "Net Profit",
    }));

    Report {
        title: format!("Income Statement - {}", company.trim()),
        header,
        blocks,
    }
}
