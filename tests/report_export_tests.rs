mod common;

use std::fs;

use chartbook::{
    ledger::{LineCategory, StatementKind},
    reports::{self, PdfWriter, ReportWriter, TextWriter},
    services::{AccountCatalog, BalanceSheetDraft, IncomeStatementDraft},
    statements::SectionPolicy,
};
use chrono::NaiveDate;
use common::{open_store, populate_balance_accounts, temp_home};

fn balance_report() -> reports::Report {
    let store = open_store();
    populate_balance_accounts(&store);
    let catalog = AccountCatalog::new(&store);
    let mut draft = BalanceSheetDraft::new();
    draft.set_company("Acme Traders");
    let date = draft.set_date("31/12/2024").unwrap();
    for (category, code, amount) in [
        (LineCategory::AssetCurrent, "1101", "1500"),
        (LineCategory::AssetNonCurrent, "1201", "500"),
        (LineCategory::LiabilityCurrent, "2101", "700"),
        (LineCategory::LiabilityNonCurrent, "2201", "300"),
        (LineCategory::Equity, "31", "1000"),
    ] {
        draft.add_line(&catalog, category, code, amount).unwrap();
    }
    let totals = draft.totals(SectionPolicy::default());
    assert!(totals.balanced);
    reports::balance_sheet_report("Acme Traders", date, draft.lines(), &totals)
}

#[test]
fn balance_sheet_exports_as_pdf() {
    let report = balance_report();
    let path = temp_home().join("balance.pdf");

    let written = reports::export(&report, &PdfWriter, Some(&path)).unwrap();
    assert_eq!(written.as_deref(), Some(path.as_path()));

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("(BALANCE SHEET)"));
    assert!(text.contains("(TOTAL LIABILITIES AND EQUITY)"));
}

#[test]
fn cancelled_export_writes_nothing() {
    let report = balance_report();
    let home = temp_home();
    assert_eq!(reports::export(&report, &PdfWriter, None).unwrap(), None);
    assert_eq!(fs::read_dir(&home).unwrap().count(), 0);
}

#[test]
fn exporting_replaces_an_existing_file() {
    let report = balance_report();
    let path = temp_home().join("balance.pdf");
    fs::write(&path, b"stale").unwrap();
    reports::export(&report, &PdfWriter, Some(&path)).unwrap();
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF-1.4"));
}

#[test]
fn income_statement_text_preview_lists_totals() {
    let mut draft = IncomeStatementDraft::new();
    draft.set_company("Acme");
    let date = draft.set_date("2024-06-30").unwrap();
    draft.add_line(LineCategory::Revenue, "Sales", "2500").unwrap();
    draft.add_line(LineCategory::Cost, "Materials", "1000").unwrap();

    let report = reports::income_statement_report("Acme", date, draft.lines(), &draft.totals());
    let text = TextWriter.render(&report);
    assert!(text.contains("Income Statement - Acme"));
    assert!(text.contains("Gross Profit: $1,500.00"));
    assert!(text.contains("Net Profit: $1,500.00"));
    assert_eq!(TextWriter.extension(), "txt");
}

#[test]
fn suggested_names_carry_company_and_date() {
    let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    assert_eq!(
        reports::suggested_file_name(StatementKind::BalanceSheet, "Acme Traders", date, "pdf"),
        "Balance_Sheet_Acme_Traders_31_12_2024.pdf"
    );
    assert_eq!(
        reports::suggested_file_name(StatementKind::IncomeStatement, "Acme", date, "pdf"),
        "Income_Statement_Acme_2024_12_31.pdf"
    );
}
