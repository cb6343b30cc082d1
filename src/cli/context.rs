use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use uuid::Uuid;

use crate::{
    auth::{authenticate, Session},
    config::{Config, ConfigManager},
    ledger::{Amount, LedgerLine, LineCategory, StatementKind},
    reports::{self, PdfWriter, Report, ReportWriter, TextWriter},
    services::{AccountCatalog, BalanceSheetDraft, IncomeStatementDraft},
    statements::SectionPolicy,
    storage::JsonStore,
    utils::paths,
};

use super::{
    commands::{self, CommandRegistry},
    io as cli_io,
    output::{self, OutputPreferences},
    table::{Field, Listing},
    CliError, CliOptions, CommandError, CommandResult,
};

const ACCOUNT_FIELDS: [Field; 3] = [
    Field::left("Code"),
    Field::left("Name").capped(40),
    Field::left("Parent"),
];

const LINE_FIELDS: [Field; 4] = [
    Field::right("#"),
    Field::left("Category"),
    Field::left("Account").capped(36),
    Field::right("Amount"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Everything a running shell needs: the store, the loaded configuration, the
/// login session and the two statement forms being edited.
pub struct ShellContext {
    pub mode: CliMode,
    pub home: PathBuf,
    pub theme: ColorfulTheme,
    pub store: JsonStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub registry: CommandRegistry,
    pub session: Option<Session>,
    pub income: IncomeStatementDraft,
    pub balance: BalanceSheetDraft,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode, options: &CliOptions) -> Result<Self, CliError> {
        let home = paths::app_home(options.home.clone());
        let config_manager = ConfigManager::with_base_dir(&home)?;
        let config = config_manager.load()?;
        let store = JsonStore::open(&home)?;

        output::set_preferences(match mode {
            CliMode::Script => OutputPreferences {
                color_enabled: false,
                plain_mode: true,
            },
            CliMode::Interactive => OutputPreferences {
                color_enabled: config.ui_color_enabled,
                plain_mode: false,
            },
        });

        let mut context = Self {
            mode,
            home,
            theme: ColorfulTheme::default(),
            store,
            config_manager,
            config,
            registry: CommandRegistry::new(commands::all_definitions()),
            session: None,
            income: IncomeStatementDraft::new(),
            balance: BalanceSheetDraft::new(),
            last_command: None,
            running: true,
        };
        context.prefill_company();
        tracing::debug!(home = %context.home.display(), ?mode, "shell context ready");
        Ok(context)
    }

    fn prefill_company(&mut self) {
        if let Some(company) = self.config.company_name.clone() {
            self.income.set_company(&company);
            self.balance.set_company(&company);
        }
    }

    pub fn policy(&self) -> SectionPolicy {
        self.config.section_policy()
    }

    pub fn catalog(&self) -> AccountCatalog<'_> {
        AccountCatalog::new(&self.store)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn money(&self, amount: Amount) -> String {
        amount.format_with(&self.config.currency_symbol)
    }

    // ---- session -------------------------------------------------------

    pub fn login(&mut self, username: &str, password: &str) -> bool {
        match authenticate(&self.config.credentials, username, password) {
            Some(session) => {
                cli_io::print_success(format!("Welcome, {}.", session.username));
                self.session = Some(session);
                true
            }
            None => {
                cli_io::print_error("Invalid username or password.");
                false
            }
        }
    }

    // ---- chart of accounts ---------------------------------------------

    pub fn show_accounts(&self) -> CommandResult {
        let catalog = self.catalog();
        let accounts = catalog.list()?;
        let mut table = Listing::new(&ACCOUNT_FIELDS);
        for account in &accounts {
            table.row(vec![
                account.code.clone(),
                account.name.clone(),
                account.parent_code.clone().unwrap_or_default(),
            ]);
        }
        output::section("Chart of accounts");
        output::plain(table.render());
        cli_io::print_info(format!("Total accounts: {}", accounts.len()));
        self.report_catalog_warnings()
    }

    fn report_catalog_warnings(&self) -> CommandResult {
        for warning in self.catalog().warnings()? {
            cli_io::print_warning(warning);
        }
        Ok(())
    }

    pub fn create_account(&self, code: &str, name: &str, parent: &str) -> CommandResult {
        let account = self.catalog().create(code, name, parent)?;
        cli_io::print_success(format!("Account {account} created."));
        Ok(())
    }

    pub fn show_account(&self, code: &str) -> CommandResult {
        match self.catalog().find(code)? {
            Some(account) => {
                cli_io::print_info(format!("Code   : {}", account.code));
                cli_io::print_info(format!("Name   : {}", account.name));
                cli_io::print_info(format!(
                    "Parent : {}",
                    account.parent_code.as_deref().unwrap_or("(none)")
                ));
            }
            None => cli_io::print_warning(format!("Account {} not found.", code.trim())),
        }
        Ok(())
    }

    pub fn edit_account(
        &self,
        original_code: &str,
        code: &str,
        name: &str,
        parent: &str,
    ) -> CommandResult {
        let account = self.catalog().edit(original_code, code, name, parent)?;
        cli_io::print_success(format!("Account {account} updated."));
        self.report_catalog_warnings()
    }

    pub fn delete_account(&self, code: &str) -> CommandResult {
        if self.catalog().delete(code)? {
            cli_io::print_success(format!("Account {} deleted.", code.trim()));
            self.report_catalog_warnings()
        } else {
            cli_io::print_warning(format!("No account with code {} exists.", code.trim()));
            Ok(())
        }
    }

    // ---- shared line helpers -------------------------------------------

    pub fn parse_category(text: &str) -> Result<LineCategory, CommandError> {
        LineCategory::from_str(text).map_err(CommandError::from)
    }

    /// Resolves a 1-based line number as shown by the totals listing.
    fn line_id(lines: &[LedgerLine], number: &str) -> Result<Uuid, CommandError> {
        let index: usize = number.trim().parse().map_err(|_| {
            CommandError::InvalidArguments(format!("line number `{number}` must be numeric"))
        })?;
        index
            .checked_sub(1)
            .and_then(|index| lines.get(index))
            .map(|line| line.id)
            .ok_or_else(|| CommandError::InvalidArguments(format!("no line number {index}")))
    }

    fn print_lines(&self, lines: &[LedgerLine]) {
        if lines.is_empty() {
            cli_io::print_info("No lines entered yet.");
            return;
        }
        let mut table = Listing::new(&LINE_FIELDS);
        for (index, line) in lines.iter().enumerate() {
            let account = match &line.account_code {
                Some(code) => format!("{code} - {}", line.name),
                None => line.name.clone(),
            };
            table.row(vec![
                (index + 1).to_string(),
                line.category.label().to_string(),
                account,
                self.money(line.amount),
            ]);
        }
        output::plain(table.render());
    }

    /// Renders `report` as PDF to `destination`; `None` cancels quietly.
    pub fn export_report(&self, report: &Report, destination: Option<PathBuf>) -> CommandResult {
        match reports::export(report, &PdfWriter, destination.as_deref())? {
            Some(path) => cli_io::print_success(format!("Report written to {}.", path.display())),
            None => cli_io::print_info("Export cancelled."),
        }
        Ok(())
    }

    /// Default export path offered by the interactive prompt.
    pub fn suggested_export_path(&self, kind: StatementKind, company: &str) -> PathBuf {
        let date = match kind {
            StatementKind::BalanceSheet => self.balance.date(),
            StatementKind::IncomeStatement => Some(self.income.date()),
        }
        .unwrap_or_else(|| self.income.date());
        self.config.resolve_export_dir().join(reports::suggested_file_name(
            kind,
            company,
            date,
            PdfWriter.extension(),
        ))
    }

    pub fn preview(&self, report: &Report) {
        output::plain(TextWriter.render(report));
    }

    // ---- income statement ----------------------------------------------

    pub fn income_set_company(&mut self, company: &str) -> CommandResult {
        self.income.set_company(company);
        cli_io::print_info(format!("Income statement company: {}", self.income.company()));
        Ok(())
    }

    pub fn income_set_date(&mut self, text: &str) -> CommandResult {
        let date = self.income.set_date(text)?;
        cli_io::print_info(format!("Income statement date: {}", date.format("%Y-%m-%d")));
        Ok(())
    }

    pub fn income_add(
        &mut self,
        category: LineCategory,
        name: &str,
        amount: &str,
    ) -> CommandResult {
        let line = self.income.add_line(category, name, amount)?.clone();
        cli_io::print_success(format!(
            "Added {} line {} for {}.",
            line.category.label(),
            line.name,
            self.money(line.amount)
        ));
        Ok(())
    }

    pub fn income_remove(&mut self, number: &str) -> CommandResult {
        let id = Self::line_id(self.income.lines(), number)?;
        self.income.remove_line(id);
        cli_io::print_success(format!("Removed line {}.", number.trim()));
        Ok(())
    }

    pub fn income_show_totals(&self) -> CommandResult {
        output::section(format!(
            "Income statement {} {}",
            self.income.company(),
            self.income.date().format("%Y-%m-%d")
        ));
        self.print_lines(self.income.lines());
        let totals = self.income.totals();
        for (label, amount) in [
            ("Total Revenue", totals.revenue),
            ("Total Costs", totals.cost),
            ("Gross Profit", totals.gross_profit),
            ("Total Operating Expenses", totals.operating_expense),
            ("Operating Profit", totals.operating_profit),
            ("Profit Before Taxes", totals.profit_before_tax),
            ("Net Profit", totals.net_profit),
        ] {
            cli_io::print_info(format!("{label}: {}", self.money(amount)));
        }
        Ok(())
    }

    pub fn income_save(&mut self) -> CommandResult {
        let (record, totals) = self.income.save(&self.store)?;
        cli_io::print_success(format!(
            "Income statement saved for {} ({}). Net Profit: {}.",
            record.company,
            record.date.format("%Y-%m-%d"),
            self.money(totals.net_profit)
        ));
        Ok(())
    }

    pub fn income_report(&self) -> Result<Report, CommandError> {
        let company = self.income.ensure_ready()?;
        Ok(reports::income_statement_report(
            company,
            self.income.date(),
            self.income.lines(),
            &self.income.totals(),
        ))
    }

    pub fn income_export(&self, destination: Option<PathBuf>) -> CommandResult {
        let report = self.income_report()?;
        self.export_report(&report, destination)
    }

    // ---- balance sheet -------------------------------------------------

    pub fn balance_set_company(&mut self, company: &str) -> CommandResult {
        self.balance.set_company(company);
        cli_io::print_info(format!("Balance sheet company: {}", self.balance.company()));
        Ok(())
    }

    pub fn balance_set_date(&mut self, text: &str) -> CommandResult {
        let date = self.balance.set_date(text)?;
        cli_io::print_info(format!("Balance sheet date: {}", date.format("%d/%m/%Y")));
        Ok(())
    }

    pub fn balance_add(
        &mut self,
        category: LineCategory,
        code: &str,
        amount: &str,
    ) -> CommandResult {
        let catalog = AccountCatalog::new(&self.store);
        let line = self
            .balance
            .add_line(&catalog, category, code, amount)?
            .clone();
        cli_io::print_success(format!(
            "Added {} line {} - {} for {}.",
            line.category.label(),
            line.account_code.as_deref().unwrap_or_default(),
            line.name,
            self.money(line.amount)
        ));
        Ok(())
    }

    pub fn balance_remove(&mut self, number: &str) -> CommandResult {
        let id = Self::line_id(self.balance.lines(), number)?;
        self.balance.remove_line(id);
        cli_io::print_success(format!("Removed line {}.", number.trim()));
        Ok(())
    }

    pub fn balance_show_totals(&self) -> CommandResult {
        output::section(format!("Balance sheet {}", self.balance.company()));
        self.print_lines(self.balance.lines());
        let totals = self.balance.totals(self.policy());
        for category in LineCategory::BALANCE_SHEET {
            cli_io::print_info(format!(
                "{}: {}",
                category.label(),
                self.money(totals.category(category))
            ));
        }
        cli_io::print_info(format!("Total Assets: {}", self.money(totals.total_assets)));
        cli_io::print_info(format!(
            "Total Liabilities: {}",
            self.money(totals.total_liabilities)
        ));
        cli_io::print_info(format!("Total Equity: {}", self.money(totals.total_equity)));
        cli_io::print_info(format!(
            "Total Liabilities + Equity: {}",
            self.money(totals.liabilities_and_equity())
        ));
        if totals.balanced {
            cli_io::print_success("The balance sheet is balanced.");
        } else {
            cli_io::print_warning(format!(
                "The balance sheet is not balanced. Difference: {}",
                self.money(totals.difference)
            ));
        }
        Ok(())
    }

    pub fn balance_save(&mut self) -> CommandResult {
        let policy = self.policy();
        let (record, totals) = self.balance.save(&self.store, policy)?;
        cli_io::print_success(format!(
            "Balance sheet saved for {} as of {}. Total Assets: {}.",
            record.company,
            record.date.format("%d/%m/%Y"),
            self.money(totals.total_assets)
        ));
        Ok(())
    }

    pub fn balance_report(&self) -> Result<Report, CommandError> {
        let (company, date) = self.balance.header()?;
        let totals = self.balance.totals(self.policy());
        if !totals.balanced {
            cli_io::print_warning(format!(
                "Exporting an unbalanced sheet. Difference: {}",
                self.money(totals.difference)
            ));
        }
        Ok(reports::balance_sheet_report(
            company,
            date,
            self.balance.lines(),
            &totals,
        ))
    }

    pub fn balance_export(&self, destination: Option<PathBuf>) -> CommandResult {
        let report = self.balance_report()?;
        self.export_report(&report, destination)
    }

    // ---- dispatch ------------------------------------------------------

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(definition) = self.registry.get(command).cloned() else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        if definition.requires_login && !self.is_authenticated() {
            return Err(CommandError::NotAuthenticated);
        }
        match (definition.handler)(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_error(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &input.to_lowercase()), key))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help` for usage details.");
            }
            other => {
                tracing::debug!(error = ?other, "command failed");
                cli_io::print_error(other);
            }
        }
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }
}
