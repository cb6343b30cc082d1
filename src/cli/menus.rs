use std::path::PathBuf;

use crate::ledger::{LineCategory, StatementKind};

use super::{context::ShellContext, io as cli_io, output, CommandError, CommandResult};

#[derive(Clone, Copy)]
pub struct MenuItem {
    pub key: &'static str,
    pub label: &'static str,
}

impl MenuItem {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

const MAIN_MENU: [MenuItem; 5] = [
    MenuItem::new("chart", "View chart of accounts"),
    MenuItem::new("accounts", "Manage accounts"),
    MenuItem::new("income", "Income statement"),
    MenuItem::new("balance", "Balance sheet"),
    MenuItem::new("exit", "Exit"),
];

const ACCOUNT_MENU: [MenuItem; 5] = [
    MenuItem::new("create", "Create account"),
    MenuItem::new("search", "Search account"),
    MenuItem::new("edit", "Edit account"),
    MenuItem::new("delete", "Delete account"),
    MenuItem::new("back", "Back"),
];

const STATEMENT_MENU: [MenuItem; 10] = [
    MenuItem::new("company", "Set company"),
    MenuItem::new("date", "Set date"),
    MenuItem::new("add", "Add line"),
    MenuItem::new("remove", "Remove line"),
    MenuItem::new("totals", "Show lines and totals"),
    MenuItem::new("preview", "Preview report"),
    MenuItem::new("save", "Save statement"),
    MenuItem::new("export", "Export PDF"),
    MenuItem::new("reset", "Clear form"),
    MenuItem::new("back", "Back"),
];

/// Selected key, or `None` when the user backs out with Esc.
fn choose(
    context: &ShellContext,
    title: &str,
    items: &[MenuItem],
) -> Result<Option<&'static str>, CommandError> {
    Ok(cli_io::select_index(&context.theme, title, items)?.map(|index| items[index].key))
}

/// Reports a failed action and keeps the menu open. Prompt failures mean the
/// terminal went away, so those end the session.
fn settle(context: &ShellContext, result: CommandResult) -> CommandResult {
    match result {
        Err(err @ CommandError::Prompt(_)) => Err(err),
        Err(err) => {
            context.report_error(err);
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

/// Interactive session: login gate, then the main menu until the user exits.
pub fn run(context: &mut ShellContext) -> CommandResult {
    output::section("Chartbook");
    if !login(context)? {
        cli_io::print_info("Goodbye.");
        return Ok(());
    }

    while context.running {
        match choose(context, "Main menu", &MAIN_MENU)? {
            Some("chart") => settle(context, context.show_accounts())?,
            Some("accounts") => accounts_menu(context)?,
            Some("income") => income_menu(context)?,
            Some("balance") => balance_menu(context)?,
            Some("exit") | None => {
                if cli_io::confirm_action(&context.theme, "Exit chartbook?", true)? {
                    context.running = false;
                }
            }
            Some(_) => {}
        }
    }
    cli_io::print_info("Goodbye.");
    Ok(())
}

/// Retries until the credentials match or the user declines another attempt.
fn login(context: &mut ShellContext) -> Result<bool, CommandError> {
    loop {
        let username = cli_io::prompt_text(&context.theme, "Username", None)?;
        let password = cli_io::prompt_password(&context.theme, "Password")?;
        if context.login(&username, &password) {
            return Ok(true);
        }
        if !cli_io::confirm_action(&context.theme, "Try again?", true)? {
            return Ok(false);
        }
    }
}

fn accounts_menu(context: &mut ShellContext) -> CommandResult {
    loop {
        let result = match choose(context, "Accounts", &ACCOUNT_MENU)? {
            Some("create") => create_account(context),
            Some("search") => {
                let code = cli_io::prompt_text(&context.theme, "Account code", None)?;
                context.show_account(&code)
            }
            Some("edit") => edit_account(context),
            Some("delete") => delete_account(context),
            _ => return Ok(()),
        };
        settle(context, result)?;
    }
}

fn create_account(context: &mut ShellContext) -> CommandResult {
    let code = cli_io::prompt_text(&context.theme, "Code", None)?;
    let name = cli_io::prompt_text(&context.theme, "Name", None)?;
    let parent = cli_io::prompt_text(&context.theme, "Parent code (empty for none)", None)?;
    context.create_account(&code, &name, &parent)
}

fn edit_account(context: &mut ShellContext) -> CommandResult {
    let original = cli_io::prompt_text(&context.theme, "Code of the account to edit", None)?;
    let Some(account) = context.catalog().find(&original)? else {
        cli_io::print_warning(format!("Account {} not found.", original.trim()));
        return Ok(());
    };
    let code = cli_io::prompt_text(&context.theme, "Code", Some(&account.code))?;
    let name = cli_io::prompt_text(&context.theme, "Name", Some(&account.name))?;
    let parent = cli_io::prompt_text(
        &context.theme,
        "Parent code (empty for none)",
        account.parent_code.as_deref(),
    )?;
    context.edit_account(&account.code, &code, &name, &parent)
}

fn delete_account(context: &mut ShellContext) -> CommandResult {
    let code = cli_io::prompt_text(&context.theme, "Code of the account to delete", None)?;
    let prompt = format!("Delete account {}?", code.trim());
    if cli_io::confirm_action(&context.theme, &prompt, false)? {
        context.delete_account(&code)
    } else {
        cli_io::print_info("Nothing deleted.");
        Ok(())
    }
}

fn pick_category(
    context: &ShellContext,
    categories: &[LineCategory],
) -> Result<Option<LineCategory>, CommandError> {
    let labels: Vec<&str> = categories.iter().map(|category| category.label()).collect();
    Ok(cli_io::select_index(&context.theme, "Category", &labels)?.map(|index| categories[index]))
}

/// Asks where to write the PDF. Empty input or a declined overwrite cancels.
fn prompt_export_path(
    context: &ShellContext,
    kind: StatementKind,
    company: &str,
) -> Result<Option<PathBuf>, CommandError> {
    let suggested = context.suggested_export_path(kind, company);
    let text = cli_io::prompt_text(
        &context.theme,
        "Save PDF as (empty to cancel)",
        Some(&suggested.display().to_string()),
    )?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let path = PathBuf::from(text);
    if path.exists() {
        let prompt = format!("{} exists. Replace it?", path.display());
        if !cli_io::confirm_action(&context.theme, &prompt, false)? {
            return Ok(None);
        }
    }
    Ok(Some(path))
}

fn income_menu(context: &mut ShellContext) -> CommandResult {
    loop {
        let result = match choose(context, "Income statement", &STATEMENT_MENU)? {
            Some("company") => {
                let current = context.income.company().to_string();
                let company = cli_io::prompt_text(&context.theme, "Company", Some(&current))?;
                context.income_set_company(&company)
            }
            Some("date") => {
                let current = context.income.date().format("%Y-%m-%d").to_string();
                let date =
                    cli_io::prompt_text(&context.theme, "Date (YYYY-MM-DD)", Some(&current))?;
                context.income_set_date(&date)
            }
            Some("add") => add_income_line(context),
            Some("remove") => {
                context.income_show_totals()?;
                let number = cli_io::prompt_text(&context.theme, "Line number", None)?;
                context.income_remove(&number)
            }
            Some("totals") => context.income_show_totals(),
            Some("preview") => context.income_report().map(|report| context.preview(&report)),
            Some("save") => context.income_save(),
            Some("export") => export_income(context),
            Some("reset") => {
                context.income.reset();
                cli_io::print_info("Income statement cleared.");
                Ok(())
            }
            _ => return Ok(()),
        };
        settle(context, result)?;
    }
}

fn add_income_line(context: &mut ShellContext) -> CommandResult {
    let Some(category) = pick_category(context, &LineCategory::INCOME_STATEMENT)? else {
        return Ok(());
    };
    let name = cli_io::prompt_text(&context.theme, "Account name", None)?;
    let amount = cli_io::prompt_text(&context.theme, "Amount", None)?;
    context.income_add(category, &name, &amount)
}

fn export_income(context: &mut ShellContext) -> CommandResult {
    let report = context.income_report()?;
    let company = context.income.company().to_string();
    let destination = prompt_export_path(context, StatementKind::IncomeStatement, &company)?;
    context.export_report(&report, destination)
}

fn balance_menu(context: &mut ShellContext) -> CommandResult {
    loop {
        let result = match choose(context, "Balance sheet", &STATEMENT_MENU)? {
            Some("company") => {
                let current = context.balance.company().to_string();
                let company = cli_io::prompt_text(&context.theme, "Company", Some(&current))?;
                context.balance_set_company(&company)
            }
            Some("date") => {
                let current = context
                    .balance
                    .date()
                    .map(|date| date.format("%d/%m/%Y").to_string());
                let date = cli_io::prompt_text(
                    &context.theme,
                    "Date (DD/MM/YYYY)",
                    current.as_deref(),
                )?;
                context.balance_set_date(&date)
            }
            Some("add") => add_balance_line(context),
            Some("remove") => {
                context.balance_show_totals()?;
                let number = cli_io::prompt_text(&context.theme, "Line number", None)?;
                context.balance_remove(&number)
            }
            Some("totals") => context.balance_show_totals(),
            Some("preview") => context
                .balance_report()
                .map(|report| context.preview(&report)),
            Some("save") => context.balance_save(),
            Some("export") => export_balance(context),
            Some("reset") => {
                context.balance.reset();
                cli_io::print_info("Balance sheet cleared.");
                Ok(())
            }
            _ => return Ok(()),
        };
        settle(context, result)?;
    }
}

/// Offers only catalog accounts that sit under the chosen category's prefix.
fn add_balance_line(context: &mut ShellContext) -> CommandResult {
    let Some(category) = pick_category(context, &LineCategory::BALANCE_SHEET)? else {
        return Ok(());
    };
    let accounts = context.catalog().eligible_for(category)?;
    if accounts.is_empty() {
        cli_io::print_warning(format!(
            "No accounts in the catalog belong to {}.",
            category.label()
        ));
        return Ok(());
    }
    let Some(index) = cli_io::select_index(&context.theme, "Account", &accounts)? else {
        return Ok(());
    };
    let code = accounts[index].code.clone();
    let amount = cli_io::prompt_text(&context.theme, "Amount", None)?;
    context.balance_add(category, &code, &amount)
}

fn export_balance(context: &mut ShellContext) -> CommandResult {
    let report = context.balance_report()?;
    let company = context.balance.company().to_string();
    let destination = prompt_export_path(context, StatementKind::BalanceSheet, &company)?;
    context.export_report(&report, destination)
}
