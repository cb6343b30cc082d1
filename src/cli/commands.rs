//! Script-mode command table. Each handler parses its arguments and calls the
//! matching [`ShellContext`] action, so both front ends share one code path.

use std::{collections::HashMap, path::PathBuf};

use super::{
    context::ShellContext, io as cli_io, output::section as output_section, CommandError,
    CommandResult,
};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub requires_login: bool,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            requires_login: true,
            handler,
        }
    }

    pub const fn public(mut self) -> Self {
        self.requires_login = false;
        self
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "login",
            "Open a session",
            "login <username> <password>",
            cmd_login,
        )
        .public(),
        CommandDefinition::new(
            "accounts",
            "List the chart of accounts",
            "accounts",
            cmd_accounts,
        ),
        CommandDefinition::new(
            "account",
            "Create, show, edit or delete an account",
            "account add <code> <name> [parent] | show <code> | edit <code> <new-code> <name> [parent] | delete <code>",
            cmd_account,
        ),
        CommandDefinition::new(
            "income",
            "Work on the income statement",
            "income company <name> | date <yyyy-mm-dd> | add <category> <name> <amount> | remove <n> | totals | save | export <path> | reset",
            cmd_income,
        ),
        CommandDefinition::new(
            "balance",
            "Work on the balance sheet",
            "balance company <name> | date <dd/mm/yyyy> | add <category> <code> <amount> | remove <n> | totals | save | export <path> | reset",
            cmd_balance,
        ),
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help)
            .public(),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit).public(),
    ]
}

fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

/// Trailing words joined back together, so unquoted names still work.
fn rest(args: &[&str], from: usize) -> String {
    args.get(from..).unwrap_or_default().join(" ")
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [username, password] = args else {
        return Err(usage_error("login <username> <password>"));
    };
    context.login(username, password);
    Ok(())
}

fn cmd_accounts(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_accounts()
}

fn cmd_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["add", code, name] => context.create_account(code, name, ""),
        ["add", code, name, parent] => context.create_account(code, name, parent),
        ["show", code] => context.show_account(code),
        ["edit", original, code, name] => context.edit_account(original, code, name, ""),
        ["edit", original, code, name, parent] => {
            context.edit_account(original, code, name, parent)
        }
        ["delete", code] => context.delete_account(code),
        _ => Err(usage_error(
            "account add <code> <name> [parent] | show <code> | edit <code> <new-code> <name> [parent] | delete <code>",
        )),
    }
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["company", _, ..] => context.income_set_company(&rest(args, 1)),
        ["date", date] => context.income_set_date(date),
        ["add", category, name, amount] => {
            let category = ShellContext::parse_category(category)?;
            context.income_add(category, name, amount)
        }
        ["remove", number] => context.income_remove(number),
        ["totals"] => context.income_show_totals(),
        ["save"] => context.income_save(),
        ["export", _, ..] => context.income_export(Some(PathBuf::from(rest(args, 1)))),
        ["reset"] => {
            context.income.reset();
            cli_io::print_info("Income statement cleared.");
            Ok(())
        }
        _ => Err(usage_error(
            "income company <name> | date <yyyy-mm-dd> | add <category> <name> <amount> | remove <n> | totals | save | export <path> | reset",
        )),
    }
}

fn cmd_balance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["company", _, ..] => context.balance_set_company(&rest(args, 1)),
        ["date", date] => context.balance_set_date(date),
        ["add", category, code, amount] => {
            let category = ShellContext::parse_category(category)?;
            context.balance_add(category, code, amount)
        }
        ["remove", number] => context.balance_remove(number),
        ["totals"] => context.balance_show_totals(),
        ["save"] => context.balance_save(),
        ["export", _, ..] => context.balance_export(Some(PathBuf::from(rest(args, 1)))),
        ["reset"] => {
            context.balance.reset();
            cli_io::print_info("Balance sheet cleared.");
            Ok(())
        }
        _ => Err(usage_error(
            "balance company <name> | date <dd/mm/yyyy> | add <category> <code> <amount> | remove <n> | totals | save | export <path> | reset",
        )),
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(definition) => {
                output_section(format!("Help: {}", definition.name));
                cli_io::print_info(format!("  Description: {}", definition.description));
                cli_io::print_info(format!("  Usage: {}", definition.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    output_section("Available commands");
    for definition in context.registry.iter() {
        cli_io::print_info(format!("  {:<10} {}", definition.name, definition.description));
    }
    cli_io::print_info("Use `help <command>` for details.");
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_declaration_order() {
        let registry = CommandRegistry::new(all_definitions());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            ["login", "accounts", "account", "income", "balance", "help", "exit"]
        );
        assert!(!registry.get("login").unwrap().requires_login);
        assert!(registry.get("balance").unwrap().requires_login);
        assert!(registry.get("ledger").is_none());
    }

    #[test]
    fn rest_joins_trailing_words() {
        assert_eq!(rest(&["company", "Acme", "Corp"], 1), "Acme Corp");
        assert_eq!(rest(&["company"], 3), "");
    }
}
