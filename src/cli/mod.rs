//! Terminal front end: a login gate followed by dialoguer menus, or a
//! line-oriented script mode reading commands from stdin.

pub mod commands;
pub mod context;
pub mod io;
pub mod menus;
pub mod output;
mod shell;
pub mod table;

use std::path::PathBuf;

use thiserror::Error;

use crate::errors::BookError;

pub use context::{CliMode, ShellContext};
pub use shell::run_cli;

/// Environment variable that switches the shell into script mode.
pub const SCRIPT_ENV: &str = "CHARTBOOK_SCRIPT";

/// Startup failures that end the program.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BookError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
}

/// Failures of a single command or menu action; reported, then the shell continues.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Log in first with `login <user> <password>`.")]
    NotAuthenticated,
    #[error(transparent)]
    Core(#[from] BookError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<crate::errors::ValidationError> for CommandError {
    fn from(err: crate::errors::ValidationError) -> Self {
        CommandError::Core(err.into())
    }
}

pub type CommandResult = Result<(), CommandError>;

/// Process-level switches, usually parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub home: Option<PathBuf>,
    pub script: bool,
}
