use std::{path::PathBuf, process};

use chartbook::{
    cli::{run_cli, CliOptions},
    config::ConfigManager,
    utils::paths::app_home,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chartbook")]
#[command(version)]
#[command(about = "Chart of accounts, balance sheets and income statements in the terminal", long_about = None)]
struct Args {
    /// Data directory (defaults to $CHARTBOOK_HOME or ~/.chartbook)
    #[arg(long, value_name = "PATH")]
    home: Option<PathBuf>,

    /// Read commands from stdin instead of showing menus
    #[arg(long)]
    script: bool,
}

fn main() {
    let args = Args::parse();
    let home = app_home(args.home);

    // A broken config is reported by the shell itself; only the log level is needed here.
    let level = ConfigManager::with_base_dir(&home)
        .and_then(|manager| manager.load())
        .map(|config| config.log_level)
        .unwrap_or_else(|_| chartbook::utils::DEFAULT_LOG_LEVEL.to_string());
    chartbook::init_with_level(&level);

    let options = CliOptions {
        home: Some(home),
        script: args.script,
    };
    if let Err(err) = run_cli(options) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
