mod app;
mod cli;
mod clock;
mod config;
mod error;
mod event;
mod format;
mod ledger;
mod logging;
mod stats;
mod store;
mod timer;
mod tui;
mod types;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::store::SqliteStore;
use crate::timer::Tracker;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let config = Config::resolve(cli_opts.db);

    match cli_opts.command {
        Some(command) => {
            logging::init_stderr();
            let mut tracker = open_tracker(&config)?;
            cli::run(command, &mut tracker)
        }
        None => {
            logging::init_file(&config.log_path)?;
            let tracker = open_tracker(&config)?;
            let mut app = app::App::new(tracker);
            let mut terminal = tui::init()?;
            let result = event::run(&mut app, &mut terminal);

            tui::restore()?;

            result
        }
    }
}

fn open_tracker(config: &Config) -> Result<Tracker<SqliteStore, SystemClock>> {
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;
    let tracker = Tracker::open(store, SystemClock).context("Failed to load timer state")?;
    Ok(tracker)
}
