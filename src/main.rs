use anyhow::Result;
use clap::Parser;

mod app;
mod cli;
mod config;
mod db;
mod domain;
mod format;
mod logging;
mod store;
mod tui;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = config::Config::from_env();
    if let Err(err) = logging::init_logging(&config) {
        eprintln!("ideas: logging disabled: {}", err);
    }

    let app = app::AppContext::new(&config)?;
    cli::dispatch(&app, cli)
}
