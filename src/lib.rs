//! kousu library root.
//! Exposes the CLI parser, the high-level run() function, and the
//! extraction / aggregation pipeline behind it.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod import;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, cfg_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(&cli.command, cfg_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, cfg_path),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Facets { .. } => cli::commands::facets::handle(&cli.command, cfg),
        Commands::Summary { .. } => cli::commands::summary::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ resolve and load config once (defaults when the file is absent)
    let cfg_path = Config::resolve_path(cli.config.as_deref());
    let cfg = match &cli.command {
        // init must work even when the existing file is broken
        Commands::Init { .. } => Config::default(),
        _ => Config::load(&cfg_path)?,
    };

    // 3️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg, &cfg_path)
}
