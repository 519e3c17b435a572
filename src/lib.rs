//! MetaHub library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Indicator { .. } => commands::indicator::handle(&cli.command, cfg),
        Commands::Action { .. } => commands::action::handle(&cli.command, cfg),
        Commands::Subtask { .. } => commands::subtask::handle(&cli.command, cfg),
        Commands::Show { .. } => commands::board::handle(&cli.command, cfg),
        Commands::Profile { .. } => commands::profile::handle(&cli.command, cfg),
        Commands::Notifications { .. } => commands::notifications::handle(&cli.command, cfg),
        Commands::Plan { .. } => commands::plan::handle(&cli.command, cfg),
        Commands::Webhook { .. } => commands::webhook::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // a test run must not depend on the user's config file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    log::debug!("database: {}", cfg.database);
    dispatch(&cli, &cfg)
}
