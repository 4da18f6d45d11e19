//! rattendance library root.
//! Attendance ledger, break tracker, overtime scanner and payroll
//! aggregator behind a CLI that stands in for the chat front end.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod notify;
pub mod scheduler;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::Ctx;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &Ctx) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, ctx.cfg),
        Commands::Register { .. }
        | Commands::In
        | Commands::Out
        | Commands::Toilet
        | Commands::Smoke
        | Commands::Leave { .. }
        | Commands::Resign
        | Commands::Status => cli::commands::employee::handle(&cli.command, ctx),
        Commands::SetWork { .. }
        | Commands::SetOff { .. }
        | Commands::SetSalary { .. }
        | Commands::SetBonus { .. }
        | Commands::SetToilet { .. }
        | Commands::SetSmoke { .. }
        | Commands::Fire { .. }
        | Commands::SetAdmin { .. } => cli::commands::admin::handle(&cli.command, ctx),
        Commands::ReportDay { .. } | Commands::ReportMonth { .. } => {
            cli::commands::report::handle(&cli.command, ctx)
        }
        Commands::Scan | Commands::Watch => cli::commands::watch::handle(&cli.command, ctx),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, ctx),
    }
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` wins over the config.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if cli.owner.is_some() {
        cfg.owner_id = cli.owner;
    }

    init_tracing(&cfg.log_filter);

    let ctx = Ctx::from_cli(&cli, &cfg)?;
    dispatch(&cli, &ctx)
}
