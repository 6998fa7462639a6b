//! CLI command definitions and dispatch.

pub mod config;
pub mod instance;
pub mod migrate;
pub mod session;

use clap::{Parser, Subcommand};

use videotime_api::AppState;
use videotime_api::state::Stores;
use videotime_core::config::AppConfig;
use videotime_core::error::AppError;
use videotime_database::DatabasePool;

use crate::output::OutputFormat;

/// Video Time: watch-progress tracking administration
#[derive(Debug, Parser)]
#[command(name = "videotime", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Watch session reports and erasure
    Sessions(session::SessionArgs),
    /// Video instance settings
    Instance(instance::InstanceArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Sessions(args) => session::execute(args, &self.config, self.format).await,
            Commands::Instance(args) => instance::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_from(config_path)
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: wire the services over the configured store
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let stores = Stores::from_config(&config).await?;
    AppState::build(config, stores).await
}

/// Helper: ask before destructive operations unless `--force` was given
pub fn confirm(prompt: &str, force: bool) -> Result<bool, AppError> {
    if force {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
