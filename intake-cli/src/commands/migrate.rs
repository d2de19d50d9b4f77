//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use intake_server::db::{create_pool, migrations};

use crate::config::{IntakeConfig, Overrides};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Create the intake tables if they don't exist
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let settings = IntakeConfig::load()?.resolve(Overrides {
        database_url: args.database_url,
        ..Default::default()
    });
    let database_url = settings
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or the config file")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
