//! HTTP server command
//!
//! Runs the intake API against Postgres, or a process-local store with
//! `--in-memory`.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use intake_server::db::{create_pool_with_options, migrations};
use intake_server::{run_server, AppState};

use crate::config::{IntakeConfig, Overrides};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Keep records in process memory instead of Postgres (lost on exit)
    #[arg(long, conflicts_with_all = ["max_connections", "skip_migrations"])]
    pub in_memory: bool,

    /// Don't create tables on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let settings = IntakeConfig::load()?.resolve(Overrides {
        bind: args.bind,
        cors_permissive: args.cors_permissive,
        database_url: args.database_url,
        max_connections: args.max_connections,
    });

    let state = if args.in_memory {
        tracing::warn!("Using in-memory store - records are lost on shutdown");
        AppState::in_memory()
    } else {
        let database_url = settings.database_url.as_deref().context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or the config file",
        )?;

        let pool = create_pool_with_options(database_url, settings.max_connections)
            .await
            .context("Failed to create database pool")?;

        if !args.skip_migrations {
            migrations::run(&pool)
                .await
                .context("Failed to run migrations")?;
        }

        AppState::postgres(pool)
    };

    tracing::info!("Starting intake server on {}", settings.bind);

    // Blocks until shutdown
    run_server(state, settings.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
