//! Command-line and environment configuration.
//!
//! Every option can come from a flag or its environment variable; flags win.

use crate::tracking::domain::{Granularity, ParseGranularityError};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use thiserror::Error;

/// Default tracing filter when neither `RUST_LOG` nor `--log-filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,pillarwise=debug";

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "pillarwise")]
#[command(version, about = "Pillar-based time allocation tracker", long_about = None)]
pub struct Cli {
    /// Tracing filter directive, overridden by `RUST_LOG` when present.
    #[arg(long, env = "PILLARWISE_LOG", default_value = DEFAULT_LOG_FILTER, global = true)]
    pub log_filter: String,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply pending migrations, then serve the HTTP API.
    Serve {
        /// Database connection settings.
        #[command(flatten)]
        database: DatabaseArgs,

        /// Socket address to listen on.
        #[arg(long, env = "PILLARWISE_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },

    /// Apply pending migrations and report the schema version.
    Migrate {
        /// Database connection settings.
        #[command(flatten)]
        database: DatabaseArgs,
    },

    /// Re-derive cached summaries for every period in a date range.
    Recalculate {
        /// Database connection settings.
        #[command(flatten)]
        database: DatabaseArgs,

        /// Period granularity to recalculate.
        #[arg(short, long, value_parser = parse_granularity)]
        granularity: Granularity,

        /// First date of the range (`YYYY-MM-DD`).
        #[arg(long)]
        from: NaiveDate,

        /// Last date of the range (`YYYY-MM-DD`).
        #[arg(long)]
        to: NaiveDate,
    },
}

/// Raw database options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections.
    #[arg(long, env = "PILLARWISE_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,
}

/// Validated database settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum pooled connections, at least one.
    pub pool_size: u32,
}

/// Validated settings for the `serve` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Listen address.
    pub bind: SocketAddr,
}

/// Configuration values that parse but make no sense.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The database URL is blank.
    #[error("database URL must not be empty")]
    MissingDatabaseUrl,

    /// The pool cannot hold any connection.
    #[error("pool size must be at least 1")]
    EmptyPool,
}

impl DatabaseArgs {
    /// Validates the raw options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a blank URL or an empty pool.
    pub fn validate(&self) -> Result<DatabaseConfig, ConfigError> {
        let url = self.database_url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        Ok(DatabaseConfig {
            url: url.to_owned(),
            pool_size: self.pool_size,
        })
    }
}

impl AppConfig {
    /// Validates the options of the `serve` command.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database options are invalid.
    pub fn from_args(database: &DatabaseArgs, bind: SocketAddr) -> Result<Self, ConfigError> {
        Ok(Self {
            database: database.validate()?,
            bind,
        })
    }
}

fn parse_granularity(value: &str) -> Result<Granularity, ParseGranularityError> {
    Granularity::try_from(value)
}
