//! Pillarwise command-line entry point.
//!
//! ```text
//! pillarwise serve --database-url postgres://localhost/pillarwise
//! pillarwise migrate
//! pillarwise recalculate --granularity weekly --from 2024-01-01 --to 2024-03-31
//! ```
//!
//! Every flag also reads from its environment variable; see `--help`.

use clap::Parser;
use mockable::DefaultClock;
use pillarwise::app::{Services, Stores};
use pillarwise::config::{AppConfig, Cli, Command, ConfigError, DatabaseArgs, DatabaseConfig};
use pillarwise::db::{self, DatabaseSetupError, PgPool};
use pillarwise::http;
use pillarwise::telemetry::{self, TelemetryError};
use pillarwise::tracking::services::TrackingServiceError;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info};

/// Errors that end the process.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Database(#[from] DatabaseSetupError),
    #[error("runtime init failed: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("server failed: {0}")]
    Server(#[source] std::io::Error),
    #[error(transparent)]
    Recalculate(#[from] TrackingServiceError),
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_filter)?;
    run(cli.command).inspect_err(|err| error!(error = %err, "pillarwise exited with an error"))
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Serve { database, bind } => serve(&database, bind),
        Command::Migrate { database } => {
            let pool = prepare_database(&database.validate()?)?;
            let history = db::applied_migrations(&pool)?;
            info!(
                current = history.iter().max().map(String::as_str),
                versions = ?history,
                "schema version"
            );
            Ok(())
        }
        Command::Recalculate {
            database,
            granularity,
            from,
            to,
        } => {
            let pool = prepare_database(&database.validate()?)?;
            let services = Services::new(&Stores::postgres(&pool), Arc::new(DefaultClock));
            let summaries = build_runtime()?
                .block_on(services.reconciler.recalculate_range(granularity, from, to))?;
            info!(
                granularity = %granularity,
                %from,
                %to,
                periods = summaries.len(),
                "recalculated cached summaries"
            );
            Ok(())
        }
    }
}

fn serve(database: &DatabaseArgs, bind: SocketAddr) -> Result<(), CliError> {
    let config = AppConfig::from_args(database, bind)?;
    let pool = prepare_database(&config.database)?;
    let state = Arc::new(Services::new(&Stores::postgres(&pool), Arc::new(DefaultClock)));
    let app = http::router(state);

    build_runtime()?.block_on(async move {
        let listener = TcpListener::bind(config.bind)
            .await
            .map_err(CliError::Server)?;
        info!(address = %config.bind, "listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(CliError::Server)
    })
}

fn prepare_database(config: &DatabaseConfig) -> Result<PgPool, CliError> {
    let pool = db::connect(&config.url, config.pool_size)?;
    let applied = db::run_pending_migrations(&pool)?;
    if applied.is_empty() {
        info!("schema is up to date");
    } else {
        info!(migrations = ?applied, "applied pending migrations");
    }
    Ok(pool)
}

fn build_runtime() -> Result<Runtime, CliError> {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
