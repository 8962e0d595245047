//! `allotment` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the API server.
//! - `check`   — probe the store by listing plots.
//! - `migrate` — create the allotment tables (direct Postgres only).

use anyhow::Context;
use api::AppState;
use clap::{Parser, Subcommand};
use db::{
    executor::{execute, OnEmpty},
    Table,
};
use tracing::{info, warn};

mod config;
mod logging;

use config::Config;

#[derive(Parser)]
#[command(
    name = "allotment",
    about = "REST API for allotment plot management",
    version
)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "ALLOTMENT_BIND", default_value = "0.0.0.0:8000")]
        bind: String,
    },
    /// Check that the store is reachable and report how many plots it holds.
    Check,
    /// Run pending database migrations against `--database-url`.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.config.mode);
    info!(mode = %cli.config.mode, "allotment {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Serve { bind } => {
            let gateway = cli.config.gateway().await.context("failed to set up store gateway")?;
            info!("Starting API server on {bind}");
            api::serve(&bind, AppState::from_arc(gateway), shutdown_signal()).await?;
            info!("API server stopped");
        }
        Command::Check => {
            let gateway = cli.config.gateway().await.context("failed to set up store gateway")?;
            let rows = execute(gateway.select_all(Table::Plots), OnEmpty::Allow).await?;
            info!("Store reachable: {} row(s) in {}", rows.len(), Table::Plots);
        }
        Command::Migrate => {
            let database_url = cli
                .config
                .database_url
                .as_deref()
                .context("migrate needs --database-url / DATABASE_URL")?;
            let pool = db::pool::create_pool(database_url, 2)
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool).await.context("migration failed")?;
            info!("Migrations applied successfully");
        }
    }

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received");
}
