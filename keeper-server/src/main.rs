//! # Keeper Server
//!
//! Runs one of the two Keeper services per process:
//!
//! - `keeper-server favorites`: JSON favorites registry and catalog proxy
//! - `keeper-server feedback`: feedback form intake and static pages
//!
//! Maintenance commands: `db migrate` applies the favorites schema and
//! `sweep` removes stale staged feedback once.

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use axum::Router;
use clap::{Args as ClapArgs, Parser, Subcommand};
use keeper_config::{Config, ConfigLoad, ConfigLoader};
use keeper_core::{StagedFileStore, infrastructure::postgres};
use keeper_server::{
    infra::{
        shutdown::shutdown_signal,
        startup::{
            build_favorites_state, build_feedback_state, connect_database,
            feedback_namespace,
        },
        sweeper::spawn_staging_sweeper,
    },
    routes,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "keeper-server")]
#[command(about = "Favorites registry and feedback intake services")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "KEEPER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Listen port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Listen host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the favorites JSON API
    Favorites(ServeArgs),
    /// Serve the feedback form and pages
    Feedback(ServeArgs),
    #[command(subcommand)]
    Db(DbCommand),
    /// Remove stale staged feedback and exit
    Sweep {
        /// Staged file age in seconds before removal (overrides config)
        #[arg(long)]
        max_age_secs: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_runtime_config(cli.config.clone())?;

    match cli.command {
        Command::Favorites(args) => run_favorites(config, args).await,
        Command::Feedback(args) => run_feedback(config, args).await,
        Command::Db(DbCommand::Migrate) => run_db_migrate(&config).await,
        Command::Sweep { max_age_secs } => {
            let max_age = max_age_secs
                .map(Duration::from_secs)
                .unwrap_or(config.feedback.staging_max_age);
            run_sweep(&config, max_age).await
        }
    }
}

fn load_runtime_config(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad { config, warnings } =
        loader.load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "loaded config file");
    }

    if !warnings.is_empty() {
        warn!(count = warnings.len(), "configuration loaded with warnings");
        for warning in warnings.iter() {
            match &warning.hint {
                Some(hint) => warn!(
                    message = %warning.message,
                    hint = %hint,
                    "configuration warning"
                ),
                None => {
                    warn!(message = %warning.message, "configuration warning")
                }
            }
        }
    }

    Ok(config)
}

fn listen_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))
}

async fn serve(router: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn run_favorites(config: Config, args: ServeArgs) -> anyhow::Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.favorites_port);
    let addr = listen_addr(&host, port)?;

    let state = build_favorites_state(&config).await?;
    let router = routes::create_favorites_router(state);

    info!("Starting favorites service on {addr}");
    serve(router, addr).await?;
    info!("favorites service stopped");
    Ok(())
}

async fn run_feedback(config: Config, args: ServeArgs) -> anyhow::Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.feedback_port);
    let addr = listen_addr(&host, port)?;

    let state = build_feedback_state(&config).await?;
    let sweeper = spawn_staging_sweeper(
        state.store.clone(),
        config.feedback.staging_max_age,
        config.feedback.sweep_interval,
    );

    let router = routes::create_feedback_router(
        state,
        &config.feedback.pages_path(),
        &config.feedback.public_path(),
        &config.feedback.static_path(),
    );

    info!("Starting feedback service on {addr}");
    let result = serve(router, addr).await;
    sweeper.abort();
    info!("feedback service stopped");
    result
}

async fn run_db_migrate(config: &Config) -> anyhow::Result<()> {
    let pool = connect_database(config).await?;
    postgres::migrate(&pool)
        .await
        .context("failed to apply database migrations")?;
    info!("Database migrations applied");
    Ok(())
}

async fn run_sweep(config: &Config, max_age: Duration) -> anyhow::Result<()> {
    let namespace = feedback_namespace(config);
    namespace
        .ensure_dirs()
        .await
        .context("failed to prepare feedback directories")?;
    let store = StagedFileStore::new(Arc::new(namespace));

    let removed = store
        .sweep_stale(max_age)
        .await
        .context("staging sweep failed")?;
    info!(removed, max_age_secs = max_age.as_secs(), "staging sweep finished");
    Ok(())
}
