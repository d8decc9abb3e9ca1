//! `surfsup` server entry point.
//!
//! # Responsibility
//! - Load configuration and start logging before anything else.
//! - Validate the store once, then serve HTTP until interrupted.

mod demo;
mod settings;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use surfsup_api::AppState;
use surfsup_core::{
    core_version, init_logging, ClimateService, DatasetSummary, SqliteClimateRepository, Store,
};

#[derive(Debug, Parser)]
#[command(name = "surfsup", version, about = "Read-only HTTP API over a climate observation store")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Open the store and print a dataset summary.
    Check {
        /// Print the summary as one JSON object.
        #[arg(long)]
        json: bool,
    },
    /// Write a synthetic demo store to PATH.
    SeedDemo { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings =
        settings::load_settings(cli.config.as_deref()).context("failed to load configuration")?;

    init_logging(&settings.logging.level, settings.logging.dir.as_deref())
        .map_err(|err| anyhow!(err))
        .context("failed to initialize logging")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&settings),
        Command::Check { json } => check(&settings, json),
        Command::SeedDemo { path } => {
            let rows = demo::seed_demo_store(&path)?;
            println!("surfsup demo store={} measurements={rows}", path.display());
            Ok(())
        }
    }
}

fn serve(settings: &settings::Settings) -> anyhow::Result<()> {
    let store = Store::open(&settings.database.path).with_context(|| {
        format!(
            "failed to open climate store `{}`",
            settings.database.path.display()
        )
    })?;
    let state = AppState::new(store).with_error_details(settings.api.expose_error_details);
    let addr = settings.server.socket_addr();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build async runtime")?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!("event=server_start module=cli status=ok version={}", core_version());
        surfsup_api::serve(listener, state)
            .await
            .context("http server failed")
    })
}

fn check(settings: &settings::Settings, json: bool) -> anyhow::Result<()> {
    let store = Store::open(&settings.database.path).with_context(|| {
        format!(
            "failed to open climate store `{}`",
            settings.database.path.display()
        )
    })?;
    let conn = store.connect()?;
    let summary = ClimateService::new(SqliteClimateRepository::new(&conn)).summary()?;

    if json {
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!("surfsup version={}", core_version());
    println!("store path={}", store.path().display());
    println!("{}", summary_line(&summary));
    Ok(())
}

fn summary_line(summary: &DatasetSummary) -> String {
    format!(
        "store latest_date={} stations={} measurements={}",
        summary
            .latest_date
            .map_or_else(|| "none".to_string(), |date| date.to_string()),
        summary.station_count,
        summary.measurement_count
    )
}
