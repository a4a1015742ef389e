//! Pressure map driver.
//!
//! Fetches readings, bins them for a viewport and writes the colored draw
//! list as JSON for a map host to draw.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pressure_common::{BoundingBox, MapConfig, MapResult, Reading, Viewport};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use pressure_map::{
    FileReadingsSource, HttpReadingsSource, MapSession, ReadingsSource, RequestId, ServiceConfig,
};

/// Pressure map driver
#[derive(Parser, Debug)]
#[command(name = "pressure-map")]
#[command(about = "Bin geotagged pressure readings into a colored geohash grid")]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// YAML file with binning and rendering settings
    #[arg(long, env = "MAP_CONFIG")]
    map_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch once, render once
    Render(RunArgs),

    /// Re-fetch on an interval; viewport changes are read from stdin as JSON lines
    Watch {
        #[command(flatten)]
        run: RunArgs,

        /// Seconds between fetches
        #[arg(long, env = "REFRESH_SECS")]
        refresh_secs: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Readings service URL
    #[arg(long, env = "READINGS_URL")]
    url: Option<String>,

    /// JSON file of readings; takes precedence over --url
    #[arg(long)]
    file: Option<PathBuf>,

    /// Viewport as min_lon,min_lat,max_lon,max_lat
    #[arg(long, default_value = "-180,-90,180,90", allow_hyphen_values = true)]
    bbox: String,

    /// Map zoom level
    #[arg(long, default_value_t = 3)]
    zoom: i32,

    /// Maximum readings per fetch
    #[arg(long, env = "READINGS_LIMIT")]
    limit: Option<usize>,

    /// Fetch window in seconds back from now
    #[arg(long, env = "READINGS_WINDOW_SECS")]
    window_secs: Option<u64>,

    /// Write the draw list here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ServiceConfig::from_env();
    if let Some(path) = &cli.map_config {
        config.map = MapConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load map config from {}", path.display()))?;
    }

    match cli.command {
        Command::Render(args) => {
            apply_overrides(&mut config, &args);
            render_once(config, args).await
        }
        Command::Watch { run, refresh_secs } => {
            apply_overrides(&mut config, &run);
            if let Some(secs) = refresh_secs {
                config.refresh_secs = secs;
            }
            watch(config, run).await
        }
    }
}

fn apply_overrides(config: &mut ServiceConfig, args: &RunArgs) {
    if let Some(url) = &args.url {
        config.readings_url = Some(url.clone());
    }
    if let Some(limit) = args.limit {
        config.limit = limit;
    }
    if let Some(secs) = args.window_secs {
        config.window_secs = secs;
    }
}

fn build_source(config: &ServiceConfig, args: &RunArgs) -> Result<Arc<dyn ReadingsSource>> {
    if let Some(path) = &args.file {
        return Ok(Arc::new(FileReadingsSource::new(path)));
    }

    match &config.readings_url {
        Some(url) => Ok(Arc::new(HttpReadingsSource::new(
            url.clone(),
            config.request_timeout(),
        )?)),
        None => bail!("No readings source: pass --url, --file or set READINGS_URL"),
    }
}

fn parse_viewport(args: &RunArgs) -> Result<Viewport> {
    let bounds = BoundingBox::from_query_string(&args.bbox)
        .with_context(|| format!("Invalid --bbox '{}'", args.bbox))?;
    Ok(Viewport::new(bounds.clamp_to_valid(), args.zoom))
}

async fn write_snapshot(session: &MapSession, output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(&session.snapshot())?;
    match output {
        Some(path) => tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

async fn render_once(config: ServiceConfig, args: RunArgs) -> Result<()> {
    let source = build_source(&config, &args)?;
    let viewport = parse_viewport(&args)?;
    let query = config.fetch_query();

    let mut session = MapSession::new(config.map.clone())?;
    session.set_viewport(viewport)?;

    info!(source = %source.describe(), "Loading readings");
    let outcome = session.load(source.as_ref(), &query).await?;
    info!(?outcome, "Load finished");

    write_snapshot(&session, args.output.as_ref()).await
}

async fn watch(config: ServiceConfig, args: RunArgs) -> Result<()> {
    let source = build_source(&config, &args)?;
    let mut session = MapSession::new(config.map.clone())?;
    session.set_viewport(parse_viewport(&args)?)?;

    // Fetches run in the background; completions come back tagged with their request id
    let (tx, mut rx) = mpsc::channel::<(RequestId, MapResult<Vec<Reading>>)>(8);
    let mut ticker = tokio::time::interval(config.refresh_interval());
    let mut viewport_events = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    info!(
        source = %source.describe(),
        refresh_secs = config.refresh_secs,
        "Watching readings"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let id = session.begin_load();
                let query = config.fetch_query();
                let source = Arc::clone(&source);
                let tx = tx.clone();

                tokio::spawn(async move {
                    let result = source.fetch(&query).await;
                    let _ = tx.send((id, result)).await;
                });
            }
            Some((id, result)) = rx.recv() => {
                session.complete_load(id, result)?;
                write_snapshot(&session, args.output.as_ref()).await?;
            }
            line = viewport_events.next_line(), if stdin_open => {
                match line? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => match serde_json::from_str::<Viewport>(&line) {
                        Ok(viewport) => {
                            session.set_viewport(viewport)?;
                            write_snapshot(&session, args.output.as_ref()).await?;
                        }
                        Err(e) => warn!(error = %e, "Ignoring malformed viewport event"),
                    },
                    None => stdin_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
