//! COVID-19 Dashboard Server
//!
//! Run with: cargo run -- [--config PATH]
//!
//! Fetches the data once, builds the page, then serves it until Ctrl+C.
//! See [`covid_dashboard::config`] for the config file and the
//! `COVID_DASHBOARD_*` environment overrides. `RUST_LOG` overrides the
//! configured log level.

use anyhow::Context;
use clap::Parser;
use covid_dashboard::config::{generate_default_config, Config, LogFormat, LoggingConfig};
use covid_dashboard::{load, serve, AppState, Dashboard, DiseaseShClient, PresentOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// COVID-19 Global Data Dashboard
#[derive(Parser, Debug)]
#[command(name = "covid-dashboard", version, about)]
struct Args {
    /// Config file (default: first of the standard locations that exists)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let (config, origin) = load_config(args.config.as_deref())?;

    init_logging(&config.logging);

    tracing::info!("COVID-19 Dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Configuration: {}", origin);
    tracing::info!("Countries endpoint: {}", config.source.countries_url);
    tracing::info!("Historical endpoint: {}", config.source.historical_url);

    // Fetch once, degrade to empty data on failure
    let client = DiseaseShClient::new(config.source.client_config())
        .context("Failed to create HTTP client")?;
    let (data, status) = load(&client).await;

    tracing::info!(
        cases = data.totals.cases,
        deaths = data.totals.deaths,
        recovered = data.totals.recovered,
        "Global totals"
    );

    let dashboard = Dashboard::build(
        data,
        &PresentOptions::default(),
        &config.server.plotly_js_url,
    )
    .context("Failed to render dashboard")?
    .with_status(status);

    if dashboard.is_degraded() {
        tracing::warn!("No data available; serving an empty dashboard");
    }

    let state = AppState::new(dashboard, config.server.clone());
    serve(state, &config.server).await?;

    tracing::info!("COVID-19 Dashboard stopped");
    Ok(())
}

/// Resolve the configuration before logging is up
///
/// Returns the config and a description of where it came from. An explicit
/// `--config` that fails to load is fatal; a broken file in a default
/// location is reported and skipped.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, String)> {
    if let Some(path) = explicit {
        let config = Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?;
        return Ok((config, format!("{:?}", path)));
    }

    let mut skipped = Vec::new();
    for path in Config::default_paths() {
        if !path.exists() {
            continue;
        }
        match Config::load_with_env(&path) {
            Ok(config) => return Ok((config, format!("{:?}", path))),
            Err(e) => skipped.push(e.to_string()),
        }
    }

    let origin = if skipped.is_empty() {
        "defaults with environment overrides".to_string()
    } else {
        format!(
            "defaults with environment overrides (skipped: {})",
            skipped.join("; ")
        )
    };
    Ok((Config::from_env(), origin))
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "covid_dashboard={},tower_http=info",
            config.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
