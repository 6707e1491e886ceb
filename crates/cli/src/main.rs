mod args;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use torfind_core::{load_config, validate_config, Finder, MaterializePhase};

use args::Cli;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report
    let json_logs = cli
        .log_json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let text_logs = (!cli.log_json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level().into()),
        )
        .with(json_logs)
        .with(text_logs)
        .init();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether every phase that ran completed.
fn run(cli: &Cli) -> Result<bool> {
    let config_path = cli.config_path();
    if let Some(path) = &config_path {
        info!("Loading configuration from {:?}", path);
    }
    let mut config = load_config(config_path.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    cli.apply(&mut config);

    validate_config(&config).context("Configuration validation failed")?;

    let finder = Finder::from_config(&config).context("Failed to set up normalizer")?;
    let report = finder.run(&config)?;

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        report::write_json(&mut stdout, &report)?;
    } else {
        report::write_text(&mut stdout, &report)?;
    }

    if let MaterializePhase::Aborted { destination, reason } = &report.materialize {
        error!("Invalid target directory {}: {}", destination.display(), reason);
    }

    Ok(report.is_success())
}
