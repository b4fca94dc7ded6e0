mod cli;
mod config;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use entry_engine::{loader, EntryEngine};

use crate::cli::Cli;
use crate::config::Format;

fn main() -> Result<()> {
    // 1. Parse CLI args.
    let cli = Cli::parse();

    // 2. Load config, then merge CLI overrides.
    let (mut cfg, config_found) = config::load(&cli.config)?;

    if let Some(ref watchlist) = cli.watchlist {
        cfg.watchlist_file = watchlist.clone();
    }
    if let Some(ref countries) = cli.countries {
        cfg.countries_file = countries.clone();
    }
    if cli.json {
        cfg.output.format = Format::Json;
    }

    // 3. Init tracing-subscriber on stderr; stdout carries only decisions.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    match cfg.logging.format {
        Format::Json => subscriber.json().init(),
        Format::Text => subscriber.init(),
    }

    if !config_found {
        warn!(
            path = %cli.config.display(),
            "configuration file not found; using defaults"
        );
    }

    info!(
        config_file = %cli.config.display(),
        entries = %cli.entries.display(),
        watchlist = %cfg.watchlist_file.display(),
        countries = %cfg.countries_file.display(),
        "kanadia starting"
    );

    // 4. Load the three inputs.
    let entries = loader::load_entries(&cli.entries).context("failed to load entry records")?;
    let watchlist =
        loader::load_watchlist(&cfg.watchlist_file).context("failed to load watchlist")?;
    let countries =
        loader::load_countries(&cfg.countries_file).context("failed to load country table")?;

    // 5. Decide.
    let engine = match cli.today {
        Some(today) => EntryEngine::on(&watchlist, &countries, today),
        None => EntryEngine::new(&watchlist, &countries),
    };
    let decisions = engine.explain(&entries);

    info!(
        records = decisions.len(),
        today = %engine.today(),
        "screening complete"
    );

    // 6. Report.
    let out = report::render(&decisions, cfg.output.format, cli.explain)?;
    if !out.is_empty() {
        println!("{out}");
    }

    Ok(())
}
