//! Enigmatick timeline renderer entry point.

mod input;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use enigmatick_common::{Config, LoggingConfig};
use enigmatick_core::{RenderContext, Thread};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use crate::output::Format;

/// Render fetched Enigmatick timeline payloads as a threaded conversation.
#[derive(Debug, Parser)]
#[command(name = "enigmatick-timeline", version, about)]
struct Args {
    /// JSON file holding a collection page, an activity, or an array of activities
    #[arg(long, short)]
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Configuration file (default: config/ directory and ENIGMATICK__ variables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave remote media URLs untouched
    #[arg(long)]
    no_proxy: bool,
}

/// Install the global subscriber, writing to stderr.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::load().context("loading configuration")?,
    };
    config.validate().context("invalid configuration")?;
    if args.no_proxy {
        config.render.proxy_media = false;
    }

    init_tracing(&config.logging);

    let activities = input::read_activities(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let ctx = RenderContext::from_config(&config.render, Utc::now());
    let mut thread = Thread::new();
    let summary = thread.ingest_activities(activities, &ctx);
    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        malformed = summary.malformed,
        rejected = summary.rejected,
        orphaned = thread.orphans().count(),
        "Timeline ingested"
    );

    let rendered = thread.render(&ctx);
    print!("{}", output::format_thread(&rendered, args.format)?);
    Ok(())
}
