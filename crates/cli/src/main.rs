//! Catwatch CLI - Development database seeding.
//!
//! # Usage
//!
//! ```bash
//! # Reseed users
//! catwatch add users
//!
//! # Reseed issues
//! catwatch add issues
//!
//! # Mirror coupons to Stripe and reseed them
//! catwatch add coupons
//!
//! # Reseed users, issues and coupons
//! catwatch add all
//! ```
//!
//! # Commands
//!
//! - `add` - Replace a table with freshly generated fake data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catwatch_seed::SeedConfig;

mod commands;

use commands::add::{self, AppContext};

#[derive(Debug, Parser)]
#[command(name = "catwatch")]
#[command(author, version, about = "Catwatch development data tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replace tables with fake data
    Add {
        #[command(subcommand)]
        target: AddTarget,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum AddTarget {
    /// Reseed users
    Users,
    /// Reseed issues
    Issues,
    /// Mirror coupons to Stripe and reseed them
    Coupons,
    /// Reseed users, issues and coupons, in that order
    All,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SeedConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Log filter used when `RUST_LOG` is unset. The binary logs under `catwatch`.
const DEFAULT_LOG_FILTER: &str = "catwatch=info,catwatch_seed=info";

/// Build the subscriber. Log lines go to `writer`, keeping stdout for results.
fn subscriber<W>(
    env_filter: EnvFilter,
    json: bool,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Clone + Send + Sync + 'static,
{
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(writer.clone())
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(writer));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Use JSON format on Fly.io for structured log parsing, text format locally
    let is_fly = std::env::var("FLY_APP_NAME").is_ok();

    subscriber(env_filter, is_fly, std::io::stderr).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match SeedConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config);
    init_tracing();

    let result = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        // exit() skips destructors, so flush queued events first
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = AppContext::connect(config).await?;

    match cli.command {
        Commands::Add { target } => match target {
            AddTarget::Users => add::report(&add::users(&ctx).await?),
            AddTarget::Issues => add::report(&add::issues(&ctx).await?),
            AddTarget::Coupons => add::report(&add::coupons(&ctx).await?),
            AddTarget::All => {
                add::report(&add::users(&ctx).await?);
                add::report(&add::issues(&ctx).await?);
                add::report(&add::coupons(&ctx).await?);
            }
        },
    }
    Ok(())
}
