use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use storage::Database;
use storage::services::leaderboard::{self, LeaderboardConfig, MinorPolicy};
use storage::services::publication::{self, PublicationConfig, PublicationReport};
use storage::services::report;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod sink;

use sink::HttpBroadcastSink;

/// Closing lines appended to the published leaderboard; one is picked
/// per period.
const CLOSING_LINES: &[&str] = &[
    "Fantastic shooting this season — congratulations to everyone! A new period starts now, good luck! 🎯",
    "What a period! Every series submitted made the board stronger. On to the next one! 🧡",
    "Champions are made between seasons. The board is reset — go earn your spot! 🌿",
];

#[derive(Parser)]
#[command(name = "scoreboard-publish")]
#[command(about = "Publishes the tiered leaderboard and resets the scoring period", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Chat gateway endpoint the leaderboard text is posted to.
    #[arg(long, env = "BROADCAST_ENDPOINT")]
    endpoint: String,

    /// Comma-separated destination channel ids.
    #[arg(long, env = "BROADCAST_DESTINATIONS")]
    destinations: String,

    #[arg(long, env = "LEADERBOARD_TOP_N", default_value = "10")]
    top_n: usize,

    /// Rank minors in a protected bucket instead of leaving them out.
    #[arg(long, env = "MINOR_BUCKET")]
    minor_bucket: bool,

    /// Per-destination delivery timeout in seconds.
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Render the report to stdout without broadcasting or resetting.
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn parse_destinations(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("publisher={log_level},storage={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::new(&cli.database_url)
        .await
        .context("Failed to open database")?;
    db.init_schema().await.context("Failed to initialize schema")?;

    let config = PublicationConfig {
        destinations: parse_destinations(&cli.destinations),
        leaderboard: LeaderboardConfig {
            top_n: cli.top_n,
            minor_policy: if cli.minor_bucket {
                MinorPolicy::OwnBucket
            } else {
                MinorPolicy::Exclude
            },
        },
        closing_lines: CLOSING_LINES.iter().map(|s| s.to_string()).collect(),
    };

    if config.destinations.is_empty() && !cli.dry_run {
        anyhow::bail!("no broadcast destinations configured");
    }

    let now = Utc::now();

    if cli.dry_run {
        let view = leaderboard::load_and_rank(db.pool(), &config.leaderboard, None).await?;
        if view.is_empty() {
            println!("No results stored; nothing to publish.");
            return Ok(());
        }
        let closing = report::pick_closing_line(&config.closing_lines, now.timestamp() as u64);
        println!("{}", report::render_publication(&view, closing));
        return Ok(());
    }

    let sink = HttpBroadcastSink::new(cli.endpoint, Duration::from_secs(cli.timeout))
        .context("Failed to build broadcast client")?;

    let report = publication::run(db.pool(), &sink, &config, now)
        .await
        .context("Publication cycle failed")?;

    match &report {
        PublicationReport::NothingToPublish => {
            tracing::info!("nothing to publish, store left as is");
        }
        PublicationReport::Published {
            period,
            deliveries,
            archived,
        } => {
            let delivered = deliveries.iter().filter(|d| d.result.is_ok()).count();
            tracing::info!(
                period,
                archived,
                delivered,
                total = deliveries.len(),
                "leaderboard published and period reset"
            );
        }
        PublicationReport::BroadcastFailed { deliveries } => {
            tracing::error!(
                destinations = deliveries.len(),
                "every delivery failed; results kept for a retry"
            );
            anyhow::bail!("publication failed for all destinations");
        }
    }

    Ok(())
}
