//! +EV Sports Betting Alert Bot
//!
//! Compares soft bookmaker odds against Pinnacle and alerts on positive EV.

use clap::{Parser, Subcommand};
use evscan::{
    config::Config,
    feed::{GamdomFeed, OddsApiFeed, RainbetFeed, SharpFeed, SoftFeed},
    ledger::AlertLedger,
    notify::{DiscordNotifier, DisabledNotifier, Notify},
    scanner::Scanner,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "evscan")]
#[command(about = "Positive-EV sports betting alert bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the alert bot loop
    Run,
    /// Run a single scan cycle and print the report
    Scan,
    /// Show alert ledger status
    Status,
    /// Test Discord notification
    TestNotify,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run => run_bot(config).await,
        Commands::Scan => run_single_scan(config).await,
        Commands::Status => show_status(config).await,
        Commands::TestNotify => test_notify(config).await,
    }
}

fn build_notifier(config: &Config) -> anyhow::Result<Box<dyn Notify>> {
    match &config.discord {
        Some(discord) => Ok(Box::new(DiscordNotifier::new(discord.webhook_url.clone())?)),
        None => {
            tracing::warn!("Discord not configured, notifications disabled");
            Ok(Box::new(DisabledNotifier))
        }
    }
}

fn build_soft_feeds(config: &Config) -> anyhow::Result<Vec<Box<dyn SoftFeed>>> {
    let mut feeds: Vec<Box<dyn SoftFeed>> = Vec::new();
    if let Some(gamdom) = &config.gamdom {
        feeds.push(Box::new(GamdomFeed::new(gamdom)?));
        tracing::info!("Gamdom feed enabled ({} leagues)", gamdom.leagues.len());
    }
    if let Some(rainbet) = &config.rainbet {
        feeds.push(Box::new(RainbetFeed::new(rainbet)?));
        tracing::info!("Rainbet feed enabled");
    }
    if feeds.is_empty() {
        tracing::warn!("no soft feeds configured");
    }
    Ok(feeds)
}

fn build_sharp_feed(config: &Config) -> anyhow::Result<Option<Box<dyn SharpFeed>>> {
    match &config.odds_api {
        Some(odds_api) => {
            tracing::info!("sharp feed enabled ({} sports)", odds_api.sports.len());
            Ok(Some(Box::new(OddsApiFeed::new(odds_api)?)))
        }
        None => {
            tracing::warn!("The Odds API not configured, sharp feed disabled");
            Ok(None)
        }
    }
}

async fn build_scanner(config: &Config) -> anyhow::Result<Scanner> {
    let ledger = AlertLedger::connect(&config.database.path).await?;
    Ok(Scanner::new(
        config.strategy.clone(),
        build_soft_feeds(config)?,
        build_sharp_feed(config)?,
        ledger,
        build_notifier(config)?,
    ))
}

async fn run_bot(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting EV scan bot (min EV {}, every {} min)",
        config.strategy.min_ev,
        config.strategy.scan_interval_mins
    );

    let scanner = build_scanner(&config).await?;
    scanner.run_forever().await;
    Ok(())
}

async fn run_single_scan(config: Config) -> anyhow::Result<()> {
    let scanner = build_scanner(&config).await?;
    let report = scanner.run_cycle().await?;

    println!("\n📊 Scan Report\n");
    println!("Soft records:  {}", report.soft_records);
    println!("Sharp lines:   {}", report.sharp_lines);
    println!("Matched:       {}", report.matched);
    println!("Alerts sent:   {}", report.alerts_sent);
    println!("Suppressed:    {}", report.suppressed);
    println!("Skipped:       {}", report.skipped);

    Ok(())
}

async fn show_status(config: Config) -> anyhow::Result<()> {
    let ledger = AlertLedger::connect(&config.database.path).await?;
    let count = ledger.count().await?;

    println!("\n🗄 Alert Ledger\n");
    println!("Database: {}", config.database.path);
    println!("Alerts recorded: {}", count);

    Ok(())
}

async fn test_notify(config: Config) -> anyhow::Result<()> {
    let discord = config
        .discord
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Discord not configured in config.toml"))?;

    let notifier = DiscordNotifier::new(discord.webhook_url.clone())?;
    notifier
        .send("🧪 Test notification — if you see this, the webhook works!")
        .await?;

    println!("✅ Test notification sent!");
    Ok(())
}
