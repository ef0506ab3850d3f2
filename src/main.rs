mod console;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use signal_desk::config::Config;
use signal_desk::feed::{BrokerRadarClient, PriceFeed, RefreshScheduler};
use signal_desk::generator::{SignalGenerator, SignalRequest};
use signal_desk::models::Mode;

use crate::console::Console;

#[derive(Parser, Debug)]
#[command(author, version, about = "Support/resistance signal desk over a live bid/ask feed")]
struct Args {
    /// Timeframe label attached to each signal
    #[arg(short, long, default_value = "M15")]
    timeframe: String,

    /// Decision mode: normal or aggressive
    #[arg(short, long, default_value = "normal")]
    mode: Mode,

    /// First price level (order does not matter)
    #[arg(long, allow_negative_numbers = true)]
    level_a: Option<f64>,

    /// Second price level
    #[arg(long, allow_negative_numbers = true)]
    level_b: Option<f64>,

    /// Current price; the feed's mid-price is used when omitted
    #[arg(short, long)]
    price: Option<f64>,

    /// Instrument symbol to track
    #[arg(long, env = "QUOTE_SYMBOL")]
    symbol: Option<String>,

    /// Generate one signal and exit
    #[arg(long)]
    once: bool,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = Config::from_env();
    if let Some(symbol) = &args.symbol {
        cfg.symbol = symbol.clone();
    }

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let source = BrokerRadarClient::new(&cfg).context("Failed to build quote client")?;
    info!("Quote source: {}", source.url());
    info!("Symbol: {}", cfg.symbol);

    let feed = Arc::new(PriceFeed::new(Arc::new(source), cfg.symbol.clone()));
    let generator = SignalGenerator::new(Arc::clone(&feed));

    let defaults = SignalRequest {
        timeframe: args.timeframe,
        mode: args.mode,
        price_input: args.price,
        level_a: args.level_a,
        level_b: args.level_b,
    };

    if args.once {
        let report = generator.generate(defaults).await;
        console::print_report(&report, args.json)?;
        return Ok(());
    }

    let refresh = RefreshScheduler::start(feed, cfg.refresh_interval());
    let mut console = Console::new(generator, defaults, args.json);
    console.run().await?;
    refresh.stop();

    Ok(())
}
