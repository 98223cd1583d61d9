//! PerpX CLI binary
//!
//! Entry point for the venue: pricing one-off quotes, validating and
//! generating configuration, and running a scripted demo session against
//! the in-memory matching core.

use anyhow::{bail, Context, Result};
use cli::{Cli, Commands};
use common::{OptionType, Side, Symbol};
use config::{generate_default_config, load_config, save_config, validate_config, VenueConfig};
use market_data::{quote_option, InMemoryPriceFeed, PriceSource, PricingParams, QuoteInputs};
use matching_engine::BookRegistry;
use observability::{init_logging, LogFormat};
use session::TradingSession;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let format: LogFormat = cli
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    init_logging("perpx", format)?;

    match cli.command {
        Commands::Quote {
            asset,
            strike,
            spot,
            volatility,
            rate,
            config,
        } => quote_command(&asset, strike, spot, volatility, rate, config),
        Commands::Demo { config } => demo_command(config).await,
        Commands::Validate { config } => validate_command(config),
        Commands::Init { output } => init_command(output),
    }
}

fn load_valid_config<P: AsRef<Path>>(path: P) -> Result<VenueConfig> {
    let config = load_config(path)?;
    let report = validate_config(&config);

    for warning in &report.warnings {
        warn!("Configuration warning: {warning}");
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!("Configuration error: {error}");
        }
        bail!("configuration is invalid ({} errors)", report.errors.len());
    }
    Ok(config)
}

fn quote_command(
    asset: &str,
    strike: f64,
    spot: Option<f64>,
    volatility: Option<f64>,
    rate: Option<f64>,
    config_path: std::path::PathBuf,
) -> Result<()> {
    let config = load_valid_config(config_path)?;
    let entry = config
        .supported_assets
        .iter()
        .find(|a| a.symbol.eq_ignore_ascii_case(asset))
        .with_context(|| format!("asset {asset} is not configured"))?;

    let quote = quote_option(QuoteInputs {
        spot: spot.unwrap_or(entry.base_price),
        strike,
        volatility: volatility.unwrap_or(config.pricing.default_volatility),
        rate: rate.unwrap_or(config.pricing.default_risk_free_rate),
    })?;

    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

/// Scripted walkthrough: two sessions cross on one instrument, the spot
/// moves, and the buyer settles and exercises.
async fn demo_command(config_path: std::path::PathBuf) -> Result<()> {
    let config = load_valid_config(config_path)?;
    let asset = config
        .supported_assets
        .iter()
        .find(|a| a.enabled)
        .context("no enabled assets in configuration")?;

    info!(venue = %config.venue.name, asset = %asset.symbol, "Starting demo");

    let feed = Arc::new(InMemoryPriceFeed::new());
    for a in config.supported_assets.iter().filter(|a| a.enabled) {
        feed.seed(a.symbol.as_str(), a.base_price);
    }

    let registry = Arc::new(BookRegistry::new());
    let params = PricingParams {
        volatility: config.pricing.default_volatility,
        rate: config.pricing.default_risk_free_rate,
    };
    let maker = TradingSession::new(
        asset.symbol.as_str(),
        Arc::clone(&registry),
        Arc::clone(&feed) as Arc<dyn PriceSource>,
        params,
    );
    let taker = TradingSession::new(
        asset.symbol.as_str(),
        Arc::clone(&registry),
        Arc::clone(&feed) as Arc<dyn PriceSource>,
        params,
    );

    let strike = asset.base_price;

    let contract = maker.quote(strike).await?;
    println!("quote: {}", serde_json::to_string_pretty(&contract)?);

    // Maker rests a sell; the taker's buy crosses it at the same premium.
    maker
        .open_position(strike, OptionType::Call, Side::Sell, 5)
        .await?;
    let trade = taker
        .open_position(strike, OptionType::Call, Side::Buy, 3)
        .await?;
    println!("trade: {}", serde_json::to_string_pretty(&trade)?);

    let book = taker.book(strike, OptionType::Call, config.book.snapshot_depth);
    println!("book: {}", serde_json::to_string_pretty(&book)?);

    // Move the market and close out.
    let symbol = Symbol::new(asset.symbol.as_str());
    feed.update_price(&symbol, asset.base_price * 1.04)?;

    if let Some(position) = trade.position {
        let settlement = taker.settle(position.id).await?;
        println!("settlement: {}", serde_json::to_string_pretty(&settlement)?);
    }

    let metrics = registry.metrics();
    info!(
        orders = metrics.orders_received,
        trades = metrics.trades_executed,
        contracts = metrics.contracts_traded,
        "Demo finished"
    );
    Ok(())
}

fn validate_command(config_path: std::path::PathBuf) -> Result<()> {
    let config = load_config(&config_path)?;
    let report = validate_config(&config);

    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    if report.is_valid() {
        println!("Configuration is valid");
        Ok(())
    } else {
        for error in &report.errors {
            println!("error: {error}");
        }
        bail!("configuration is invalid ({} errors)", report.errors.len());
    }
}

fn init_command(output: std::path::PathBuf) -> Result<()> {
    if output.exists() {
        bail!("refusing to overwrite existing file: {:?}", output);
    }
    let config = generate_default_config();
    save_config(&config, &output)?;
    println!("Wrote default configuration to {:?}", output);
    Ok(())
}
