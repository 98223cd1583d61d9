use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<VenueConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    debug!("Config file content length: {} bytes", content.len());

    let config: VenueConfig =
        serde_yaml::from_str(&content).with_context(|| "Failed to parse YAML configuration")?;

    info!("Configuration loaded successfully");
    Ok(config)
}

#[instrument(skip(config, path))]
pub fn save_config<P: AsRef<Path>>(config: &VenueConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    let yaml = serde_yaml::to_string(config).with_context(|| "Failed to serialize configuration")?;
    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;
    info!("Configuration saved to: {:?}", path);
    Ok(())
}

#[instrument]
pub fn generate_default_config() -> VenueConfig {
    VenueConfig {
        venue: VenueInfo {
            name: "PerpX".to_string(),
            description: "Perpetual options venue for liquid-staking tokens".to_string(),
            version: "1.0.0".to_string(),
        },
        pricing: PricingConfig {
            default_volatility: default_volatility(),
            default_risk_free_rate: default_risk_free_rate(),
        },
        book: BookConfig {
            snapshot_depth: default_snapshot_depth(),
        },
        supported_assets: vec![
            Asset {
                symbol: "stETH".to_string(),
                name: "Lido Staked Ether".to_string(),
                base_price: 2500.0,
                enabled: true,
            },
            Asset {
                symbol: "rETH".to_string(),
                name: "Rocket Pool ETH".to_string(),
                base_price: 2550.0,
                enabled: true,
            },
            Asset {
                symbol: "cbETH".to_string(),
                name: "Coinbase Wrapped Staked ETH".to_string(),
                base_price: 2480.0,
                enabled: true,
            },
            Asset {
                symbol: "ankrETH".to_string(),
                name: "Ankr Staked ETH".to_string(),
                base_price: 2490.0,
                enabled: false,
            },
        ],
    }
}
