use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "perpx")]
#[command(about = "PerpX - a perpetual options venue for liquid-staking tokens")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Log output format (pretty, json, compact)
    #[arg(long, default_value = "pretty", global = true)]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a perpetual option contract
    Quote {
        /// Underlying asset symbol (e.g. stETH)
        #[arg(short, long)]
        asset: String,

        /// Strike price
        #[arg(short, long)]
        strike: f64,

        /// Spot price override; defaults to the configured base price
        #[arg(long)]
        spot: Option<f64>,

        /// Volatility override
        #[arg(long)]
        volatility: Option<f64>,

        /// Risk-free rate override
        #[arg(long)]
        rate: Option<f64>,

        /// Path to the configuration file
        #[arg(short, long, default_value = "perpx.yaml")]
        config: PathBuf,
    },

    /// Run a scripted trading demonstration against the in-memory venue
    Demo {
        /// Path to the configuration file
        #[arg(short, long, default_value = "perpx.yaml")]
        config: PathBuf,
    },

    /// Validate configuration without starting anything
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "perpx.yaml")]
        config: PathBuf,
    },

    /// Initialize a new configuration file with defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "perpx.yaml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
