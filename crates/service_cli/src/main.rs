//! Heston Calibrator CLI
//!
//! Operational entry point for Heston pricing and calibration.
//!
//! # Commands
//!
//! - `heston-calibrator calibrate --market-data <csv>` - Calibrate parameters to observed calls
//! - `heston-calibrator price --spot <S> --strike <K> --maturity <T>` - Price a call and put
//! - `heston-calibrator demo` - Calibrate to a fixed five-quote surface
//!
//! # Configuration
//!
//! Settings are read from `--config` (default `heston.toml`; a missing file
//! means defaults) and overridden by `HESTON_*` environment variables. Logs go
//! to stderr, filtered by `RUST_LOG` or the configured `log_level`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pricer_models::models::HestonParams;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::CliConfig;

/// Heston stochastic volatility calibrator
#[derive(Parser)]
#[command(name = "heston-calibrator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "heston.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate model parameters to observed call prices
    Calibrate {
        /// CSV file with a spot,maturity,strike,mid header
        #[arg(short, long)]
        market_data: PathBuf,

        /// Starting parameters as kappa,theta,sigma,rho,v0
        #[arg(short, long, value_parser = commands::parse_params)]
        guess: Option<HestonParams>,

        /// Output file for calibrated parameters (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Price a European call and put
    Price {
        /// Spot price
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Time to expiry in years
        #[arg(short = 't', long)]
        maturity: f64,

        /// Model parameters as kappa,theta,sigma,rho,v0
        #[arg(short, long, value_parser = commands::parse_params)]
        params: Option<HestonParams>,
    },

    /// Calibrate to the built-in five-quote surface
    Demo,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli, config: &CliConfig) -> Result<()> {
    match cli.command {
        Commands::Calibrate {
            market_data,
            guess,
            output,
        } => commands::calibrate::run(config, &market_data, guess, output.as_deref()),
        Commands::Price {
            spot,
            strike,
            maturity,
            params,
        } => commands::price::run(config, spot, strike, maturity, params),
        Commands::Demo => commands::demo::run(config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load_with_env_and_validate(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    init_tracing(if cli.verbose { "debug" } else { config.log_level.as_str() });

    if cli.verbose {
        info!("Verbose mode enabled");
        info!("Configuration: {:?}", config);
    }

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
