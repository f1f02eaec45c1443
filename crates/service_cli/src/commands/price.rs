//! Price command implementation
//!
//! Prices one European call and put under the Heston model.

use pricer_models::models::{HestonModel, HestonParams, OptionPrices};
use tracing::info;

use super::print_params;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the price command
pub fn run(
    config: &CliConfig,
    spot: f64,
    strike: f64,
    maturity: f64,
    params: Option<HestonParams>,
) -> Result<()> {
    let params = params.unwrap_or(config.initial_guess);
    info!("Starting pricing...");
    info!("  Spot: {}  Strike: {}  Maturity: {}", spot, strike, maturity);

    let prices = price(config, spot, strike, maturity, params)?;

    println!("Parameters (r0 = {}):", config.r0);
    print_params(&params);
    println!("Call: {:.2}", prices.call);
    println!("Put:  {:.2}", prices.put);

    info!("Pricing complete");
    Ok(())
}

/// Validate inputs and price.
pub fn price(
    config: &CliConfig,
    spot: f64,
    strike: f64,
    maturity: f64,
    params: HestonParams,
) -> Result<OptionPrices> {
    for (name, value) in [("spot", spot), ("strike", strike), ("maturity", maturity)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(CliError::invalid_argument(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
    }

    let model = HestonModel::new(config.r0, params).with_quadrature(config.quadrature)?;
    Ok(model.price(strike, maturity, spot)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_satisfies_parity() {
        let config = CliConfig::default();
        let prices = price(&config, 100.0, 90.0, 1.0, HestonParams::default()).unwrap();
        let gap = 100.0 - 90.0 * (-0.1f64).exp();
        assert!((prices.call - prices.put - gap).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn test_price_rejects_non_positive_inputs() {
        let config = CliConfig::default();
        let result = price(&config, 100.0, 0.0, 1.0, HestonParams::default());
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
        let result = price(&config, 100.0, 90.0, -1.0, HestonParams::default());
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
