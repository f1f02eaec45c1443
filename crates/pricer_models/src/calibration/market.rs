//! Observed option quotes used as calibration targets.

/// One observed European call quote.
///
/// Quotes are stored exactly as given. Callers are expected to supply
/// `spot > 0`, `maturity > 0` and `strike > 0`; nothing here checks it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketQuote {
    /// Spot price of the underlying
    pub spot: f64,
    /// Time to expiry in years
    pub maturity: f64,
    /// Strike price
    pub strike: f64,
    /// Observed mid price of the call
    pub mid: f64,
}

impl MarketQuote {
    /// Create a quote.
    pub fn new(spot: f64, maturity: f64, strike: f64, mid: f64) -> Self {
        Self {
            spot,
            maturity,
            strike,
            mid,
        }
    }

    /// Moneyness `strike / spot`.
    pub fn moneyness(&self) -> f64 {
        self.strike / self.spot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_fields() {
        let q = MarketQuote::new(100.0, 1.0, 80.0, 25.72);
        assert_eq!(q.spot, 100.0);
        assert_eq!(q.maturity, 1.0);
        assert_eq!(q.strike, 80.0);
        assert_eq!(q.mid, 25.72);
        assert!((q.moneyness() - 0.8).abs() < 1e-12);
    }
}
