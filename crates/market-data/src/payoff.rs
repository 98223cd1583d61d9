//! Settlement and exercise payoff evaluation
//!
//! Both operations are pure. The caller owns the position lifecycle: a
//! successful evaluation does not remove anything here.

use common::{Error, OptionType, Result, Side};

fn validate(spot: f64, strike: f64) -> Result<()> {
    if !spot.is_finite() || !strike.is_finite() {
        return Err(Error::invalid_input("spot and strike must be finite"));
    }
    if spot < 0.0 {
        return Err(Error::invalid_input(format!(
            "spot must be non-negative, got {spot}"
        )));
    }
    if strike < 0.0 {
        return Err(Error::invalid_input(format!(
            "strike must be non-negative, got {strike}"
        )));
    }
    Ok(())
}

/// Intrinsic value of an option at the given spot
fn intrinsic_value(spot: f64, strike: f64, option_type: OptionType) -> f64 {
    match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    }
}

/// Realized PnL when closing a position at the current spot
///
/// Buy side: intrinsic value minus entry price. Sell side: entry price minus
/// intrinsic value.
pub fn settle(
    spot: f64,
    strike: f64,
    option_type: OptionType,
    side: Side,
    entry_price: f64,
) -> Result<f64> {
    validate(spot, strike)?;
    if !entry_price.is_finite() {
        return Err(Error::invalid_input("entry price must be finite"));
    }

    let intrinsic = intrinsic_value(spot, strike, option_type);
    let pnl = match side {
        Side::Buy => intrinsic - entry_price,
        Side::Sell => entry_price - intrinsic,
    };
    Ok(pnl)
}

/// Payoff realized by exercising an option at the current spot
///
/// Exercising is a value realization, not a position close: the result is
/// the intrinsic value, side-independent, not PnL relative to entry.
pub fn exercise(spot: f64, strike: f64, option_type: OptionType) -> Result<f64> {
    validate(spot, strike)?;
    Ok(intrinsic_value(spot, strike, option_type))
}
