//! Perpetual option pricing model
//!
//! Closed-form pricing for options without a fixed expiry: the usual
//! Black-Scholes `d1`/`d2` terms with the time-to-expiry factor removed.
//! The formula carries no funding-rate term either; it is preserved exactly
//! for compatibility with the venue's settlement contract, even though it is
//! economically incomplete for a true perpetual.

use crate::types::{OptionContract, OptionQuote, PricingParams, QuoteInputs};
use common::{Error, Result, Symbol};
use tracing::debug;

/// Standard normal cumulative distribution function
///
/// Abramowitz-Stegun rational-polynomial approximation, absolute error
/// ~7.5e-8. The polynomial tails are slightly asymmetric around `x = 0`;
/// `norm_cdf(0.0)` still evaluates to 0.5 within 1e-6.
pub fn norm_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x.abs());
    let d = 0.3989423 * (-x * x / 2.0).exp();
    let p = d * t * (0.3193815 + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274))));
    if x > 0.0 {
        1.0 - p
    } else {
        p
    }
}

fn validate(inputs: &QuoteInputs) -> Result<()> {
    let finite = inputs.spot.is_finite()
        && inputs.strike.is_finite()
        && inputs.volatility.is_finite()
        && inputs.rate.is_finite();
    if !finite {
        return Err(Error::invalid_input("pricing inputs must be finite"));
    }
    if inputs.spot <= 0.0 {
        return Err(Error::invalid_input(format!(
            "spot must be positive, got {}",
            inputs.spot
        )));
    }
    if inputs.strike <= 0.0 {
        return Err(Error::invalid_input(format!(
            "strike must be positive, got {}",
            inputs.strike
        )));
    }
    if inputs.volatility <= 0.0 {
        return Err(Error::invalid_input(format!(
            "volatility must be positive, got {}",
            inputs.volatility
        )));
    }
    Ok(())
}

/// Price a perpetual option
///
/// ```text
/// d1 = (ln(spot/strike) + rate + vol^2/2) / vol
/// d2 = d1 - vol
/// call = spot*CDF(d1) - strike*e^(-rate)*CDF(d2)
/// put  = strike*e^(-rate)*CDF(-d2) - spot*CDF(-d1)
/// ```
///
/// Both premiums are floored at zero. Returns [`Error::InvalidInput`] for
/// non-positive spot, strike or volatility (zero volatility is rejected, not
/// divided by) and for non-finite inputs.
pub fn quote_option(inputs: QuoteInputs) -> Result<OptionQuote> {
    validate(&inputs)?;

    let s = inputs.spot;
    let k = inputs.strike;
    let v = inputs.volatility;
    let r = inputs.rate;

    let d1 = ((s / k).ln() + r + v * v / 2.0) / v;
    let d2 = d1 - v;

    let call = s * norm_cdf(d1) - k * (-r).exp() * norm_cdf(d2);
    let put = k * (-r).exp() * norm_cdf(-d2) - s * norm_cdf(-d1);

    debug!(spot = s, strike = k, vol = v, rate = r, call, put, "Quoted option");

    Ok(OptionQuote {
        call: call.max(0.0),
        put: put.max(0.0),
    })
}

/// Build a full contract quote for an asset at the current spot
///
/// This is the derived record handed to the presentation layer: asset,
/// strike, both premiums and the computation timestamp.
pub fn contract_quote(
    asset: Symbol,
    spot: f64,
    strike: f64,
    params: PricingParams,
) -> Result<OptionContract> {
    let quote = quote_option(QuoteInputs {
        spot,
        strike,
        volatility: params.volatility,
        rate: params.rate,
    })?;

    Ok(OptionContract {
        asset,
        strike,
        call: quote.call,
        put: quote.put,
        timestamp: chrono::Utc::now(),
    })
}
