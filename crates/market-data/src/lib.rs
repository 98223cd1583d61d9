//! Market data for PerpX
//!
//! This crate provides the pure market-side pieces of the venue:
//!
//! - [`model`] - Perpetual option pricing (closed form, no expiry term)
//! - [`payoff`] - Settlement and exercise payoff evaluation
//! - [`feed`] - Spot price feed with a pull interface
//! - [`types`] - Shared market data types
//!
//! # Key Invariants
//!
//! - Pricing and payoff evaluation are pure: no state, no I/O, thread-safe
//!   by construction
//! - Premiums are never negative
//! - The core never owns a timer; spot prices are pulled through
//!   [`feed::PriceSource`]

pub mod feed;
pub mod model;
pub mod payoff;
pub mod types;

pub use feed::{InMemoryPriceFeed, PriceSource};
pub use model::{contract_quote, norm_cdf, quote_option};
pub use payoff::{exercise, settle};
pub use types::{OptionContract, OptionQuote, PriceFeedEntry, PricePoint, PricingParams, QuoteInputs};
