//! Common types and utilities for PerpX
//!
//! This crate provides shared types and the error taxonomy used across
//! all PerpX crates.
//!
//! # Modules
//!
//! - [`error`] - Common error types
//! - [`types`] - Shared domain types (OrderId, Side, InstrumentKey, etc.)

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
