//! Observability infrastructure for PerpX
//!
//! Structured logging via tracing. The log level is controlled through the
//! `RUST_LOG` environment variable.

pub mod logging;

pub use logging::{init_logging, LogFormat};
