//! Observability utilities for logging
//!
//! Provides centralized logging setup for all services

pub mod logging;

pub use logging::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("Unknown log {kind}: {value}")]
    UnknownSetting { kind: &'static str, value: String },
}

pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
