// src/core/error.rs

use std::time::Duration;
use thiserror::Error;

/// Every way a scan request can fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("a scan is already in progress")]
    AlreadyInProgress,

    #[error("check selection failed: {0}")]
    SelectionFailure(String),

    #[error("scan exceeded its deadline of {0:?}")]
    Timeout(Duration),

    #[error("internal fault: {0}")]
    InternalFault(String),
}

/// Rejected engine configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("severity weights must not decrease with severity (got {0:?})")]
    WeightsNotMonotonic([u32; 4]),

    #[error("score scale must be greater than zero")]
    ZeroScale,

    #[error("highest weight {max_weight} times scale {scale} does not fit in 32 bits")]
    ScaleOverflow { max_weight: u32, scale: u32 },
}
