// src/lib.rs

//! Scan orchestration and risk scoring for web vulnerability assessments.
//!
//! A [`ScanRequest`] is handed to the [`ScanOrchestrator`], which narrows the
//! finding catalog to the requested checks, runs the probe step asynchronously,
//! scores the result and publishes it to a [`ScanSessionStore`] for report and
//! analysis consumers.

pub mod config;
pub mod core;
pub mod logging;

pub use crate::config::EngineConfig;
pub use crate::core::error::{ConfigError, ScanError};
pub use crate::core::models::{Finding, ScanMode, ScanRequest, ScanResult, ScanState, Severity};
pub use crate::core::scanner::{ScanHandle, ScanOrchestrator};
pub use crate::core::session::ScanSessionStore;
