// src/core/scanner/mod.rs

// This file acts as the public interface for the `scanner` module.
// It declares the pieces a scan is assembled from and re-exports the ones
// callers need.
pub mod orchestrator;
pub mod probe;
pub mod scoring;
pub mod selector;

pub use self::orchestrator::{ScanHandle, ScanOrchestrator};
pub use self::probe::{ProbeReport, ScanProbe, SimulatedProbe};
pub use self::scoring::{ScoringPolicy, score};
pub use self::selector::select;
