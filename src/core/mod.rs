// src/core/mod.rs

// The `mod.rs` file acts as the root of the `core` module, exposing the
// scan engine's sub-modules to the rest of the crate.

/// Data structures shared across the engine, such as `Finding`, `ScanRequest`
/// and `ScanResult`.
pub mod models;

/// The error taxonomy returned by scan and configuration operations.
pub mod error;

/// The catalog of candidate findings and per-category remediation guidance.
pub mod knowledge_base;

/// Check selection, risk scoring, probing and the scan orchestrator.
pub mod scanner;

/// The session store that publishes the latest result and the busy flag.
pub mod session;

/// Derived views over a published result: risk level, counts, recommendations.
pub mod analysis;
