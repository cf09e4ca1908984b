// src/core/scanner/probe.rs

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::error::ScanError;
use crate::core::models::Finding;

/// Data the probing step hands back to the orchestrator, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub open_ports: BTreeSet<u16>,
}

/// The asynchronous scan-execution step.
///
/// This is the only place a scan suspends. Implementations must be safe to drop
/// mid-flight, which is how deadlines cancel them.
#[async_trait]
pub trait ScanProbe: Send + Sync {
    async fn probe(&self, target: &str, checks: &[Finding]) -> Result<ProbeReport, ScanError>;
}

/// Stands in for real probing: waits for a fixed duration, then reports a
/// configured set of open ports.
#[derive(Debug, Clone)]
pub struct SimulatedProbe {
    duration: Duration,
    open_ports: BTreeSet<u16>,
}

impl SimulatedProbe {
    pub fn new(duration: Duration, open_ports: impl IntoIterator<Item = u16>) -> Self {
        Self {
            duration,
            open_ports: open_ports.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ScanProbe for SimulatedProbe {
    async fn probe(&self, target: &str, checks: &[Finding]) -> Result<ProbeReport, ScanError> {
        info!(target, checks = checks.len(), duration = ?self.duration, "Starting simulated probe.");
        tokio::time::sleep(self.duration).await;
        debug!(target, ports = ?self.open_ports, "Simulated probe finished.");
        Ok(ProbeReport {
            open_ports: self.open_ports.clone(),
        })
    }
}
