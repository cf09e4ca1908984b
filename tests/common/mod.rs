#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use vanguard_scan_engine::core::knowledge_base::StaticCatalog;
use vanguard_scan_engine::core::scanner::{ProbeReport, ScanProbe};
use vanguard_scan_engine::{EngineConfig, Finding, ScanError, ScanOrchestrator, ScanSessionStore};

/// Blocks every probe until `release` is called.
#[derive(Default)]
pub struct GatedProbe {
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedProbe {
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScanProbe for GatedProbe {
    async fn probe(&self, _target: &str, _checks: &[Finding]) -> Result<ProbeReport, ScanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(ProbeReport {
            open_ports: BTreeSet::from([80, 443]),
        })
    }
}

/// Fails every probe with an internal fault.
pub struct FailingProbe;

#[async_trait]
impl ScanProbe for FailingProbe {
    async fn probe(&self, target: &str, _checks: &[Finding]) -> Result<ProbeReport, ScanError> {
        Err(ScanError::InternalFault(format!("connection to {target} reset")))
    }
}

/// Panics inside the scan task.
pub struct PanickingProbe;

#[async_trait]
impl ScanProbe for PanickingProbe {
    async fn probe(&self, _target: &str, _checks: &[Finding]) -> Result<ProbeReport, ScanError> {
        panic!("probe crashed");
    }
}

pub fn orchestrator_with(probe: Arc<dyn ScanProbe>) -> (ScanOrchestrator, ScanSessionStore) {
    let store = ScanSessionStore::new();
    let orchestrator = ScanOrchestrator::new(
        Arc::new(StaticCatalog::default()),
        probe,
        store.clone(),
        &EngineConfig::default(),
    );
    (orchestrator, store)
}

pub fn default_orchestrator() -> (ScanOrchestrator, ScanSessionStore) {
    let store = ScanSessionStore::new();
    let orchestrator = ScanOrchestrator::with_defaults(store.clone(), &EngineConfig::default());
    (orchestrator, store)
}
