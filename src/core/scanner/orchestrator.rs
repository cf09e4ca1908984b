// src/core/scanner/orchestrator.rs

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::EngineConfig;
use crate::core::error::ScanError;
use crate::core::knowledge_base::{FindingCatalog, StaticCatalog};
use crate::core::models::{ActiveScan, ScanRequest, ScanResult};
use crate::core::scanner::probe::{ScanProbe, SimulatedProbe};
use crate::core::scanner::scoring::ScoringPolicy;
use crate::core::scanner::selector;
use crate::core::session::ScanSessionStore;

/// Drives the scan lifecycle: `Idle -> Running -> Completed | Failed`.
///
/// At most one scan runs per session store. Runs are detached onto the tokio
/// runtime, so a caller that stops waiting does not stop the scan from finishing
/// and publishing its result.
#[derive(Clone)]
pub struct ScanOrchestrator {
    catalog: Arc<dyn FindingCatalog>,
    probe: Arc<dyn ScanProbe>,
    store: ScanSessionStore,
    policy: ScoringPolicy,
    default_deadline: Option<Duration>,
}

impl ScanOrchestrator {
    pub fn new(
        catalog: Arc<dyn FindingCatalog>,
        probe: Arc<dyn ScanProbe>,
        store: ScanSessionStore,
        config: &EngineConfig,
    ) -> Self {
        Self {
            catalog,
            probe,
            store,
            policy: config.scoring,
            default_deadline: config.default_deadline,
        }
    }

    /// Uses the built-in catalog and the simulated probe.
    pub fn with_defaults(store: ScanSessionStore, config: &EngineConfig) -> Self {
        let probe = SimulatedProbe::new(config.scan_duration, config.open_ports.iter().copied());
        Self::new(Arc::new(StaticCatalog::default()), Arc::new(probe), store, config)
    }

    pub fn store(&self) -> &ScanSessionStore {
        &self.store
    }

    pub fn catalog(&self) -> &dyn FindingCatalog {
        self.catalog.as_ref()
    }

    /// Validates `request`, claims the session and starts the scan in the background.
    ///
    /// Validation and single-flight errors are returned here, before anything runs.
    /// Must be called from within a tokio runtime.
    pub fn spawn_scan(&self, request: ScanRequest) -> Result<ScanHandle, ScanError> {
        request.validate()?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ScanError::InternalFault(format!("no async runtime available: {e}")))?;

        let active = self.store.try_begin(request.target(), request.mode())?;
        let scan_id = active.scan_id;
        info!(scan_id, target = %active.target, mode = %active.mode, "Scan started.");

        let guard = RunGuard {
            store: self.store.clone(),
            scan_id,
            armed: true,
        };
        let orchestrator = self.clone();
        let join = runtime.spawn(async move {
            let mut guard = guard;
            let outcome = orchestrator.execute(&request, &active).await;
            match &outcome {
                Ok(result) => {
                    orchestrator.store.publish(Arc::clone(result));
                    info!(
                        scan_id,
                        findings = result.findings.len(),
                        risk_score = result.risk_score,
                        elapsed = ?active.started_instant.elapsed(),
                        "Scan completed."
                    );
                }
                Err(e) => {
                    orchestrator.store.fail(scan_id, e);
                    error!(scan_id, error = %e, "Scan failed.");
                }
            }
            guard.armed = false;
            outcome
        });

        Ok(ScanHandle { scan_id, join })
    }

    /// Runs a scan to completion and returns its published result.
    pub async fn start_scan(&self, request: ScanRequest) -> Result<Arc<ScanResult>, ScanError> {
        self.spawn_scan(request)?.wait().await
    }

    async fn execute(
        &self,
        request: &ScanRequest,
        active: &ActiveScan,
    ) -> Result<Arc<ScanResult>, ScanError> {
        let checks = selector::select(request.mode(), request.categories(), self.catalog.list_all())?;

        let probing = self.probe.probe(request.target(), &checks);
        let report = match request.deadline().or(self.default_deadline) {
            Some(deadline) => tokio::time::timeout(deadline, probing)
                .await
                .map_err(|_| ScanError::Timeout(deadline))??,
            None => probing.await?,
        };

        let risk_score = self.policy.score(&checks);
        Ok(Arc::new(ScanResult {
            scan_id: active.scan_id,
            started_at: active.started_at,
            timestamp: Utc::now(),
            target: request.target().to_string(),
            mode: request.mode(),
            open_ports: report.open_ports,
            findings: checks,
            risk_score,
        }))
    }
}

/// A running scan. Dropping the handle abandons interest in the outcome without
/// affecting the scan itself.
#[derive(Debug)]
pub struct ScanHandle {
    scan_id: u64,
    join: JoinHandle<Result<Arc<ScanResult>, ScanError>>,
}

impl ScanHandle {
    pub fn scan_id(&self) -> u64 {
        self.scan_id
    }

    /// Waits for the scan to finish.
    pub async fn wait(self) -> Result<Arc<ScanResult>, ScanError> {
        self.join
            .await
            .map_err(|e| ScanError::InternalFault(format!("scan task did not complete: {e}")))?
    }
}

/// Releases the session if the scan task ends without resolving it, e.g. on a
/// panic or when the runtime shuts down.
struct RunGuard {
    store: ScanSessionStore,
    scan_id: u64,
    armed: bool,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if self.armed {
            warn!(scan_id = self.scan_id, "Scan task ended without resolving, marking failed.");
            self.store.fail(
                self.scan_id,
                &ScanError::InternalFault("scan task ended before publishing".to_string()),
            );
        }
    }
}
