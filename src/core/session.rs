// src/core/session.rs

use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::core::error::ScanError;
use crate::core::models::{ActiveScan, ScanMode, ScanResult, ScanState, SessionSnapshot};

/// Holds the most recent scan result and the busy flag for one session.
///
/// Every write is a single atomic replacement of the whole snapshot, so readers
/// always observe a consistent `(busy, result)` pair. Cloning the store yields
/// another handle to the same session.
#[derive(Clone)]
pub struct ScanSessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    tx: watch::Sender<SessionSnapshot>,
    next_scan_id: AtomicU64,
}

impl ScanSessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(StoreInner {
                tx,
                next_scan_id: AtomicU64::new(1),
            }),
        }
    }

    /// The whole current state in one read.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.tx.borrow().clone()
    }

    pub fn current_result(&self) -> Option<Arc<ScanResult>> {
        self.inner.tx.borrow().result.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.tx.borrow().busy
    }

    pub fn state(&self) -> ScanState {
        self.inner.tx.borrow().state
    }

    /// Watches for state changes, e.g. to redraw a report view.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.tx.subscribe()
    }

    /// Drops the published result. A scan still running is unaffected and will
    /// publish its own result when it completes.
    pub fn clear(&self) {
        let cleared = self.inner.tx.send_if_modified(|snapshot| snapshot.result.take().is_some());
        if cleared {
            debug!("Cleared published scan result.");
        }
    }

    /// Claims the single-flight slot, moving the session to `Running`.
    pub(crate) fn try_begin(&self, target: &str, mode: ScanMode) -> Result<ActiveScan, ScanError> {
        let mut claimed = None;
        self.inner.tx.send_if_modified(|snapshot| {
            if snapshot.busy {
                return false;
            }
            let active = ActiveScan {
                scan_id: self.inner.next_scan_id.fetch_add(1, Ordering::Relaxed),
                target: target.to_string(),
                mode,
                started_at: Utc::now(),
                started_instant: tokio::time::Instant::now(),
            };
            snapshot.busy = true;
            snapshot.state = ScanState::Running;
            snapshot.active = Some(active.clone());
            snapshot.last_error = None;
            claimed = Some(active);
            true
        });
        claimed.ok_or(ScanError::AlreadyInProgress)
    }

    /// Makes `result` visible and releases the slot in the same write.
    pub(crate) fn publish(&self, result: Arc<ScanResult>) {
        let scan_id = result.scan_id;
        let published = self.inner.tx.send_if_modified(|snapshot| {
            if !owns_slot(snapshot, scan_id) {
                return false;
            }
            snapshot.result = Some(result);
            snapshot.busy = false;
            snapshot.state = ScanState::Completed;
            snapshot.active = None;
            true
        });
        if !published {
            warn!(scan_id, "Ignoring publish from a scan that no longer owns the session.");
        }
    }

    /// Resolves the running scan to `Failed`, keeping the previous result.
    pub(crate) fn fail(&self, scan_id: u64, error: &ScanError) {
        self.inner.tx.send_if_modified(|snapshot| {
            if !owns_slot(snapshot, scan_id) {
                return false;
            }
            snapshot.busy = false;
            snapshot.state = ScanState::Failed;
            snapshot.active = None;
            snapshot.last_error = Some(error.to_string());
            true
        });
    }
}

impl Default for ScanSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn owns_slot(snapshot: &SessionSnapshot, scan_id: u64) -> bool {
    snapshot
        .active
        .as_ref()
        .is_some_and(|active| active.scan_id == scan_id)
}
