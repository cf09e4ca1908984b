mod common;

use std::sync::Arc;

use common::{GatedProbe, default_orchestrator, orchestrator_with};
use vanguard_scan_engine::{ScanError, ScanRequest, ScanState};

#[tokio::test(start_paused = true)]
async fn second_scan_while_busy_fails_fast() {
    let probe = Arc::new(GatedProbe::default());
    let (orchestrator, store) = orchestrator_with(probe.clone());

    let running = orchestrator
        .spawn_scan(ScanRequest::full("https://a.example"))
        .unwrap();
    assert!(store.is_busy());
    assert_eq!(store.state(), ScanState::Running);

    let err = orchestrator
        .spawn_scan(ScanRequest::full("https://b.example"))
        .unwrap_err();
    assert_eq!(err, ScanError::AlreadyInProgress);

    let err = orchestrator
        .start_scan(ScanRequest::selective("https://b.example", ["XSS"]))
        .await
        .unwrap_err();
    assert_eq!(err, ScanError::AlreadyInProgress);

    // The rejected requests did not disturb the running scan.
    assert_eq!(store.snapshot().active.unwrap().target, "https://a.example");

    probe.release();
    let result = running.wait().await.unwrap();
    assert_eq!(result.target, "https://a.example");
    assert_eq!(probe.call_count(), 1);

    // Once the first run has published, a new one may start.
    probe.release();
    let next = orchestrator
        .start_scan(ScanRequest::full("https://b.example"))
        .await
        .unwrap();
    assert_eq!(next.target, "https://b.example");
    assert!(next.scan_id > result.scan_id);
}

#[tokio::test(start_paused = true)]
async fn concurrent_requests_run_only_once() {
    let (orchestrator, store) = default_orchestrator();

    let attempts = (0..10).map(|i| {
        let orchestrator = orchestrator.clone();
        async move {
            orchestrator
                .start_scan(ScanRequest::full(format!("https://host{i}.example")))
                .await
        }
    });
    let outcomes = futures::future::join_all(attempts).await;

    let completed: Vec<_> = outcomes.iter().filter_map(|o| o.as_ref().ok()).collect();
    let rejected = outcomes
        .iter()
        .filter(|o| matches!(o, Err(ScanError::AlreadyInProgress)))
        .count();
    assert_eq!(completed.len(), 1);
    assert_eq!(rejected, 9);
    assert_eq!(store.current_result().as_ref(), Some(completed[0]));
    assert!(!store.is_busy());
}

#[tokio::test(start_paused = true)]
async fn validation_error_does_not_claim_the_session() {
    let (orchestrator, store) = default_orchestrator();

    let err = orchestrator.spawn_scan(ScanRequest::full("  ")).unwrap_err();
    assert!(matches!(err, ScanError::InvalidRequest(_)));
    assert!(!store.is_busy());

    orchestrator
        .start_scan(ScanRequest::full("https://example.com"))
        .await
        .unwrap();
    assert_eq!(store.state(), ScanState::Completed);
}
