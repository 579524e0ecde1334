use super::common::*;
use std::sync::Arc;

use chrono::Duration;

use crate::cases::alerts::ExpiryAlertPolicy;
use crate::cases::service::CaseService;

#[tokio::test]
async fn preview_lists_window_matches_without_recording() {
    let service = CaseService::new(Arc::new(MemoryRepository::new(fourteen_cases())));
    let ledger = MemoryLedger::default();
    let policy = ExpiryAlertPolicy::standard();

    let plan = service
        .preview_alerts(&policy, &ledger, now())
        .await
        .expect("preview builds");

    let ids: Vec<&str> = plan
        .candidates
        .iter()
        .map(|alert| alert.case_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["3", "6", "7", "9"]);
    assert_eq!(plan.skipped_unknown_type, 7);
    assert_eq!(ledger.recorded(), 0);
}

#[tokio::test]
async fn second_run_inside_cooldown_dispatches_nothing() {
    let service = CaseService::new(Arc::new(MemoryRepository::new(fourteen_cases())));
    let ledger = MemoryLedger::default();
    let policy = ExpiryAlertPolicy::standard();

    let first = service
        .run_alerts(&policy, &ledger, now())
        .await
        .expect("first run");
    assert_eq!(first.created.len(), 4);
    assert_eq!(ledger.recorded(), 4);

    let second = service
        .run_alerts(&policy, &ledger, now() + Duration::days(1))
        .await
        .expect("second run");
    assert!(second.created.is_empty());
    assert_eq!(second.skipped_cooldown, 4);

    let after_cooldown = service
        .run_alerts(&policy, &ledger, now() + Duration::days(8))
        .await
        .expect("third run");
    assert_eq!(after_cooldown.created.len(), 4);
}
