//! Per-item failures stay inside their unit; listing failures fail the batch.

use item_service::{ItemStore, ProcessError, StoreError, TaskError, STATUS_PENDING};

use crate::support::{processor, seeded_store, FlakyStore};

// ============================================================================
// Test 1: A failed save excludes only that item
// ============================================================================

#[tokio::test]
async fn save_failure_is_isolated() {
    let store = FlakyStore::new(seeded_store(3)).failing_save(2);
    let processor = processor(store);

    let report = processor.process_all_report().await.unwrap();

    let processed: Vec<_> = report.processed.iter().filter_map(|item| item.id).collect();
    assert_eq!(processed, vec![1, 3]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 2);
    assert!(matches!(
        report.failed[0].1,
        TaskError::Store(StoreError::WriteRejected { id: 2, .. })
    ));

    // The failed item keeps its old status
    let untouched = processor.store().find_by_id(2).unwrap().unwrap();
    assert_eq!(untouched.status, STATUS_PENDING);
}

// ============================================================================
// Test 2: A failed read excludes only that item
// ============================================================================

#[tokio::test]
async fn read_failure_is_isolated() {
    let store = FlakyStore::new(seeded_store(4)).failing_find(1);
    let processor = processor(store);

    let items = processor.process_all().await.unwrap();

    let ids: Vec<_> = items.iter().filter_map(|item| item.id).collect();
    assert_eq!(ids, vec![2, 3, 4]);
    assert!(items.iter().all(|item| item.is_processed()));
}

// ============================================================================
// Test 3: A panicking store call does not take down sibling units
// ============================================================================

#[tokio::test]
async fn panicking_unit_is_isolated() {
    let store = FlakyStore::new(seeded_store(3)).panicking_find(3);
    let processor = processor(store);

    let report = processor.process_all_report().await.unwrap();

    assert_eq!(report.processed.len(), 2);
    assert_eq!(report.failed.len(), 1);
    let (id, err) = &report.failed[0];
    assert_eq!(*id, 3);
    assert!(matches!(err, TaskError::Aborted(_)));
}

// ============================================================================
// Test 4: A store that rewrites the id is a failure, not a success
// ============================================================================

#[tokio::test]
async fn identity_change_is_rejected() {
    let store = FlakyStore::new(seeded_store(2)).remapping_save(2, 200);
    let processor = processor(store);

    let report = processor.process_all_report().await.unwrap();

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.processed[0].id, Some(1));
    assert_eq!(
        report.failed,
        vec![(
            2,
            TaskError::IdentityChanged {
                expected: 2,
                actual: Some(200),
            }
        )]
    );
}

// ============================================================================
// Test 5: Mixed outcomes in one batch
// ============================================================================

#[tokio::test]
async fn mixed_batch_reports_each_outcome() {
    let store = FlakyStore::new(seeded_store(5))
        .with_phantom(6)
        .failing_find(2)
        .failing_save(4);
    let processor = processor(store);

    let report = processor.process_all_report().await.unwrap();

    assert_eq!(report.requested, 6);
    let processed: Vec<_> = report.processed.iter().filter_map(|item| item.id).collect();
    assert_eq!(processed, vec![1, 3, 5]);
    assert_eq!(report.missing, vec![6]);
    let failed: Vec<_> = report.failed.iter().map(|(id, _)| *id).collect();
    assert_eq!(failed, vec![2, 4]);
    assert!(!report.is_complete());
}

// ============================================================================
// Test 6: Listing failure fails the whole batch, distinct from "zero processed"
// ============================================================================

#[tokio::test]
async fn listing_failure_fails_the_batch() {
    let store = FlakyStore::new(seeded_store(2)).failing_list();
    let processor = processor(store);

    let err = processor.process_all().await.unwrap_err();

    assert!(matches!(
        err,
        ProcessError::Listing(StoreError::Unavailable(_))
    ));
    assert_eq!(err.status_code(), 500);
    assert_eq!(processor.store().save_count(), 0);
}
