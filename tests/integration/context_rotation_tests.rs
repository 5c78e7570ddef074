/*!
 * Context rotation scenarios: flagged-only selection, strict sequencing,
 * stop-on-first-failure semantics.
 */

use std::sync::Arc;

use tuvung::context_rotator::ContextRotator;
use tuvung::errors::AppError;
use tuvung::providers::mock::MockTranslator;
use tuvung::store::{MemoryVocabStore, VocabStore};
use tuvung::translator::Translator;

use crate::common::{TEST_USER, insert_record};

#[tokio::test]
async fn test_rotate_shouldTouchExactlyTheFlaggedRecords() {
    let store = Arc::new(MemoryVocabStore::new());
    let flagged_a = insert_record(store.as_ref(), "cat", "The cat sat.", true).await;
    let flagged_b = insert_record(store.as_ref(), "dog", "The dog ran.", true).await;
    let unflagged = insert_record(store.as_ref(), "bird", "A bird sang.", false).await;
    store.add_score(TEST_USER, 5).await.unwrap();

    let translator = Arc::new(MockTranslator::scripted(
        "unused",
        "Câu ví dụ mới.",
        "A new example sentence.",
    ));
    let rotator = ContextRotator::new(translator, Arc::clone(&store) as Arc<dyn VocabStore>);

    let report = rotator.rotate(TEST_USER).await.unwrap();
    assert_eq!(report.selected, 2);
    assert_eq!(report.rotated, 2);

    let records = store.list_all(TEST_USER).await.unwrap();
    for record in &records {
        if record.id == unflagged.id {
            assert_eq!(record.context, "A bird sang.");
            assert_eq!(record.context_meaning, "bản dịch");
        } else {
            assert!(record.id == flagged_a.id || record.id == flagged_b.id);
            assert_eq!(record.context, "A new example sentence.");
            assert_eq!(record.context_meaning, "Câu ví dụ mới.");
        }
    }

    // The score counter is untouched by rotation.
    assert_eq!(store.get_score(TEST_USER).await.unwrap(), 5);
}

#[tokio::test]
async fn test_rotate_shouldLeaveFlagsSet() {
    let store = Arc::new(MemoryVocabStore::new());
    insert_record(store.as_ref(), "cat", "The cat sat.", true).await;

    let rotator = ContextRotator::new(Arc::new(MockTranslator::working()), Arc::clone(&store) as Arc<dyn VocabStore>);
    rotator.rotate(TEST_USER).await.unwrap();

    // A second press re-rotates the same selection.
    let records = store.list_all(TEST_USER).await.unwrap();
    assert!(records[0].in_context_list);

    let report = rotator.rotate(TEST_USER).await.unwrap();
    assert_eq!(report.rotated, 1);
}

#[tokio::test]
async fn test_rotate_noFlaggedRecords_shouldDoNothing() {
    let store = Arc::new(MemoryVocabStore::new());
    insert_record(store.as_ref(), "cat", "The cat sat.", false).await;

    let translator = Arc::new(MockTranslator::working());
    let rotator = ContextRotator::new(Arc::clone(&translator) as Arc<dyn Translator>, Arc::clone(&store) as Arc<dyn VocabStore>);

    let report = rotator.rotate(TEST_USER).await.unwrap();
    assert_eq!(report.selected, 0);
    assert_eq!(translator.call_count(), 0);
}

#[tokio::test]
async fn test_rotate_failureMidway_shouldStopAndKeepEarlierRotations() {
    let store = Arc::new(MemoryVocabStore::new());
    let first = insert_record(store.as_ref(), "cat", "The cat sat.", true).await;
    let second = insert_record(store.as_ref(), "dog", "The dog ran.", true).await;
    let third = insert_record(store.as_ref(), "bird", "A bird sang.", true).await;

    // Each record costs two translator calls; the first record's pair
    // succeeds, the second record's context generation fails.
    let translator = Arc::new(MockTranslator::failing_after(2));
    let rotator = ContextRotator::new(translator, Arc::clone(&store) as Arc<dyn VocabStore>);

    let err = rotator.rotate(TEST_USER).await.unwrap_err();
    match err {
        AppError::RotationFailed { word, source } => {
            assert_eq!(word, "dog");
            assert!(matches!(*source, AppError::Translation(_)));
        }
        other => panic!("expected RotationFailed, got {:?}", other),
    }

    let records = store.list_all(TEST_USER).await.unwrap();
    let by_id = |id: &str| records.iter().find(|r| r.id == id).unwrap();
    assert_eq!(by_id(&first.id).context, "A new example sentence.");
    assert_eq!(by_id(&second.id).context, "The dog ran.");
    assert_eq!(by_id(&third.id).context, "A bird sang.");
}

#[tokio::test]
async fn test_rotate_storeReadFailure_shouldReportLoad() {
    let store = Arc::new(MemoryVocabStore::new());
    store.fail_next_read();

    let rotator = ContextRotator::new(Arc::new(MockTranslator::working()), Arc::clone(&store) as Arc<dyn VocabStore>);
    let err = rotator.rotate(TEST_USER).await.unwrap_err();
    assert!(matches!(err, AppError::Load(_)));
}

#[tokio::test]
async fn test_rotate_progressCallback_shouldSeeEveryStep() {
    let store = Arc::new(MemoryVocabStore::new());
    insert_record(store.as_ref(), "cat", "The cat sat.", true).await;
    insert_record(store.as_ref(), "dog", "The dog ran.", true).await;

    let rotator = ContextRotator::new(Arc::new(MockTranslator::working()), Arc::clone(&store) as Arc<dyn VocabStore>);

    let seen = std::sync::Mutex::new(Vec::new());
    rotator
        .rotate_with_progress(TEST_USER, |done, total| {
            seen.lock().unwrap().push((done, total));
        })
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(0, 2), (1, 2), (2, 2)]);
}
