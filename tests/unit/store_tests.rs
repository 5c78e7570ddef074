/*!
 * Persistence layer tests against the SQLite store, including on-disk
 * reopen behavior the in-memory tests cannot cover.
 */

use tuvung::store::{SqliteVocabStore, VocabRecord, VocabStore};

use crate::common::{TEST_USER, cat_draft};

#[tokio::test]
async fn test_sqlite_persistThenReload_shouldKeepAllVisibleFields() {
    let store = SqliteVocabStore::new_in_memory().unwrap();
    let draft = cat_draft();

    let inserted = store
        .insert(VocabRecord::from_draft(&draft, TEST_USER))
        .await
        .unwrap();
    let records = store.list_all(TEST_USER).await.unwrap();

    assert_eq!(records.len(), 1);
    let reloaded = &records[0];
    assert_eq!(reloaded, &inserted);
    assert_eq!(reloaded.word, draft.word);
    assert_eq!(reloaded.word_meaning, draft.word_meaning);
    assert_eq!(reloaded.context, draft.context);
    assert_eq!(reloaded.context_meaning, draft.context_meaning);
    assert_eq!(reloaded.phonetic, draft.phonetic);
    assert_eq!(reloaded.audio, draft.audio);
}

#[tokio::test]
async fn test_sqlite_duplicateWords_shouldBothBeKept() {
    let store = SqliteVocabStore::new_in_memory().unwrap();

    store
        .insert(VocabRecord::from_draft(&cat_draft(), TEST_USER))
        .await
        .unwrap();
    store
        .insert(VocabRecord::from_draft(&cat_draft(), TEST_USER))
        .await
        .unwrap();

    assert_eq!(store.list_all(TEST_USER).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_sqlite_reopenFromDisk_shouldFindRecordsAndScore() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.db");

    {
        let store = SqliteVocabStore::open(&path).unwrap();
        store
            .insert(VocabRecord::from_draft(&cat_draft(), TEST_USER))
            .await
            .unwrap();
        store.add_score(TEST_USER, 3).await.unwrap();
    }

    let reopened = SqliteVocabStore::open(&path).unwrap();
    let records = reopened.list_all(TEST_USER).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].word, "cat");
    assert_eq!(reopened.get_score(TEST_USER).await.unwrap(), 3);
}

#[tokio::test]
async fn test_sqlite_contextFlagRoundTrip_shouldSurviveReload() {
    let store = SqliteVocabStore::new_in_memory().unwrap();
    let inserted = store
        .insert(VocabRecord::from_draft(&cat_draft(), TEST_USER))
        .await
        .unwrap();

    store
        .update_context_flag(TEST_USER, &inserted.id, true)
        .await
        .unwrap();
    assert!(store.list_all(TEST_USER).await.unwrap()[0].in_context_list);

    store
        .update_context_flag(TEST_USER, &inserted.id, false)
        .await
        .unwrap();
    assert!(!store.list_all(TEST_USER).await.unwrap()[0].in_context_list);
}

#[tokio::test]
async fn test_sqlite_scoresAcrossUsers_shouldStayIndependent() {
    let store = SqliteVocabStore::new_in_memory().unwrap();

    store.add_score("an", 2).await.unwrap();
    store.add_score("mai", 7).await.unwrap();

    assert_eq!(store.get_score("an").await.unwrap(), 2);
    assert_eq!(store.get_score("mai").await.unwrap(), 7);
}
