/*!
 * End-to-end entry pipeline scenarios over scripted capabilities.
 */

use std::sync::Arc;

use tuvung::dictionary::Dictionary;
use tuvung::entry_pipeline::EntryPipeline;
use tuvung::errors::AppError;
use tuvung::identity::AnonymousIdentity;
use tuvung::providers::mock::{MockDictionary, MockTranslator};
use tuvung::store::{MemoryVocabStore, VocabStore};
use tuvung::translator::Translator;

use crate::common::{TEST_USER, cat_pipeline, pipeline_with};

#[tokio::test]
async fn test_submit_happyPathWordMode_shouldProduceFullDraft() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(Arc::clone(&store));

    let draft = pipeline
        .submit("The cat sat on the mat.", "cat", false)
        .await
        .unwrap();

    assert_eq!(draft.word, "cat");
    assert_eq!(draft.word_meaning, "mèo");
    assert_eq!(draft.context, "The cat sat on the mat.");
    assert_eq!(draft.context_meaning, "Con mèo ngồi trên tấm thảm.");
    assert_eq!(draft.phonetic, "/kæt/");
    assert_eq!(draft.audio, "http://a/cat.mp3");
}

#[tokio::test]
async fn test_submit_wordNotInSentence_shouldFailWithoutCapabilityCalls() {
    let translator = Arc::new(MockTranslator::working());
    let dictionary = Arc::new(MockDictionary::spoken("/x/", "http://a/x.mp3"));
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = pipeline_with(
        Arc::clone(&translator) as Arc<dyn Translator>,
        Arc::clone(&dictionary) as Arc<dyn Dictionary>,
        store,
    );

    let err = pipeline
        .submit("Hello world", "goodbye", false)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::WordNotInSentence { .. }));
    assert_eq!(translator.call_count(), 0);
    assert_eq!(dictionary.call_count(), 0);
}

#[tokio::test]
async fn test_submit_wordMatchesAcrossCase_shouldSucceed() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(store);

    let draft = pipeline
        .submit("The CAT sat on the mat.", "cat", false)
        .await
        .unwrap();
    assert_eq!(draft.word, "cat");
}

#[tokio::test]
async fn test_submit_wordIsTrimmed_shouldValidateTrimmedForm() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(store);

    let draft = pipeline
        .submit("The cat sat on the mat.", "  cat  ", false)
        .await
        .unwrap();
    assert_eq!(draft.word, "cat");
}

#[tokio::test]
async fn test_submit_phraseMode_shouldSkipDictionaryAndLeaveMetadataEmpty() {
    let translator = Arc::new(MockTranslator::scripted(
        "hết",
        "Tôi đã hết thời gian.",
        "unused",
    ));
    let dictionary = Arc::new(MockDictionary::spoken("/x/", "http://a/x.mp3"));
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = pipeline_with(
        Arc::clone(&translator) as Arc<dyn Translator>,
        Arc::clone(&dictionary) as Arc<dyn Dictionary>,
        Arc::clone(&store),
    );

    let draft = pipeline
        .submit("I ran out of time.", "ran out of", true)
        .await
        .unwrap();

    assert_eq!(dictionary.call_count(), 0);
    assert_eq!(draft.phonetic, "");
    assert_eq!(draft.audio, "");

    let record = pipeline.persist(&draft).await.unwrap();
    assert_eq!(record.phonetic, "");
    assert_eq!(record.audio, "");
}

#[tokio::test]
async fn test_submit_invalidSpelling_shouldFailBeforeTranslation() {
    let translator = Arc::new(MockTranslator::working());
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = pipeline_with(
        Arc::clone(&translator) as Arc<dyn Translator>,
        Arc::new(MockDictionary::unknown_words()),
        store,
    );

    let err = pipeline
        .submit("The zxqv moved.", "zxqv", false)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidSpelling { ref word } if word == "zxqv"));
    assert_eq!(translator.call_count(), 0);
}

#[tokio::test]
async fn test_submit_dictionaryWithoutPhonetics_shouldStillSucceed() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = pipeline_with(
        Arc::new(MockTranslator::working()),
        Arc::new(MockDictionary::silent()),
        store,
    );

    let draft = pipeline
        .submit("The cat sat on the mat.", "cat", false)
        .await
        .unwrap();

    // Both empty together: probe found the word but no usable phonetics.
    assert_eq!(draft.phonetic, "");
    assert_eq!(draft.audio, "");
}

#[tokio::test]
async fn test_submit_translationFailure_shouldShortCircuitToTranslationError() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = pipeline_with(
        Arc::new(MockTranslator::failing()),
        Arc::new(MockDictionary::spoken("/kæt/", "http://a/cat.mp3")),
        store,
    );

    let err = pipeline
        .submit("The cat sat on the mat.", "cat", false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Translation(_)));
}

#[tokio::test]
async fn test_persist_shouldStampOwnerAndAssignId() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(Arc::clone(&store));

    let draft = pipeline
        .submit("The cat sat on the mat.", "cat", false)
        .await
        .unwrap();
    let record = pipeline.persist(&draft).await.unwrap();

    assert!(!record.id.is_empty());
    assert_eq!(record.user_id, TEST_USER);
    assert!(!record.created_at.is_empty());
    assert!(!record.in_context_list);
}

#[tokio::test]
async fn test_persist_thenReload_shouldMatchDraftOnVisibleFields() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(Arc::clone(&store));

    let draft = pipeline
        .submit("The cat sat on the mat.", "cat", false)
        .await
        .unwrap();
    pipeline.persist(&draft).await.unwrap();

    let records = store.list_all(TEST_USER).await.unwrap();
    assert_eq!(records.len(), 1);
    let reloaded = &records[0];
    assert_eq!(reloaded.word, draft.word);
    assert_eq!(reloaded.word_meaning, draft.word_meaning);
    assert_eq!(reloaded.context, draft.context);
    assert_eq!(reloaded.context_meaning, draft.context_meaning);
    assert_eq!(reloaded.phonetic, draft.phonetic);
    assert_eq!(reloaded.audio, draft.audio);
}

#[tokio::test]
async fn test_persist_incompleteDraft_shouldRefuse() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(store);

    let mut draft = crate::common::cat_draft();
    draft.word_meaning = String::new();

    let err = pipeline.persist(&draft).await.unwrap_err();
    assert!(matches!(err, AppError::IncompleteDraft("wordMeaning")));
}

#[tokio::test]
async fn test_persist_editedContextDroppingWord_shouldRefuse() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(store);

    let mut draft = crate::common::cat_draft();
    draft.context = "A dog barked.".to_string();

    let err = pipeline.persist(&draft).await.unwrap_err();
    assert!(matches!(err, AppError::WordNotInSentence { .. }));
}

#[tokio::test]
async fn test_persist_storeWriteFailure_shouldReportPersist() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(Arc::clone(&store));

    store.fail_next_write();
    let err = pipeline.persist(&crate::common::cat_draft()).await.unwrap_err();
    assert!(matches!(err, AppError::Persist(_)));
}

#[tokio::test]
async fn test_persist_withoutIdentity_shouldRefuse() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = EntryPipeline::new(
        Arc::new(MockDictionary::spoken("/kæt/", "http://a/cat.mp3")),
        Arc::new(MockTranslator::working()),
        store,
        Arc::new(AnonymousIdentity),
    );

    let err = pipeline.persist(&crate::common::cat_draft()).await.unwrap_err();
    assert!(matches!(err, AppError::NotAuthenticated));
}

#[tokio::test]
async fn test_entryForm_saveAfterHandEdit_shouldPersistEditsAndClearBuffers() {
    use tuvung::entry_pipeline::EntryForm;

    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(Arc::clone(&store));

    let mut form = EntryForm {
        sentence: "The cat sat on the mat.".to_string(),
        word: "cat".to_string(),
        ..EntryForm::default()
    };
    form.translate(&pipeline).await.unwrap();
    assert_eq!(form.word_meaning, "mèo");

    // The learner corrects the generated meaning before saving.
    form.word_meaning = "con mèo".to_string();
    let record = form.save(&pipeline).await.unwrap();

    assert_eq!(record.word_meaning, "con mèo");
    // Saving resets the whole input surface.
    assert!(form.sentence.is_empty());
    assert!(form.word.is_empty());
    assert!(form.word_meaning.is_empty());
    assert!(form.context_meaning.is_empty());
}

#[tokio::test]
async fn test_submit_substringProperty_shouldHoldOnEveryDraft() {
    let store = Arc::new(MemoryVocabStore::new());
    let pipeline = cat_pipeline(store);

    for (sentence, word) in [
        ("The cat sat on the mat.", "cat"),
        ("Concatenate strings carefully.", "CAT"),
        ("Mèo là mèo.", "mèo"),
    ] {
        let draft = pipeline.submit(sentence, word, false).await.unwrap();
        assert!(
            draft
                .context
                .to_lowercase()
                .contains(&draft.word.to_lowercase())
        );
    }
}
