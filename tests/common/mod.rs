/*!
 * Shared fixtures for the tuvung test suite.
 *
 * Capability doubles come from `tuvung::providers::mock`; this module adds
 * record builders and pre-wired pipelines so scenario tests stay short.
 */

use std::sync::Arc;

use tuvung::dictionary::Dictionary;
use tuvung::entry_pipeline::EntryPipeline;
use tuvung::identity::ProfileIdentity;
use tuvung::providers::mock::{MockDictionary, MockTranslator};
use tuvung::store::{DraftRecord, MemoryVocabStore, VocabRecord, VocabStore};
use tuvung::translator::Translator;

/// The user every fixture works as
pub const TEST_USER: &str = "test-user";

/// A complete draft for the canonical "cat" example
pub fn cat_draft() -> DraftRecord {
    DraftRecord {
        word: "cat".to_string(),
        word_meaning: "mèo".to_string(),
        context: "The cat sat on the mat.".to_string(),
        context_meaning: "Con mèo ngồi trên tấm thảm.".to_string(),
        phonetic: "/kæt/".to_string(),
        audio: "http://a/cat.mp3".to_string(),
    }
}

/// Insert a minimal record for `word` and return it with its assigned id
pub async fn insert_record(
    store: &dyn VocabStore,
    word: &str,
    context: &str,
    flagged: bool,
) -> VocabRecord {
    let mut record = VocabRecord::from_draft(
        &DraftRecord {
            word: word.to_string(),
            word_meaning: format!("nghĩa của {}", word),
            context: context.to_string(),
            context_meaning: "bản dịch".to_string(),
            phonetic: String::new(),
            audio: String::new(),
        },
        TEST_USER,
    );
    record.in_context_list = flagged;
    store.insert(record).await.expect("insert fixture record")
}

/// A pipeline over the given translator/dictionary doubles, an in-memory
/// store, and the fixed test user
pub fn pipeline_with(
    translator: Arc<dyn Translator>,
    dictionary: Arc<dyn Dictionary>,
    store: Arc<MemoryVocabStore>,
) -> EntryPipeline {
    EntryPipeline::new(
        dictionary,
        translator,
        store,
        Arc::new(ProfileIdentity::new(TEST_USER)),
    )
}

/// A pipeline scripted for the canonical "cat" happy path
pub fn cat_pipeline(store: Arc<MemoryVocabStore>) -> EntryPipeline {
    pipeline_with(
        Arc::new(MockTranslator::scripted(
            "mèo",
            "Con mèo ngồi trên tấm thảm.",
            "A cat chases the mouse.",
        )),
        Arc::new(MockDictionary::spoken("/kæt/", "http://a/cat.mp3")),
        store,
    )
}
