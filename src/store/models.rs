/*!
 * Vocabulary entity models.
 *
 * `DraftRecord` is the read-only result of the entry pipeline that the
 * learner can still hand-edit; `VocabRecord` is what the store persists.
 * Serde names follow the document-store field convention (camelCase).
 */

use serde::{Deserialize, Serialize};

/// A saved vocabulary entry, scoped to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabRecord {
    /// Store-assigned opaque identifier, immutable once assigned
    #[serde(default)]
    pub id: String,

    /// The target English word or phrase, trimmed
    pub word: String,

    /// Vietnamese meaning of `word`
    pub word_meaning: String,

    /// English sentence the word was learned in
    pub context: String,

    /// Vietnamese translation of `context`
    pub context_meaning: String,

    /// IPA-style transcription; empty for phrase-mode entries
    #[serde(default)]
    pub phonetic: String,

    /// Pronunciation audio URL; empty exactly when `phonetic` is empty
    #[serde(default)]
    pub audio: String,

    /// Whether the record is selected for the next context rotation
    #[serde(default)]
    pub in_context_list: bool,

    /// Creation timestamp (RFC 3339)
    pub created_at: String,

    /// Owning user's opaque identifier
    pub user_id: String,
}

impl VocabRecord {
    /// Build a persistable record from a draft, stamping owner and time.
    /// The id stays empty until the store assigns one.
    pub fn from_draft(draft: &DraftRecord, user_id: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            word: draft.word.clone(),
            word_meaning: draft.word_meaning.clone(),
            context: draft.context.clone(),
            context_meaning: draft.context_meaning.clone(),
            phonetic: draft.phonetic.clone(),
            audio: draft.audio.clone(),
            in_context_list: false,
            created_at: chrono::Utc::now().to_rfc3339(),
            user_id: user_id.into(),
        }
    }
}

/// The reviewed-but-unsaved output of the entry pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    /// The target word or phrase, trimmed
    pub word: String,

    /// Vietnamese meaning of `word`; hand-editable before saving
    pub word_meaning: String,

    /// The sentence as entered
    pub context: String,

    /// Vietnamese translation of `context`; hand-editable before saving
    pub context_meaning: String,

    /// IPA-style transcription captured from the dictionary probe
    #[serde(default)]
    pub phonetic: String,

    /// Pronunciation audio URL captured from the dictionary probe
    #[serde(default)]
    pub audio: String,
}

impl DraftRecord {
    /// Name of the first required field that is empty, if any
    pub fn first_missing_field(&self) -> Option<&'static str> {
        if self.word.trim().is_empty() {
            Some("word")
        } else if self.word_meaning.trim().is_empty() {
            Some("wordMeaning")
        } else if self.context.trim().is_empty() {
            Some("context")
        } else if self.context_meaning.trim().is_empty() {
            Some("contextMeaning")
        } else {
            None
        }
    }
}
