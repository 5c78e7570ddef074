/*!
 * Entry pipeline: from raw learner input to a persisted vocabulary record.
 *
 * The pipeline is split in two deliberately. `submit` is read-only and
 * composes the external lookups (dictionary probe, then the word and
 * sentence translations in parallel) into a draft the learner can still
 * hand-edit. `persist` is the sole write; it stamps ownership and time and
 * hands the record to the store.
 */

use std::sync::Arc;

use log::{debug, info};

use crate::dictionary::Dictionary;
use crate::errors::AppError;
use crate::identity::{Identity, require_user};
use crate::store::{DraftRecord, VocabRecord, VocabStore};
use crate::translator::{TranslationMode, Translator, tidy_response};

/// Case-insensitive substring test with Unicode-aware lowercasing
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Orchestrates validation, translation and persistence for new entries
pub struct EntryPipeline {
    dictionary: Arc<dyn Dictionary>,
    translator: Arc<dyn Translator>,
    store: Arc<dyn VocabStore>,
    identity: Arc<dyn Identity>,
}

impl EntryPipeline {
    /// Create a pipeline over the given capabilities
    pub fn new(
        dictionary: Arc<dyn Dictionary>,
        translator: Arc<dyn Translator>,
        store: Arc<dyn VocabStore>,
        identity: Arc<dyn Identity>,
    ) -> Self {
        Self {
            dictionary,
            translator,
            store,
            identity,
        }
    }

    /// Validate and translate the input, producing an unsaved draft.
    ///
    /// Phrase mode skips the dictionary probe and leaves phonetic and audio
    /// empty. Word and sentence translation run concurrently; either
    /// failure short-circuits the pair.
    pub async fn submit(
        &self,
        sentence: &str,
        word: &str,
        phrase_mode: bool,
    ) -> Result<DraftRecord, AppError> {
        let word = word.trim();

        if word.is_empty() || !contains_case_insensitive(sentence, word) {
            return Err(AppError::WordNotInSentence {
                word: word.to_string(),
            });
        }

        let (phonetic, audio) = if phrase_mode {
            (String::new(), String::new())
        } else {
            let probe = self.dictionary.probe(word).await;
            if !probe.valid {
                return Err(AppError::InvalidSpelling {
                    word: word.to_string(),
                });
            }
            (probe.phonetic, probe.audio)
        };

        let (word_meaning, context_meaning) = futures::future::try_join(
            self.translator.translate(word, TranslationMode::Word),
            self.translator.translate(sentence, TranslationMode::Sentence),
        )
        .await?;

        debug!("Draft ready for \"{}\"", word);
        Ok(DraftRecord {
            word: word.to_string(),
            word_meaning: tidy_response(&word_meaning),
            context: sentence.to_string(),
            context_meaning: tidy_response(&context_meaning),
            phonetic,
            audio,
        })
    }

    /// Persist a draft for the current user, stamping owner and time.
    ///
    /// Refuses incomplete drafts and drafts whose sentence no longer
    /// contains the word (the learner can hand-edit both between submit
    /// and save).
    pub async fn persist(&self, draft: &DraftRecord) -> Result<VocabRecord, AppError> {
        let user_id = require_user(self.identity.as_ref())?;

        if let Some(field) = draft.first_missing_field() {
            return Err(AppError::IncompleteDraft(field));
        }
        if !contains_case_insensitive(&draft.context, &draft.word) {
            return Err(AppError::WordNotInSentence {
                word: draft.word.clone(),
            });
        }

        let record = VocabRecord::from_draft(draft, user_id);
        let record = self
            .store
            .insert(record)
            .await
            .map_err(AppError::persist)?;

        info!("Saved vocabulary entry \"{}\" ({})", record.word, record.id);
        Ok(record)
    }
}

/// Explicit edit-buffer state for the entry surface.
///
/// Mirrors what the learner sees: the sentence and word inputs, the two
/// generated (and editable) meaning fields, and the phrase-mode switch.
/// Saving clears every buffer.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    /// The English sentence input
    pub sentence: String,
    /// The target word input
    pub word: String,
    /// Generated Vietnamese meaning of the word, editable
    pub word_meaning: String,
    /// Generated Vietnamese translation of the sentence, editable
    pub context_meaning: String,
    /// Dictionary phonetic captured by the last translate
    pub phonetic: String,
    /// Dictionary audio URL captured by the last translate
    pub audio: String,
    /// Whether the entry is a multi-word phrase
    pub phrase_mode: bool,
}

impl EntryForm {
    /// Run the pipeline and fill the meaning buffers from the draft
    pub async fn translate(&mut self, pipeline: &EntryPipeline) -> Result<(), AppError> {
        let draft = pipeline
            .submit(&self.sentence, &self.word, self.phrase_mode)
            .await?;
        self.word_meaning = draft.word_meaning;
        self.context_meaning = draft.context_meaning;
        self.phonetic = draft.phonetic;
        self.audio = draft.audio;
        Ok(())
    }

    /// The draft as currently edited
    pub fn draft(&self) -> DraftRecord {
        DraftRecord {
            word: self.word.trim().to_string(),
            word_meaning: self.word_meaning.clone(),
            context: self.sentence.clone(),
            context_meaning: self.context_meaning.clone(),
            phonetic: self.phonetic.clone(),
            audio: self.audio.clone(),
        }
    }

    /// Persist the current draft; clears all buffers on success
    pub async fn save(&mut self, pipeline: &EntryPipeline) -> Result<VocabRecord, AppError> {
        let record = pipeline.persist(&self.draft()).await?;
        *self = EntryForm::default();
        Ok(record)
    }
}
