/*!
 * Batch refresh of example sentences.
 *
 * Every record the user flagged with `in_context_list` gets a freshly
 * generated English sentence and its Vietnamese translation. Records are
 * processed strictly one at a time: the run stops at the first failure,
 * leaving earlier records rotated and later ones untouched, and the error
 * names the record it stopped at. Flags are left set after a successful
 * run, so pressing rotate again refreshes the same selection.
 */

use std::sync::Arc;

use log::info;

use crate::errors::AppError;
use crate::store::{VocabRecord, VocabStore};
use crate::translator::{TranslationMode, Translator, tidy_response};

/// Outcome of a completed rotation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationReport {
    /// How many records were flagged for rotation
    pub selected: usize,
    /// How many records were rotated (equals `selected` on success)
    pub rotated: usize,
}

/// Batch-refreshes contexts on all flagged records
pub struct ContextRotator {
    translator: Arc<dyn Translator>,
    store: Arc<dyn VocabStore>,
}

impl ContextRotator {
    /// Create a rotator over the given capabilities
    pub fn new(translator: Arc<dyn Translator>, store: Arc<dyn VocabStore>) -> Self {
        Self { translator, store }
    }

    /// Rotate every flagged record belonging to `user_id`
    pub async fn rotate(&self, user_id: &str) -> Result<RotationReport, AppError> {
        self.rotate_with_progress(user_id, |_, _| {}).await
    }

    /// Rotate with a progress callback receiving (done, total)
    pub async fn rotate_with_progress(
        &self,
        user_id: &str,
        progress: impl Fn(usize, usize),
    ) -> Result<RotationReport, AppError> {
        let records = self
            .store
            .list_all(user_id)
            .await
            .map_err(AppError::load)?;

        let selection: Vec<VocabRecord> = records
            .into_iter()
            .filter(|record| record.in_context_list)
            .collect();
        let selected = selection.len();
        progress(0, selected);

        for (done, record) in selection.into_iter().enumerate() {
            self.rotate_one(user_id, &record)
                .await
                .map_err(|source| AppError::RotationFailed {
                    word: record.word.clone(),
                    source: Box::new(source),
                })?;
            progress(done + 1, selected);
        }

        info!("Rotated context on {} records for {}", selected, user_id);
        Ok(RotationReport {
            selected,
            rotated: selected,
        })
    }

    /// Refresh a single record: generate a sentence, translate it, store
    /// both. The fresh sentence is taken as-is; it is not required to
    /// contain the word again.
    async fn rotate_one(&self, user_id: &str, record: &VocabRecord) -> Result<(), AppError> {
        let new_context = tidy_response(&self.translator.find_new_context(&record.word).await?);
        let new_meaning = tidy_response(
            &self
                .translator
                .translate(&new_context, TranslationMode::Sentence)
                .await?,
        );

        self.store
            .update_context(user_id, &record.id, &new_context, &new_meaning)
            .await
            .map_err(AppError::persist)
    }
}
