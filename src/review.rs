/*!
 * Fill-in-the-blank review over a user's saved vocabulary.
 *
 * A session walks a shuffled copy of the user's records, presents each
 * record's sentence with the target word blanked out, and awards one point
 * per correct answer. Points are merged into the persisted per-user
 * counter as they are earned, so an interrupted session keeps what it won.
 */

use std::sync::Arc;

use log::debug;
use rand::seq::SliceRandom;
use regex::RegexBuilder;

use crate::errors::AppError;
use crate::identity::{Identity, require_user};
use crate::store::{VocabRecord, VocabStore};

/// The blank inserted in place of the target word
pub const CLOZE_BLANK: &str = "_____";

/// Replace every case-insensitive occurrence of `word` in `context` with
/// the blank. Metacharacters in the word match literally.
pub fn render_cloze(context: &str, word: &str) -> String {
    let word = word.trim();
    if word.is_empty() {
        return context.to_string();
    }
    match RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(context, CLOZE_BLANK).to_string(),
        Err(_) => context.to_string(),
    }
}

/// Result of answering the current exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The answer matched; one point was earned and persisted
    Correct {
        /// Points earned in this session so far
        session_score: u32,
        /// The persisted counter after the merge
        total_points: i64,
    },
    /// The answer did not match; the correct word is revealed
    Incorrect {
        /// The word the learner should have entered
        correct_word: String,
    },
}

/// One review walkthrough for a single user
pub struct ReviewSession {
    user_id: String,
    queue: Vec<VocabRecord>,
    index: usize,
    session_score: u32,
    persisted_points: i64,
    store: Arc<dyn VocabStore>,
}

impl std::fmt::Debug for ReviewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewSession")
            .field("user_id", &self.user_id)
            .field("queue", &self.queue)
            .field("index", &self.index)
            .field("session_score", &self.session_score)
            .field("persisted_points", &self.persisted_points)
            .finish_non_exhaustive()
    }
}

impl ReviewSession {
    /// Load the user's records, shuffle them, and ensure the score counter
    /// exists. An empty collection yields an immediately finished session.
    pub async fn start(
        identity: &dyn Identity,
        store: Arc<dyn VocabStore>,
    ) -> Result<Self, AppError> {
        let user_id = require_user(identity)?;

        let mut queue = store.list_all(&user_id).await.map_err(AppError::load)?;
        queue.shuffle(&mut rand::rng());

        let persisted_points = store.get_score(&user_id).await.map_err(AppError::load)?;
        // Merge of zero creates the counter when absent and changes nothing
        // otherwise.
        store
            .add_score(&user_id, 0)
            .await
            .map_err(AppError::persist)?;

        debug!(
            "Review session for {} over {} records, starting at {} points",
            user_id,
            queue.len(),
            persisted_points
        );

        Ok(Self {
            user_id,
            queue,
            index: 0,
            session_score: 0,
            persisted_points,
            store,
        })
    }

    /// The record currently being asked, if the session is not finished
    pub fn current(&self) -> Option<&VocabRecord> {
        self.queue.get(self.index)
    }

    /// The cloze rendering of the current record
    pub fn cloze(&self) -> Option<String> {
        self.current()
            .map(|record| render_cloze(&record.context, &record.word))
    }

    /// Whether every record has been asked
    pub fn is_finished(&self) -> bool {
        self.index >= self.queue.len()
    }

    /// Points earned in this session
    pub fn session_score(&self) -> u32 {
        self.session_score
    }

    /// The persisted counter as last observed
    pub fn persisted_points(&self) -> i64 {
        self.persisted_points
    }

    /// The shuffled queue (a permutation of the user's records)
    pub fn queue(&self) -> &[VocabRecord] {
        &self.queue
    }

    /// Answer the current exercise. Returns None past the end of the
    /// queue. Both outcomes advance to the next record; a correct answer
    /// first merges the earned point into the persisted counter.
    pub async fn submit(&mut self, answer: &str) -> Result<Option<ReviewOutcome>, AppError> {
        let Some(record) = self.queue.get(self.index) else {
            return Ok(None);
        };

        let given = answer.trim().to_lowercase();
        let expected = record.word.trim().to_lowercase();

        let outcome = if given == expected {
            let total_points = self
                .store
                .add_score(&self.user_id, 1)
                .await
                .map_err(AppError::persist)?;
            self.session_score += 1;
            self.persisted_points = total_points;
            ReviewOutcome::Correct {
                session_score: self.session_score,
                total_points,
            }
        } else {
            ReviewOutcome::Incorrect {
                correct_word: record.word.clone(),
            }
        };

        self.index += 1;
        Ok(Some(outcome))
    }

    /// Select or deselect a record for the next context rotation, keeping
    /// the local copy in step with the store.
    pub async fn toggle_context_flag(
        &mut self,
        record_id: &str,
        flagged: bool,
    ) -> Result<(), AppError> {
        self.store
            .update_context_flag(&self.user_id, record_id, flagged)
            .await
            .map_err(AppError::persist)?;

        if let Some(record) = self.queue.iter_mut().find(|r| r.id == record_id) {
            record.in_context_list = flagged;
        }
        Ok(())
    }
}
