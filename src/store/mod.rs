/*!
 * Per-user vocabulary persistence.
 *
 * The store is a capability: the core talks to the `VocabStore` trait and
 * never to SQL. Two implementations ship with the crate, a SQLite-backed
 * one for the application and an in-memory one for tests. Every operation
 * is scoped to a user id; records are atomic at row granularity and
 * concurrent writers are last-writer-wins.
 */

use async_trait::async_trait;

use crate::errors::StoreError;

pub mod memory;
pub mod models;
pub mod schema;
pub mod sqlite;

// Re-export main types
pub use memory::MemoryVocabStore;
pub use models::{DraftRecord, VocabRecord};
pub use sqlite::SqliteVocabStore;

/// Per-user CRUD over vocabulary records and the score counter
#[async_trait]
pub trait VocabStore: Send + Sync {
    /// Persist a record, assigning its id; duplicates are allowed
    async fn insert(&self, record: VocabRecord) -> Result<VocabRecord, StoreError>;

    /// All records belonging to the user, in no particular order
    async fn list_all(&self, user_id: &str) -> Result<Vec<VocabRecord>, StoreError>;

    /// Set or clear a record's rotation flag
    async fn update_context_flag(
        &self,
        user_id: &str,
        record_id: &str,
        flagged: bool,
    ) -> Result<(), StoreError>;

    /// Replace a record's example sentence and its translation
    async fn update_context(
        &self,
        user_id: &str,
        record_id: &str,
        context: &str,
        context_meaning: &str,
    ) -> Result<(), StoreError>;

    /// The user's score; a missing counter reads as 0
    async fn get_score(&self, user_id: &str) -> Result<i64, StoreError>;

    /// Merge `delta` into the user's score counter, creating it when absent,
    /// and return the new value
    async fn add_score(&self, user_id: &str, delta: i64) -> Result<i64, StoreError>;
}
