/*!
 * In-memory implementation of the vocabulary store.
 *
 * Used by tests; behaves like the SQLite store at the contract level and
 * adds scripted fault injection so failure paths (persist/load errors) can
 * be exercised without a database.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::VocabStore;
use super::models::VocabRecord;
use crate::errors::StoreError;

/// Vocabulary store held in process memory
#[derive(Default)]
pub struct MemoryVocabStore {
    records: RwLock<HashMap<String, Vec<VocabRecord>>>,
    scores: RwLock<HashMap<String, i64>>,
    fail_next_write: AtomicBool,
    fail_next_read: AtomicBool,
}

impl MemoryVocabStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next write operation fail with `StoreError::Write`
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    /// Make the next read operation fail with `StoreError::Read`
    pub fn fail_next_read(&self) {
        self.fail_next_read.store(true, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            Err(StoreError::Write("scripted write failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_next_read.swap(false, Ordering::SeqCst) {
            Err(StoreError::Read("scripted read failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VocabStore for MemoryVocabStore {
    async fn insert(&self, mut record: VocabRecord) -> Result<VocabRecord, StoreError> {
        self.check_write()?;
        record.id = Uuid::new_v4().to_string();
        self.records
            .write()
            .entry(record.user_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn list_all(&self, user_id: &str) -> Result<Vec<VocabRecord>, StoreError> {
        self.check_read()?;
        Ok(self
            .records
            .read()
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_context_flag(
        &self,
        user_id: &str,
        record_id: &str,
        flagged: bool,
    ) -> Result<(), StoreError> {
        self.check_write()?;
        let mut records = self.records.write();
        let record = records
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| StoreError::NotFound(format!("vocabulary record {}", record_id)))?;
        record.in_context_list = flagged;
        Ok(())
    }

    async fn update_context(
        &self,
        user_id: &str,
        record_id: &str,
        context: &str,
        context_meaning: &str,
    ) -> Result<(), StoreError> {
        self.check_write()?;
        let mut records = self.records.write();
        let record = records
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| StoreError::NotFound(format!("vocabulary record {}", record_id)))?;
        record.context = context.to_string();
        record.context_meaning = context_meaning.to_string();
        Ok(())
    }

    async fn get_score(&self, user_id: &str) -> Result<i64, StoreError> {
        self.check_read()?;
        Ok(self.scores.read().get(user_id).copied().unwrap_or(0))
    }

    async fn add_score(&self, user_id: &str, delta: i64) -> Result<i64, StoreError> {
        self.check_write()?;
        let mut scores = self.scores.write();
        let points = scores.entry(user_id.to_string()).or_insert(0);
        *points = (*points + delta).max(0);
        Ok(*points)
    }
}
