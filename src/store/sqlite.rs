/*!
 * SQLite-backed implementation of the vocabulary store.
 *
 * The store owns its connection directly: one rusqlite `Connection` behind
 * an `Arc<Mutex>`, driven through `spawn_blocking` so SQL never blocks the
 * async runtime. Reads and writes go through separate helpers so every
 * failure is already a `StoreError::Read` or `StoreError::Write` by the
 * time it leaves this file, which is what lets callers keep the load/save
 * error kinds apart without inspecting messages.
 */

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use super::VocabStore;
use super::models::VocabRecord;
use super::schema;
use crate::errors::StoreError;

/// Vocabulary store persisted in SQLite
#[derive(Clone)]
pub struct SqliteVocabStore {
    /// Path the database was opened at (`:memory:` for test stores)
    db_path: PathBuf,
    /// The single connection, shared across clones of the store
    conn: Arc<Mutex<Connection>>,
}

impl SqliteVocabStore {
    /// Open (or create) the vocabulary database at the given path
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {:?}", parent)
            })?;
        }

        info!("Opening vocabulary database at {:?}", db_path);
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the database at the default per-user location
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_database_path()?)
    }

    /// Create a store with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory vocabulary database");
        let conn =
            Connection::open_in_memory().context("Failed to create in-memory database")?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Where the database lives when no path is configured
    pub fn default_database_path() -> Result<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .ok_or_else(|| {
                anyhow::anyhow!("Could not determine a data directory for the vocabulary database")
            })?;
        Ok(base.join("tuvung").join("tuvung.db"))
    }

    /// The path this store was opened at
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Run a read-only query on the blocking pool; any failure surfaces as
    /// `StoreError::Read`.
    async fn read<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Read(format!("database lock poisoned: {}", e)))?;
            f(&conn).map_err(|e| StoreError::Read(e.to_string()))
        })
        .await
        .map_err(|e| StoreError::Read(format!("database task panicked: {}", e)))?
    }

    /// Run a mutation on the blocking pool; any failure surfaces as
    /// `StoreError::Write`.
    async fn write<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Write(format!("database lock poisoned: {}", e)))?;
            f(&conn).map_err(|e| StoreError::Write(e.to_string()))
        })
        .await
        .map_err(|e| StoreError::Write(format!("database task panicked: {}", e)))?
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<VocabRecord> {
    Ok(VocabRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        word: row.get(2)?,
        word_meaning: row.get(3)?,
        context: row.get(4)?,
        context_meaning: row.get(5)?,
        phonetic: row.get(6)?,
        audio: row.get(7)?,
        in_context_list: row.get::<_, i64>(8)? != 0,
        created_at: row.get(9)?,
    })
}

const RECORD_COLUMNS: &str = "id, user_id, word, word_meaning, context, context_meaning, \
                              phonetic, audio, in_context_list, created_at";

#[async_trait]
impl VocabStore for SqliteVocabStore {
    async fn insert(&self, mut record: VocabRecord) -> Result<VocabRecord, StoreError> {
        record.id = Uuid::new_v4().to_string();
        let to_insert = record.clone();

        self.write(move |conn| {
            conn.execute(
                r#"
                INSERT INTO vocabulary (
                    id, user_id, word, word_meaning, context, context_meaning,
                    phonetic, audio, in_context_list, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
                params![
                    to_insert.id,
                    to_insert.user_id,
                    to_insert.word,
                    to_insert.word_meaning,
                    to_insert.context,
                    to_insert.context_meaning,
                    to_insert.phonetic,
                    to_insert.audio,
                    to_insert.in_context_list as i64,
                    to_insert.created_at,
                ],
            )?;
            Ok(())
        })
        .await?;

        debug!("Inserted vocabulary record {}", record.id);
        Ok(record)
    }

    async fn list_all(&self, user_id: &str) -> Result<Vec<VocabRecord>, StoreError> {
        let user_id = user_id.to_string();

        self.read(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM vocabulary WHERE user_id = ?1",
                RECORD_COLUMNS
            ))?;
            stmt.query_map([&user_id], row_to_record)?.collect()
        })
        .await
    }

    async fn update_context_flag(
        &self,
        user_id: &str,
        record_id: &str,
        flagged: bool,
    ) -> Result<(), StoreError> {
        let user_id = user_id.to_string();
        let record_id = record_id.to_string();
        let query_id = record_id.clone();

        let changed = self
            .write(move |conn| {
                conn.execute(
                    "UPDATE vocabulary SET in_context_list = ?1 WHERE user_id = ?2 AND id = ?3",
                    params![flagged as i64, user_id, query_id],
                )
            })
            .await?;

        if changed == 0 {
            return Err(StoreError::NotFound(record_id_message(record_id)));
        }
        Ok(())
    }

    async fn update_context(
        &self,
        user_id: &str,
        record_id: &str,
        context: &str,
        context_meaning: &str,
    ) -> Result<(), StoreError> {
        let user_id = user_id.to_string();
        let record_id = record_id.to_string();
        let query_id = record_id.clone();
        let context = context.to_string();
        let context_meaning = context_meaning.to_string();

        let changed = self
            .write(move |conn| {
                conn.execute(
                    r#"
                    UPDATE vocabulary
                    SET context = ?1, context_meaning = ?2
                    WHERE user_id = ?3 AND id = ?4
                    "#,
                    params![context, context_meaning, user_id, query_id],
                )
            })
            .await?;

        if changed == 0 {
            return Err(StoreError::NotFound(record_id_message(record_id)));
        }
        Ok(())
    }

    async fn get_score(&self, user_id: &str) -> Result<i64, StoreError> {
        let user_id = user_id.to_string();

        self.read(move |conn| {
            let points: Option<i64> = conn
                .query_row(
                    "SELECT points FROM scores WHERE user_id = ?1",
                    [&user_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(points.unwrap_or(0))
        })
        .await
    }

    async fn add_score(&self, user_id: &str, delta: i64) -> Result<i64, StoreError> {
        let user_id = user_id.to_string();

        self.write(move |conn| {
            conn.execute(
                r#"
                INSERT INTO scores (user_id, points) VALUES (?1, MAX(?2, 0))
                ON CONFLICT(user_id) DO UPDATE SET points = points + ?2
                "#,
                params![user_id, delta],
            )?;
            conn.query_row(
                "SELECT points FROM scores WHERE user_id = ?1",
                [&user_id],
                |row| row.get(0),
            )
        })
        .await
    }
}

fn record_id_message(record_id: String) -> String {
    format!("vocabulary record {}", record_id)
}
