/*!
 * Database schema definitions and migrations.
 *
 * The table layout mirrors the document-store path convention the
 * application was designed around: `users/{userId}/vocabulary/{recordId}`
 * becomes the `vocabulary` table keyed by `(user_id, id)`, and
 * `users/{userId}/scores/total` becomes the single-row-per-user `scores`
 * table.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        // Fresh database - create all tables
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating database schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    // WAL mode for better concurrency and crash recovery
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS vocabulary (
            id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            word TEXT NOT NULL,
            word_meaning TEXT NOT NULL,
            context TEXT NOT NULL,
            context_meaning TEXT NOT NULL,
            phonetic TEXT NOT NULL DEFAULT '',
            audio TEXT NOT NULL DEFAULT '',
            in_context_list INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            PRIMARY KEY (user_id, id)
        );

        CREATE INDEX IF NOT EXISTS idx_vocabulary_user ON vocabulary(user_id);
        CREATE INDEX IF NOT EXISTS idx_vocabulary_context_list
            ON vocabulary(user_id, in_context_list);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS scores (
            user_id TEXT PRIMARY KEY,
            points INTEGER NOT NULL DEFAULT 0 CHECK (points >= 0)
        );
        "#,
    )?;

    Ok(())
}

/// Apply migrations from an older schema version
fn migrate_schema(conn: &Connection, from_version: i32) -> Result<()> {
    // v1 is the first released schema; nothing to migrate from yet.
    let _ = (conn, from_version);
    Ok(())
}
