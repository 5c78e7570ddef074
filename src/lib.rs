/*!
 * # tuvung - personal English→Vietnamese vocabulary trainer
 *
 * A Rust library and CLI for collecting English vocabulary in context and
 * reviewing it as fill-in-the-blank exercises.
 *
 * ## Features
 *
 * - Validate a word against an English dictionary and capture its
 *   phonetic transcription and pronunciation audio
 * - Translate the word and its sentence to Vietnamese with an AI provider
 * - Persist entries per user with a running review score
 * - Shuffled cloze review game that awards points for correct answers
 * - Batch refresh of example sentences for flagged entries
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `identity`: Identity capability (current user)
 * - `dictionary`: Dictionary capability and probe semantics
 * - `translator`: Translation capability over the Gemini client
 * - `store`: Per-user vocabulary persistence (SQLite and in-memory)
 * - `entry_pipeline`: Validation → probe → translation → persistence
 * - `review`: Shuffled cloze review session with score accounting
 * - `context_rotator`: Sequential batch refresh of example sentences
 * - `app_controller`: CLI command orchestration
 * - `providers`: HTTP client implementations for external services
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod context_rotator;
pub mod dictionary;
pub mod entry_pipeline;
pub mod errors;
pub mod identity;
pub mod providers;
pub mod review;
pub mod store;
pub mod translator;

// Re-export main types for easier usage
pub use app_config::Config;
pub use context_rotator::{ContextRotator, RotationReport};
pub use dictionary::{Dictionary, WordProbe};
pub use entry_pipeline::{EntryForm, EntryPipeline};
pub use errors::{AppError, ProviderError, StoreError, TranslationError};
pub use identity::Identity;
pub use review::{ReviewOutcome, ReviewSession};
pub use store::{DraftRecord, VocabRecord, VocabStore};
pub use translator::{TranslationMode, Translator};
