/*!
 * Error types for the tuvung application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 * Every failure the user can observe is a distinct variant; callers match
 * on kinds, never on message strings.
 */

use thiserror::Error;

/// Errors that can occur when talking to an external HTTP API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when decoding an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider answered but produced no usable text
    #[error("Translation service returned an empty response")]
    EmptyResponse,
}

/// Errors that can occur in the vocabulary store
#[derive(Error, Debug)]
pub enum StoreError {
    /// A read operation failed
    #[error("Store read failed: {0}")]
    Read(String),

    /// A write operation failed
    #[error("Store write failed: {0}")]
    Write(String),

    /// The addressed record does not exist for this user
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Main application error type covering every user-visible failure kind
#[derive(Error, Debug)]
pub enum AppError {
    /// No authenticated user; store-touching operations refuse to proceed
    #[error("No user is signed in")]
    NotAuthenticated,

    /// The target word is not a substring of the sentence
    #[error("The word \"{word}\" does not occur in the sentence")]
    WordNotInSentence {
        /// The word as entered (trimmed)
        word: String,
    },

    /// The dictionary reported the word as not found
    #[error("The dictionary has no entry for \"{word}\"")]
    InvalidSpelling {
        /// The word as entered (trimmed)
        word: String,
    },

    /// Error from the translation capability
    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// A store write (insert or update) failed
    #[error("Failed to save: {0}")]
    Persist(#[source] StoreError),

    /// A store read failed
    #[error("Failed to load: {0}")]
    Load(#[source] StoreError),

    /// A draft is missing required fields and cannot be persisted
    #[error("Entry is incomplete: {0} is empty")]
    IncompleteDraft(&'static str),

    /// Context rotation stopped at a record; earlier records stay rotated
    #[error("Context rotation failed at \"{word}\": {source}")]
    RotationFailed {
        /// Word of the record the rotation stopped at
        word: String,
        /// The underlying failure
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Wrap a store error as a persist (write) failure
    pub fn persist(err: StoreError) -> Self {
        Self::Persist(err)
    }

    /// Wrap a store error as a load (read) failure
    pub fn load(err: StoreError) -> Self {
        Self::Load(err)
    }
}
