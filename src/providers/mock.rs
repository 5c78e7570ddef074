/*!
 * Mock capability implementations for testing.
 *
 * This module provides scripted doubles for the translator and dictionary
 * capabilities so tests never make external API calls:
 * - `MockTranslator::scripted(..)` - fixed word/sentence/context answers
 * - `MockTranslator::failing()` - every call fails
 * - `MockDictionary::spoken(..)` - valid word with phonetics
 * - `MockDictionary::unknown_words()` - every probe reports not-found
 *
 * Both track call counts so tests can assert which capabilities were
 * consulted.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::dictionary::{Dictionary, WordProbe};
use crate::errors::{ProviderError, TranslationError};
use crate::translator::{TranslationMode, Translator};

/// Scripted translator double
pub struct MockTranslator {
    /// Answer for word-mode translation
    word_meaning: String,
    /// Answer for sentence-mode translation
    sentence_meaning: String,
    /// Answer for example-sentence generation
    fresh_context: String,
    /// Whether every call should fail
    failing: bool,
    /// Number of calls across all three operations
    calls: Arc<AtomicUsize>,
    /// Calls remaining before failures start; None means per `failing`
    fail_after: Option<usize>,
}

impl MockTranslator {
    /// Translator that answers with the given fixed strings
    pub fn scripted(
        word_meaning: impl Into<String>,
        sentence_meaning: impl Into<String>,
        fresh_context: impl Into<String>,
    ) -> Self {
        Self {
            word_meaning: word_meaning.into(),
            sentence_meaning: sentence_meaning.into(),
            fresh_context: fresh_context.into(),
            failing: false,
            calls: Arc::new(AtomicUsize::new(0)),
            fail_after: None,
        }
    }

    /// Translator with generic placeholder answers
    pub fn working() -> Self {
        Self::scripted("nghĩa", "bản dịch của câu", "A new example sentence.")
    }

    /// Translator whose every call fails with a provider error
    pub fn failing() -> Self {
        let mut mock = Self::working();
        mock.failing = true;
        mock
    }

    /// Translator that succeeds for the first `n` calls and then fails
    pub fn failing_after(n: usize) -> Self {
        let mut mock = Self::working();
        mock.fail_after = Some(n);
        mock
    }

    /// Handle to the shared call counter
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<(), TranslationError> {
        let made = self.calls.fetch_add(1, Ordering::SeqCst);
        let should_fail = match self.fail_after {
            Some(n) => made >= n,
            None => self.failing,
        };
        if should_fail {
            return Err(TranslationError::Provider(ProviderError::RequestFailed(
                "mock translator configured to fail".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        _text: &str,
        mode: TranslationMode,
    ) -> Result<String, TranslationError> {
        self.record_call()?;
        Ok(match mode {
            TranslationMode::Word => self.word_meaning.clone(),
            TranslationMode::Sentence => self.sentence_meaning.clone(),
        })
    }

    async fn find_new_context(&self, _word: &str) -> Result<String, TranslationError> {
        self.record_call()?;
        Ok(self.fresh_context.clone())
    }
}

/// Scripted dictionary double
pub struct MockDictionary {
    /// The probe every call answers with
    probe: WordProbe,
    /// Number of probes made
    calls: Arc<AtomicUsize>,
}

impl MockDictionary {
    /// Dictionary that knows every word, with the given pronunciation
    pub fn spoken(phonetic: impl Into<String>, audio: impl Into<String>) -> Self {
        Self {
            probe: WordProbe {
                valid: true,
                phonetic: phonetic.into(),
                audio: audio.into(),
            },
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Dictionary that knows every word but has no pronunciation metadata
    pub fn silent() -> Self {
        Self {
            probe: WordProbe::valid_without_phonetics(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Dictionary that reports every word as not found
    pub fn unknown_words() -> Self {
        Self {
            probe: WordProbe::invalid(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of probes made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Dictionary for MockDictionary {
    async fn probe(&self, _word: &str) -> WordProbe {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.probe.clone()
    }
}
