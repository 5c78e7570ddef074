/*!
 * Dictionary capability.
 *
 * A probe answers two questions about a single English word: is it spelled
 * correctly, and how is it pronounced. Pronunciation metadata is best
 * effort; a probe never fails the caller. Transport problems degrade to
 * "not a valid word" and are logged, which keeps the entry pipeline's
 * control flow free of dictionary error plumbing.
 */

use async_trait::async_trait;
use log::warn;

use crate::app_config::DictionaryConfig;
use crate::providers::free_dictionary::{DictionaryEntry, FreeDictionary, LookupOutcome};

/// Result of probing a word against the dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordProbe {
    /// Whether the dictionary knows the word
    pub valid: bool,
    /// IPA-style transcription; empty when no usable phonetics entry exists
    pub phonetic: String,
    /// Pronunciation audio URL; empty exactly when `phonetic` is empty
    pub audio: String,
}

impl WordProbe {
    /// A probe for a word the dictionary does not know
    pub fn invalid() -> Self {
        Self {
            valid: false,
            phonetic: String::new(),
            audio: String::new(),
        }
    }

    /// A probe for a known word without usable pronunciation metadata
    pub fn valid_without_phonetics() -> Self {
        Self {
            valid: true,
            phonetic: String::new(),
            audio: String::new(),
        }
    }
}

/// Spell checking and pronunciation lookup for single English words
#[async_trait]
pub trait Dictionary: Send + Sync {
    /// Probe a word; never fails, see module docs
    async fn probe(&self, word: &str) -> WordProbe;
}

/// Dictionary backed by the free dictionary HTTP API
pub struct HttpDictionary {
    client: FreeDictionary,
}

impl HttpDictionary {
    /// Build a dictionary from configuration
    pub fn new(config: &DictionaryConfig) -> Self {
        Self {
            client: FreeDictionary::new(config.endpoint.clone(), config.timeout_secs),
        }
    }
}

#[async_trait]
impl Dictionary for HttpDictionary {
    async fn probe(&self, word: &str) -> WordProbe {
        match self.client.lookup(word).await {
            Ok(LookupOutcome::Found(entries)) => match first_spoken_phonetics(&entries) {
                Some((phonetic, audio)) => WordProbe {
                    valid: true,
                    phonetic,
                    audio,
                },
                None => WordProbe::valid_without_phonetics(),
            },
            Ok(LookupOutcome::NotFound) => WordProbe::invalid(),
            Err(e) => {
                warn!("Dictionary probe for \"{}\" failed: {}", word, e);
                WordProbe::invalid()
            }
        }
    }
}

/// Scan the phonetics lists and pick the first entry whose transcription
/// and audio URL are both present and non-empty.
fn first_spoken_phonetics(entries: &[DictionaryEntry]) -> Option<(String, String)> {
    entries
        .iter()
        .flat_map(|entry| entry.phonetics.iter())
        .find_map(|phonetic| {
            let text = phonetic.text.as_deref().unwrap_or("").trim();
            let audio = phonetic.audio.as_deref().unwrap_or("").trim();
            if !text.is_empty() && !audio.is_empty() {
                Some((text.to_string(), audio.to_string()))
            } else {
                None
            }
        })
}
