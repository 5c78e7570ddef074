use std::time::Duration;

use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;

/// Client for the free dictionary API (dictionaryapi.dev)
pub struct FreeDictionary {
    /// HTTP client for API requests
    client: Client,
    /// Entry lookup endpoint; the word is appended as a path segment
    endpoint: String,
}

/// One dictionary entry for a looked-up word
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryEntry {
    /// The word as the dictionary spells it
    #[serde(default)]
    pub word: String,

    /// Pronunciation variants
    #[serde(default)]
    pub phonetics: Vec<PhoneticEntry>,
}

/// A single pronunciation variant; text and audio are independently optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhoneticEntry {
    /// IPA-style transcription
    #[serde(default)]
    pub text: Option<String>,

    /// URL of a pronunciation recording
    #[serde(default)]
    pub audio: Option<String>,
}

/// The "no definitions" sentinel body the API sends with a 404
#[derive(Debug, Deserialize)]
struct NotFoundBody {
    #[serde(default)]
    title: String,
}

/// Result of a dictionary lookup
#[derive(Debug)]
pub enum LookupOutcome {
    /// The word exists; one or more entries were returned
    Found(Vec<DictionaryEntry>),
    /// The dictionary has no definitions for the word
    NotFound,
}

impl FreeDictionary {
    /// Create a new dictionary client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Look up a single English word
    pub async fn lookup(&self, word: &str) -> Result<LookupOutcome, ProviderError> {
        let url = format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            urlencode_segment(word)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // The API answers 404 with a structured "No Definitions Found"
            // body; any 404 counts as not-found either way.
            if let Ok(body) = response.json::<NotFoundBody>().await {
                debug!("Dictionary has no entry for \"{}\": {}", word, body.title);
            }
            return Ok(LookupOutcome::NotFound);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Dictionary API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let entries = response
            .json::<Vec<DictionaryEntry>>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(LookupOutcome::Found(entries))
    }
}

/// Percent-encode a word for use as a URL path segment
fn urlencode_segment(word: &str) -> String {
    let mut encoded = String::with_capacity(word.len());
    for byte in word.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'\'' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
