/*!
 * Translator capability.
 *
 * English→Vietnamese translation in two modes plus example-sentence
 * generation, backed by the Gemini client. Prompts instruct the model to
 * answer with the translation only; `tidy_response` defensively strips the
 * whitespace and quote wrapping models still like to add.
 */

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::TranslationConfig;
use crate::errors::TranslationError;
use crate::providers::gemini::{Gemini, GeminiRequest};

/// What kind of text is being translated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationMode {
    /// A single word or short phrase; the answer is its best single meaning
    Word,
    /// A whole sentence; the answer is its translation
    Sentence,
}

/// English→Vietnamese translation and example-sentence generation
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` to Vietnamese in the given mode
    async fn translate(&self, text: &str, mode: TranslationMode)
        -> Result<String, TranslationError>;

    /// Generate a fresh English example sentence containing `word`
    async fn find_new_context(&self, word: &str) -> Result<String, TranslationError>;
}

/// Translator backed by the Gemini API
pub struct GeminiTranslator {
    client: Gemini,
    model: String,
    temperature: f32,
}

impl GeminiTranslator {
    /// Build a translator from configuration
    pub fn new(config: &TranslationConfig) -> Self {
        Self {
            client: Gemini::new(
                config.resolved_api_key(),
                config.endpoint.clone(),
                config.timeout_secs,
            ),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    async fn complete_prompt(&self, prompt: String) -> Result<String, TranslationError> {
        debug!("Gemini prompt: {}", prompt);
        let request = GeminiRequest::new(prompt)
            .temperature(self.temperature)
            .max_output_tokens(512);

        let response = self.client.complete(&self.model, request).await?;
        let text = Gemini::extract_text_from_response(&response);
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(
        &self,
        text: &str,
        mode: TranslationMode,
    ) -> Result<String, TranslationError> {
        let prompt = match mode {
            TranslationMode::Word => format!(
                "Translate the English word or phrase \"{}\" to Vietnamese. \
                 Reply with the single best Vietnamese meaning only, no explanation.",
                text
            ),
            TranslationMode::Sentence => format!(
                "Translate this English sentence to Vietnamese. \
                 Reply with the translation only, no explanation:\n{}",
                text
            ),
        };
        self.complete_prompt(prompt).await
    }

    async fn find_new_context(&self, word: &str) -> Result<String, TranslationError> {
        let prompt = format!(
            "Write one short English example sentence that uses the word \"{}\". \
             Reply with the sentence only, no explanation.",
            word
        );
        self.complete_prompt(prompt).await
    }
}

static WRAPPING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)^[\s"'“”‘’]+|[\s"'“”‘’]+$"#).expect("static pattern"));

/// Trim surrounding whitespace and quote characters from a model response.
/// Applied by every caller before a translation is shown or stored.
pub fn tidy_response(text: &str) -> String {
    WRAPPING.replace_all(text, "").to_string()
}
