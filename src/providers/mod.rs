/*!
 * Provider implementations for the external services the application
 * consumes:
 * - Gemini: Google Gemini API client used for translation
 * - FreeDictionary: dictionaryapi.dev client used for spell checking and
 *   pronunciation metadata
 * - Mock: scripted capability doubles for tests
 *
 * Clients in this module speak HTTP and return `ProviderError`; the
 * capability semantics (probe rules, prompt construction, response
 * clean-up) live in the `dictionary` and `translator` modules.
 */

pub mod free_dictionary;
pub mod gemini;
pub mod mock;
