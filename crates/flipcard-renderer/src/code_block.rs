//! Code block processor trait for extensible code block handling.
//!
//! Processors are registered with the renderer and checked in order when a
//! fenced code block is encountered. The first processor returning a
//! non-`PassThrough` result wins.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use flipcard_renderer::{CodeBlockProcessor, ProcessResult};
//!
//! struct QuoteProcessor;
//!
//! impl CodeBlockProcessor for QuoteProcessor {
//!     fn process(
//!         &mut self,
//!         language: &str,
//!         _attrs: &HashMap<String, String>,
//!         source: &str,
//!         _index: usize,
//!     ) -> ProcessResult {
//!         if language == "quote" {
//!             ProcessResult::Inline(format!("<blockquote>{}</blockquote>", source.trim()))
//!         } else {
//!             ProcessResult::PassThrough
//!         }
//!     }
//! }
//! ```

use std::collections::HashMap;

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the code block with raw HTML, emitted verbatim.
    Inline(String),

    /// Keep the code block as a regular `<pre><code>` block.
    ///
    /// Use when the language is not handled by this processor.
    PassThrough,
}

/// Trait for processing special code blocks.
pub trait CodeBlockProcessor {
    /// Process a code block and return the result.
    ///
    /// # Arguments
    ///
    /// * `language` - Language identifier from fence info string
    /// * `attrs` - Attributes parsed from fence (key=value pairs)
    /// * `source` - Raw content of the code block
    /// * `index` - Zero-based index of the fenced block in the document
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
        index: usize,
    ) -> ProcessResult;

    /// Get warnings generated during processing.
    ///
    /// Default implementation returns empty slice.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Parse fence info string into language and attributes.
///
/// Format: `language [key=value ...]`
#[must_use]
pub(crate) fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let mut attrs = HashMap::new();
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            let value = value.trim_matches('"').trim_matches('\'');
            attrs.insert(key.to_owned(), value.to_owned());
        }
    }

    (language, attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fence_info_language_only() {
        let (lang, attrs) = parse_fence_info("flashcard");
        assert_eq!(lang, "flashcard");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_with_attrs() {
        let (lang, attrs) = parse_fence_info("flashcard deck=geo");
        assert_eq!(lang, "flashcard");
        assert_eq!(attrs.get("deck"), Some(&"geo".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_quoted_values() {
        let (lang, attrs) = parse_fence_info("flashcard a=\"x\" b='y'");
        assert_eq!(lang, "flashcard");
        assert_eq!(attrs.get("a"), Some(&"x".to_owned()));
        assert_eq!(attrs.get("b"), Some(&"y".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_bare_words_ignored() {
        let (lang, attrs) = parse_fence_info("rust ignore");
        assert_eq!(lang, "rust");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_empty() {
        let (lang, attrs) = parse_fence_info("   ");
        assert_eq!(lang, "");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_default_warnings_empty() {
        struct MinimalProcessor;

        impl CodeBlockProcessor for MinimalProcessor {
            fn process(
                &mut self,
                _language: &str,
                _attrs: &HashMap<String, String>,
                _source: &str,
                _index: usize,
            ) -> ProcessResult {
                ProcessResult::PassThrough
            }
        }

        assert!(MinimalProcessor.warnings().is_empty());
    }
}
