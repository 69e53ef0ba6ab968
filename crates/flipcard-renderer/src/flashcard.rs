//! Flashcard code blocks.
//!
//! A fenced block tagged `flashcard` holds a front and a back separated by a
//! `---` line:
//!
//! ````markdown
//! ```flashcard
//! What is $2^{10}$?
//! ---
//! 1024
//! ```
//! ````
//!
//! [`FlashcardProcessor`] replaces such a block with the card shell. Each face
//! is rendered by [`ContentRenderer`]; the flip behavior comes from the
//! published script, which finds cards by their class names.

use std::collections::HashMap;

use flipcard_content::{ContentRenderer, escape_html};

use crate::code_block::{CodeBlockProcessor, ProcessResult};

/// Fence language that marks a flashcard block.
pub const FLASHCARD_LANGUAGE: &str = "flashcard";

/// Text of the flip button.
pub const DEFAULT_FLIP_LABEL: &str = "Flip";

/// Line separating the front from the back.
const SEPARATOR: &str = "---";

/// Front and back text of one card, both trimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardSides {
    /// Question side.
    pub front: String,
    /// Answer side. Empty when the body has no separator line.
    pub back: String,
}

impl CardSides {
    /// Split a block body at its first separator line.
    ///
    /// A separator line is one that reads `---` once surrounding whitespace
    /// is removed. Later separator lines belong to the back.
    #[must_use]
    pub fn split(body: &str) -> Self {
        let mut offset = 0;
        for line in body.split_inclusive('\n') {
            if line.trim() == SEPARATOR {
                return Self {
                    front: body[..offset].trim().to_owned(),
                    back: body[offset + line.len()..].trim().to_owned(),
                };
            }
            offset += line.len();
        }
        Self {
            front: body.trim().to_owned(),
            back: String::new(),
        }
    }

    /// Whether the body had a back side.
    #[must_use]
    pub fn has_back(&self) -> bool {
        !self.back.is_empty()
    }
}

/// Turns flashcard code blocks into flippable card markup.
///
/// # Example
///
/// ```
/// use flipcard_content::ContentRenderer;
/// use flipcard_renderer::FlashcardProcessor;
///
/// let cards = FlashcardProcessor::new(ContentRenderer::default());
/// let html = cards.transform_block("Q?\n---\nA.");
///
/// assert!(html.contains(r#"<div class="flashcard-front"><div class="flashcard-content">Q?</div></div>"#));
/// assert!(html.contains(r#"<div class="flashcard-back"><div class="flashcard-content">A.</div></div>"#));
/// ```
#[derive(Debug)]
pub struct FlashcardProcessor {
    renderer: ContentRenderer,
    language: String,
    flip_label: String,
    warnings: Vec<String>,
}

impl FlashcardProcessor {
    /// Create a processor that renders faces with `renderer`.
    #[must_use]
    pub fn new(renderer: ContentRenderer) -> Self {
        Self {
            renderer,
            language: FLASHCARD_LANGUAGE.to_owned(),
            flip_label: DEFAULT_FLIP_LABEL.to_owned(),
            warnings: Vec::new(),
        }
    }

    /// Set the fence language handled by this processor (default: `flashcard`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the flip button text (default: `Flip`).
    #[must_use]
    pub fn flip_label(mut self, label: impl Into<String>) -> Self {
        self.flip_label = label.into();
        self
    }

    /// Render one block body to the complete card shell.
    #[must_use]
    pub fn transform_block(&self, body: &str) -> String {
        let sides = CardSides::split(body);
        let front = self.renderer.render(&sides.front);
        let back = self.renderer.render(&sides.back);
        compose_card(&front, &back, &escape_html(&self.flip_label))
    }
}

impl CodeBlockProcessor for FlashcardProcessor {
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
        index: usize,
    ) -> ProcessResult {
        if language != self.language {
            return ProcessResult::PassThrough;
        }

        let mut keys: Vec<_> = attrs.keys().collect();
        keys.sort();
        for key in keys {
            self.warnings.push(format!(
                "flashcard {index}: unknown attribute '{key}' ignored"
            ));
        }

        let html = self.transform_block(source);
        tracing::debug!(index, "Rendered flashcard");
        ProcessResult::Inline(html)
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Assemble the card shell around two rendered faces.
fn compose_card(front: &str, back: &str, flip_label: &str) -> String {
    format!(
        concat!(
            "<div class=\"flashcard-container\">\n",
            "<div class=\"flashcard\">\n",
            "<div class=\"flashcard-inner\">\n",
            "<div class=\"flashcard-front\">{front}</div>\n",
            "<div class=\"flashcard-back\">{back}</div>\n",
            "</div>\n",
            "</div>\n",
            "<button class=\"flashcard-flip\" type=\"button\">{flip_label}</button>\n",
            "</div>\n",
        ),
        front = front,
        back = back,
        flip_label = flip_label,
    )
}
