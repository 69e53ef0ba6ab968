//! Markdown rendering with flashcard code block processing.
//!
//! This crate plugs flashcard rendering into a pulldown-cmark pipeline:
//!
//! - [`CodeBlockProcessor`]: extension point for fenced code blocks
//! - [`FlashcardProcessor`]: turns `flashcard` blocks into card markup
//! - [`transform_events`]: replaces handled blocks in an event stream with raw HTML
//! - [`MarkdownRenderer`]: parses, transforms and serializes a document
//!
//! # Example
//!
//! ```
//! use flipcard_content::ContentRenderer;
//! use flipcard_renderer::{FlashcardProcessor, MarkdownRenderer};
//!
//! let markdown = "```flashcard\nWhat is [[Rust]]?\n---\nA language.\n```\n";
//! let cards = FlashcardProcessor::new(ContentRenderer::default()).flip_label("Show");
//! let result = MarkdownRenderer::new().with_processor(cards).render(markdown);
//!
//! assert!(result.html.contains(r#"<a href="/rust">Rust</a>"#));
//! assert!(result.html.contains(">Show</button>"));
//! ```

mod code_block;
mod flashcard;
mod renderer;

pub use code_block::{CodeBlockProcessor, ProcessResult};
pub use flashcard::{CardSides, DEFAULT_FLIP_LABEL, FLASHCARD_LANGUAGE, FlashcardProcessor};
pub use renderer::{MarkdownRenderer, RenderResult, transform_events};
