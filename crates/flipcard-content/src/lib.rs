//! Flashcard face rendering.
//!
//! This crate turns the raw text of one flashcard side into an HTML fragment.
//! Only four micro-syntaxes are interpreted:
//!
//! - line breaks, which become `<br>` outside math
//! - math, `$$...$$` (display) and `$...$` (inline), typeset by a [`MathEngine`]
//! - internal links, `[[Target]]` and `[[Target|Alias]]`
//! - images, `![alt](src)` and `![alt|width](src)`
//!
//! Everything else passes through untouched. The output is always wrapped in
//! a single `<div class="flashcard-content">` element.
//!
//! # Architecture
//!
//! [`ContentRenderer`] runs a fixed sequence of [`Stage`]s over an
//! intermediate string. The order matters: math line breaks are neutralized
//! before generic line-break conversion, and typeset math is parked behind
//! placeholders so the image and link stages never re-read engine output.
//!
//! # Example
//!
//! ```
//! use flipcard_content::ContentRenderer;
//!
//! let renderer = ContentRenderer::default();
//! let html = renderer.render("Capital of [[France]]?\nSee ![map|200](map.png)");
//!
//! assert!(html.starts_with(r#"<div class="flashcard-content">"#));
//! assert!(html.contains(r#"<a href="/france">France</a>"#));
//! assert!(html.contains("width: 200px"));
//! ```

mod html;
mod images;
mod links;
mod math;
mod pipeline;
mod renderer;
mod slug;

pub use html::escape_html;
pub use images::ImageReference;
pub use links::LinkReference;
#[cfg(feature = "mathml")]
pub use math::MathMlMath;
pub use math::{ClientMath, MathEngine, MathError, MathMode};
pub use pipeline::{PIPELINE, Stage};
pub use renderer::{CONTENT_CLASS, ContentRenderer, DEFAULT_LINK_BASE};
pub use slug::slugify;
