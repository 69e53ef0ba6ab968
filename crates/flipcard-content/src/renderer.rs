//! Face renderer.

use std::sync::Arc;

use crate::math::{ClientMath, MathEngine};
use crate::pipeline::{PIPELINE, StageContext};

/// Class of the element wrapping every rendered face.
pub const CONTENT_CLASS: &str = "flashcard-content";

/// Prefix prepended to link slugs.
pub const DEFAULT_LINK_BASE: &str = "/";

/// Renders one flashcard face to HTML.
///
/// Rendering is total: malformed input never fails, and a math span the
/// engine rejects is kept as written. The renderer holds no mutable state and
/// can be shared across threads.
///
/// # Example
///
/// ```
/// use flipcard_content::ContentRenderer;
///
/// let renderer = ContentRenderer::default();
/// assert_eq!(
///     renderer.render("line1\nline2"),
///     r#"<div class="flashcard-content">line1<br>line2</div>"#
/// );
/// ```
#[derive(Clone)]
pub struct ContentRenderer {
    math: Arc<dyn MathEngine>,
    link_base: String,
}

impl ContentRenderer {
    /// Create a renderer that typesets math with `math`.
    #[must_use]
    pub fn new(math: Arc<dyn MathEngine>) -> Self {
        Self {
            math,
            link_base: DEFAULT_LINK_BASE.to_owned(),
        }
    }

    /// Set the prefix for internal link hrefs (default: `/`).
    #[must_use]
    pub fn with_link_base(mut self, link_base: impl Into<String>) -> Self {
        self.link_base = link_base.into();
        self
    }

    /// Prefix used for internal link hrefs.
    #[must_use]
    pub fn link_base(&self) -> &str {
        &self.link_base
    }

    /// Render `text` through every stage of the pipeline.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        let mut ctx = StageContext::new(self.math.as_ref(), &self.link_base);
        PIPELINE.iter().fold(text.to_owned(), |acc, stage| {
            let next = stage.apply(&acc, &mut ctx);
            tracing::trace!(stage = stage.name(), len = next.len(), "Applied render stage");
            next
        })
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new(Arc::new(ClientMath))
    }
}

impl std::fmt::Debug for ContentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRenderer")
            .field("link_base", &self.link_base)
            .finish_non_exhaustive()
    }
}
