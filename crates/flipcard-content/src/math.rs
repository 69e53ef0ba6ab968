//! Math typesetting backends.
//!
//! The face renderer treats the typesetter as a black box behind
//! [`MathEngine`]. Two backends ship with the crate:
//!
//! - [`ClientMath`] (default): emits escaped TeX in `\(..\)` / `\[..\]`
//!   delimiters for KaTeX auto-render in the browser
//! - `MathMlMath` (`mathml` feature): converts TeX to MathML at build time

use crate::html::escape_html;

/// Layout mode for a math span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathMode {
    /// `$$...$$`, rendered as a centered block.
    Display,
    /// `$...$`, rendered in the text flow.
    Inline,
}

impl MathMode {
    /// Lowercase name used in CSS classes and log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Inline => "inline",
        }
    }
}

/// Error returned by a math engine.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// The TeX source could not be parsed.
    #[error("TeX parse error: {0}")]
    Parse(String),
    /// The engine failed for a reason unrelated to the input.
    #[error("math engine failure: {0}")]
    Engine(String),
}

/// Typesetting backend for math spans.
///
/// Implementations must be thread-safe (`Send + Sync`) so documents can be
/// rendered in parallel with one shared engine.
pub trait MathEngine: Send + Sync {
    /// Render the interior of one math span (delimiters already stripped).
    fn render(&self, latex: &str, mode: MathMode) -> Result<String, MathError>;
}

/// Client-side typesetting: TeX is escaped and left for KaTeX to render.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientMath;

impl MathEngine for ClientMath {
    fn render(&self, latex: &str, mode: MathMode) -> Result<String, MathError> {
        let escaped = escape_html(latex.trim());
        Ok(match mode {
            MathMode::Display => {
                format!(r#"<span class="math math-display">\[{escaped}\]</span>"#)
            }
            MathMode::Inline => format!(r#"<span class="math math-inline">\({escaped}\)</span>"#),
        })
    }
}

/// Build-time MathML typesetting via `latex2mathml`.
///
/// In the default non-strict mode a parse error renders an error-styled span
/// holding the escaped source, mirroring KaTeX's `throwOnError: false`. In
/// strict mode the error is returned to the caller instead.
#[cfg(feature = "mathml")]
#[derive(Clone, Copy, Debug, Default)]
pub struct MathMlMath {
    strict: bool,
}

#[cfg(feature = "mathml")]
impl MathMlMath {
    /// Create a non-strict MathML engine.
    #[must_use]
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Return parse errors instead of rendering them inline.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(feature = "mathml")]
impl MathEngine for MathMlMath {
    fn render(&self, latex: &str, mode: MathMode) -> Result<String, MathError> {
        let style = match mode {
            MathMode::Display => latex2mathml::DisplayStyle::Block,
            MathMode::Inline => latex2mathml::DisplayStyle::Inline,
        };
        match latex2mathml::latex_to_mathml(latex.trim(), style) {
            Ok(mathml) => Ok(mathml),
            Err(e) if self.strict => Err(MathError::Parse(e.to_string())),
            Err(_) => Ok(format!(
                r#"<span class="math math-{} math-error">{}</span>"#,
                mode.as_str(),
                escape_html(latex)
            )),
        }
    }
}
