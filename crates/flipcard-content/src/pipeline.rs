//! Ordered render stages for one flashcard face.
//!
//! Each stage maps the intermediate string to the next one. The order in
//! [`PIPELINE`] is load-bearing:
//!
//! 1. [`Stage::ProtectMathNewlines`] must run before
//!    [`Stage::ConvertNewlines`], otherwise a multi-line equation would gain
//!    `<br>` tags and break the math parser.
//! 2. [`Stage::RenderMath`] scans all display spans before inline spans, so a
//!    `$` that belongs to `$$` is never read as an inline delimiter.
//! 3. Typeset math is parked behind placeholders until [`Stage::Wrap`], so
//!    the image and link stages never see engine output.
//! 4. [`Stage::SizedImages`] runs before [`Stage::PlainImages`] so the size
//!    suffix is not swallowed into the alt text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::images::{replace_plain_images, replace_sized_images};
use crate::links::resolve_links;
use crate::math::{MathEngine, MathMode};
use crate::renderer::CONTENT_CLASS;

/// Display math: `$$...$$`, lazily matched across lines.
static DISPLAY_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$(.*?)\$\$").unwrap());

/// Inline math: `$...$` with a non-empty interior. Applied one line at a time.
static INLINE_MATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([^$\r\n]+)\$").unwrap());

/// Line break markup produced by [`Stage::ConvertNewlines`].
const LINE_BREAK: &str = "<br>";

/// Delimiters of a stash placeholder. Stripped from input before stashing.
const STASH_OPEN: char = '\u{E000}';
const STASH_CLOSE: char = '\u{E001}';

/// Placeholder left in place of a stashed span until [`Stage::Wrap`].
static STASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap());

/// One step of the face render pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Replace line breaks inside math spans with a space.
    ///
    /// Post: no display span contains a line break. Inline spans never
    /// cross one, so they are left alone.
    ProtectMathNewlines,
    /// Replace every remaining line break (`\n` or `\r\n`) with `<br>`.
    ///
    /// Pre: math spans hold no line breaks.
    ConvertNewlines,
    /// Typeset display spans, then inline spans.
    ///
    /// Inline spans are matched within one line, so a `$` never pairs with
    /// another `$` across a `<br>`. A span the engine rejects is logged and
    /// kept as its original source. Either way the result is stashed, leaving
    /// a placeholder in the text. Placeholder delimiters already present in
    /// the input are removed first.
    RenderMath,
    /// `![alt|width](src)` to a fixed-width `<img>`.
    SizedImages,
    /// `![alt](src)` to a natural-size `<img>`.
    ///
    /// Pre: sized tokens are already gone.
    PlainImages,
    /// `[[target]]` / `[[target|alias]]` to an anchor.
    InternalLinks,
    /// Restore stashed spans and wrap in the content element.
    ///
    /// Post: output is exactly one `<div class="flashcard-content">`.
    Wrap,
}

/// The stages in execution order.
pub const PIPELINE: [Stage; 7] = [
    Stage::ProtectMathNewlines,
    Stage::ConvertNewlines,
    Stage::RenderMath,
    Stage::SizedImages,
    Stage::PlainImages,
    Stage::InternalLinks,
    Stage::Wrap,
];

/// Per-render state shared by the stages.
pub(crate) struct StageContext<'a> {
    math: &'a dyn MathEngine,
    link_base: &'a str,
    stash: Vec<String>,
}

impl<'a> StageContext<'a> {
    pub(crate) fn new(math: &'a dyn MathEngine, link_base: &'a str) -> Self {
        Self {
            math,
            link_base,
            stash: Vec::new(),
        }
    }

    /// Keep `html` aside and return the placeholder that stands for it.
    fn stash(&mut self, html: String) -> String {
        let index = self.stash.len();
        self.stash.push(html);
        format!("{STASH_OPEN}{index}{STASH_CLOSE}")
    }

    /// Typeset one span, falling back to its source on engine failure.
    fn render_span(&mut self, source: &str, latex: &str, mode: MathMode) -> String {
        match self.math.render(latex, mode) {
            Ok(html) => self.stash(html),
            Err(e) => {
                tracing::warn!(error = %e, mode = mode.as_str(), "Math rendering failed, keeping source");
                self.stash(source.to_owned())
            }
        }
    }

    fn restore(&self, input: &str) -> String {
        STASH_RE
            .replace_all(input, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.stash.get(index))
                    .map_or_else(|| caps[0].to_owned(), Clone::clone)
            })
            .into_owned()
    }
}

impl Stage {
    /// Stable name for logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ProtectMathNewlines => "protect-math-newlines",
            Self::ConvertNewlines => "convert-newlines",
            Self::RenderMath => "render-math",
            Self::SizedImages => "sized-images",
            Self::PlainImages => "plain-images",
            Self::InternalLinks => "internal-links",
            Self::Wrap => "wrap",
        }
    }

    pub(crate) fn apply(self, input: &str, ctx: &mut StageContext<'_>) -> String {
        match self {
            Self::ProtectMathNewlines => protect_math_newlines(input),
            Self::ConvertNewlines => input.replace("\r\n", "\n").replace('\n', LINE_BREAK),
            Self::RenderMath => render_math(input, ctx),
            Self::SizedImages => replace_sized_images(input),
            Self::PlainImages => replace_plain_images(input),
            Self::InternalLinks => resolve_links(input, ctx.link_base),
            Self::Wrap => format!(r#"<div class="{CONTENT_CLASS}">{}</div>"#, ctx.restore(input)),
        }
    }
}

fn protect_math_newlines(input: &str) -> String {
    DISPLAY_MATH_RE
        .replace_all(input, |caps: &Captures| {
            caps[0].replace("\r\n", " ").replace('\n', " ")
        })
        .into_owned()
}

fn render_math(input: &str, ctx: &mut StageContext<'_>) -> String {
    let input = input.replace([STASH_OPEN, STASH_CLOSE], "");
    let displayed = DISPLAY_MATH_RE.replace_all(&input, |caps: &Captures| {
        ctx.render_span(&caps[0], &caps[1], MathMode::Display)
    });

    let mut out = String::with_capacity(displayed.len());
    for (i, line) in displayed.split(LINE_BREAK).enumerate() {
        if i > 0 {
            out.push_str(LINE_BREAK);
        }
        let rendered = INLINE_MATH_RE.replace_all(line, |caps: &Captures| {
            ctx.render_span(&caps[0], &caps[1], MathMode::Inline)
        });
        out.push_str(&rendered);
    }
    out
}
