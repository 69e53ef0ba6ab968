//! Markdown renderer with code block processors.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::code_block::{CodeBlockProcessor, ProcessResult, parse_fence_info};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Warnings collected from processors.
    pub warnings: Vec<String>,
}

/// Markdown renderer that hands fenced code blocks to registered processors.
///
/// Everything outside processed blocks is serialized by pulldown-cmark's HTML
/// writer unchanged.
///
/// # Example
///
/// ```
/// use flipcard_content::ContentRenderer;
/// use flipcard_renderer::{FlashcardProcessor, MarkdownRenderer};
///
/// let markdown = "# Deck\n\n```flashcard\nQ?\n---\nA.\n```\n";
/// let result = MarkdownRenderer::new()
///     .with_processor(FlashcardProcessor::new(ContentRenderer::default()))
///     .render(markdown);
///
/// assert!(result.html.contains("<h1>Deck</h1>"));
/// assert!(result.html.contains(r#"<div class="flashcard-container">"#));
/// ```
pub struct MarkdownRenderer {
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    options: Options,
}

impl MarkdownRenderer {
    /// Create a renderer with GFM tables, strikethrough and task lists enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }

    /// Replace the pulldown-cmark parser options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Add a code block processor.
    ///
    /// Processors are checked in order when a fenced code block is
    /// encountered. The first processor returning a non-`PassThrough` result
    /// wins.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Get all warnings from all processors, accumulated over every render.
    #[must_use]
    pub fn processor_warnings(&self) -> Vec<String> {
        self.processors
            .iter()
            .flat_map(|p| p.warnings())
            .cloned()
            .collect()
    }

    /// Parse and render `markdown` to HTML.
    pub fn render(&mut self, markdown: &str) -> RenderResult {
        let seen: Vec<usize> = self.processors.iter().map(|p| p.warnings().len()).collect();

        let parser = Parser::new_ext(markdown, self.options);
        let events = transform_events(parser, &mut self.processors);

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        // Only warnings raised by this document
        let warnings = self
            .processors
            .iter()
            .zip(seen)
            .flat_map(|(p, seen)| p.warnings().get(seen..).unwrap_or_default())
            .cloned()
            .collect();

        RenderResult { html, warnings }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A fenced code block collected between its start and end events.
struct PendingBlock<'a> {
    info: CowStr<'a>,
    source: String,
}

/// Run `processors` over every fenced code block in `events`.
///
/// A handled block's `Start`, `Text` and `End` events are replaced by a
/// single raw [`Event::Html`] carrying the processor output, so the HTML
/// writer emits it verbatim. Unhandled blocks and all other events are kept
/// as they were.
///
/// # Example
///
/// ```
/// use flipcard_content::ContentRenderer;
/// use flipcard_renderer::{CodeBlockProcessor, FlashcardProcessor, transform_events};
/// use pulldown_cmark::{Event, Parser};
///
/// let mut processors: Vec<Box<dyn CodeBlockProcessor>> =
///     vec![Box::new(FlashcardProcessor::new(ContentRenderer::default()))];
/// let events = transform_events(Parser::new("```flashcard\nQ\n```\n"), &mut processors);
///
/// assert_eq!(events.len(), 1);
/// assert!(matches!(&events[0], Event::Html(html) if html.contains("flashcard-inner")));
/// ```
pub fn transform_events<'a, I>(
    events: I,
    processors: &mut [Box<dyn CodeBlockProcessor>],
) -> Vec<Event<'a>>
where
    I: IntoIterator<Item = Event<'a>>,
{
    let mut out = Vec::new();
    let mut pending: Option<PendingBlock<'a>> = None;
    let mut index = 0;

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                pending = Some(PendingBlock {
                    info,
                    source: String::new(),
                });
            }
            Event::Text(text) if pending.is_some() => {
                if let Some(block) = pending.as_mut() {
                    block.source.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) if pending.is_some() => {
                if let Some(block) = pending.take() {
                    finish_block(block, index, processors, &mut out);
                    index += 1;
                }
            }
            other => out.push(other),
        }
    }

    out
}

fn finish_block<'a>(
    block: PendingBlock<'a>,
    index: usize,
    processors: &mut [Box<dyn CodeBlockProcessor>],
    out: &mut Vec<Event<'a>>,
) {
    let (language, attrs) = parse_fence_info(&block.info);

    for processor in processors.iter_mut() {
        if let ProcessResult::Inline(html) =
            processor.process(&language, &attrs, &block.source, index)
        {
            out.push(Event::Html(html.into()));
            return;
        }
    }

    out.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(block.info))));
    out.push(Event::Text(block.source.into()));
    out.push(Event::End(TagEnd::CodeBlock));
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::flashcard::FlashcardProcessor;
    use flipcard_content::ContentRenderer;
    use pretty_assertions::assert_eq;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new().with_processor(FlashcardProcessor::new(ContentRenderer::default()))
    }

    #[test]
    fn test_plain_markdown_unchanged() {
        let result = renderer().render("# Title\n\nSome **bold** text.\n");
        assert_eq!(result.html, "<h1>Title</h1>\n<p>Some <strong>bold</strong> text.</p>\n");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_flashcard_block_replaced() {
        let result = renderer().render("```flashcard\nQ?\n---\nA.\n```\n");
        assert!(result.html.starts_with(r#"<div class="flashcard-container">"#));
        assert!(result.html.contains(
            r#"<div class="flashcard-front"><div class="flashcard-content">Q?</div></div>"#
        ));
        assert!(result.html.contains(
            r#"<div class="flashcard-back"><div class="flashcard-content">A.</div></div>"#
        ));
        assert!(!result.html.contains("<pre>"));
    }

    #[test]
    fn test_other_code_blocks_pass_through() {
        let result = renderer().render("```rust\nfn main() {}\n```\n");
        assert_eq!(
            result.html,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn test_indented_code_not_processed() {
        let result = renderer().render("    flashcard body\n");
        assert!(result.html.contains("<pre><code>flashcard body"));
    }

    #[test]
    fn test_multiple_cards_and_text() {
        let markdown = "Intro\n\n```flashcard\nA\n---\n1\n```\n\nMiddle\n\n```flashcard\nB\n---\n2\n```\n";
        let result = renderer().render(markdown);
        assert_eq!(result.html.matches("flashcard-container").count(), 2);
        assert!(result.html.contains("<p>Intro</p>"));
        assert!(result.html.contains("<p>Middle</p>"));
    }

    #[test]
    fn test_card_content_not_reparsed_as_markdown() {
        let result = renderer().render("```flashcard\n**not bold**\n---\n# not a heading\n```\n");
        assert!(result.html.contains("**not bold**"));
        assert!(result.html.contains("# not a heading"));
        assert!(!result.html.contains("<strong>"));
    }

    #[test]
    fn test_warnings_collected() {
        let result = renderer().render("```flashcard deck=x\nQ\n```\n");
        assert_eq!(
            result.warnings,
            vec!["flashcard 0: unknown attribute 'deck' ignored".to_owned()]
        );
    }

    #[test]
    fn test_warnings_scoped_to_each_render() {
        let mut renderer = renderer();

        let first = renderer.render("```flashcard deck=x\nQ\n```\n");
        let second = renderer.render("```flashcard size=big\nQ\n```\n");
        let third = renderer.render("No cards here.\n");

        assert_eq!(
            first.warnings,
            vec!["flashcard 0: unknown attribute 'deck' ignored".to_owned()]
        );
        assert_eq!(
            second.warnings,
            vec!["flashcard 0: unknown attribute 'size' ignored".to_owned()]
        );
        assert!(third.warnings.is_empty());
        assert_eq!(renderer.processor_warnings().len(), 2);
    }

    #[test]
    fn test_first_inline_result_wins() {
        struct Shout;

        impl CodeBlockProcessor for Shout {
            fn process(
                &mut self,
                language: &str,
                _attrs: &HashMap<String, String>,
                source: &str,
                _index: usize,
            ) -> ProcessResult {
                if language == "flashcard" {
                    ProcessResult::Inline(source.to_uppercase())
                } else {
                    ProcessResult::PassThrough
                }
            }
        }

        let mut processors: Vec<Box<dyn CodeBlockProcessor>> = vec![
            Box::new(Shout),
            Box::new(FlashcardProcessor::new(ContentRenderer::default())),
        ];
        let events = transform_events(Parser::new("```flashcard\nq\n```\n"), &mut processors);
        assert_eq!(events, vec![Event::Html("Q\n".into())]);
    }

    #[test]
    fn test_unhandled_blocks_rebuilt() {
        let mut processors: Vec<Box<dyn CodeBlockProcessor>> =
            vec![Box::new(FlashcardProcessor::new(ContentRenderer::default()))];
        let events = transform_events(
            Parser::new("```a\n1\n```\n\n```b x=1\n2\n```\n"),
            &mut processors,
        );
        assert_eq!(
            events,
            vec![
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced("a".into()))),
                Event::Text("1\n".into()),
                Event::End(TagEnd::CodeBlock),
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced("b x=1".into()))),
                Event::Text("2\n".into()),
                Event::End(TagEnd::CodeBlock),
            ]
        );
    }
}
