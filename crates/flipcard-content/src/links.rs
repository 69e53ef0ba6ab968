//! Internal link references (`[[Target]]`, `[[Target|Alias]]`).

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::slug::slugify;

/// Matches a double-bracket reference. The interior is captured lazily so
/// two references on one line stay separate.
pub(crate) static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

/// A parsed `[[target]]` or `[[target|alias]]` token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkReference<'a> {
    /// Link target as written.
    pub target: &'a str,
    /// Visible text override. `None` when absent or empty.
    pub alias: Option<&'a str>,
}

impl<'a> LinkReference<'a> {
    /// Parse the interior of a double-bracket token.
    ///
    /// Only the first `|` separates target from alias; anything after a
    /// second `|` is dropped.
    #[must_use]
    pub fn parse(inner: &'a str) -> Self {
        let mut parts = inner.split('|');
        let target = parts.next().unwrap_or_default();
        let alias = parts.next().filter(|alias| !alias.is_empty());
        Self { target, alias }
    }

    /// URL slug derived from the target.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(self.target)
    }

    /// Text shown inside the anchor.
    #[must_use]
    pub fn label(&self) -> &'a str {
        self.alias.unwrap_or(self.target)
    }

    /// Render as an anchor whose href is `link_base` followed by the slug.
    #[must_use]
    pub fn to_html(&self, link_base: &str) -> String {
        format!(r#"<a href="{link_base}{}">{}</a>"#, self.slug(), self.label())
    }
}

/// Replace every double-bracket reference in `input` with an anchor.
pub(crate) fn resolve_links(input: &str, link_base: &str) -> String {
    LINK_RE
        .replace_all(input, |caps: &Captures| {
            LinkReference::parse(&caps[1]).to_html(link_base)
        })
        .into_owned()
}
