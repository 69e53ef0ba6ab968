//! Image references (`![alt](src)`, `![alt|width](src)`).
//!
//! Alt text cannot contain `]` and sources cannot contain `)`, which keeps two
//! adjacent tokens from collapsing into one match.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Image with a pixel width suffix on the alt text.
pub(crate) static SIZED_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*?)\|(\d+)\]\(([^)]*)\)").unwrap());

/// Image without a size.
pub(crate) static PLAIN_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());

/// A parsed image token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageReference<'a> {
    /// Alt text, without any size suffix.
    pub alt: &'a str,
    /// Image source as written.
    pub src: &'a str,
    /// Width in pixels (digits only).
    pub width: Option<&'a str>,
}

impl ImageReference<'_> {
    /// Render as an `<img>` element. A sized image keeps its aspect ratio.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self.width {
            Some(width) => format!(
                r#"<img src="{}" alt="{}" style="width: {width}px; height: auto;">"#,
                self.src, self.alt
            ),
            None => format!(r#"<img src="{}" alt="{}">"#, self.src, self.alt),
        }
    }
}

/// Replace `![alt|width](src)` tokens.
pub(crate) fn replace_sized_images(input: &str) -> String {
    SIZED_IMAGE_RE
        .replace_all(input, |caps: &Captures| {
            ImageReference {
                alt: caps.get(1).map_or("", |m| m.as_str()),
                width: caps.get(2).map(|m| m.as_str()),
                src: caps.get(3).map_or("", |m| m.as_str()),
            }
            .to_html()
        })
        .into_owned()
}

/// Replace `![alt](src)` tokens.
pub(crate) fn replace_plain_images(input: &str) -> String {
    PLAIN_IMAGE_RE
        .replace_all(input, |caps: &Captures| {
            ImageReference {
                alt: caps.get(1).map_or("", |m| m.as_str()),
                src: caps.get(2).map_or("", |m| m.as_str()),
                width: None,
            }
            .to_html()
        })
        .into_owned()
}
