//! Flashcard stylesheet and script.
//!
//! The card markup produced by `flipcard-renderer` is inert on its own. This
//! crate embeds the two files that make it work in a browser and writes them
//! to a site's static directory:
//!
//! - `styles/flashcard.css`: card layout and the 3-D flip transition
//! - `scripts/flashcard.js`: wires each card's flip button, re-scans on DOM
//!   mutations, and exposes `window.reinitFlashcards`
//!
//! The two sides share nothing but class names.

mod publisher;

use std::borrow::Cow;

pub use publisher::{AssetPublisher, CacheBust, PublishError, head_tags};

/// Path of the stylesheet, relative to the static directory.
pub const STYLESHEET_PATH: &str = "styles/flashcard.css";

/// Path of the script, relative to the static directory.
pub const SCRIPT_PATH: &str = "scripts/flashcard.js";

/// Embedded asset files.
#[derive(rust_embed::RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Get an embedded asset by path (e.g. [`STYLESHEET_PATH`]).
///
/// Returns the file contents if the asset exists, `None` otherwise.
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|f| f.data)
}

/// Iterate all embedded asset paths.
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    Assets::iter()
}
