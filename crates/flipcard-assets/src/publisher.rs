//! Writing the embedded assets into a static directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use crate::{SCRIPT_PATH, STYLESHEET_PATH};

/// Number of hash bytes kept in a content-hash marker (16 hex characters).
const HASH_PREFIX_BYTES: usize = 8;

/// Error returned when publishing assets fails.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// An expected asset was not embedded in the binary.
    #[error("Embedded asset not found: {0}")]
    MissingAsset(&'static str),
    /// Filesystem write failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How the version marker in the published script is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheBust {
    /// Truncated SHA-256 of the script body. Stable across runs.
    #[default]
    ContentHash,
    /// Milliseconds since the Unix epoch at publish time.
    Timestamp,
}

impl CacheBust {
    /// Compute the marker for the given script body.
    #[must_use]
    pub fn marker(self, content: &[u8]) -> String {
        match self {
            Self::ContentHash => {
                let digest = Sha256::digest(content);
                hex::encode(&digest[..HASH_PREFIX_BYTES])
            }
            Self::Timestamp => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Writes the flashcard stylesheet and script into a site's static directory.
///
/// Publishing is idempotent: existing files are overwritten, and with
/// [`CacheBust::ContentHash`] repeated runs produce identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetPublisher {
    cache_bust: CacheBust,
}

impl AssetPublisher {
    /// Create a publisher that versions the script with `cache_bust`.
    #[must_use]
    pub fn new(cache_bust: CacheBust) -> Self {
        Self { cache_bust }
    }

    /// Version marker strategy in use.
    #[must_use]
    pub fn cache_bust(&self) -> CacheBust {
        self.cache_bust
    }

    /// Script body with the version header prepended.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingAsset`] if the script is not embedded.
    pub fn script_contents(&self) -> Result<String, PublishError> {
        let body = crate::get(SCRIPT_PATH).ok_or(PublishError::MissingAsset(SCRIPT_PATH))?;
        let marker = self.cache_bust.marker(&body);
        Ok(format!(
            "/* Version: {marker} */\n{}",
            String::from_utf8_lossy(&body)
        ))
    }

    /// Write both assets under `static_dir`, creating directories as needed.
    ///
    /// Returns the paths written, stylesheet first.
    ///
    /// # Errors
    ///
    /// Returns an error if an asset is missing or a directory or file
    /// cannot be written.
    pub fn publish(&self, static_dir: &Path) -> Result<Vec<PathBuf>, PublishError> {
        let stylesheet =
            crate::get(STYLESHEET_PATH).ok_or(PublishError::MissingAsset(STYLESHEET_PATH))?;
        let script = self.script_contents()?;

        let written = vec![
            write_asset(static_dir, STYLESHEET_PATH, &stylesheet)?,
            write_asset(static_dir, SCRIPT_PATH, script.as_bytes())?,
        ];

        tracing::info!(
            static_dir = %static_dir.display(),
            cache_bust = ?self.cache_bust,
            "Published flashcard assets"
        );
        Ok(written)
    }
}

fn write_asset(static_dir: &Path, relative: &str, contents: &[u8]) -> Result<PathBuf, PublishError> {
    let path = static_dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PublishError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, contents).map_err(|source| PublishError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Wrote asset");
    Ok(path)
}

/// `<link>` and `<script>` tags referencing the published assets.
///
/// `base_url` is the URL the static directory is served under. A trailing
/// slash is optional.
#[must_use]
pub fn head_tags(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!(
        "<link rel=\"stylesheet\" href=\"{base}/{STYLESHEET_PATH}\">\n\
         <script src=\"{base}/{SCRIPT_PATH}\" defer></script>\n"
    )
}
