//! CLI command implementations.

pub(crate) mod assets;
pub(crate) mod build;
pub(crate) mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use flipcard_assets::CacheBust;
use flipcard_config::{CacheBustKind, Config, MathConfig, MathEngineKind};
use flipcard_content::{ClientMath, ContentRenderer, MathEngine};
use flipcard_renderer::{FlashcardProcessor, MarkdownRenderer, RenderResult};

use crate::error::CliError;

pub(crate) use assets::AssetsArgs;
pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover flipcard.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Math engine selectable on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum MathArg {
    Client,
    Mathml,
}

impl From<MathArg> for MathEngineKind {
    fn from(arg: MathArg) -> Self {
        match arg {
            MathArg::Client => Self::Client,
            MathArg::Mathml => Self::Mathml,
        }
    }
}

/// Cache-bust strategy selectable on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum CacheBustArg {
    Hash,
    Timestamp,
}

impl From<CacheBustArg> for CacheBustKind {
    fn from(arg: CacheBustArg) -> Self {
        match arg {
            CacheBustArg::Hash => Self::Hash,
            CacheBustArg::Timestamp => Self::Timestamp,
        }
    }
}

pub(crate) fn cache_bust(kind: CacheBustKind) -> CacheBust {
    match kind {
        CacheBustKind::Hash => CacheBust::ContentHash,
        CacheBustKind::Timestamp => CacheBust::Timestamp,
    }
}

/// Flashcard rendering settings resolved from configuration.
///
/// Shared read-only across worker threads; each document gets its own
/// [`MarkdownRenderer`] since processors collect per-document warnings.
#[derive(Debug, Clone)]
pub(crate) struct CardPipeline {
    content: ContentRenderer,
    language: String,
    flip_label: String,
}

impl CardPipeline {
    pub(crate) fn from_config(config: &Config) -> Result<Self, CliError> {
        let content = ContentRenderer::new(math_engine(&config.math)?)
            .with_link_base(config.flashcard.link_base.clone());
        Ok(Self {
            content,
            language: config.flashcard.language.clone(),
            flip_label: config.flashcard.flip_label.clone(),
        })
    }

    pub(crate) fn render(&self, markdown: &str) -> RenderResult {
        let cards = FlashcardProcessor::new(self.content.clone())
            .language(self.language.clone())
            .flip_label(self.flip_label.clone());
        MarkdownRenderer::new().with_processor(cards).render(markdown)
    }
}

fn math_engine(config: &MathConfig) -> Result<Arc<dyn MathEngine>, CliError> {
    match config.engine {
        MathEngineKind::Client => Ok(Arc::new(ClientMath)),
        #[cfg(feature = "mathml")]
        MathEngineKind::Mathml => Ok(Arc::new(
            flipcard_content::MathMlMath::new().strict(config.strict),
        )),
        #[cfg(not(feature = "mathml"))]
        MathEngineKind::Mathml => Err(CliError::Validation(
            "math.engine = \"mathml\" requires flipcard built with the `mathml` feature".to_owned(),
        )),
    }
}
