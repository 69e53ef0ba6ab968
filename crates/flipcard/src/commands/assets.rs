//! `flipcard assets` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use flipcard_assets::{AssetPublisher, head_tags};
use flipcard_config::Config;

use super::{CacheBustArg, CommonArgs, cache_bust};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the assets command.
#[derive(Args)]
pub(crate) struct AssetsArgs {
    /// Directory to write assets into (default: build.output_dir/build.static_dir).
    #[arg(short, long)]
    static_dir: Option<PathBuf>,

    /// Version marker strategy (overrides config).
    #[arg(long, value_enum)]
    cache_bust: Option<CacheBustArg>,

    /// Print the <link>/<script> tags referencing the published assets.
    #[arg(long)]
    print_tags: bool,

    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl AssetsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.common.config.as_deref(), None)?;
        let static_dir = self
            .static_dir
            .unwrap_or_else(|| config.build_resolved.static_dir());
        let kind = self
            .cache_bust
            .map_or(config.assets.cache_bust, Into::into);

        let written = AssetPublisher::new(cache_bust(kind)).publish(&static_dir)?;
        for path in &written {
            output.info(&format!("Wrote {}", path.display()));
        }
        output.success(&format!("Published assets to {}", static_dir.display()));

        if self.print_tags {
            let tags = head_tags(&config.build_resolved.static_url());
            std::io::stdout().lock().write_all(tags.as_bytes())?;
        }
        Ok(())
    }
}
