//! `flipcard render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use flipcard_assets::head_tags;
use flipcard_config::{CliSettings, Config};

use super::{CardPipeline, CommonArgs, MathArg};
use crate::error::CliError;
use crate::output::Output;
use crate::site;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render ("-" reads stdin).
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the fragment in a full page that references the flashcard assets.
    #[arg(long)]
    standalone: bool,

    /// Prefix for wiki-link targets (overrides config).
    #[arg(long)]
    link_base: Option<String>,

    /// Flip button label (overrides config).
    #[arg(long)]
    flip_label: Option<String>,

    /// Math engine (overrides config).
    #[arg(long, value_enum)]
    math: Option<MathArg>,

    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            link_base: self.link_base.clone(),
            flip_label: self.flip_label.clone(),
            math_engine: self.math.map(Into::into),
            ..CliSettings::default()
        };
        let config = Config::load(self.common.config.as_deref(), Some(&cli_settings))?;
        let pipeline = CardPipeline::from_config(&config)?;

        let markdown = read_input(&self.input)?;
        let result = pipeline.render(&markdown);
        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let html = if self.standalone {
            let head = head_tags(&config.build_resolved.static_url());
            site::render_page(&site::page_title(&self.input), &head, &result.html)
        } else {
            result.html
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, html).map_err(|source| CliError::Document {
                    path: path.clone(),
                    source,
                })?;
                output.success(&format!("Rendered to {}", path.display()));
            }
            None => std::io::stdout().lock().write_all(html.as_bytes())?,
        }
        Ok(())
    }
}

fn read_input(input: &Path) -> Result<String, CliError> {
    if input == Path::new("-") {
        return Ok(std::io::read_to_string(std::io::stdin())?);
    }
    std::fs::read_to_string(input).map_err(|source| CliError::Document {
        path: input.to_path_buf(),
        source,
    })
}
