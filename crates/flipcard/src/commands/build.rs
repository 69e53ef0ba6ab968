//! `flipcard build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use flipcard_assets::{AssetPublisher, head_tags};
use flipcard_config::{CliSettings, Config};
use rayon::prelude::*;

use super::{CardPipeline, CommonArgs, MathArg, cache_bust};
use crate::error::CliError;
use crate::output::Output;
use crate::site;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

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

/// Outcome of rendering one document.
struct DocumentReport {
    path: PathBuf,
    result: Result<Vec<String>, CliError>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            link_base: self.link_base.clone(),
            flip_label: self.flip_label.clone(),
            math_engine: self.math.map(Into::into),
        };
        let config = Config::load(self.common.config.as_deref(), Some(&cli_settings))?;
        let build = &config.build_resolved;

        output.info(&format!("Source: {}", build.source_dir.display()));
        output.info(&format!("Output: {}", build.output_dir.display()));

        if !build.source_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Source directory not found: {}",
                build.source_dir.display()
            )));
        }

        let documents = site::collect_markdown(&build.source_dir, &build.output_dir)?;
        if documents.is_empty() {
            output.warning("No markdown documents found");
        }

        let pipeline = CardPipeline::from_config(&config)?;
        let head = head_tags(&build.static_url());

        let reports: Vec<DocumentReport> = documents
            .par_iter()
            .map(|relative| DocumentReport {
                path: relative.clone(),
                result: build_document(
                    &pipeline,
                    &build.source_dir,
                    &build.output_dir,
                    relative,
                    &head,
                ),
            })
            .collect();

        let mut failed = 0usize;
        for report in &reports {
            match &report.result {
                Ok(warnings) => {
                    for warning in warnings {
                        output.warning(&format!("{}: {warning}", report.path.display()));
                    }
                }
                Err(err) => {
                    failed += 1;
                    output.error(&format!("Failed: {err}"));
                }
            }
        }

        let publisher = AssetPublisher::new(cache_bust(config.assets.cache_bust));
        publisher.publish(&build.static_dir())?;

        if failed > 0 {
            return Err(CliError::Build(format!(
                "{failed} of {} documents failed to build",
                reports.len()
            )));
        }

        output.success(&format!(
            "Built {} documents to {}",
            reports.len(),
            build.output_dir.display()
        ));
        Ok(())
    }
}

/// Render one source document into its HTML page. Returns renderer warnings.
fn build_document(
    pipeline: &CardPipeline,
    source_dir: &Path,
    output_dir: &Path,
    relative: &Path,
    head: &str,
) -> Result<Vec<String>, CliError> {
    let source_path = source_dir.join(relative);
    let markdown = fs::read_to_string(&source_path).map_err(|source| CliError::Document {
        path: source_path.clone(),
        source,
    })?;

    let result = pipeline.render(&markdown);
    let page = site::render_page(&site::page_title(relative), head, &result.html);

    let target = output_dir.join(relative).with_extension("html");
    let write_page = |path: &Path| -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, page.as_bytes())
    };
    write_page(&target).map_err(|source| CliError::Document {
        path: target.clone(),
        source,
    })?;

    tracing::info!(
        source = %source_path.display(),
        target = %target.display(),
        warnings = result.warnings.len(),
        "Built document"
    );
    Ok(result.warnings)
}
