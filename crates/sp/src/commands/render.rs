//! `render` command: one markdown file to HTML.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::Term;
use sp_config::Config;

use super::page_renderer;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    markdown_file: PathBuf,

    /// Path to configuration file (default: auto-discover sp.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the result to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit html, title, toc and warnings as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, reading the markdown file,
    /// serialization, or writing the result fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let markdown = fs::read_to_string(&self.markdown_file)?;
        let result = page_renderer(&config).render(&markdown);

        output.page_warnings(&self.markdown_file, &result.warnings);
        tracing::info!(
            path = %self.markdown_file.display(),
            title = result.title.as_deref().unwrap_or_default(),
            warnings = result.warnings.len(),
            "Rendered page"
        );

        let body = if self.json {
            serde_json::to_string_pretty(&result)?
        } else {
            result.html
        };

        match &self.output {
            Some(path) => {
                fs::write(path, body)?;
                output.rendered(&self.markdown_file, path);
            }
            None => Term::stdout().write_str(&body)?,
        }

        Ok(())
    }
}
