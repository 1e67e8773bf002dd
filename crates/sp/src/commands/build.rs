//! `build` command: render every markdown file under the source directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use sp_config::{CliSettings, Config};
use sp_renderer::{RenderResult, escape_html};

use super::page_renderer;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover sp.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// HTML output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Counts reported after a build.
#[derive(Debug, Default, PartialEq, Eq)]
struct BuildSummary {
    pages: usize,
    warnings: usize,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, the source directory is
    /// missing, or a page cannot be read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        output.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Output directory: {}",
            config.docs_resolved.output_dir.display()
        ));

        let summary = build_site(&config, &output)?;

        output.success(&format!(
            "Built {} page(s) with {} warning(s)",
            summary.pages, summary.warnings
        ));
        Ok(())
    }
}

/// Render all `**/*.md` files of the source directory into the output directory.
fn build_site(config: &Config, output: &Output) -> Result<BuildSummary, CliError> {
    let source_dir = &config.docs_resolved.source_dir;
    let output_dir = &config.docs_resolved.output_dir;

    if !source_dir.is_dir() {
        return Err(CliError::Validation(format!(
            "Source directory not found: {}",
            source_dir.display()
        )));
    }

    let root = source_dir.to_str().ok_or_else(|| {
        CliError::Validation(format!(
            "Source directory is not valid UTF-8: {}",
            source_dir.display()
        ))
    })?;
    let pattern = format!("{}/**/*.md", glob::Pattern::escape(root));
    tracing::debug!(%pattern, "Enumerating markdown files");

    let mut summary = BuildSummary::default();
    for entry in glob::glob(&pattern)? {
        let source = entry?;
        let target = target_path(source_dir, output_dir, &source)?;

        let markdown = fs::read_to_string(&source)?;
        let result = page_renderer(config).render(&markdown);
        output.page_warnings(&source, &result.warnings);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, page_document(&result))?;

        tracing::info!(
            path = %source.display(),
            title = result.title.as_deref().unwrap_or_default(),
            warnings = result.warnings.len(),
            "Rendered page"
        );
        output.rendered(&source, &target);

        summary.pages += 1;
        summary.warnings += result.warnings.len();
    }

    Ok(summary)
}

/// Map `<source_dir>/<rel>.md` to `<output_dir>/<rel>.html`.
fn target_path(source_dir: &Path, output_dir: &Path, source: &Path) -> Result<PathBuf, CliError> {
    let relative = source.strip_prefix(source_dir).map_err(|_| {
        CliError::Validation(format!(
            "{} is outside the source directory",
            source.display()
        ))
    })?;
    Ok(output_dir.join(relative).with_extension("html"))
}

/// Wrap rendered page HTML in a minimal standalone document.
fn page_document(result: &RenderResult) -> String {
    let title = escape_html(result.title.as_deref().unwrap_or_default());
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        result.html
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_for(root: &Path) -> Config {
        let mut config = Config::default();
        config.docs_resolved.source_dir = root.join("docs");
        config.docs_resolved.output_dir = root.join("dist");
        config
    }

    #[test]
    fn test_target_path_mirrors_layout() {
        let target = target_path(
            Path::new("/site/docs"),
            Path::new("/site/dist"),
            Path::new("/site/docs/guide/setup.md"),
        )
        .unwrap();
        assert_eq!(target, PathBuf::from("/site/dist/guide/setup.html"));
    }

    #[test]
    fn test_target_path_outside_source() {
        let err = target_path(
            Path::new("/site/docs"),
            Path::new("/site/dist"),
            Path::new("/elsewhere/page.md"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside the source directory"));
    }

    #[test]
    fn test_page_document_escapes_title() {
        let result = RenderResult {
            html: "<p>hi</p>\n".to_owned(),
            title: Some("Q&A".to_owned()),
            toc: Vec::new(),
            warnings: Vec::new(),
        };
        let doc = page_document(&result);
        assert!(doc.contains("<title>Q&amp;A</title>"));
        assert!(doc.contains("<body>\n<p>hi</p>\n</body>"));
    }

    #[test]
    fn test_build_site_renders_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(docs.join("guide")).unwrap();
        fs::write(docs.join("index.md"), "# Home\n").unwrap();
        fs::write(
            docs.join("guide/cli.md"),
            "# CLI\n\n:::terminal title=\"Install\"\n```sh\ncargo install sp\n```\n:::\n",
        )
        .unwrap();
        fs::write(docs.join("notes.txt"), "ignored").unwrap();

        let config = config_for(temp_dir.path());
        let summary = build_site(&config, &Output::new()).unwrap();

        assert_eq!(
            summary,
            BuildSummary {
                pages: 2,
                warnings: 0
            }
        );

        let dist = temp_dir.path().join("dist");
        let index = fs::read_to_string(dist.join("index.html")).unwrap();
        assert!(index.contains("<title>Home</title>"));

        let cli = fs::read_to_string(dist.join("guide/cli.html")).unwrap();
        assert!(cli.contains(r#"<Terminal title="Install">"#));
        assert!(cli.contains("<pre><code class=\"language-sh\">cargo install sp\n</code></pre>"));
        assert!(cli.contains("</Terminal>"));
        assert!(!dist.join("notes.html").exists());
    }

    #[test]
    fn test_build_site_counts_warnings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("broken.md"), ":::terminal\nnever closed\n").unwrap();

        let summary = build_site(&config_for(temp_dir.path()), &Output::new()).unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(summary.warnings, 1);
    }

    #[test]
    fn test_build_site_missing_source_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = build_site(&config_for(temp_dir.path()), &Output::new()).unwrap_err();
        assert!(err.to_string().contains("Source directory not found"));
    }
}
