//! Configuration management for StaticPages docs.
//!
//! Parses `sp.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support `~`, `${VAR}` and `${VAR:-default}` expansion:
//!
//! - `docs.source_dir`
//! - `docs.output_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override rendered output directory.
    pub output_dir: Option<PathBuf>,
}

/// Elements whose HTML blocks keep their body as raw text.
const RAW_TEXT_ELEMENTS: [&str; 4] = ["pre", "script", "style", "textarea"];

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sp.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Markdown parsing options.
    pub markdown: MarkdownConfig,
    /// `:::terminal` output options.
    pub terminal: TerminalConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Directory receiving rendered HTML.
    pub output_dir: PathBuf,
}

/// Markdown parsing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub Flavored Markdown (tables, strikethrough, task lists).
    pub gfm: bool,
    /// Use the first H1 as the page title.
    pub extract_title: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            extract_title: true,
        }
    }
}

/// `:::terminal` wrapper configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Wrapper element name.
    pub element: String,
    /// Attribute on the wrapper element carrying the title.
    pub title_attr: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            element: "Terminal".to_owned(),
            title_attr: "title".to_owned(),
        }
    }
}

impl TerminalConfig {
    /// Validate element and attribute names.
    ///
    /// The element must be usable as a raw HTML block tag so the markdown
    /// parser keeps the block body as markdown.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a name is empty or malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.element, "terminal.element")?;
        let valid_element = self.element.starts_with(|c: char| c.is_ascii_alphabetic())
            && self
                .element
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid_element {
            return Err(ConfigError::Validation(format!(
                "terminal.element must be a tag name (letters, digits, '-'), got {:?}",
                self.element
            )));
        }

        if RAW_TEXT_ELEMENTS
            .iter()
            .any(|raw| raw.eq_ignore_ascii_case(&self.element))
        {
            return Err(ConfigError::Validation(format!(
                "terminal.element cannot be {:?}: its body would not be rendered as markdown",
                self.element
            )));
        }

        require_non_empty(&self.title_attr, "terminal.title_attr")?;
        let valid_attr = self
            .title_attr
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'));
        if !valid_attr {
            return Err(ConfigError::Validation(format!(
                "terminal.title_attr must be an attribute name, got {:?}",
                self.title_attr
            )));
        }

        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sp.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            markdown: MarkdownConfig::default(),
            terminal: TerminalConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("dist"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.terminal.validate()?;

        if self.docs_resolved.source_dir == self.docs_resolved.output_dir {
            return Err(ConfigError::Validation(
                "docs.output_dir must differ from docs.source_dir".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in path strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref dir) = self.docs.output_dir {
            self.docs.output_dir = Some(expand::expand_env(dir, "docs.output_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.docs.output_dir.as_deref(), "dist"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/test/dist"));
        assert!(config.markdown.gfm);
        assert!(config.markdown.extract_title);
        assert_eq!(config.terminal.element, "Terminal");
        assert_eq!(config.terminal.title_attr, "title");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.terminal.element, "Terminal");
        assert!(config.markdown.gfm);
    }

    #[test]
    fn test_parse_terminal_config() {
        let toml = r#"
[terminal]
element = "shell-window"
title_attr = "data-title"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.terminal.element, "shell-window");
        assert_eq!(config.terminal.title_attr, "data-title");
    }

    #[test]
    fn test_parse_markdown_config() {
        let toml = r"
[markdown]
gfm = false
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.markdown.gfm);
        assert!(config.markdown.extract_title);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
output_dir = "public"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/project/public")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[docs]\nsource_dir = \"pages\"\n\n[terminal]\nelement = \"Shell\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();
        assert_eq!(config.docs_resolved.source_dir, dir.path().join("pages"));
        assert_eq!(config.docs_resolved.output_dir, dir.path().join("dist"));
        assert_eq!(config.terminal.element, "Shell");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/sp.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[terminal\nelement = ").unwrap();

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_invalid_element() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[terminal]\nelement = \"my terminal\"\n").unwrap();

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(err.to_string().contains("terminal.element"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/srv/site")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/srv/site"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/test/dist"));
    }

    #[test]
    fn test_expand_env_vars_paths() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SP_TEST_OUT", "/tmp/sp-out");
        }

        let toml = r#"
[docs]
output_dir = "${SP_TEST_OUT}"
source_dir = "${SP_TEST_SRC_UNSET:-src}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/tmp/sp-out"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/src"));

        unsafe {
            std::env::remove_var("SP_TEST_OUT");
        }
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_element_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.terminal.element = String::new();
        assert_validation_error(&config, &["terminal.element", "empty"]);
    }

    #[test]
    fn test_validate_element_must_start_with_letter() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.terminal.element = "1term".to_owned();
        assert_validation_error(&config, &["terminal.element"]);
    }

    #[test]
    fn test_validate_element_rejects_markup() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.terminal.element = "div class=x".to_owned();
        assert_validation_error(&config, &["terminal.element"]);
    }

    #[test]
    fn test_validate_element_rejects_raw_text_tags() {
        let mut config = Config::default_with_base(Path::new("/test"));
        for element in ["pre", "script", "style", "textarea", "PRE"] {
            config.terminal.element = element.to_owned();
            assert_validation_error(&config, &["terminal.element", "markdown"]);
        }

        config.terminal.element = "pre-terminal".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_title_attr() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.terminal.title_attr = "data title".to_owned();
        assert_validation_error(&config, &["terminal.title_attr"]);

        config.terminal.title_attr = "data-title".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_same_source_and_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.output_dir = PathBuf::from("/test/docs");
        assert_validation_error(&config, &["output_dir", "source_dir"]);
    }
}
