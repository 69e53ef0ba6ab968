//! Configuration management for flipcard.
//!
//! Parses `flipcard.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `flashcard.flip_label`
//! - `flashcard.link_base`
//! - `build.base_url`

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override site output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the math engine.
    pub math_engine: Option<MathEngineKind>,
    /// Override the prefix of wiki-link targets.
    pub link_base: Option<String>,
    /// Override the flip button label.
    pub flip_label: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "flipcard.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flashcard block configuration.
    pub flashcard: FlashcardConfig,
    /// Math rendering configuration.
    pub math: MathConfig,
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Static asset configuration.
    pub assets: AssetsConfig,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Flashcard block configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FlashcardConfig {
    /// Fence info-string language that marks a flashcard block.
    pub language: String,
    /// Text of the flip button.
    pub flip_label: String,
    /// Prefix prepended to slugified wiki-link targets.
    pub link_base: String,
}

impl Default for FlashcardConfig {
    fn default() -> Self {
        Self {
            language: "flashcard".to_owned(),
            flip_label: "Flip".to_owned(),
            link_base: "/".to_owned(),
        }
    }
}

/// Math engine selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathEngineKind {
    /// TeX left in the page for client-side rendering.
    #[default]
    Client,
    /// Server-side conversion to MathML.
    Mathml,
}

/// Math rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MathConfig {
    /// Engine used for `$…$` and `$$…$$` spans.
    pub engine: MathEngineKind,
    /// Report malformed TeX as an engine error instead of an error span.
    pub strict: bool,
}

/// Version marker strategy for the published script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBustKind {
    /// Hash of the script content.
    #[default]
    Hash,
    /// Publish time in milliseconds.
    Timestamp,
}

/// Static asset configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Version marker strategy.
    pub cache_bust: CacheBustKind,
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    static_dir: Option<String>,
    base_url: Option<String>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory scanned for markdown files.
    pub source_dir: PathBuf,
    /// Directory the rendered site is written to.
    pub output_dir: PathBuf,
    /// Static asset directory, relative to `output_dir`.
    pub static_subdir: String,
    /// URL the output directory is served under.
    pub base_url: String,
}

impl BuildConfig {
    /// Absolute static asset directory.
    #[must_use]
    pub fn static_dir(&self) -> PathBuf {
        self.output_dir.join(&self.static_subdir)
    }

    /// URL the static asset directory is served under.
    #[must_use]
    pub fn static_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.static_subdir.trim_matches('/')
        )
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
        /// Config field path (e.g., "`build.base_url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `flipcard.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
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
            self.build_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(engine) = settings.math_engine {
            self.math.engine = engine;
        }
        if let Some(link_base) = &settings.link_base {
            self.flashcard.link_base.clone_from(link_base);
        }
        if let Some(flip_label) = &settings.flip_label {
            self.flashcard.flip_label.clone_from(flip_label);
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
        let mut config = Self {
            flashcard: FlashcardConfig::default(),
            math: MathConfig::default(),
            build: BuildConfigRaw::default(),
            assets: AssetsConfig::default(),
            build_resolved: BuildConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
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
        self.validate_flashcard()?;
        self.validate_build()?;
        Ok(())
    }

    fn validate_flashcard(&self) -> Result<(), ConfigError> {
        let flashcard = &self.flashcard;
        require_non_empty(&flashcard.language, "flashcard.language")?;
        if flashcard.language.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "flashcard.language cannot contain whitespace".to_owned(),
            ));
        }
        require_non_empty(&flashcard.flip_label, "flashcard.flip_label")?;
        require_non_empty(&flashcard.link_base, "flashcard.link_base")?;
        Ok(())
    }

    fn validate_build(&self) -> Result<(), ConfigError> {
        let build = &self.build_resolved;
        require_non_empty(&build.base_url, "build.base_url")?;
        require_non_empty(&build.static_subdir, "build.static_dir")?;

        // The static directory must stay inside the output directory
        let escapes = Path::new(&build.static_subdir)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ConfigError::Validation(
                "build.static_dir must be a relative path inside build.output_dir".to_owned(),
            ));
        }

        if build.source_dir == build.output_dir {
            return Err(ConfigError::Validation(
                "build.output_dir cannot be the same as build.source_dir".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.flashcard.flip_label =
            expand::expand_env(&self.flashcard.flip_label, "flashcard.flip_label")?;
        self.flashcard.link_base =
            expand::expand_env(&self.flashcard.link_base, "flashcard.link_base")?;

        if let Some(ref url) = self.build.base_url {
            self.build.base_url = Some(expand::expand_env(url, "build.base_url")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.build_resolved = BuildConfig {
            source_dir: resolve(self.build.source_dir.as_deref(), "content"),
            output_dir: resolve(self.build.output_dir.as_deref(), "public"),
            static_subdir: self
                .build
                .static_dir
                .clone()
                .unwrap_or_else(|| "static".to_owned()),
            base_url: self
                .build
                .base_url
                .clone()
                .unwrap_or_else(|| "/".to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.flashcard.language, "flashcard");
        assert_eq!(config.flashcard.flip_label, "Flip");
        assert_eq!(config.flashcard.link_base, "/");
        assert_eq!(config.math.engine, MathEngineKind::Client);
        assert!(!config.math.strict);
        assert_eq!(config.assets.cache_bust, CacheBustKind::Hash);
        assert_eq!(
            config.build_resolved.source_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(
            config.build_resolved.output_dir,
            PathBuf::from("/test/public")
        );
        assert_eq!(
            config.build_resolved.static_dir(),
            PathBuf::from("/test/public/static")
        );
        assert_eq!(config.build_resolved.static_url(), "/static");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.flashcard.language, "flashcard");
        assert_eq!(config.math.engine, MathEngineKind::Client);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[flashcard]
language = "card"
flip_label = "Turn over"
link_base = "/wiki/"

[math]
engine = "mathml"
strict = true

[build]
source_dir = "notes"
output_dir = "site"
static_dir = "assets/cards"
base_url = "https://cards.example.com/"

[assets]
cache_bust = "timestamp"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.flashcard.language, "card");
        assert_eq!(config.flashcard.flip_label, "Turn over");
        assert_eq!(config.flashcard.link_base, "/wiki/");
        assert_eq!(config.math.engine, MathEngineKind::Mathml);
        assert!(config.math.strict);
        assert_eq!(config.assets.cache_bust, CacheBustKind::Timestamp);
        assert_eq!(
            config.build_resolved.source_dir,
            PathBuf::from("/project/notes")
        );
        assert_eq!(
            config.build_resolved.static_dir(),
            PathBuf::from("/project/site/assets/cards")
        );
        assert_eq!(
            config.build_resolved.static_url(),
            "https://cards.example.com/assets/cards"
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_unknown_engine_fails() {
        let result: Result<Config, _> = toml::from_str("[math]\nengine = \"katex\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[build]\nsource_dir = \"cards\"\n");

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.build_resolved.source_dir, dir.path().join("cards"));
        assert_eq!(config.build_resolved.output_dir, dir.path().join("public"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = Config::load(Some(&missing), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[flashcard\n");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[flashcard]\nflip_label = \"\"\n");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("flashcard.flip_label"));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FLIPCARD_TEST_CONFIG_URL", "https://notes.example.com");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[build]\nbase_url = \"${FLIPCARD_TEST_CONFIG_URL}/\"\n\n[flashcard]\nlink_base = \"${FLIPCARD_TEST_CONFIG_LINKS:-/notes/}\"\n",
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.build_resolved.base_url,
            "https://notes.example.com/"
        );
        assert_eq!(config.flashcard.link_base, "/notes/");
        unsafe {
            std::env::remove_var("FLIPCARD_TEST_CONFIG_URL");
        }
    }

    #[test]
    fn test_load_missing_env_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FLIPCARD_TEST_CONFIG_MISSING");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[flashcard]\nflip_label = \"${FLIPCARD_TEST_CONFIG_MISSING}\"\n",
        );

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/out")),
            math_engine: Some(MathEngineKind::Mathml),
            flip_label: Some("Reveal".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/out"));
        assert_eq!(
            config.build_resolved.static_dir(),
            PathBuf::from("/out/static")
        );
        assert_eq!(config.math.engine, MathEngineKind::Mathml);
        assert_eq!(config.flashcard.flip_label, "Reveal");
        // Unchanged
        assert_eq!(
            config.build_resolved.source_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(config.flashcard.link_base, "/");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.flashcard.flip_label, "Flip");
        assert_eq!(
            config.build_resolved.output_dir,
            PathBuf::from("/test/public")
        );
    }

    #[test]
    fn test_validate_default_config_passes() {
        Config::default_with_base(Path::new("/test"))
            .validate()
            .unwrap();
    }

    #[test]
    fn test_validate_language_with_whitespace() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.flashcard.language = "flash card".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("flashcard.language"));
    }

    #[test]
    fn test_validate_empty_link_base() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.flashcard.link_base = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_static_dir_escaping_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.build_resolved.static_subdir = "../static".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("build.static_dir"));

        config.build_resolved.static_subdir = "/static".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_output_equals_source() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.build_resolved.output_dir = PathBuf::from("/test/content");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("build.output_dir"));
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let overrides = CliSettings {
            link_base: Some(String::new()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(err.to_string().contains("flashcard.link_base"));
    }
}
