//! Configuration file support for Jalno.
//!
//! Jalno supports two configuration file locations:
//! - Global: `~/.jalno/config.toml` - User-wide defaults
//! - Project: `.jalno/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command line
//! flags take precedence over both. [`Config::resolve`] fills in defaults and
//! validates the result against a project root.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::asset::AssetType;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".jalno";

/// Name of the configuration file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Token replaced by the language code in translation file names.
pub const CODE_PLACEHOLDER: &str = "[code]";

/// Environment variable consulted when no asset URL is configured.
pub const ASSET_URL_ENV: &str = "ASSET_URL";

/// Log levels npm accepts for `--loglevel`.
pub const NPM_LOG_LEVELS: [&str; 8] = [
    "silent", "error", "warn", "notice", "http", "info", "verbose", "silly",
];

/// Jalno configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project directories
    pub paths: PathsConfig,

    /// Generated file naming
    pub output: OutputConfig,

    /// Asset kinds gathered by each pass
    pub assets: AssetsConfig,

    /// Automatic frontend installation
    pub install: InstallConfig,

    /// Bundler integration
    pub bundler: BundlerConfig,
}

/// Directory settings, all relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Public directory served by the web server (default `public`)
    pub public_directory: Option<String>,

    /// Build directory inside the public directory (default `build`)
    pub build_directory: Option<String>,

    /// Resources directory (default `resources`)
    pub resources_directory: Option<String>,

    /// Where theme stylesheets are written (default `<resources>/css`)
    pub styles_directory: Option<String>,

    /// Where theme scripts are written (default `<resources>/js`)
    pub scripts_directory: Option<String>,

    /// Where translation bundles are written (default `<resources>/js/langs`)
    pub translations_directory: Option<String>,
}

/// Generated file naming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Extension of theme stylesheets (default `css`)
    pub style_extension: Option<String>,

    /// Extension of theme scripts (default `js`)
    pub script_extension: Option<String>,

    /// Translation file name template, must contain `[code]` (default `[code].js`)
    pub translation_file_name: Option<String>,
}

/// Asset kinds gathered by the style and script passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub style_types: Option<Vec<AssetType>>,
    pub script_types: Option<Vec<AssetType>>,
}

/// Automatic installation of frontend npm packages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub enabled: Option<bool>,
    pub npm_binary: Option<String>,
    pub npm_log_level: Option<String>,
    pub install_command: Option<String>,
    pub additional_packages: Option<Vec<String>>,
}

/// Bundler integration settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlerConfig {
    /// Register the `moment` aliases (default true)
    pub configure_default_aliases: Option<bool>,

    /// URL assets are served from in production builds
    pub asset_url: Option<String>,
}

macro_rules! merge_fields {
    ($dst:expr, $src:expr, $($field:ident),+ $(,)?) => {
        $(
            if $src.$field.is_some() {
                $dst.$field = $src.$field;
            }
        )+
    };
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        merge_fields!(
            self.paths,
            other.paths,
            public_directory,
            build_directory,
            resources_directory,
            styles_directory,
            scripts_directory,
            translations_directory,
        );
        merge_fields!(
            self.output,
            other.output,
            style_extension,
            script_extension,
            translation_file_name,
        );
        merge_fields!(self.assets, other.assets, style_types, script_types);
        merge_fields!(
            self.install,
            other.install,
            enabled,
            npm_binary,
            npm_log_level,
            install_command,
            additional_packages,
        );
        merge_fields!(
            self.bundler,
            other.bundler,
            configure_default_aliases,
            asset_url,
        );
    }

    /// Fill in defaults and validate against the project `root`.
    pub fn resolve(&self, root: &Path) -> Result<ResolvedConfig> {
        let paths = &self.paths;

        let public_directory =
            normalize_directory(root, "public_directory", paths.public_directory.as_deref(), "public")?;
        let build_directory =
            normalize_directory(root, "build_directory", paths.build_directory.as_deref(), "build")?;
        let resources_directory = normalize_directory(
            root,
            "resources_directory",
            paths.resources_directory.as_deref(),
            "resources",
        )?;
        let styles_directory = normalize_directory(
            root,
            "styles_directory",
            paths.styles_directory.as_deref(),
            &format!("{}/css", resources_directory),
        )?;
        let scripts_directory = normalize_directory(
            root,
            "scripts_directory",
            paths.scripts_directory.as_deref(),
            &format!("{}/js", resources_directory),
        )?;
        let translations_directory = normalize_directory(
            root,
            "translations_directory",
            paths.translations_directory.as_deref(),
            &format!("{}/js/langs", resources_directory),
        )?;

        let style_extension = normalize_extension(self.output.style_extension.as_deref(), "css");
        let script_extension = normalize_extension(self.output.script_extension.as_deref(), "js");

        let translation_file_name = self
            .output
            .translation_file_name
            .clone()
            .unwrap_or_else(|| format!("{}.js", CODE_PLACEHOLDER));
        if !translation_file_name.contains(CODE_PLACEHOLDER) {
            bail!(
                "translation_file_name must contain '{}', got '{}'",
                CODE_PLACEHOLDER,
                translation_file_name
            );
        }

        let style_types = self
            .assets
            .style_types
            .clone()
            .unwrap_or_else(|| AssetType::STYLES.to_vec());
        let script_types = self
            .assets
            .script_types
            .clone()
            .unwrap_or_else(|| AssetType::SCRIPTS.to_vec());

        let npm_log_level = self
            .install
            .npm_log_level
            .clone()
            .unwrap_or_else(|| "notice".to_string());
        if !NPM_LOG_LEVELS.contains(&npm_log_level.as_str()) {
            bail!(
                "invalid npm_log_level '{}'; expected one of {}",
                npm_log_level,
                NPM_LOG_LEVELS.join(", ")
            );
        }

        let install = InstallSettings {
            enabled: self.install.enabled.unwrap_or(false),
            npm_binary: self
                .install
                .npm_binary
                .clone()
                .unwrap_or_else(|| "npm".to_string()),
            npm_log_level,
            install_command: self
                .install
                .install_command
                .clone()
                .unwrap_or_else(|| "install".to_string()),
            additional_packages: self.install.additional_packages.clone().unwrap_or_default(),
        };

        let bundler = BundlerSettings {
            configure_default_aliases: self.bundler.configure_default_aliases.unwrap_or(true),
            asset_url: self
                .bundler
                .asset_url
                .clone()
                .or_else(|| std::env::var(ASSET_URL_ENV).ok())
                .unwrap_or_default(),
        };

        Ok(ResolvedConfig {
            root: root.to_path_buf(),
            public_directory,
            build_directory,
            resources_directory,
            styles_directory,
            scripts_directory,
            translations_directory,
            style_extension,
            script_extension,
            translation_file_name,
            style_types,
            script_types,
            install,
            bundler,
        })
    }
}

/// Strip the project root, surrounding whitespace and leading slashes from a
/// configured directory.
fn normalize_directory(
    root: &Path,
    key: &str,
    value: Option<&str>,
    default: &str,
) -> Result<String> {
    let Some(value) = value else {
        return Ok(default.to_string());
    };

    let root = root.to_string_lossy().replace('\\', "/");
    let value = value.trim().replace('\\', "/");

    let relative = match value.strip_prefix(root.as_str()) {
        Some(rest) if !root.is_empty() => rest,
        _ => value.as_str(),
    };
    let normalized = relative.trim().trim_start_matches('/').trim_end_matches('/');

    if normalized.is_empty() {
        bail!(
            "{} must be a subdirectory of the project, e.g. '{}'",
            key,
            default
        );
    }

    Ok(normalized.to_string())
}

fn normalize_extension(value: Option<&str>, default: &str) -> String {
    match value.map(|v| v.trim().trim_start_matches('.')) {
        Some(ext) if !ext.is_empty() => ext.to_string(),
        _ => default.to_string(),
    }
}

/// Fully resolved install settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSettings {
    pub enabled: bool,
    pub npm_binary: String,
    pub npm_log_level: String,
    pub install_command: String,
    pub additional_packages: Vec<String>,
}

/// Fully resolved bundler settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlerSettings {
    pub configure_default_aliases: bool,
    pub asset_url: String,
}

/// Configuration with every default applied, bound to a project root.
///
/// Directories are kept relative to `root` with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub root: PathBuf,
    pub public_directory: String,
    pub build_directory: String,
    pub resources_directory: String,
    pub styles_directory: String,
    pub scripts_directory: String,
    pub translations_directory: String,
    pub style_extension: String,
    pub script_extension: String,
    pub translation_file_name: String,
    pub style_types: Vec<AssetType>,
    pub script_types: Vec<AssetType>,
    pub install: InstallSettings,
    pub bundler: BundlerSettings,
}

impl ResolvedConfig {
    /// Absolute directory theme stylesheets are written to.
    pub fn styles_dir(&self) -> PathBuf {
        self.root.join(&self.styles_directory)
    }

    /// Absolute directory theme scripts are written to.
    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join(&self.scripts_directory)
    }

    /// Absolute directory translation bundles are written to.
    pub fn translations_dir(&self) -> PathBuf {
        self.root.join(&self.translations_directory)
    }

    /// File name of the translation bundle for `code`.
    pub fn translation_file_name_for(&self, code: &str) -> String {
        self.translation_file_name.replace(CODE_PLACEHOLDER, code)
    }

    /// Bundler output directory, `<public>/<build>`.
    pub fn out_dir(&self) -> String {
        format!("{}/{}", self.public_directory, self.build_directory)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.jalno/config.toml)
/// 2. Global config (~/.jalno/config.toml)
/// 3. Defaults
///
/// Missing files are skipped; a file that exists but does not parse is an error.
pub fn load_config(global_path: &Path, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    for path in [global_path, project_path] {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            config.merge(Config::load(path)?);
        }
    }

    Ok(config)
}

/// Get the global jalno config directory (~/.jalno).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the project config path (.jalno/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}
