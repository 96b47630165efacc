//! Bundler integration.
//!
//! The host bundler consumes a [`BundlerInput`]: its entry points (user
//! entries plus every generated file), output directory, manifest name, public
//! base URL and module aliases. Nothing here runs the bundler itself.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ops::generate::GeneratedFiles;
use crate::util::config::ResolvedConfig;
use crate::util::fs::{relative_path, to_slash};

/// Name of the bundler manifest written next to the build output.
pub const BUNDLER_MANIFEST: &str = "manifest.json";

/// Whether the bundler builds for production or serves during development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Build,
    Serve,
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Build => write!(f, "build"),
            BuildMode::Serve => write!(f, "serve"),
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(BuildMode::Build),
            "serve" => Ok(BuildMode::Serve),
            other => Err(format!("invalid mode '{}'; expected build or serve", other)),
        }
    }
}

/// A module alias for the bundler's resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    pub find: String,
    pub replacement: String,
}

/// Everything the host bundler needs from a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerInput {
    pub input: Vec<String>,
    pub out_dir: String,
    pub manifest: String,
    pub base: String,
    pub aliases: Vec<Alias>,
}

/// Public base URL of built assets.
///
/// Serving always uses `/`. Building uses `<asset_url>/<build>/`.
pub fn resolve_base(config: &ResolvedConfig, mode: BuildMode) -> String {
    match mode {
        BuildMode::Serve => "/".to_string(),
        BuildMode::Build => {
            let asset_url = &config.bundler.asset_url;
            let separator = if asset_url.ends_with('/') { "" } else { "/" };
            format!("{}{}{}/", asset_url, separator, config.build_directory)
        }
    }
}

/// Aliases pointing `moment` imports at the project's installed copy.
pub fn default_aliases(config: &ResolvedConfig) -> Vec<Alias> {
    let moment = config.root.join("node_modules").join("moment");
    let alias = |find: &str, file: &str| Alias {
        find: find.to_string(),
        replacement: moment.join(file).to_string_lossy().into_owned(),
    };

    vec![
        alias("moment/locale/ar", "locale/ar.js"),
        alias("moment/locale/fa", "locale/fa.js"),
        alias("moment/moment", "moment.js"),
        alias("moment", "moment.js"),
    ]
}

/// Entry points: `user_input` first, then every generated file relative to
/// the project root.
pub fn resolve_input(
    config: &ResolvedConfig,
    user_input: &[String],
    generated: &GeneratedFiles,
) -> Vec<String> {
    let mut input: Vec<String> = user_input.to_vec();
    for path in generated.entry_points() {
        let entry = to_slash(&relative_path(&config.root, path));
        if !input.contains(&entry) {
            input.push(entry);
        }
    }
    input
}

impl BundlerInput {
    pub fn new(
        config: &ResolvedConfig,
        mode: BuildMode,
        user_input: &[String],
        generated: &GeneratedFiles,
    ) -> Self {
        let aliases = if config.bundler.configure_default_aliases {
            default_aliases(config)
        } else {
            Vec::new()
        };

        BundlerInput {
            input: resolve_input(config, user_input, generated),
            out_dir: config.out_dir(),
            manifest: BUNDLER_MANIFEST.to_string(),
            base: resolve_base(config, mode),
            aliases,
        }
    }

    /// Pretty JSON for the host bundler.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
