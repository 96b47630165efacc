//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use jalno::core::AssetType;
use jalno::ops::BuildMode;
use jalno::util::Config;

/// Jalno - package and frontend discovery for Jalno projects
#[derive(Parser)]
#[command(name = "jalno")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "JALNO_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate theme stylesheets, scripts and translation bundles
    Generate(GenerateArgs),

    /// Install frontend npm packages into node_modules
    Install(InstallArgs),

    /// List packages, frontends and languages
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Print the bundler input as JSON instead of the generated paths
    #[arg(long)]
    pub json: bool,

    /// Additional bundler entry points, placed before generated files
    #[arg(long = "input", value_name = "PATH")]
    pub input: Vec<String>,

    /// Bundler mode used to compute the public base URL
    #[arg(long, default_value = "build", value_parser = ["build", "serve"])]
    pub mode: String,

    /// Install frontend npm packages after generating
    #[arg(long)]
    pub install: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

impl GenerateArgs {
    pub fn mode(&self) -> anyhow::Result<BuildMode> {
        self.mode.parse().map_err(|e: String| anyhow::anyhow!(e))
    }
}

/// Command line overrides of `.jalno/config.toml`.
#[derive(Args, Default)]
pub struct ConfigOverrides {
    /// Public directory served by the web server
    #[arg(long, value_name = "DIR")]
    pub public_dir: Option<String>,

    /// Build directory inside the public directory
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<String>,

    /// Resources directory
    #[arg(long, value_name = "DIR")]
    pub resources_dir: Option<String>,

    /// Output directory of theme stylesheets
    #[arg(long, value_name = "DIR")]
    pub styles_dir: Option<String>,

    /// Output directory of theme scripts
    #[arg(long, value_name = "DIR")]
    pub scripts_dir: Option<String>,

    /// Output directory of translation bundles
    #[arg(long, value_name = "DIR")]
    pub translations_dir: Option<String>,

    /// Extension of theme stylesheets
    #[arg(long, value_name = "EXT")]
    pub style_extension: Option<String>,

    /// Extension of theme scripts
    #[arg(long, value_name = "EXT")]
    pub script_extension: Option<String>,

    /// Translation file name template, must contain [code]
    #[arg(long, value_name = "TEMPLATE")]
    pub translation_file_name: Option<String>,

    /// Asset types gathered into stylesheets (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "TYPES")]
    pub style_types: Vec<AssetType>,

    /// Asset types gathered into scripts (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "TYPES")]
    pub script_types: Vec<AssetType>,

    /// URL assets are served from in production builds
    #[arg(long, value_name = "URL")]
    pub asset_url: Option<String>,

    /// Do not register the default module aliases
    #[arg(long)]
    pub no_default_aliases: bool,
}

impl ConfigOverrides {
    /// Apply the flags on top of file configuration.
    pub fn apply(self, config: &mut Config) {
        let mut cli = Config::default();
        cli.paths.public_directory = self.public_dir;
        cli.paths.build_directory = self.build_dir;
        cli.paths.resources_directory = self.resources_dir;
        cli.paths.styles_directory = self.styles_dir;
        cli.paths.scripts_directory = self.scripts_dir;
        cli.paths.translations_directory = self.translations_dir;
        cli.output.style_extension = self.style_extension;
        cli.output.script_extension = self.script_extension;
        cli.output.translation_file_name = self.translation_file_name;
        cli.assets.style_types = (!self.style_types.is_empty()).then_some(self.style_types);
        cli.assets.script_types = (!self.script_types.is_empty()).then_some(self.script_types);
        cli.bundler.asset_url = self.asset_url;
        if self.no_default_aliases {
            cli.bundler.configure_default_aliases = Some(false);
        }
        config.merge(cli);
    }
}

#[derive(Args)]
pub struct InstallArgs {
    /// Path or name of the npm binary
    #[arg(long, value_name = "PATH")]
    pub npm_binary: Option<String>,

    /// npm log level
    #[arg(long, value_name = "LEVEL")]
    pub npm_log_level: Option<String>,

    /// Only print the frontend packages that would be installed
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Also list the assets of every frontend
    #[arg(long)]
    pub assets: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
