//! Theme stylesheet and script generation.
//!
//! Both passes share one algorithm: frontends of every package are grouped by
//! theme, each frontend contributes its file assets of the requested kinds,
//! and one file per theme is written with an import per asset. A path already
//! imported by an earlier frontend of the same theme is emitted as a
//! commented-out duplicate instead.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::{AssetType, Frontend, Package};
use crate::util::config::ResolvedConfig;
use crate::util::fs::{check_file_stem, OutputFile};

/// First line of every generated file.
pub const GENERATED_BANNER: &str =
    "/* This file is generated by jalno. Do not edit it manually. */";

/// Declares the global namespace and its translator.
pub const BOOTSTRAP: &str = "window.jalno = window.jalno || {};\n\
                             window.jalno.translator = window.jalno.translator || {};\n";

/// Asset files under this prefix are imported as bare package specifiers.
pub const NODE_MODULES_PREFIX: &str = "node_modules/";

const INDENT: &str = "  ";

/// Which kind of theme file a pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPass {
    Style,
    Script,
}

impl AssetPass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetPass::Style => "style",
            AssetPass::Script => "script",
        }
    }

    /// Import statement for `path` in this pass's output language.
    pub fn import_statement(&self, path: &str) -> String {
        match self {
            AssetPass::Style => format!("@import \"{}\";", path),
            AssetPass::Script => format!("import \"{}\";", path),
        }
    }

    /// Asset kinds gathered by this pass.
    pub fn asset_types<'a>(&self, config: &'a ResolvedConfig) -> &'a [AssetType] {
        match self {
            AssetPass::Style => &config.style_types,
            AssetPass::Script => &config.script_types,
        }
    }

    pub fn output_dir(&self, config: &ResolvedConfig) -> PathBuf {
        match self {
            AssetPass::Style => config.styles_dir(),
            AssetPass::Script => config.scripts_dir(),
        }
    }

    pub fn extension<'a>(&self, config: &'a ResolvedConfig) -> &'a str {
        match self {
            AssetPass::Style => &config.style_extension,
            AssetPass::Script => &config.script_extension,
        }
    }
}

impl fmt::Display for AssetPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Import paths contributed by one frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendAssets {
    /// Derived name of the frontend.
    pub frontend: String,
    /// Unique import paths, in declaration order.
    pub files: Vec<String>,
}

/// Every frontend contributing to one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeAssets {
    pub theme: String,
    pub frontends: Vec<FrontendAssets>,
}

/// Import path of an asset file declared by `frontend`.
///
/// `node_modules/x` becomes `x`; anything else is namespaced under the
/// frontend's derived name.
pub fn asset_import_path(file: &str, frontend: &Frontend) -> String {
    match file.strip_prefix(NODE_MODULES_PREFIX) {
        Some(module) => module.to_string(),
        None => format!("{}/{}", frontend.npm_like_name(), file),
    }
}

/// Group the file assets of the given kinds by theme.
///
/// Themes keep the order they are first seen in; frontends keep package
/// order, then declaration order within a package.
pub fn resolve_assets_by_type(packages: &[Package], types: &[AssetType]) -> Vec<ThemeAssets> {
    let mut themes: Vec<ThemeAssets> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for frontend in packages.iter().flat_map(|p| p.frontends()) {
        let idx = *index.entry(frontend.name().to_string()).or_insert_with(|| {
            themes.push(ThemeAssets {
                theme: frontend.name().to_string(),
                frontends: Vec::new(),
            });
            themes.len() - 1
        });

        let mut files: Vec<String> = Vec::new();
        for asset in frontend.assets_by_type(Some(types), Some(true)) {
            if let Some(file) = asset.file() {
                let path = asset_import_path(file, frontend);
                if !files.contains(&path) {
                    files.push(path);
                }
            }
        }

        let name = frontend.npm_like_name();
        let theme = &mut themes[idx];
        if theme.frontends.iter().any(|f| f.frontend == name) {
            tracing::warn!(
                "Frontend '{}' appears twice in theme '{}' ({})",
                name,
                theme.theme,
                frontend.home().display()
            );
        }
        theme.frontends.push(FrontendAssets {
            frontend: name,
            files,
        });
    }

    themes
}

fn render_frontend(
    frontend: &FrontendAssets,
    pass: AssetPass,
    seen: &mut HashSet<String>,
    out: &mut String,
) {
    out.push_str(&format!(
        "{}/* ** START FRONTEND '{}' ASSETS ** */\n",
        INDENT, frontend.frontend
    ));

    if frontend.files.is_empty() {
        out.push_str(&format!("{}/* // EMPTY */\n", INDENT.repeat(2)));
    }

    for file in &frontend.files {
        let statement = pass.import_statement(file);
        if seen.insert(file.clone()) {
            out.push_str(&format!("{}{}\n", INDENT.repeat(2), statement));
        } else {
            out.push_str(&format!("{}/* DUPLICATE: {} */\n", INDENT.repeat(2), statement));
        }
    }

    out.push_str(&format!(
        "{}/* ** END FRONTEND '{}' ASSETS ** */\n",
        INDENT, frontend.frontend
    ));
}

/// Render the sections of one theme, without banner or trailing newline.
pub fn render_theme(theme: &ThemeAssets, pass: AssetPass) -> String {
    let mut out = format!("/* * START THEME '{}' ASSETS * */\n\n", theme.theme);
    let mut seen = HashSet::new();

    for frontend in &theme.frontends {
        render_frontend(frontend, pass, &mut seen, &mut out);
        out.push('\n');
    }

    out.push_str(&format!("/* * END THEME '{}' ASSETS * */", theme.theme));
    out
}

/// Full content of a generated theme file.
pub fn render_compiled_file(theme: &ThemeAssets, pass: AssetPass) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_BANNER);
    out.push('\n');
    if pass == AssetPass::Script {
        out.push_str(BOOTSTRAP);
    }
    out.push('\n');
    out.push_str(&render_theme(theme, pass));
    out.push('\n');
    out
}

/// Plan one `<theme>.<extension>` file per theme.
///
/// Nothing is written here; a theme whose name is not a plain file name is
/// an error.
pub fn compiled_outputs(
    packages: &[Package],
    config: &ResolvedConfig,
    pass: AssetPass,
) -> Result<Vec<OutputFile>> {
    let themes = resolve_assets_by_type(packages, pass.asset_types(config));
    let output_dir = pass.output_dir(config);
    let extension = pass.extension(config);

    themes
        .iter()
        .map(|theme| -> Result<OutputFile> {
            check_file_stem(&theme.theme, "theme")?;
            let path = output_dir.join(format!("{}.{}", theme.theme, extension));
            Ok(OutputFile::new(path, render_compiled_file(theme, pass)))
        })
        .collect()
}
