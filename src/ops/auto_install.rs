//! Automatic installation of frontend npm packages.
//!
//! Every frontend carrying a `package.json` is installed into the project's
//! `node_modules` under its derived name, so generated imports such as
//! `jalno-blog-frontend/app.js` resolve.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::{Frontend, Package};
use crate::util::config::InstallSettings;
use crate::util::fs::{read_to_string, relative_path, to_slash, write_string};
use crate::util::process::{find_executable, ProcessBuilder};

/// npm package descriptor inside a frontend directory.
pub const NPM_PACKAGE_FILE: &str = "package.json";

/// Encode `value` as JSON indented with tabs.
fn to_tab_indented_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    let mut out = String::from_utf8(buf)?;
    out.push('\n');
    Ok(out)
}

/// Make sure the `package.json` of `frontend` carries its derived name and
/// return the install path relative to `root`.
///
/// Returns `None` when the frontend has no `package.json`.
pub fn resolve_package(frontend: &Frontend, root: &Path) -> Result<Option<String>> {
    let package_file = frontend.home().join(NPM_PACKAGE_FILE);
    if !package_file.is_file() {
        tracing::warn!("Can not find 'package.json' file in: {}", package_file.display());
        return Ok(None);
    }

    let content = read_to_string(&package_file)?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("can not process: {}", package_file.display()))?;
    let Value::Object(fields) = value else {
        bail!("can not process: {} (expected an object)", package_file.display());
    };

    let name = frontend.npm_like_name();
    if fields.get("name").and_then(Value::as_str) != Some(name.as_str()) {
        tracing::info!("Set name of {} to '{}'", package_file.display(), name);

        let mut renamed = Map::new();
        renamed.insert("name".to_string(), Value::String(name));
        renamed.extend(fields.into_iter().filter(|(key, _)| key != "name"));

        write_string(&package_file, &to_tab_indented_json(&Value::Object(renamed))?)?;
    }

    let relative = to_slash(&relative_path(root, frontend.home()));
    if relative.contains('/') {
        Ok(Some(relative))
    } else {
        Ok(Some(format!("./{}", relative)))
    }
}

/// Install paths of every frontend with a `package.json`, in frontend order.
pub fn resolve_packages(packages: &[Package], root: &Path) -> Result<Vec<String>> {
    let frontends: Vec<&Frontend> = packages.iter().flat_map(|p| p.frontends()).collect();

    let results: Vec<Result<Option<String>>> = frontends
        .par_iter()
        .map(|frontend| resolve_package(frontend, root))
        .collect();

    let mut paths = Vec::new();
    for result in results {
        if let Some(path) = result? {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// The npm invocation installing `packages` plus the configured extras.
pub fn npm_install_command(packages: &[String], settings: &InstallSettings, root: &Path) -> ProcessBuilder {
    let program = find_executable(&settings.npm_binary)
        .unwrap_or_else(|| settings.npm_binary.clone().into());

    ProcessBuilder::new(program)
        .arg(&settings.install_command)
        .arg(format!("--loglevel={}", settings.npm_log_level))
        .args([
            "--production=false",
            "--install-links",
            "--no-fund",
            "--no-audit",
            "--no-save",
        ])
        .args(packages)
        .args(&settings.additional_packages)
        .cwd(root)
}

/// Run npm for `packages` in `root`. Nothing runs when `packages` is empty.
pub fn npm_install(packages: &[String], settings: &InstallSettings, root: &Path) -> Result<()> {
    if packages.is_empty() {
        tracing::info!("No frontend packages to install");
        return Ok(());
    }

    let cmd = npm_install_command(packages, settings, root);
    tracing::info!("Running command: {}", cmd.display_command());
    cmd.status_and_check()
}

/// Resolve and install every frontend package of `packages`.
pub fn auto_install(packages: &[Package], settings: &InstallSettings, root: &Path) -> Result<Vec<String>> {
    let paths = resolve_packages(packages, root)?;
    npm_install(&paths, settings, root)?;
    Ok(paths)
}
