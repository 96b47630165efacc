//! Test fixtures for common test scenarios.
//!
//! A [`ProjectFixture`] is a temporary composer project: a root
//! `composer.json`, a `vendor/composer/installed.json` and any manifests,
//! frontends and language files a test needs.

use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use super::write_file;

/// Package manifest with a single `frontend` directory.
pub const PACKAGE_MANIFEST: &str = r#"{"frontend": ["frontend"]}"#;

/// Fixture for a complete composer project.
#[derive(Debug)]
pub struct ProjectFixture {
    dir: TempDir,
    installed: Vec<serde_json::Value>,
}

impl ProjectFixture {
    /// Create a new empty project in a temporary directory.
    pub fn new() -> Self {
        ProjectFixture {
            dir: TempDir::new().expect("failed to create temp dir"),
            installed: Vec::new(),
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root.
    pub fn file(self, rel: &str, content: &str) -> Self {
        write_file(self.dir.path(), rel, content);
        self
    }

    /// Make the project itself a Jalno package.
    pub fn root_package(self, composer_name: &str, manifest: &str) -> Self {
        let composer = json!({
            "name": composer_name,
            "extra": { "jalno": { "manifest": manifest } },
        });
        self.file("composer.json", &composer.to_string())
    }

    /// Register an installed Jalno package and write its manifest.
    ///
    /// Call [`ProjectFixture::write_installed`] once all packages are added.
    pub fn installed_package(mut self, composer_name: &str, manifest: &str, content: &str) -> Self {
        self.installed.push(json!({
            "name": composer_name,
            "extra": { "jalno": { "manifest": manifest } },
        }));
        let rel = format!("vendor/{}/{}", composer_name, manifest);
        self.file(&rel, content)
    }

    /// Register an installed frontend `frontend` with theme `theme` and `assets`
    /// for the package `composer_name` (which must use [`PACKAGE_MANIFEST`]).
    pub fn installed_frontend(self, composer_name: &str, theme: &str, assets: serde_json::Value) -> Self {
        let manifest = json!({ "name": theme, "assets": assets });
        let rel = format!("vendor/{}/frontend/jalno.json", composer_name);
        self.file(&rel, &manifest.to_string())
    }

    /// Write `vendor/composer/installed.json` listing every registered package.
    pub fn write_installed(self) -> Self {
        let installed = json!({ "packages": self.installed.clone() });
        self.file("vendor/composer/installed.json", &installed.to_string())
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
