//! Package - an installed unit with frontends and translations.
//!
//! A Package is loaded from its `jalno` manifest; frontend directories listed
//! in the manifest and the sibling `langs` directory are loaded in parallel.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;

use crate::core::error::LoadError;
use crate::core::frontend::Frontend;
use crate::core::language_file::{load_languages_dir, LanguageFile, LANGS_DIR};
use crate::util::fs::join_clean;

/// The `frontend` field: a single directory or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FrontendDirs {
    One(String),
    Many(Vec<String>),
}

impl Default for FrontendDirs {
    fn default() -> Self {
        FrontendDirs::Many(Vec::new())
    }
}

impl FrontendDirs {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            FrontendDirs::One(dir) => vec![dir],
            FrontendDirs::Many(dirs) => dirs,
        }
    }
}

/// Package manifest as it appears on disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Frontend directories relative to the manifest.
    #[serde(default)]
    pub frontend: FrontendDirs,

    /// Superseded by the `langs` directory.
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,
}

impl PackageManifest {
    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, LoadError> {
        serde_json::from_str(content).map_err(|e| LoadError::parse(path, e))
    }
}

/// A loaded package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    home: PathBuf,
    name: String,
    manifest_path: PathBuf,
    frontends: Vec<Frontend>,
    languages: Vec<LanguageFile>,
}

impl Package {
    pub fn new(
        home: PathBuf,
        name: impl Into<String>,
        manifest_path: PathBuf,
        frontends: Vec<Frontend>,
        languages: Vec<LanguageFile>,
    ) -> Self {
        Package {
            home,
            name: name.into(),
            manifest_path,
            frontends,
            languages,
        }
    }

    /// Load a package from its manifest file.
    pub fn load(name: &str, manifest_path: &Path) -> Result<Self, LoadError> {
        if !manifest_path.is_file() {
            tracing::error!(
                "manifest of package '{}' does not exist: {}",
                name,
                manifest_path.display()
            );
            return Err(LoadError::NotFound {
                path: manifest_path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(manifest_path)
            .map_err(|e| LoadError::io(manifest_path, e))?;
        let manifest = PackageManifest::parse(&content, manifest_path)?;

        let home = manifest_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();

        let homes: Vec<PathBuf> = manifest
            .frontend
            .into_vec()
            .iter()
            .map(|dir| join_clean(&home, dir))
            .collect();

        let (frontends, languages) = rayon::join(
            || {
                let results: Vec<Result<Frontend, LoadError>> = homes
                    .par_iter()
                    .map(|frontend_home| Frontend::load(name, frontend_home))
                    .collect();
                results.into_iter().collect::<Result<Vec<_>, _>>()
            },
            || load_languages_dir(&home.join(LANGS_DIR)),
        );
        let frontends = frontends?;
        let languages = languages?;

        tracing::debug!(
            "Loaded package '{}' with {} frontends from {}",
            name,
            frontends.len(),
            manifest_path.display()
        );

        Ok(Package::new(
            home,
            name,
            manifest_path.to_path_buf(),
            frontends,
            languages,
        ))
    }

    /// The package directory (where its manifest lives).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Unique package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn frontends(&self) -> &[Frontend] {
        &self.frontends
    }

    pub fn languages(&self) -> &[LanguageFile] {
        &self.languages
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_file;
    use tempfile::TempDir;

    fn create_test_package(dir: &Path) -> PathBuf {
        write_file(dir, "package.json", r#"{"frontend": ["frontend", "./admin/"]}"#);
        write_file(dir, "frontend/jalno.json", r#"{"name": "default"}"#);
        write_file(dir, "admin/theme.json", r#"{"name": "admin"}"#);
        write_file(dir, "langs/en.json", r#"{"hello": "Hello"}"#);
        dir.join("package.json")
    }

    #[test]
    fn test_package_load() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_package(tmp.path());

        let pkg = Package::load("blog", &manifest_path).unwrap();
        assert_eq!(pkg.name(), "blog");
        assert_eq!(pkg.home(), tmp.path());
        assert_eq!(pkg.languages().len(), 1);

        let names: Vec<_> = pkg.frontends().iter().map(|f| f.npm_like_name()).collect();
        assert_eq!(names, vec!["jalno-blog-frontend", "jalno-blog-admin"]);
    }

    #[test]
    fn test_package_load_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_package(tmp.path());

        let first = Package::load("blog", &manifest_path).unwrap();
        let second = Package::load("blog", &manifest_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_frontend_string() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "package.json", r#"{"frontend": "frontend"}"#);
        write_file(tmp.path(), "frontend/jalno.json", r#"{"name": "default"}"#);

        let pkg = Package::load("blog", &tmp.path().join("package.json")).unwrap();
        assert_eq!(pkg.frontends().len(), 1);
    }

    #[test]
    fn test_no_frontends() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "package.json", "{}");

        let pkg = Package::load("blog", &tmp.path().join("package.json")).unwrap();
        assert!(pkg.frontends().is_empty());
        assert!(pkg.languages().is_empty());
    }

    #[test]
    fn test_failing_frontend_fails_package() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "package.json", r#"{"frontend": ["good", "missing"]}"#);
        write_file(tmp.path(), "good/jalno.json", r#"{"name": "default"}"#);

        let result = Package::load("blog", &tmp.path().join("package.json"));
        assert!(matches!(result, Err(LoadError::ManifestMissing { .. })));
    }

    #[test]
    fn test_missing_manifest() {
        let tmp = TempDir::new().unwrap();
        let result = Package::load("blog", &tmp.path().join("package.json"));
        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }
}
