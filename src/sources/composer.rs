//! Composer source - packages installed by composer.
//!
//! The root package comes from `<root>/composer.json`, installed packages from
//! `<root>/vendor/composer/installed.json`. Either is a Jalno package when its
//! `extra.jalno.manifest` points at a manifest file.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;

use crate::core::error::LoadError;
use crate::core::Package;
use crate::sources::PackageSource;

/// Root descriptor file name.
pub const COMPOSER_FILE: &str = "composer.json";

/// Directory composer installs packages into.
pub const VENDOR_DIR: &str = "vendor";

/// An `installed.json` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ComposerPackage {
    pub name: String,
    #[serde(default)]
    pub extra: Option<ComposerExtra>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposerExtra {
    #[serde(default)]
    pub jalno: Option<JalnoExtra>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JalnoExtra {
    #[serde(default)]
    pub manifest: Option<String>,
}

/// The root `composer.json`. Composer does not require a root `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct RootComposer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub extra: Option<ComposerExtra>,
}

impl ComposerExtra {
    fn jalno_manifest(&self) -> Option<&str> {
        self.jalno.as_ref().and_then(|j| j.manifest.as_deref())
    }
}

impl ComposerPackage {
    /// Manifest path relative to the package directory, if this is a Jalno package.
    pub fn jalno_manifest(&self) -> Option<&str> {
        self.extra.as_ref().and_then(ComposerExtra::jalno_manifest)
    }
}

impl RootComposer {
    pub fn jalno_manifest(&self) -> Option<&str> {
        self.extra.as_ref().and_then(ComposerExtra::jalno_manifest)
    }
}

/// `installed.json` in either the composer 2 or the composer 1 layout.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstalledFile {
    V2 { packages: Vec<ComposerPackage> },
    V1(Vec<ComposerPackage>),
}

impl InstalledFile {
    fn into_packages(self) -> Vec<ComposerPackage> {
        match self {
            InstalledFile::V2 { packages } => packages,
            InstalledFile::V1(packages) => packages,
        }
    }
}

/// Jalno package name for a composer name: the vendor prefix is removed.
pub fn package_name_from_composer(composer_name: &str) -> &str {
    match composer_name.find('/') {
        Some(idx) => &composer_name[idx + 1..],
        None => composer_name,
    }
}

/// Bridge to a composer-managed project.
#[derive(Debug, Clone)]
pub struct ComposerSource {
    root: PathBuf,
}

impl ComposerSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ComposerSource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the root descriptor.
    pub fn composer_file(&self) -> PathBuf {
        self.root.join(COMPOSER_FILE)
    }

    /// Path of the installed packages descriptor.
    pub fn installed_file(&self) -> PathBuf {
        self.root
            .join(VENDOR_DIR)
            .join("composer")
            .join("installed.json")
    }

    fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| LoadError::parse(path, e))
    }
}

impl PackageSource for ComposerSource {
    fn name(&self) -> &str {
        "composer"
    }

    fn root_package(&self) -> Result<Option<Package>, LoadError> {
        let composer_file = self.composer_file();
        if !composer_file.is_file() {
            tracing::warn!("composer.json does not exist in: {}", composer_file.display());
            return Ok(None);
        }

        let composer: RootComposer = Self::read_json(&composer_file)?;
        let Some(manifest) = composer.jalno_manifest() else {
            tracing::debug!("root package is not a jalno package");
            return Ok(None);
        };

        let composer_name = composer.name.as_deref().ok_or_else(|| {
            LoadError::parse(&composer_file, "jalno root package has no `name`")
        })?;
        let name = package_name_from_composer(composer_name);
        Package::load(name, &self.root.join(manifest)).map(Some)
    }

    fn installed_packages(&self) -> Result<Vec<Package>, LoadError> {
        let installed_file = self.installed_file();
        if !installed_file.is_file() {
            tracing::error!(
                "installed.json does not exist in: {} (install composer packages using `composer install`)",
                installed_file.display()
            );
            return Err(LoadError::InstalledMissing {
                path: installed_file,
            });
        }

        let installed: InstalledFile = Self::read_json(&installed_file)?;

        let targets: Vec<(String, PathBuf)> = installed
            .into_packages()
            .into_iter()
            .filter_map(|pkg| {
                let manifest = pkg.jalno_manifest()?;
                let manifest_path = self.root.join(VENDOR_DIR).join(&pkg.name).join(manifest);
                Some((package_name_from_composer(&pkg.name).to_string(), manifest_path))
            })
            .collect();

        tracing::debug!("Found {} installed jalno packages", targets.len());

        let results: Vec<Result<Package, LoadError>> = targets
            .par_iter()
            .map(|(name, manifest_path)| Package::load(name, manifest_path))
            .collect();

        results.into_iter().collect()
    }
}
