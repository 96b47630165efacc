//! Frontend - a themeable sub-unit of a package.
//!
//! Frontends sharing a `name` across packages form one theme. Each frontend
//! is assembled by a [`FrontendBuilder`] while its manifest and language
//! files load, then frozen into an immutable [`Frontend`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::asset::{Asset, AssetType};
use crate::core::error::LoadError;
use crate::core::language_file::{load_languages_dir, LanguageFile, LANGS_DIR};
use crate::util::diagnostic::warn_once;

/// Canonical frontend manifest file name.
pub const FRONTEND_MANIFEST_NAME: &str = "jalno.json";

/// Deprecated frontend manifest file name, still accepted.
pub const FRONTEND_MANIFEST_ALIAS: &str = "theme.json";

/// Prefix of the package-like name frontends get in generated paths.
pub const FRONTEND_NAMESPACE: &str = "jalno";

/// Frontend manifest as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendManifest {
    /// Theme name; frontends are grouped by it.
    pub name: String,

    /// Human readable title.
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub assets: Vec<Asset>,

    /// Superseded by the `langs` directory.
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,
}

/// Find the manifest of a frontend directory, preferring `jalno.json`.
pub fn find_frontend_manifest(home: &Path, package: &str) -> Result<PathBuf, LoadError> {
    let primary = home.join(FRONTEND_MANIFEST_NAME);
    if primary.is_file() {
        return Ok(primary);
    }

    let alias = home.join(FRONTEND_MANIFEST_ALIAS);
    if alias.is_file() {
        warn_once(
            alias.to_string_lossy(),
            format_args!(
                "Using '{}' as frontend manifest is deprecated, use '{}' instead [{}]",
                FRONTEND_MANIFEST_ALIAS,
                FRONTEND_MANIFEST_NAME,
                alias.display()
            ),
        );
        return Ok(alias);
    }

    tracing::error!(
        "Can not find neither '{}' nor '{}' in '{}' for the '{}' package",
        FRONTEND_MANIFEST_NAME,
        FRONTEND_MANIFEST_ALIAS,
        home.display(),
        package
    );
    Err(LoadError::ManifestMissing {
        home: home.to_path_buf(),
        package: package.to_string(),
    })
}

/// Collects the parts of a frontend while they load.
#[derive(Debug)]
pub struct FrontendBuilder {
    home: PathBuf,
    name: String,
    manifest_path: PathBuf,
    package_name: String,
    assets: Vec<Asset>,
    languages: Vec<LanguageFile>,
}

impl FrontendBuilder {
    pub fn new(
        home: impl Into<PathBuf>,
        name: impl Into<String>,
        manifest_path: impl Into<PathBuf>,
        package_name: impl Into<String>,
    ) -> Self {
        FrontendBuilder {
            home: home.into(),
            name: name.into(),
            manifest_path: manifest_path.into(),
            package_name: package_name.into(),
            assets: Vec::new(),
            languages: Vec::new(),
        }
    }

    pub fn assets(mut self, assets: Vec<Asset>) -> Self {
        self.assets = assets;
        self
    }

    pub fn languages(mut self, languages: Vec<LanguageFile>) -> Self {
        self.languages = languages;
        self
    }

    /// Freeze the frontend. This is the only place its assets and
    /// languages are ever set.
    pub fn build(self) -> Frontend {
        Frontend {
            home: self.home,
            name: self.name,
            manifest_path: self.manifest_path,
            package_name: self.package_name,
            assets: self.assets,
            languages: self.languages,
        }
    }
}

/// An immutable, fully loaded frontend.
///
/// Assets can not be replaced once the frontend is built:
///
/// ```compile_fail
/// # use jalno::core::frontend::FrontendBuilder;
/// let mut frontend = FrontendBuilder::new("/p/front", "default", "/p/front/jalno.json", "p").build();
/// frontend.assets = Vec::new();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontend {
    home: PathBuf,
    name: String,
    manifest_path: PathBuf,
    package_name: String,
    assets: Vec<Asset>,
    languages: Vec<LanguageFile>,
}

impl Frontend {
    /// Load the frontend living in `home` for the package `package_name`.
    pub fn load(package_name: &str, home: &Path) -> Result<Self, LoadError> {
        let manifest_path = find_frontend_manifest(home, package_name)?;

        let content = std::fs::read_to_string(&manifest_path)
            .map_err(|e| LoadError::io(&manifest_path, e))?;
        let manifest: FrontendManifest =
            serde_json::from_str(&content).map_err(|e| LoadError::parse(&manifest_path, e))?;

        let languages = load_languages_dir(&home.join(LANGS_DIR))?;

        tracing::debug!(
            "Loaded frontend '{}' of '{}' with {} assets and {} languages",
            manifest.name,
            package_name,
            manifest.assets.len(),
            languages.len()
        );

        Ok(
            FrontendBuilder::new(home, manifest.name, manifest_path, package_name)
                .assets(manifest.assets)
                .languages(languages)
                .build(),
        )
    }

    /// The frontend directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The theme name this frontend belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Name of the package owning this frontend.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn languages(&self) -> &[LanguageFile] {
        &self.languages
    }

    /// Filter assets in declaration order.
    ///
    /// `types = None` keeps every type; `has_file = None` ignores whether an
    /// asset points to a file, `Some(b)` keeps assets whose file presence is `b`.
    pub fn assets_by_type(&self, types: Option<&[AssetType]>, has_file: Option<bool>) -> Vec<&Asset> {
        self.assets
            .iter()
            .filter(|asset| types.map_or(true, |types| types.contains(&asset.asset_type())))
            .filter(|asset| has_file.map_or(true, |has_file| asset.has_file() == has_file))
            .collect()
    }

    /// Package-like name used to namespace this frontend's files, e.g.
    /// `jalno-blog-frontend`.
    pub fn npm_like_name(&self) -> String {
        let dir = self
            .home
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}-{}-{}", FRONTEND_NAMESPACE, self.package_name, dir)
    }
}

impl std::fmt::Display for Frontend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.npm_like_name(), self.name)
    }
}
