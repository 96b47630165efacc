//! Package registry - the directory of every discovered package.
//!
//! The registry is loaded once from a [`PackageSource`] and then read by any
//! number of aggregation passes. Package names are unique across the root
//! package and all installed packages.

use std::collections::HashMap;

use crate::core::error::LoadError;
use crate::core::{Frontend, Package};
use crate::sources::PackageSource;

/// Load state of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded yet.
    Empty,
    /// Packages are loaded and can be read.
    Loaded,
    /// The last load failed; only a forced reload recovers.
    Failed,
}

/// Registry of packages, keyed by name in discovery order.
pub struct PackageRegistry {
    source: Box<dyn PackageSource>,
    packages: Vec<Package>,
    index: HashMap<String, usize>,
    state: LoadState,
}

impl PackageRegistry {
    /// Create an empty registry backed by `source`.
    pub fn new(source: Box<dyn PackageSource>) -> Self {
        PackageRegistry {
            source,
            packages: Vec::new(),
            index: HashMap::new(),
            state: LoadState::Empty,
        }
    }

    /// Load packages from the source.
    ///
    /// A no-op once loaded, unless `force_reload` is set, in which case the
    /// registry is cleared first. Any failure leaves the registry in the
    /// [`LoadState::Failed`] state.
    pub fn load(&mut self, force_reload: bool) -> Result<(), LoadError> {
        match (self.state, force_reload) {
            (LoadState::Loaded, false) => return Ok(()),
            (LoadState::Failed, false) => return Err(LoadError::RegistryInvalid),
            _ => {}
        }

        self.packages.clear();
        self.index.clear();

        match self.load_from_source() {
            Ok(()) => {
                self.state = LoadState::Loaded;
                tracing::debug!(
                    "Loaded {} packages from {}",
                    self.packages.len(),
                    self.source.name()
                );
                Ok(())
            }
            Err(e) => {
                self.state = LoadState::Failed;
                Err(e)
            }
        }
    }

    fn load_from_source(&mut self) -> Result<(), LoadError> {
        if let Some(root) = self.source.root_package()? {
            self.insert(root)?;
        }

        for package in self.source.installed_packages()? {
            self.insert(package)?;
        }

        Ok(())
    }

    fn insert(&mut self, package: Package) -> Result<(), LoadError> {
        if self.index.contains_key(package.name()) {
            tracing::error!(
                "Duplicate package name '{}' (manifest: {})",
                package.name(),
                package.manifest_path().display()
            );
            return Err(LoadError::DuplicatePackage {
                name: package.name().to_string(),
                manifest: package.manifest_path().to_path_buf(),
            });
        }

        self.index.insert(package.name().to_string(), self.packages.len());
        self.packages.push(package);
        Ok(())
    }

    /// Ensure the registry is loaded and return every package.
    pub fn all(&mut self, force_reload: bool) -> Result<&[Package], LoadError> {
        self.load(force_reload)?;
        Ok(&self.packages)
    }

    /// Read-only snapshot of a loaded registry.
    ///
    /// Fails if [`PackageRegistry::load`] has not succeeded.
    pub fn packages(&self) -> Result<&[Package], LoadError> {
        match self.state {
            LoadState::Loaded => Ok(&self.packages),
            _ => Err(LoadError::RegistryInvalid),
        }
    }

    /// Every frontend of every package, package by package.
    pub fn frontends(&self) -> Result<Vec<&Frontend>, LoadError> {
        Ok(self
            .packages()?
            .iter()
            .flat_map(|p| p.frontends())
            .collect())
    }

    /// Find a package by name.
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.index.get(name).map(|&idx| &self.packages[idx])
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }
}

impl std::fmt::Debug for PackageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageRegistry")
            .field("source", &self.source.name())
            .field("packages", &self.packages.len())
            .field("state", &self.state)
            .finish()
    }
}
