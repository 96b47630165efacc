//! Load error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while discovering packages, frontends or language files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("can not process {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "can not find neither 'jalno.json' nor 'theme.json' in '{}' for the '{package}' package",
        home.display()
    )]
    ManifestMissing { home: PathBuf, package: String },

    #[error("duplicate package name '{name}' (manifest: {})", manifest.display())]
    DuplicatePackage { name: String, manifest: PathBuf },

    #[error("installed.json does not exist in: {}", path.display())]
    InstalledMissing { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("package registry is invalid after a failed load")]
    RegistryInvalid,
}

impl LoadError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        LoadError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LoadError::NotFound { path } => {
                Diagnostic::error("expected file does not exist").with_location(path)
            }

            LoadError::Parse { path, message } => Diagnostic::error("can not process file")
                .with_location(path)
                .with_context(message.clone()),

            LoadError::ManifestMissing { home, package } => Diagnostic::error(format!(
                "frontend of package `{}` has no manifest",
                package
            ))
            .with_location(home)
            .with_context("looked for 'jalno.json' and the deprecated 'theme.json'")
            .with_suggestion(suggestions::FRONTEND_MANIFEST),

            LoadError::DuplicatePackage { name, manifest } => {
                Diagnostic::error(format!("duplicate package name `{}`", name))
                    .with_location(manifest)
                    .with_suggestion(suggestions::DUPLICATE_PACKAGE)
            }

            LoadError::InstalledMissing { path } => {
                Diagnostic::error("composer installed packages list not found")
                    .with_location(path)
                    .with_suggestion(suggestions::COMPOSER_INSTALL)
            }

            LoadError::Io { path, source } => Diagnostic::error("failed to read file")
                .with_location(path)
                .with_context(source.to_string()),

            LoadError::RegistryInvalid => {
                Diagnostic::error("package registry is invalid after a failed load")
                    .with_suggestion(suggestions::RELOAD_REGISTRY)
            }
        }
    }
}
