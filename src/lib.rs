//! Jalno - package and frontend discovery for Jalno projects
//!
//! This crate discovers the packages of a composer-managed Jalno project,
//! loads their frontends and translations, and generates the per-theme
//! stylesheets, scripts and translation bundles a frontend bundler consumes.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities for Jalno unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It lays out temporary composer projects.
#[cfg(test)]
pub mod test_support;

pub use core::{
    asset::Asset, frontend::Frontend, language_file::LanguageFile, package::Package,
    registry::PackageRegistry,
};

pub use sources::ComposerSource;
pub use util::context::GlobalContext;
