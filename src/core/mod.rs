//! Core data structures for Jalno.
//!
//! This module contains the foundational types used throughout Jalno:
//! - Typed frontend assets and language files
//! - Frontends and the packages owning them
//! - The package registry

pub mod asset;
pub mod error;
pub mod frontend;
pub mod language_file;
pub mod package;
pub mod registry;

pub use asset::{Asset, AssetType, ScriptType, StyleType};
pub use error::LoadError;
pub use frontend::{
    Frontend, FrontendBuilder, FRONTEND_MANIFEST_ALIAS, FRONTEND_MANIFEST_NAME,
};
pub use language_file::{LanguageFile, LanguageFileFormat};
pub use package::{Package, PackageManifest};
pub use registry::{LoadState, PackageRegistry};
