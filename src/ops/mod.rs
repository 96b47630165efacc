//! High-level operations.
//!
//! This module contains the implementation of Jalno commands.

pub mod auto_install;
pub mod bundler;
pub mod compile;
pub mod generate;
pub mod translations;

pub use auto_install::{auto_install, npm_install, resolve_packages};
pub use bundler::{BuildMode, BundlerInput};
pub use compile::{compiled_outputs, resolve_assets_by_type, AssetPass, FrontendAssets, ThemeAssets};
pub use generate::{generate, generate_from_packages, GeneratedFiles};
pub use translations::{collect_translations, translation_outputs, LanguageBundle, TranslationItem};
