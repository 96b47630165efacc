//! Test utilities for Jalno unit tests.
//!
//! Provides helpers to lay out temporary composer projects with package
//! manifests, frontends and language files.
//!
//! # Example
//!
//! ```rust,ignore
//! use jalno::test_support::{ProjectFixture, PACKAGE_MANIFEST};
//!
//! let project = ProjectFixture::new()
//!     .installed_package("acme/blog", "package.json", PACKAGE_MANIFEST)
//!     .installed_frontend("acme/blog", "default", serde_json::json!([]))
//!     .write_installed();
//! ```

pub mod fixtures;

use std::path::Path;

pub use fixtures::*;

/// Write `content` to `dir/rel`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create fixture directory");
    }
    std::fs::write(&path, content).expect("failed to write fixture file");
}
