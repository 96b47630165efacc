//! Package sources.
//!
//! Sources bridge a dependency manager to the registry: they know where the
//! project's own package and the installed packages are declared.

pub mod composer;
pub mod source;

pub use composer::ComposerSource;
pub use source::PackageSource;
