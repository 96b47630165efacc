//! Source trait - common interface for dependency-manager bridges.

use crate::core::error::LoadError;
use crate::core::Package;

/// A source of Jalno packages.
///
/// The registry asks a source for the project's own package and for the
/// installed ones, in that order, exactly once per load.
pub trait PackageSource: Send + Sync {
    /// Get the source name for display.
    fn name(&self) -> &str;

    /// The project itself, if it is a Jalno package.
    fn root_package(&self) -> Result<Option<Package>, LoadError>;

    /// Installed Jalno packages, in the dependency manager's listing order.
    fn installed_packages(&self) -> Result<Vec<Package>, LoadError>;
}
