pub mod completions;
pub mod generate;
pub mod install;
pub mod list;

use jalno::core::PackageRegistry;
use jalno::sources::ComposerSource;
use jalno::util::GlobalContext;

/// Registry over the composer project at the context root.
pub fn registry(ctx: &GlobalContext) -> PackageRegistry {
    PackageRegistry::new(Box::new(ComposerSource::new(ctx.root())))
}
