//! `jalno install` command

use anyhow::Result;

use crate::cli::InstallArgs;
use jalno::ops::auto_install::{npm_install, resolve_packages};
use jalno::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: InstallArgs) -> Result<()> {
    let mut config = ctx.config()?;
    if args.npm_binary.is_some() {
        config.install.npm_binary = args.npm_binary;
    }
    if args.npm_log_level.is_some() {
        config.install.npm_log_level = args.npm_log_level;
    }
    let config = config.resolve(ctx.root())?;

    let mut registry = super::registry(ctx);
    let packages = resolve_packages(registry.all(false)?, ctx.root())?;

    if args.dry_run {
        for package in &packages {
            println!("{}", package);
        }
        return Ok(());
    }

    npm_install(&packages, &config.install, ctx.root())?;

    eprintln!("    Installed {} frontend packages", packages.len());

    Ok(())
}
