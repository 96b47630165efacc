//! `jalno generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use jalno::ops::auto_install::auto_install;
use jalno::ops::{generate, BundlerInput};
use jalno::util::fs::{relative_path, to_slash};
use jalno::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: GenerateArgs) -> Result<()> {
    let mode = args.mode()?;

    // Load configuration (global + project), then apply CLI flags
    let mut config = ctx.config()?;
    args.overrides.apply(&mut config);
    let config = config.resolve(ctx.root())?;

    let mut registry = super::registry(ctx);
    let generated = generate(&mut registry, &config)?;

    if args.install || config.install.enabled {
        auto_install(registry.packages()?, &config.install, ctx.root())?;
    }

    if args.json {
        let input = BundlerInput::new(&config, mode, &args.input, &generated);
        println!("{}", input.to_json()?);
    } else {
        for path in generated.entry_points() {
            println!("{}", to_slash(&relative_path(ctx.root(), path)));
        }
    }

    Ok(())
}
