//! `jalno list` command

use anyhow::Result;

use crate::cli::ListArgs;
use jalno::core::{Asset, Package};
use jalno::util::fs::{relative_path, to_slash};
use jalno::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: ListArgs) -> Result<()> {
    let mut registry = super::registry(ctx);
    let packages = registry.all(false)?;

    if packages.is_empty() {
        eprintln!("No jalno packages found in {}", ctx.root().display());
        return Ok(());
    }

    for package in packages {
        print_package(ctx, package, args.assets);
    }

    Ok(())
}

fn print_package(ctx: &GlobalContext, package: &Package, show_assets: bool) {
    println!(
        "{} ({})",
        package.name(),
        to_slash(&relative_path(ctx.root(), package.manifest_path()))
    );

    let codes: Vec<&str> = package.languages().iter().map(|l| l.code()).collect();
    if !codes.is_empty() {
        println!("├── languages: {}", codes.join(", "));
    }

    for frontend in package.frontends() {
        println!(
            "├── {} [theme: {}, {} assets]",
            frontend.npm_like_name(),
            frontend.name(),
            frontend.assets().len()
        );

        let codes: Vec<&str> = frontend.languages().iter().map(|l| l.code()).collect();
        if !codes.is_empty() {
            println!("│   ├── languages: {}", codes.join(", "));
        }

        if show_assets {
            for asset in frontend.assets() {
                println!("│   ├── {}", describe_asset(asset));
            }
        }
    }
}

fn describe_asset(asset: &Asset) -> String {
    match asset {
        Asset::FileScript { file, .. } | Asset::FileStyle { file, .. } => {
            format!("{}: {}", asset.asset_type(), file)
        }
        Asset::InlineScript { code, .. } | Asset::InlineStyle { code, .. } => {
            format!("{}: inline ({} bytes)", asset.asset_type(), code.len())
        }
        Asset::PackageReference { name, version } => match version {
            Some(version) => format!("package: {}@{}", name, version),
            None => format!("package: {}", name),
        },
    }
}
