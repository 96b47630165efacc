//! Jalno CLI - package and frontend discovery for Jalno projects

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use jalno::core::LoadError;
use jalno::util::diagnostic;

fn main() {
    // Parse CLI
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<LoadError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("jalno=debug")
    } else {
        EnvFilter::new("jalno=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .init();

    let ctx = jalno::GlobalContext::with_root(cli.root)?;

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(&ctx, args),
        Commands::Install(args) => commands::install::execute(&ctx, args),
        Commands::List(args) => commands::list::execute(&ctx, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
