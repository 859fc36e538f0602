//! Expert Manager CLI - inventory and repair IDE expert registrations
//!
//! This is the main entry point for the expertmgr command-line interface.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let store = cli.store.as_deref();
    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Tree(args) => commands::tree::run(args, store),
        Commands::Validate(args) => commands::validate::run(args, store),
        Commands::List(args) => commands::list::run(args, store),
        Commands::Macros(args) => commands::macros::run(args, store),
        Commands::Select(args) => commands::view::select(args, store),
        Commands::Expand(args) => commands::view::set_expanded(args, store, true),
        Commands::Collapse(args) => commands::view::set_expanded(args, store, false),
        Commands::Add(args) => commands::entry::add(args, store),
        Commands::Edit(args) => commands::entry::edit(args, store),
        Commands::Remove(args) => commands::entry::remove(args, store),
        Commands::Enable(args) => commands::entry::set_enabled(args, store, true),
        Commands::Disable(args) => commands::entry::set_enabled(args, store, false),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout carries command output only
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
