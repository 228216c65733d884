//! boostpkg CLI - fetch, build and package Boost

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("boostpkg=debug")
    } else {
        EnvFilter::new("boostpkg=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Libs(args) => commands::libs::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Source(args) => commands::source::execute(args),
        Commands::Build(args) => commands::build::execute(args),
        Commands::Package(args) => commands::package::execute(args),
        Commands::Create(args) => commands::create::execute(args),
        Commands::Test(args) => commands::test::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
