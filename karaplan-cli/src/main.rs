// karaplan-cli/src/main.rs
//
// Entry point for the karaplan command-line tool. Parses arguments,
// initializes logging, and dispatches to the subcommand implementations.

use clap::Parser;
use std::process;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan(args) => commands::run_plan(args),
        Commands::Probe(args) => commands::run_probe(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
