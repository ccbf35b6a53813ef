//! Sommelier CLI - wine recommendations grounded in a shop's inventory sheet.

use clap::Parser;
use sommelier_cli::commands;
use sommelier_cli::repl;
use sommelier_cli::{Cli, Command, Session};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. RUST_LOG wins over `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> sommelier_cli::Result<()> {
    let session = Session::from_cli(&cli)?;

    match cli.command {
        None | Some(Command::Repl) => repl::run_repl(&session)?,
        Some(Command::Recommend(args)) => commands::execute_recommend(args, &session)?,
        Some(Command::Candidates(args)) => commands::execute_candidates(args, &session)?,
        Some(Command::Inventory(args)) => commands::execute_inventory(args, &session)?,
        Some(Command::Config(args)) => commands::execute_config(args, &session)?,
    }

    Ok(())
}
