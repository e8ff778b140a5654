//! sqlnode CLI
//!
//! Prints the syntax tree of SQL statements.

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sqlnode_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output = sqlnode_cli::run(&cli)?;
    print!("{output}");
    Ok(())
}
