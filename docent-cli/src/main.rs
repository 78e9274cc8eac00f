//! Docent CLI - Command-line interface
//!
//! Runs the museum guide server and inspects the exhibit catalog.

mod commands;

use clap::Parser;
use docent_core::DocentError;
use docent_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "docent")]
#[command(about = "QR-driven museum video guide")]
struct Cli {
    /// Console log level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value_t = CliLogLevel::Info, global = true)]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_tracing_level(), None)?;

    let result = commands::handle_command(cli.command).await;
    if let Err(e) = &result {
        tracing::error!("Command failed: {e:#}");
        if let Some(docent) = e.downcast_ref::<DocentError>() {
            eprintln!("{}", docent.user_message());
        }
    }
    result
}
