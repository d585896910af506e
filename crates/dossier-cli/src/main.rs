//! Dossier - research a question and stream a cited answer.

use clap::Parser;
use dossier_cli::{build_orchestrator, commands, Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ask(args) => {
            let config = commands::resolve_config(&args, cli.config.as_deref())?;
            let orchestrator = build_orchestrator(&config)?;
            commands::execute_ask(args, orchestrator).await
        }
    }
}
