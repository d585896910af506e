//! The ask command: run the pipeline and stream the answer.

use crate::cli::AskArgs;
use crate::config::CliConfig;
use crate::output;
use dossier_orchestrator::{Orchestrator, Progress, ProgressEvent};
use dossier_domain::RunMode;
use tokio::sync::mpsc::unbounded_channel;

/// Run the pipeline for one question and print the streamed answer.
pub async fn execute_ask(
    args: AskArgs,
    orchestrator: Orchestrator,
) -> anyhow::Result<()> {
    let mode = if args.verify {
        RunMode::Verified
    } else {
        RunMode::Normal
    };

    let (tx, mut rx) = unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ProgressEvent::Planning => output::print_phase("planning"),
                ProgressEvent::Searching => output::print_phase("searching"),
                ProgressEvent::Drafting => output::print_phase("drafting"),
                ProgressEvent::Verifying => output::print_phase("verifying"),
                ProgressEvent::AnswerChunk(chunk) => output::print_chunk(&chunk),
                ProgressEvent::Done => println!(),
                // Started carries no information here; a terminal error is
                // reported through the run result.
                ProgressEvent::Started
                | ProgressEvent::Claims(_)
                | ProgressEvent::Error(_) => {}
            }
        }
    });

    let result = orchestrator
        .run(&args.question, mode, Progress::new(tx))
        .await;
    // The sender is dropped once the run returns, closing the printer loop.
    printer.await?;

    let artifact = result?;
    output::print_sources(&artifact.sources);
    if !artifact.claims.is_empty() {
        output::print_claims(&artifact.claims);
    }
    if args.trace {
        output::print_trace(&artifact.trace)?;
    }
    Ok(())
}

/// Build the `CliConfig` for this invocation.
pub fn resolve_config(args: &AskArgs, path: Option<&std::path::Path>) -> anyhow::Result<CliConfig> {
    let mut config = CliConfig::load(path)?;
    config.apply_overrides(args);
    Ok(config)
}
