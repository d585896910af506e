//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dossier - answer questions from cited web evidence.
#[derive(Debug, Parser)]
#[command(name = "dossier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Research a question and stream the answer
    Ask(AskArgs),
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// The question to research
    pub question: String,

    /// Fact-check the answer and rewrite it against the evidence
    #[arg(long)]
    pub verify: bool,

    /// Print the retrieval trace after the answer
    #[arg(long)]
    pub trace: bool,

    /// Ollama endpoint
    #[arg(long, env = "DOSSIER_OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Model name
    #[arg(long, env = "DOSSIER_MODEL")]
    pub model: Option<String>,

    /// Search API endpoint
    #[arg(long, env = "DOSSIER_SEARCH_URL")]
    pub search_url: Option<String>,

    /// Search API key
    #[arg(long, env = "DOSSIER_SEARCH_API_KEY")]
    pub search_api_key: Option<String>,

    /// SQLite cache path (in-memory cache when omitted)
    #[arg(long, env = "DOSSIER_CACHE_PATH")]
    pub cache_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["dossier", "ask", "what is rust", "--verify", "--trace"])
            .unwrap();
        let Command::Ask(args) = cli.command;
        assert_eq!(args.question, "what is rust");
        assert!(args.verify);
        assert!(args.trace);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "dossier",
            "ask",
            "q",
            "--model",
            "mistral",
            "--cache-path",
            "/tmp/dossier.db",
        ])
        .unwrap();
        let Command::Ask(args) = cli.command;
        assert_eq!(args.model.as_deref(), Some("mistral"));
        assert_eq!(args.cache_path, Some(PathBuf::from("/tmp/dossier.db")));
    }

    #[test]
    fn test_question_is_required() {
        assert!(Cli::try_parse_from(["dossier", "ask"]).is_err());
    }
}
