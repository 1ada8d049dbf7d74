//! Command line interface built on clap.
//!
//! [`Cli`] carries the subcommands ([`Command`]: demo, upload, chat) and the
//! global flags (--config, --realtime, --json, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// MarketMaestro: a simulated financial-document assistant.
#[derive(Debug, Parser)]
#[command(name = "marketmaestro", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a marketmaestro.toml file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Wait out simulated delays on the wall clock instead of skipping them.
    #[arg(long, global = true, default_value_t = false)]
    pub realtime: bool,

    /// Print the summary report as JSON.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the built-in walkthrough: login, upload, summarize, chat.
    Demo,

    /// Upload local files and summarize them.
    Upload {
        /// Files to upload (at most five per session).
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Ask the assistant a question.
    Chat {
        /// The question. Omit to use a suggested query, which is only
        /// offered after a summary has been closed.
        query: Option<String>,

        /// Index of the suggested query to send when no question is given.
        #[arg(long, default_value_t = 0)]
        suggestion: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_upload_subcommand() {
        let cli = Cli::parse_from(["marketmaestro", "upload", "a.pdf", "b.txt"]);
        match cli.command {
            Command::Upload { paths } => {
                assert_eq!(paths, vec![PathBuf::from("a.pdf"), PathBuf::from("b.txt")]);
            }
            _ => panic!("expected Upload command"),
        }
    }

    #[test]
    fn upload_requires_a_path() {
        assert!(Cli::try_parse_from(["marketmaestro", "upload"]).is_err());
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "marketmaestro",
            "--config",
            "custom.toml",
            "--realtime",
            "--json",
            "--verbose",
            "demo",
        ]);
        assert!(cli.verbose);
        assert!(cli.realtime);
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Command::Demo));
    }

    #[test]
    fn cli_parses_chat_with_suggestion() {
        let cli = Cli::parse_from(["marketmaestro", "chat", "--suggestion", "3"]);
        match cli.command {
            Command::Chat { query, suggestion } => {
                assert!(query.is_none());
                assert_eq!(suggestion, 3);
            }
            _ => panic!("expected Chat command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
