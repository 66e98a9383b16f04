//! CLI for mfetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mfetch_core::config::{self, FetchConfig};

use commands::{run_check, run_fetch};

/// Top-level CLI for mfetch.
#[derive(Debug, Parser)]
#[command(name = "mfetch", version)]
#[command(about = "Fetch the U2Net ONNX model from its mirrors", long_about = None)]
pub struct Cli {
    /// Defaults to `fetch` when omitted.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Download the model unless a valid copy is already in place.
    Fetch {
        /// Overwrite a Git LFS placeholder without asking.
        #[arg(short, long)]
        yes: bool,
    },

    /// Report what is at the model path without downloading anything.
    Check,
}

impl Default for CliCommand {
    fn default() -> Self {
        CliCommand::Fetch { yes: false }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init().unwrap_or_else(|e| {
            tracing::warn!("could not load config, using defaults: {:#}", e);
            eprintln!("Warning: could not load config ({:#}); using defaults", e);
            FetchConfig::default()
        });
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command.unwrap_or_default() {
            CliCommand::Fetch { yes } => run_fetch(&cfg, yes)?,
            CliCommand::Check => run_check()?,
        }

        Ok(())
    }
}
