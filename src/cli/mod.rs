//! CLI module for Hark.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Hark - Audio Question Answering
///
/// Transcribe an audio recording, index it semantically, and ask questions
/// about its content. Remote inference is used when configured, with
/// deterministic fallback to local models.
#[derive(Parser, Debug)]
#[command(name = "hark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Transcribe a local audio file and print the transcript
    Transcribe {
        /// Path to the audio file
        input: String,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Transcribe an audio file and answer a question about it
    Ask {
        /// Path to the audio file
        input: String,

        /// The question to ask
        question: String,

        /// Number of transcript chunks to retrieve as context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Store the remote API key in the configuration file
    SetKey {
        /// The API key to store
        api_key: String,
    },
}
