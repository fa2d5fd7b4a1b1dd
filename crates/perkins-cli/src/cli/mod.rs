//! CLI command definitions and dispatch for the `perkins` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod init;
pub mod models;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// AI coding assistant CLI.
#[derive(Parser)]
#[command(name = "perkins", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize Perkins: pick providers, store API keys, enable models.
    Init,

    /// Start an interactive chat session with Perkins.
    Chat {
        /// Model to use (skips the model-selection prompt).
        #[arg(short, long)]
        model: Option<String>,

        /// Continue a named session; omitted means the history is not saved.
        #[arg(short, long)]
        session: Option<String>,
    },

    /// List and manage AI models.
    Models {
        /// Add a model.
        #[arg(short, long)]
        add: bool,

        /// Delete a model.
        #[arg(short, long)]
        delete: bool,

        /// Set the default model.
        #[arg(short = 's', long)]
        set_default: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
