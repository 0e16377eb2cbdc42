//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Clause Guard - Check approved clauses in a document against their baselines
#[derive(Parser, Debug)]
#[command(name = "clause")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate every managed region of a document
    ///
    /// Examples:
    ///   clause validate contract.json
    ///   clause validate contract.json --write
    ///   clause validate contract.json --config clause.toml --json
    Validate {
        /// Document JSON file
        document: PathBuf,

        /// Configuration file (defaults to ./clause.toml when present)
        #[arg(short, long, env = "CLAUSE_CONFIG")]
        config: Option<PathBuf>,

        /// Write the highlighted document back to the file
        #[arg(long)]
        write: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clear every highlight in a document
    Reset {
        /// Document JSON file
        document: PathBuf,
    },

    /// Print the fingerprint of a text file's normalized content
    Fingerprint {
        /// Text file holding the clause body
        file: PathBuf,
    },

    /// Decode a region tag
    Inspect {
        /// Raw tag string
        tag: String,
    },

    /// Print the tag an insertion of a catalog clause would carry
    Tag {
        /// Clause id
        clause_id: String,

        /// Clause index JSON
        #[arg(short, long)]
        index: PathBuf,

        /// Clause baseline metadata JSON
        #[arg(short, long)]
        baseline: Option<PathBuf>,

        /// Tag as a template instead of an approved clause
        #[arg(long)]
        template: bool,
    },
}
