//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Ordered movie catalog: load CSV data, query title ranges, export subsets
#[derive(Parser, Debug)]
#[command(name = "movietree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d (info), -dd (debug), -ddd (trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the catalog in ascending title order
    List {
        /// Catalog CSV file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Query a title range and export or print the matching subset
    Query {
        /// Catalog CSV file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Inclusive lower bound (compared against derived title keys)
        #[arg(short, long)]
        from: String,

        /// Inclusive upper bound
        #[arg(short, long)]
        to: String,

        /// Output CSV file (relative paths land in the configured output dir;
        /// omit to print to stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Skip subtrees outside the bounds instead of scanning every node
        #[arg(long)]
        pruned: bool,
    },

    /// Show the search tree structure
    Tree {
        /// Catalog CSV file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show catalog statistics
    Stats {
        /// Catalog CSV file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config path
    Path,
}
