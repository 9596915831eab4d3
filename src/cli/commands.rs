//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Deep pagination over Elasticsearch
#[derive(Parser, Debug)]
#[command(name = "es-deep-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Cluster URL, overrides the settings file
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Basic auth user
    #[arg(short, long, global = true, requires = "password")]
    pub user: Option<String>,

    /// Basic auth password
    #[arg(short, long, global = true, requires = "user")]
    pub password: Option<String>,

    /// Largest offset sent per request
    #[arg(long, global = true)]
    pub max_from: Option<i64>,

    /// Largest page size sent per request
    #[arg(long, global = true)]
    pub max_size: Option<i64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page of documents at any depth
    Search {
        /// Index name or pattern
        #[arg(short, long)]
        index: String,

        /// Unique integer sort field
        #[arg(short, long)]
        sort: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Documents to skip
        #[arg(long, default_value = "0")]
        from: i64,

        /// Documents to return
        #[arg(long, default_value = "10")]
        size: i64,

        /// Query DSL as JSON (defaults to match_all)
        #[arg(short, long)]
        query: Option<String>,

        /// Source fields to return (comma-separated)
        #[arg(long, value_delimiter = ',')]
        source: Option<Vec<String>>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Count documents matching a query
    Count {
        /// Index name or pattern
        #[arg(short, long)]
        index: String,

        /// Query DSL as JSON (defaults to match_all)
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Test connection to the cluster
    Check,
}

/// Output format for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per line
    Json,
    /// Pretty-printed JSON array
    Pretty,
    /// Number of documents only
    Count,
}
