//! CLI module
//!
//! Command-line interface over the deep pager.
//!
//! # Commands
//!
//! - `search` - Fetch one page at any depth
//! - `count` - Count matching documents
//! - `check` - Test connection to the cluster

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
