//! CLI module - Command-line interface for Cityscope
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Cityscope - cached local weather, food, movies, meetups and trails
#[derive(Parser)]
#[command(name = "cityscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    #[command(alias = "daemon", alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Resolve a place name and print the stored location
    #[command(alias = "loc")]
    Location {
        /// Free-text place name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Print cached or freshly fetched records for a place
    #[command(alias = "l")]
    Lookup {
        /// Domain to look up: weather, food, movies, meetups, trails,
        /// a comma-separated list of them, or "all"
        domain: String,
        /// Free-text place name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Delete every cached record for a place so the next lookup refetches
    #[command(alias = "rm")]
    Purge {
        /// Free-text place name, exactly as first resolved
        #[arg(required = true)]
        query: Vec<String>,
    },
}

pub use commands::*;
