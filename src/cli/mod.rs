//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Ironveil using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Ironveil - anonymising ETL for pipeline inspection records
#[derive(Parser, Debug)]
#[command(name = "ironveil")]
#[command(version, about, long_about = None)]
#[command(author = "Ironveil Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ironveil.toml", env = "IRONVEIL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "IRONVEIL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download, sanitise, and store the raw inspection table
    Process(commands::process::ProcessArgs),

    /// Serve read-only queries over the sanitised store
    Serve(commands::serve::ServeArgs),

    /// Generate a synthetic raw inspection CSV fixture
    Seed(commands::seed::SeedArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
