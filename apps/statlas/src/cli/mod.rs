//! # Statlas CLI Module
//!
//! This module implements the CLI interface for Statlas.
//!
//! ## Available Commands
//!
//! - `upload` - Record a data file and run the simulated upload
//! - `report` - Configure and generate report documents
//! - `deck` - Edit and export the presentation deck
//! - `sections` - List report sections and output formats
//! - `open` - Show the analysis tool handoff URL

mod commands;

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use statlas_core::StatlasError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Statlas - Analytics Workflow Studio
///
/// Demo front-end for a data-analysis pipeline. Uploads, report runs,
/// and exports are simulated end to end; the documents it writes are
/// structural JSON stand-ins.
#[derive(Parser, Debug)]
#[command(name = "statlas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show per-tick progress detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file (defaults to statlas.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a data file and run the simulated upload
    Upload {
        /// Path to the data file (.csv, .xlsx, .xls advised)
        #[arg(short, long)]
        file: PathBuf,

        /// Skip the analysis tool handoff after completion
        #[arg(long)]
        no_open: bool,
    },

    /// Configure and generate report documents
    Report {
        /// Report title (drives artifact file names)
        #[arg(short, long)]
        title: Option<String>,

        /// Free-text description embedded in the documents
        #[arg(short, long)]
        description: Option<String>,

        /// Output format (pptx, pdf, both)
        #[arg(short = 'F', long, default_value = "both")]
        format: String,

        /// Section id to include (repeatable)
        #[arg(long, value_name = "SECTION")]
        include: Vec<String>,

        /// Section id to exclude (repeatable)
        #[arg(long, value_name = "SECTION")]
        exclude: Vec<String>,

        /// Directory to write artifacts into (defaults to the configured
        /// artifact directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Edit and export the presentation deck
    Deck {
        /// Number of blank slides to append to the starter deck
        #[arg(long, default_value = "0", value_name = "COUNT")]
        add: usize,

        /// Directory to write the deck export into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List report sections and output formats
    Sections,

    /// Show the analysis tool handoff URL
    Open,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), StatlasError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;
    let verbose = cli.verbose;

    match cli.command {
        Some(Commands::Upload { file, no_open }) => {
            cmd_upload(&config, json_mode, verbose, &file, no_open).await
        }
        Some(Commands::Report {
            title,
            description,
            format,
            include,
            exclude,
            output,
        }) => {
            cmd_report(
                &config,
                json_mode,
                verbose,
                title,
                description,
                &format,
                &include,
                &exclude,
                output,
            )
            .await
        }
        Some(Commands::Deck { add, output }) => cmd_deck(&config, json_mode, add, output),
        Some(Commands::Sections) => cmd_sections(json_mode),
        Some(Commands::Open) => cmd_open(&config, json_mode),
        None => {
            // No subcommand - list the section catalog by default
            cmd_sections(json_mode)
        }
    }
}
