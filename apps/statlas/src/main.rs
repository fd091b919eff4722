//! # Statlas - Analytics Workflow Studio
//!
//! The main binary for the Statlas demo workflows.
//!
//! This application provides:
//! - CLI interface for the upload, report, and deck workflows
//! - Timer-driven pacing for the simulated runs
//! - JSON artifact output
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 apps/statlas (THE BINARY)                 │
//! │                                                           │
//! │  ┌─────────────┐   ┌──────────────┐   ┌───────────────┐  │
//! │  │   CLI       │   │  Run Driver  │   │   Artifacts   │  │
//! │  │  (clap)     │   │  (tokio)     │   │  (fs output)  │  │
//! │  └──────┬──────┘   └──────┬───────┘   └───────┬───────┘  │
//! │         │                 │                   │          │
//! │         └─────────────────┼───────────────────┘          │
//! │                           ▼                              │
//! │                  ┌─────────────────┐                     │
//! │                  │  statlas-core   │                     │
//! │                  │  (THE LOGIC)    │                     │
//! │                  └─────────────────┘                     │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Upload a data file and hand off to the analysis tool
//! statlas upload -f data.csv
//!
//! # Generate report documents
//! statlas report --title "Q3 Study" --format both
//!
//! # Export the starter deck with two extra slides
//! statlas deck --add 2
//! ```

use clap::Parser;
use statlas::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing. STATLAS_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("STATLAS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "statlas=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Statlas startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗████████╗ █████╗ ████████╗██╗      █████╗ ███████╗
  ██╔════╝╚══██╔══╝██╔══██╗╚══██╔══╝██║     ██╔══██╗██╔════╝
  ███████╗   ██║   ███████║   ██║   ██║     ███████║███████╗
  ╚════██║   ██║   ██╔══██║   ██║   ██║     ██╔══██║╚════██║
  ███████║   ██║   ██║  ██║   ██║   ███████╗██║  ██║███████║
  ╚══════╝   ╚═╝   ╚═╝  ╚═╝   ╚═╝   ╚══════╝╚═╝  ╚═╝╚══════╝

  Analytics Workflow Studio v{}

  Upload • Analyze • Present
"#,
        env!("CARGO_PKG_VERSION")
    );
}
