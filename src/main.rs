//! # cargo-freight CLI
//!
//! The command-line interface for cargo-freight, a CI tool that packages
//! release archives with SHA-256 records and aggregates kcov coverage
//! across test binaries.
//!
//! ## Installation
//!
//! ```bash
//! cargo install cargo-freight
//! # or with cargo-binstall:
//! cargo binstall cargo-freight
//! ```
//!
//! ## Commands
//!
//! - **package**: Build one target and package it into a checksummed archive
//! - **stage**: Zip pre-built binaries for every release target
//! - **coverage**: Build test binaries, run kcov on each, merge the reports
//!
//! ## Quick Start
//!
//! In your CI pipeline:
//!
//! ```bash
//! # Package a linux release
//! cargo freight package target_build x86_64-unknown-linux-gnu 1.2.3 dist -p yamis
//!
//! # Stage every release target for v1.2.3
//! cargo freight stage 1.2.3 -p yamis
//! ```
//!
//! ## Environment Variables
//!
//! - `CARGO_FREIGHT_PACKAGE_NAME`: Package/binary name for package and stage
//! - `CARGO_FREIGHT_VERBOSE`: Enable verbose output
//! - `CARGO_FREIGHT_QUIET`: Silence all output except errors
//!
//! See individual commands for more environment variables.

use std::io::IsTerminal;

use cargo_freight::cli::Cli;

fn main() -> miette::Result<()> {
    // Install miette's fancy panic and error report handler
    miette::set_panic_hook();

    // Configure miette handler based on terminal capabilities
    // This provides better error formatting for both TTY and non-TTY environments
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // Use a simpler handler for non-TTY environments (CI, logs, etc.)
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Execute the appropriate command
    let result = cargo_freight::commands::execute(&cli);

    // Convert our error type to miette's Result
    result.map_err(Into::into)
}
