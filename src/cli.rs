//! Command-line interface definitions for cargo-freight.
//!
//! This module defines the CLI structure using clap, including all
//! subcommands and their arguments. The main entry point is the [`Cli`]
//! struct.
//!
//! # Example
//!
//! ```no_run
//! use cargo_freight::cli::{Cli, Commands};
//!
//! // Parse command-line arguments
//! let cli = Cli::parse_args();
//!
//! // Access the parsed command
//! match &cli.command() {
//!     Commands::Stage { version, .. } => {
//!         println!("Staging release v{version}");
//!     }
//!     _ => {}
//! }
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{FreightError, Result};

/// Main command-line interface for cargo-freight.
///
/// This struct represents the top-level CLI configuration, containing both
/// global options that apply to all commands and the specific subcommand
/// to execute.
#[derive(Parser)]
#[command(
    name = "cargo-freight",
    bin_name = "cargo-freight",
    author,
    version,
    about = "A CI tool to package release archives and aggregate test coverage",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Global options that apply to all cargo-freight commands.
#[derive(Parser)]
pub struct GlobalOpts {
    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = "CARGO_FREIGHT_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        env = "CARGO_FREIGHT_QUIET"
    )]
    quiet: bool,
}

impl GlobalOpts {
    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

impl Cli {
    /// Get the global options
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// Get the command
    pub fn command(&self) -> &Commands {
        &self.command
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    /// Parse command line arguments, handling the cargo subcommand case
    pub fn parse_args() -> Self {
        let args: Vec<String> = std::env::args().collect();

        // When invoked as `cargo freight`, cargo passes "freight" as the first
        // argument; skip it to parse the actual subcommand
        if args.len() >= 2 && args[1] == "freight" {
            let mut new_args = vec![args[0].clone()];
            new_args.extend_from_slice(&args[2..]);
            return Self::parse_from(new_args);
        }

        Self::parse()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    verbose: u8,
    quiet: bool,
    command: Option<Commands>,
}

impl CliBuilder {
    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Set the command
    pub fn command(mut self, command: Commands) -> Self {
        self.command = Some(command);
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        let command = self.command.ok_or(FreightError::ConfigError {
            message: "Command is required".to_string(),
        })?;

        Ok(Cli {
            global_opts: GlobalOpts {
                verbose: self.verbose,
                quiet: self.quiet,
            },
            command,
        })
    }
}

/// Available cargo-freight subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build one target and package it into a release archive
    ///
    /// Runs `cargo build --release --target <TRIPLE> --target-dir
    /// <TARGET_DIR>`, locates the binary at the conventional
    /// `<TARGET_DIR>/<TRIPLE>/release/` path, archives it together with the
    /// auxiliary files (tar.gz for linux targets, zip otherwise), and writes
    /// a `sha256sum`-format record next to the archive.
    #[command(disable_version_flag = true)]
    Package {
        /// Scratch directory for the target's build artifacts
        target_dir: PathBuf,

        /// Target triple to build and package (e.g. x86_64-unknown-linux-gnu)
        triple: String,

        /// Released version, used as an archive name component
        version: String,

        /// Directory the archive and hash record are written into
        out_dir: PathBuf,

        /// Name of the released package and its binary
        #[arg(short, long, env = "CARGO_FREIGHT_PACKAGE_NAME")]
        package_name: String,

        /// Auxiliary file to bundle (repeatable; defaults to README.md,
        /// LICENSE and CHANGELOG.md)
        #[arg(long = "extra-file", value_name = "FILE")]
        extra_files: Vec<PathBuf>,
    },

    /// Stage pre-built binaries for every release target into versioned zips
    ///
    /// Iterates the static target matrix, reading each binary from
    /// `<binaries-root>/v<VERSION>/<triple>/release/` and zipping it with the
    /// auxiliary files into `<release-root>/v<VERSION>/<triple>-v<VERSION>.zip`.
    /// A missing binary fails the run immediately, naming the absent path.
    #[command(disable_version_flag = true)]
    Stage {
        /// Version to stage (without the leading 'v')
        version: String,

        /// Name of the released package and its binary
        #[arg(short, long, env = "CARGO_FREIGHT_PACKAGE_NAME")]
        package_name: String,

        /// Root of the pre-built per-target binary tree
        #[arg(
            long,
            default_value = "target_releases",
            env = "CARGO_FREIGHT_BINARIES_ROOT"
        )]
        binaries_root: PathBuf,

        /// Root of the staged release tree
        #[arg(long, default_value = "releases", env = "CARGO_FREIGHT_RELEASE_ROOT")]
        release_root: PathBuf,

        /// Auxiliary file to bundle (repeatable; defaults to README.md,
        /// LICENSE and CHANGELOG.md)
        #[arg(long = "extra-file", value_name = "FILE")]
        extra_files: Vec<PathBuf>,
    },

    /// Build test binaries, run kcov on each, and merge the reports
    ///
    /// Clears the scratch directory, compiles tests with `cargo test
    /// --no-run`, discovers the produced executables from the build output,
    /// runs kcov once per binary into `<out-dir>_<i>`, then merges every
    /// per-binary directory into `<out-dir>`. Finding zero executables is a
    /// fatal error rather than an empty report.
    Coverage {
        /// Scratch directory for the test build (removed before building)
        #[arg(long, default_value = "target_cov", env = "CARGO_FREIGHT_COV_WORK_DIR")]
        work_dir: PathBuf,

        /// Directory the merged report is written into
        #[arg(
            long,
            default_value = "target_cov/cov",
            env = "CARGO_FREIGHT_COV_OUT_DIR"
        )]
        out_dir: PathBuf,

        /// kcov exclusion patterns for toolchain and system paths
        #[arg(
            long,
            default_value = "/.cargo,/usr/lib",
            env = "CARGO_FREIGHT_COV_EXCLUDE"
        )]
        exclude_pattern: String,
    },
}
