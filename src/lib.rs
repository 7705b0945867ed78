//! # cargo-freight
//!
//! A CI tool that packages per-target release binaries into archives with
//! SHA-256 records, and aggregates kcov coverage across a project's test
//! binaries.
//!
//! ## Overview
//!
//! cargo-freight covers the two release-time chores a CI pipeline runs after
//! `cargo build` succeeds: turning a compiled binary into a publishable,
//! checksummed archive for each target platform, and producing one merged
//! coverage report from however many test binaries the project compiles.
//!
//! ## Key Features
//!
//! - **Platform-aware archives**: tar.gz for linux targets, zip for
//!   everything else, `.exe` suffix handling for windows binaries
//! - **Checksum records**: `sha256sum`-compatible `.sha256` sidecar files
//!   written next to every archive
//! - **Multi-target staging**: a static release matrix zipped into a
//!   version-scoped tree in one invocation
//! - **Coverage aggregation**: test-binary discovery from the cargo build
//!   output, one kcov run per binary, one merged report
//! - **Fail-fast**: any external-command or filesystem failure aborts the
//!   run; partial archives and partial coverage merges are never published
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: Implementation of all cargo-freight subcommands
//! - [`error`]: Error types and handling with thiserror + miette
//! - [`archive`]: Release archive construction (tar.gz and zip)
//! - [`config`]: Package identity, auxiliary files, and the target matrix
//! - [`coverage`]: Test-binary discovery and kcov invocations
//! - [`digest`]: Streaming SHA-256 and hash-record files
//! - [`platform`]: Target-triple policy for formats and binary names
//!
//! Internal modules (not part of the public API):
//! - `logging`: Quiet/verbose progress output
//! - `process`: External command execution with status checking
//!
//! ## Usage in CI
//!
//! ```bash
//! # Build and package one target
//! cargo freight package target_build x86_64-unknown-linux-gnu 1.2.3 dist -p yamis
//!
//! # Stage all release targets for a version (binaries pre-built)
//! cargo freight stage 1.2.3 -p yamis
//!
//! # Generate and merge the coverage report
//! cargo freight coverage
//! ```
//!
//! ## Library Usage
//!
//! While cargo-freight is primarily a CLI tool, it exposes its core
//! functionality as a library so commands can be driven in-process:
//!
//! ```no_run
//! use cargo_freight::cli::{Cli, Commands};
//! use cargo_freight::commands;
//!
//! let cli = Cli::builder()
//!     .verbose(1)
//!     .command(Commands::Coverage {
//!         work_dir: "target_cov".into(),
//!         out_dir: "target_cov/cov".into(),
//!         exclude_pattern: "/.cargo,/usr/lib".into(),
//!     })
//!     .build()?;
//!
//! commands::execute(&cli)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! The crate uses a combination of:
//! - `thiserror` for strongly-typed errors
//! - `miette` for rich diagnostic output in CLI
//!
//! All public functions return `Result` types with descriptive error
//! variants; every failure is fatal and propagates to the top level.

// Re-export public modules for library usage
pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod coverage;
pub mod digest;
pub mod error;
pub mod platform;

// Internal modules
mod logging;
mod process;
