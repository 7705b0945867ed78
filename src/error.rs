//! Error types for cargo-freight.
//!
//! This module defines all error types used throughout cargo-freight, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`FreightError`]
//! - Each variant includes helpful error messages and diagnostic codes
//! - Every failure is fatal: packaging and coverage runs are either complete
//!   or not produced at all, so no variant is ever recovered from locally
//! - Errors are automatically converted to `miette::Result` for CLI output
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use cargo_freight::error::{FreightError, Result};
//!
//! fn check_binary(path: &Path) -> Result<()> {
//!     if !path.exists() {
//!         return Err(FreightError::MissingArtifact {
//!             path: path.to_path_buf(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in cargo-freight operations
#[derive(Error, Debug, Diagnostic)]
pub enum FreightError {
    /// An external command (cargo, kcov) exited with a non-zero status.
    ///
    /// The tool's own diagnostics have already gone to stderr; this error
    /// records which invocation failed and with what status. Never retried:
    /// a failed build or coverage run aborts the remaining pipeline steps.
    #[error("Command failed with {status}: {command}")]
    #[diagnostic(
        code(cargo_freight::command_failed),
        help("Inspect the tool's output above for the underlying failure.")
    )]
    CommandFailed {
        /// The command line that was invoked
        command: String,
        /// The exit status reported by the process
        status: std::process::ExitStatus,
    },

    /// An expected file was not found at its conventional path.
    ///
    /// Raised for a release binary missing from
    /// `<target-dir>/<triple>/release/` or an auxiliary file (README,
    /// LICENSE, CHANGELOG) absent from the working directory. Nothing is
    /// archived when this occurs.
    #[error("Expected file not found: '{path}'")]
    #[diagnostic(
        code(cargo_freight::missing_artifact),
        help("Ensure the build produced the file at the conventional path before packaging.")
    )]
    MissingArtifact {
        /// The path that was expected to exist
        path: PathBuf,
    },

    /// The test build produced no recognizable executable markers.
    ///
    /// Distinct from an empty success so a coverage report is never silently
    /// merged from nothing. Raised after parsing the combined output of
    /// `cargo test --no-run`.
    #[error("No test executables found in the build output")]
    #[diagnostic(
        code(cargo_freight::no_test_binaries),
        help(
            "Check that the project has tests and that `cargo test --no-run` prints 'Executable' \
             lines. A toolchain wording change breaks discovery."
        )
    )]
    NoTestBinaries,

    /// File system I/O error during cargo-freight operations.
    ///
    /// Common causes: permission denied, file not found, disk full. Used
    /// throughout for file reads, archive writes, and directory
    /// creation/removal.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(cargo_freight::io_error))]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a zip archive.
    ///
    /// Wraps errors from the zip writer, which reports its own error type
    /// on top of plain I/O failures.
    #[error("Failed to write zip archive '{path}'")]
    #[diagnostic(code(cargo_freight::zip_error))]
    ZipError {
        /// The archive being written
        path: PathBuf,
        /// The underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// Invalid or missing configuration.
    ///
    /// Raised when required parameters are absent during programmatic
    /// construction of a command.
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(cargo_freight::config::error),
        help("Check the required configuration parameters.")
    )]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FreightError>;
